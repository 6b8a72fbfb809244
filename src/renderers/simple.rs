// Copyright @yucwang 2021

use crate::core::computation_node::ComputationNode;
use crate::core::integrator::Integrator;
use crate::core::sampler::{IndependentSampler, Sampler};
use crate::core::scene::Scene;
use crate::core::sensor::Sensor;
use crate::math::bitmap::Bitmap;
use crate::math::constants::{Float, Vector2f};
use crate::math::spectrum::RGBSpectrum;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

pub use super::renderer::Renderer;

const BLOCK_SIZE: usize = 32;

struct Block {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
    pixels: Vec<RGBSpectrum>,
    invalid_samples: usize,
}

/// Renders the image in square blocks handed out to one worker per core.
pub struct SimpleRenderer {
    integrator: Box<dyn Integrator>,
    samples_per_pixel: usize,
    seed: u64,
    show_progress: bool,
}

impl SimpleRenderer {
    pub fn new(integrator: Box<dyn Integrator>, samples_per_pixel: usize, seed: u64) -> Self {
        Self {
            integrator,
            samples_per_pixel: samples_per_pixel.max(1),
            seed,
            show_progress: true,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn render_block(&self, scene: &Scene, sensor: &dyn Sensor,
                    x0: usize, y0: usize, x1: usize, y1: usize) -> Block {
        let (width, height) = sensor.resolution();
        let inv_spp = 1.0 / (self.samples_per_pixel as Float);
        let mut pixels = vec![RGBSpectrum::zero(); (x1 - x0) * (y1 - y0)];
        let mut invalid_samples = 0;

        for y in y0..y1 {
            for x in x0..x1 {
                // One stream per pixel keeps images independent of the thread schedule.
                let mut sampler = IndependentSampler::new(self.seed, (y * width + x) as u64);
                let mut color = RGBSpectrum::zero();
                for _ in 0..self.samples_per_pixel {
                    let jitter = sampler.next_2d();
                    let u = Vector2f::new((x as Float + jitter.x) / width as Float,
                                          (y as Float + jitter.y) / height as Float);
                    let ray = sensor.sample_ray(&u);
                    let value = self.integrator.li(scene, &mut sampler, &ray);
                    if value.is_valid() {
                        color += value;
                    } else {
                        invalid_samples += 1;
                    }
                }
                pixels[(x - x0) + (x1 - x0) * (y - y0)] = color * inv_spp;
            }
        }

        Block { x0, y0, x1, y1, pixels, invalid_samples }
    }
}

impl ComputationNode for SimpleRenderer {
    fn to_string(&self) -> String {
        format!("SimpleRenderer[integrator: {}, spp: {}, seed: {}]",
                self.integrator.to_string(), self.samples_per_pixel, self.seed)
    }
}

impl Renderer for SimpleRenderer {
    fn render(&self, scene: &Scene, sensor: &dyn Sensor) -> Bitmap {
        let (width, height) = sensor.resolution();
        let mut bitmap = Bitmap::new(width, height);
        if width == 0 || height == 0 {
            return bitmap;
        }

        let blocks_x = (width + BLOCK_SIZE - 1) / BLOCK_SIZE;
        let blocks_y = (height + BLOCK_SIZE - 1) / BLOCK_SIZE;
        let total_blocks = blocks_x * blocks_y;

        let progress = if self.show_progress {
            ProgressBar::new(total_blocks as u64)
        } else {
            ProgressBar::hidden()
        };
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} blocks")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let next_block = AtomicUsize::new(0);
        let thread_count = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(total_blocks);
        log::info!("Rendering {}x{} at {} spp on {} threads.",
                   width, height, self.samples_per_pixel, thread_count);

        let (tx, rx) = mpsc::channel::<Block>();
        let mut invalid_samples = 0usize;

        thread::scope(|scope| {
            for _ in 0..thread_count {
                let next_block = &next_block;
                let tx = tx.clone();
                scope.spawn(move || {
                    loop {
                        let block_index = next_block.fetch_add(1, Ordering::Relaxed);
                        if block_index >= total_blocks {
                            break;
                        }

                        let x0 = (block_index % blocks_x) * BLOCK_SIZE;
                        let y0 = (block_index / blocks_x) * BLOCK_SIZE;
                        let x1 = (x0 + BLOCK_SIZE).min(width);
                        let y1 = (y0 + BLOCK_SIZE).min(height);

                        let block = self.render_block(scene, sensor, x0, y0, x1, y1);
                        if tx.send(block).is_err() {
                            break;
                        }
                    }
                });
            }

            drop(tx);
            for block in rx.iter() {
                for y in block.y0..block.y1 {
                    for x in block.x0..block.x1 {
                        bitmap[(x, y)] = block.pixels[(x - block.x0) + (block.x1 - block.x0) * (y - block.y0)];
                    }
                }
                invalid_samples += block.invalid_samples;
                progress.inc(1);
            }
        });
        progress.finish_and_clear();

        if invalid_samples > 0 {
            log::warn!("Dropped {} samples with negative or non-finite radiance.", invalid_samples);
        }
        log::info!("Rendering finished.");
        bitmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Result;
    use crate::core::properties::PropertyList;
    use crate::core::sampler::Sampler;
    use crate::integrators::create_integrator;
    use crate::math::constants::Vector3f;
    use crate::math::ray::Ray3f;
    use crate::sensors::perspective::PerspectiveCamera;

    struct NanIntegrator;

    impl ComputationNode for NanIntegrator {
        fn to_string(&self) -> String {
            String::from("NanIntegrator")
        }
    }

    impl Integrator for NanIntegrator {
        fn li(&self, _scene: &Scene, sampler: &mut dyn Sampler, _ray: &Ray3f) -> RGBSpectrum {
            if sampler.next_1d() < 0.5 {
                RGBSpectrum::splat(Float::NAN)
            } else {
                RGBSpectrum::one()
            }
        }
    }

    fn camera(width: usize, height: usize) -> PerspectiveCamera {
        PerspectiveCamera::new(Vector3f::new(0.0, 0.0, 5.0), Vector3f::zeros(),
                               Vector3f::new(0.0, 1.0, 0.0), 0.5, width, height, 1e-4, 1e4)
    }

    #[test]
    fn test_simple_renderer_covers_every_pixel() -> Result<()> {
        // Blocks that do not divide the film evenly.
        let integrator = create_integrator("av", &PropertyList::new())?;
        let renderer = SimpleRenderer::new(integrator, 2, 7).with_progress(false);
        let image = renderer.render(&Scene::new(), &camera(45, 37));

        assert_eq!(image.width(), 45);
        assert_eq!(image.height(), 37);
        assert!(image.pixels().iter().all(|p| *p == RGBSpectrum::one()));
        Ok(())
    }

    #[test]
    fn test_simple_renderer_is_deterministic() {
        let render = || {
            SimpleRenderer::new(Box::new(NanIntegrator), 4, 11)
                .with_progress(false)
                .render(&Scene::new(), &camera(40, 8))
        };
        let a = render();
        let b = render();

        assert_eq!(a.pixels(), b.pixels());
        // Invalid samples are dropped, not averaged in.
        assert!(a.pixels().iter().all(|p| p.is_valid() && p.r() <= 1.0));
    }
}
