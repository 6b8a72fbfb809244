// Copyright 2020 TwoCookingMice

use lumen::core::computation_node::ComputationNode;
use lumen::core::error::Result;
use lumen::core::scene_loader::load_scene;
use lumen::io::exr_utils::write_exr_to_file;
use lumen::renderers::simple::{Renderer, SimpleRenderer};

use std::env;
use std::process;

struct Options {
    input_path: String,
    output_path: String,
    spp: Option<usize>,
    seed: u64,
    show_progress: bool,
}

fn parse_args(args: &[String]) -> Option<Options> {
    if args.len() < 3 {
        return None;
    }

    let mut options = Options {
        input_path: args[1].clone(),
        output_path: args[2].clone(),
        spp: None,
        seed: 0,
        show_progress: true,
    };

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--spp" => {
                i += 1;
                options.spp = Some(args.get(i)?.parse::<usize>().ok().filter(|n| *n > 0)?);
            }
            "--seed" => {
                i += 1;
                options.seed = args.get(i)?.parse::<u64>().ok()?;
            }
            "--no-progress" => options.show_progress = false,
            other => {
                log::warn!("Ignoring unknown argument {}.", other);
            }
        }
        i += 1;
    }
    Some(options)
}

fn run(options: &Options) -> Result<()> {
    let loaded = load_scene(&options.input_path)?;
    let spp = options.spp.unwrap_or(loaded.samples_per_pixel);

    let renderer = SimpleRenderer::new(loaded.integrator, spp, options.seed)
        .with_progress(options.show_progress);
    log::info!("{}", renderer.to_string());

    let image = renderer.render(&loaded.scene, loaded.sensor.as_ref());
    write_exr_to_file(&image, &options.output_path)?;
    log::info!("Wrote {}.", options.output_path);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Some(options) => options,
        None => {
            eprintln!("Usage: {} <scene.xml> <output.exr> [--spp N] [--seed N] [--no-progress]",
                      args.first().map(|s| s.as_str()).unwrap_or("lumen"));
            process::exit(1);
        }
    };

    if let Err(err) = run(&options) {
        log::error!("{}", err);
        process::exit(1);
    }
}
