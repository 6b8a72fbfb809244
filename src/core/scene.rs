// Copyright @yucwang 2026

use crate::core::bsdf::BSDF;
use crate::core::emitter::Emitter;
use crate::core::interaction::SurfaceInteraction;
use crate::core::shape::Shape;
use crate::emitters::area::AreaEmitter;
use crate::math::constants::Float;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use std::sync::Arc;

pub struct SceneObject {
    shape: Arc<dyn Shape>,
    bsdf: Arc<dyn BSDF>,
    emitter: Option<Arc<dyn Emitter>>,
    pub name: Option<String>,
}

impl SceneObject {
    pub fn new(shape: Arc<dyn Shape>, bsdf: Arc<dyn BSDF>) -> Self {
        Self { shape, bsdf, emitter: None, name: None }
    }

    /// Turns the object into an area light of constant `radiance`.
    pub fn with_emission(self, radiance: RGBSpectrum) -> Self {
        let emitter = Arc::new(AreaEmitter::from_shape(self.shape.clone(), radiance));
        self.with_emitter(emitter)
    }

    pub fn with_emitter(mut self, emitter: Arc<dyn Emitter>) -> Self {
        self.emitter = Some(emitter);
        self
    }

    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    pub fn shape(&self) -> &dyn Shape {
        self.shape.as_ref()
    }

    pub fn bsdf(&self) -> &dyn BSDF {
        self.bsdf.as_ref()
    }

    pub fn emitter(&self) -> Option<&dyn Emitter> {
        self.emitter.as_deref()
    }
}

/// Flat list of objects; every query is a linear scan.
pub struct Scene {
    objects: Vec<SceneObject>,
    emitters: Vec<Arc<dyn Emitter>>,
}

impl Scene {
    pub fn new() -> Self {
        Self { objects: Vec::new(), emitters: Vec::new() }
    }

    pub fn with_objects(objects: Vec<SceneObject>) -> Self {
        let mut scene = Self::new();
        for object in objects {
            scene.add_object(object);
        }
        scene
    }

    pub fn add_object(&mut self, object: SceneObject) {
        if let Some(emitter) = &object.emitter {
            self.emitters.push(emitter.clone());
        }
        self.objects.push(object);
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn emitters(&self) -> &[Arc<dyn Emitter>] {
        &self.emitters
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Uniformly picks one emitter; the caller compensates with `emitters().len()`.
    pub fn random_emitter(&self, u: Float) -> Option<&dyn Emitter> {
        let n = self.emitters.len();
        if n == 0 {
            return None;
        }
        let index = ((u * n as Float) as usize).min(n - 1);
        Some(self.emitters[index].as_ref())
    }

    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceInteraction<'_>> {
        let mut ray = *ray;
        let mut closest = None;
        for object in &self.objects {
            if let Some(hit) = object.shape.ray_intersection(&ray) {
                if ray.update(hit.t) {
                    closest = Some((hit, object));
                }
            }
        }

        closest.map(|(hit, object)| SurfaceInteraction::new(hit, object))
    }

    /// Occlusion query: true if anything is hit inside the ray's segment.
    pub fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.objects.iter().any(|object| object.shape.ray_intersection_t(ray))
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
