// Copyright @yucwang 2023

use crate::core::bsdf::BSDF;
use crate::core::emitter::Emitter;
use crate::core::scene::SceneObject;
use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::frame::Frame;

/// Hit record produced by a single shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeIntersection {
    pub t: Float,
    pub p: Vector3f,
    pub n: Vector3f,
    pub uv: Vector2f,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeSampleRecord {
    pub p: Vector3f,
    pub n: Vector3f,
    /// Area density.
    pub pdf: Float,
}

/// Closest hit of a scene query. Borrows the intersected object, so it lives
/// no longer than the scene.
pub struct SurfaceInteraction<'a> {
    pub t: Float,
    pub p: Vector3f,
    pub uv: Vector2f,
    pub sh_frame: Frame,
    object: &'a SceneObject,
}

impl<'a> SurfaceInteraction<'a> {
    pub fn new(hit: ShapeIntersection, object: &'a SceneObject) -> Self {
        Self {
            t: hit.t,
            p: hit.p,
            uv: hit.uv,
            sh_frame: Frame::from_normal(&hit.n),
            object,
        }
    }

    pub fn object(&self) -> &'a SceneObject {
        self.object
    }

    pub fn bsdf(&self) -> &'a dyn BSDF {
        self.object.bsdf()
    }

    pub fn emitter(&self) -> Option<&'a dyn Emitter> {
        self.object.emitter()
    }

    pub fn is_emitter(&self) -> bool {
        self.object.emitter().is_some()
    }

    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        self.sh_frame.to_local(v)
    }

    pub fn to_world(&self, v: &Vector3f) -> Vector3f {
        self.sh_frame.to_world(v)
    }
}
