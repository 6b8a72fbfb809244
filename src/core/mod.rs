// Copyright @yucwang 2021

pub mod bsdf;
pub mod computation_node;
pub mod emitter;
pub mod error;
pub mod integrator;
pub mod interaction;
pub mod properties;
pub mod sampler;
pub mod sensor;
pub mod scene;
pub mod scene_loader;
pub mod shape;
