// Copyright @yucwang 2026

pub mod area;

use crate::core::emitter::Emitter;
use crate::core::error::{Error, Result};
use crate::core::properties::PropertyList;
use crate::core::shape::Shape;
use std::sync::Arc;

/// Emitters are attached to the shape they are declared in.
pub type EmitterConstructor = fn(&PropertyList, Arc<dyn Shape>) -> Result<Arc<dyn Emitter>>;

fn create_area(props: &PropertyList, shape: Arc<dyn Shape>) -> Result<Arc<dyn Emitter>> {
    Ok(Arc::new(area::AreaEmitter::from_properties(props, shape)?))
}

const EMITTERS: &[(&str, EmitterConstructor)] = &[
    ("area", create_area),
];

pub fn create_emitter(name: &str, props: &PropertyList, shape: Arc<dyn Shape>) -> Result<Arc<dyn Emitter>> {
    match EMITTERS.iter().find(|(key, _)| *key == name) {
        Some((_, constructor)) => constructor(props, shape),
        None => Err(Error::UnknownPlugin { kind: "emitter", name: name.to_string() }),
    }
}
