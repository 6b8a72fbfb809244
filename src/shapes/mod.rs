// Copyright @yucwang 2026

pub mod rectangle;
pub mod sphere;

use crate::core::error::{Error, Result};
use crate::core::properties::PropertyList;
use crate::core::shape::Shape;
use std::sync::Arc;

pub type ShapeConstructor = fn(&PropertyList) -> Result<Arc<dyn Shape>>;

fn create_sphere(props: &PropertyList) -> Result<Arc<dyn Shape>> {
    Ok(Arc::new(sphere::Sphere::from_properties(props)?))
}

fn create_rectangle(props: &PropertyList) -> Result<Arc<dyn Shape>> {
    Ok(Arc::new(rectangle::Rectangle::from_properties(props)?))
}

const SHAPES: &[(&str, ShapeConstructor)] = &[
    ("sphere", create_sphere),
    ("rectangle", create_rectangle),
];

pub fn create_shape(name: &str, props: &PropertyList) -> Result<Arc<dyn Shape>> {
    match SHAPES.iter().find(|(key, _)| *key == name) {
        Some((_, constructor)) => constructor(props),
        None => Err(Error::UnknownPlugin { kind: "shape", name: name.to_string() }),
    }
}
