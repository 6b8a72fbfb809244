// Copyright @yucwang 2026

pub mod perspective;

use crate::core::error::{Error, Result};
use crate::core::properties::PropertyList;
use crate::core::sensor::Sensor;

pub fn create_sensor(name: &str, props: &PropertyList) -> Result<Box<dyn Sensor>> {
    match name {
        "perspective" => Ok(Box::new(perspective::PerspectiveCamera::from_properties(props)?)),
        _ => Err(Error::UnknownPlugin { kind: "camera", name: name.to_string() }),
    }
}
