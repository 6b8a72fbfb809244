// Copyright @yucwang 2026

use std::collections::HashMap;

use crate::core::error::{Error, Result};
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;

#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    Boolean(bool),
    Integer(i32),
    Float(Float),
    String(String),
    Color(RGBSpectrum),
    Point(Vector3f),
    Vector(Vector3f),
}

impl Property {
    fn type_name(&self) -> &'static str {
        match self {
            Property::Boolean(_) => "boolean",
            Property::Integer(_) => "integer",
            Property::Float(_) => "float",
            Property::String(_) => "string",
            Property::Color(_) => "color",
            Property::Point(_) => "point",
            Property::Vector(_) => "vector",
        }
    }
}

/// Named, typed construction parameters of a plugin.
#[derive(Debug, Clone, Default)]
pub struct PropertyList {
    props: HashMap<String, Property>,
}

macro_rules! property_getters {
    ($getter:ident, $required:ident, $variant:ident, $ty:ty, $type_name:expr) => {
        pub fn $required(&self, name: &str) -> Result<$ty> {
            match self.props.get(name) {
                Some(Property::$variant(value)) => Ok(value.clone()),
                Some(other) => Err(Error::PropertyType {
                    name: name.to_string(),
                    expected: $type_name,
                    found: other.type_name(),
                }),
                None => Err(Error::MissingProperty(name.to_string())),
            }
        }

        pub fn $getter(&self, name: &str, default: $ty) -> Result<$ty> {
            match self.$required(name) {
                Err(Error::MissingProperty(_)) => Ok(default),
                other => other,
            }
        }
    };
}

impl PropertyList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: Property) -> Result<()> {
        if self.props.contains_key(name) {
            return Err(Error::DuplicateProperty(name.to_string()));
        }
        self.props.insert(name.to_string(), value);
        Ok(())
    }

    pub fn with(mut self, name: &str, value: Property) -> Result<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    property_getters!(get_boolean, boolean, Boolean, bool, "boolean");
    property_getters!(get_integer, integer, Integer, i32, "integer");
    property_getters!(get_float, float, Float, Float, "float");
    property_getters!(get_string, string, String, String, "string");
    property_getters!(get_color, color, Color, RGBSpectrum, "color");
    property_getters!(get_point, point, Point, Vector3f, "point");
    property_getters!(get_vector, vector, Vector, Vector3f, "vector");
}

#[cfg(test)]
mod tests {
    use super::{Property, PropertyList};
    use crate::core::error::Error;
    use crate::math::constants::Vector3f;

    #[test]
    fn test_defaults_and_lookup() {
        let props = PropertyList::new()
            .with("length", Property::Float(2.5)).unwrap()
            .with("center", Property::Point(Vector3f::new(1.0, 2.0, 3.0))).unwrap();

        assert_eq!(props.get_float("length", 1.0).unwrap(), 2.5);
        assert_eq!(props.get_float("radius", 1.0).unwrap(), 1.0);
        assert_eq!(props.point("center").unwrap(), Vector3f::new(1.0, 2.0, 3.0));
        assert!(matches!(props.float("radius"), Err(Error::MissingProperty(_))));
    }

    #[test]
    fn test_type_mismatch_is_error() {
        let props = PropertyList::new().with("radius", Property::Integer(3)).unwrap();
        assert!(matches!(props.get_float("radius", 1.0), Err(Error::PropertyType { .. })));
    }

    #[test]
    fn test_duplicate_is_error() {
        let mut props = PropertyList::new();
        props.set("albedo", Property::Float(0.5)).unwrap();
        assert!(matches!(props.set("albedo", Property::Float(0.7)), Err(Error::DuplicateProperty(_))));
    }
}
