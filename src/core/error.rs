// Copyright @yucwang 2026

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("failed to write OpenEXR image: {0}")]
    Exr(#[from] exr::error::Error),

    #[error("parse error: {0}")]
    Parse(String),

    /// A required parameter was not specified.
    #[error("missing property \"{0}\"")]
    MissingProperty(String),

    /// A parameter exists but holds a value of another type.
    #[error("property \"{name}\" has type {found}, expected {expected}")]
    PropertyType { name: String, expected: &'static str, found: &'static str },

    #[error("property \"{0}\" was specified multiple times")]
    DuplicateProperty(String),

    /// A parameter value the plugin cannot work with (negative radius, NaN roughness, ...).
    #[error("invalid value for \"{name}\": {reason}")]
    InvalidProperty { name: String, reason: String },

    #[error("unknown {kind} type \"{name}\"")]
    UnknownPlugin { kind: &'static str, name: String },

    #[error("scene does not specify a {0}")]
    MissingPlugin(&'static str),
}
