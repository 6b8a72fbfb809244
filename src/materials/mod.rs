// Copyright @yucwang 2026

pub mod dielectric;
pub mod diffuse;
pub mod microfacet;

use crate::core::bsdf::BSDF;
use crate::core::error::{Error, Result};
use crate::core::properties::PropertyList;
use std::sync::Arc;

pub type BSDFConstructor = fn(&PropertyList) -> Result<Arc<dyn BSDF>>;

fn create_diffuse(props: &PropertyList) -> Result<Arc<dyn BSDF>> {
    Ok(Arc::new(diffuse::Diffuse::from_properties(props)?))
}

fn create_dielectric(props: &PropertyList) -> Result<Arc<dyn BSDF>> {
    Ok(Arc::new(dielectric::Dielectric::from_properties(props)?))
}

fn create_microfacet(props: &PropertyList) -> Result<Arc<dyn BSDF>> {
    Ok(Arc::new(microfacet::Microfacet::from_properties(props)?))
}

const BSDFS: &[(&str, BSDFConstructor)] = &[
    ("diffuse", create_diffuse),
    ("dielectric", create_dielectric),
    ("microfacet", create_microfacet),
];

pub fn create_bsdf(name: &str, props: &PropertyList) -> Result<Arc<dyn BSDF>> {
    match BSDFS.iter().find(|(key, _)| *key == name) {
        Some((_, constructor)) => constructor(props),
        None => Err(Error::UnknownPlugin { kind: "bsdf", name: name.to_string() }),
    }
}
