// Copyright @yucwang 2026

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::computation_node::ComputationNode;
use crate::core::error::{Error, Result};
use crate::core::integrator::Integrator;
use crate::core::properties::{Property, PropertyList};
use crate::core::scene::{Scene, SceneObject};
use crate::core::sensor::Sensor;
use crate::emitters::create_emitter;
use crate::integrators::create_integrator;
use crate::materials::create_bsdf;
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use crate::sensors::create_sensor;
use crate::shapes::create_shape;

pub struct SceneLoadResult {
    pub scene: Scene,
    pub sensor: Box<dyn Sensor>,
    pub integrator: Box<dyn Integrator>,
    pub samples_per_pixel: usize,
}

/// Element of the scene description before any plugin is built.
#[derive(Debug, Default)]
struct XmlNode {
    tag: String,
    attributes: HashMap<String, String>,
    children: Vec<XmlNode>,
}

impl XmlNode {
    fn from_start(e: &BytesStart) -> Result<Self> {
        let mut node = XmlNode {
            tag: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
            ..Default::default()
        };
        for attr in e.attributes() {
            let attr = attr.map_err(quick_xml::Error::InvalidAttr)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            node.attributes.insert(key, value);
        }
        Ok(node)
    }

    fn attribute(&self, key: &str) -> Result<&str> {
        self.attributes.get(key).map(|v| v.as_str()).ok_or_else(|| {
            Error::Parse(format!("<{}> is missing the \"{}\" attribute", self.tag, key))
        })
    }

    fn plugin_type(&self) -> Result<&str> {
        self.attribute("type")
    }
}

const PROPERTY_TAGS: &[&str] = &["float", "integer", "boolean", "string", "color", "point", "vector"];

pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<SceneLoadResult> {
    let path = path.as_ref();
    log::info!("Loading scene from: {}.", path.display());
    let xml = fs::read_to_string(path)?;
    load_scene_from_str(&xml)
}

pub fn load_scene_from_str(xml: &str) -> Result<SceneLoadResult> {
    let root = parse_xml(xml)?;
    if root.tag != "scene" {
        return Err(Error::Parse(format!("root element is <{}>, expected <scene>", root.tag)));
    }
    build_scene(&root)
}

fn parse_xml(xml: &str) -> Result<XmlNode> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Eof => break,
            Event::Start(e) => stack.push(XmlNode::from_start(&e)?),
            Event::Empty(e) => {
                let node = XmlNode::from_start(&e)?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::End(_) => {
                let node = stack.pop().ok_or_else(|| Error::Parse(String::from("unbalanced closing tag")))?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::Text(e) => {
                return Err(Error::Parse(format!("unexpected text \"{}\"", e.unescape()?)));
            }
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(Error::Parse(format!("<{}> is never closed", open.tag)));
    }
    root.ok_or_else(|| Error::Parse(String::from("document is empty")))
}

fn attach(stack: &mut Vec<XmlNode>, root: &mut Option<XmlNode>, node: XmlNode) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => return Err(Error::Parse(String::from("document has more than one root element"))),
    }
    Ok(())
}

fn build_scene(root: &XmlNode) -> Result<SceneLoadResult> {
    let mut scene = Scene::new();
    let mut sensor = None;
    let mut integrator = None;
    let mut samples_per_pixel = None;

    for child in &root.children {
        match child.tag.as_str() {
            "integrator" => {
                let built = create_integrator(child.plugin_type()?, &properties(child, &[])?)?;
                log::debug!("Created {}.", built.to_string());
                if integrator.replace(built).is_some() {
                    return Err(Error::Parse(String::from("scene declares more than one integrator")));
                }
            }
            "camera" => {
                let built = create_sensor(child.plugin_type()?, &properties(child, &[])?)?;
                log::debug!("Created {}.", built.to_string());
                if sensor.replace(built).is_some() {
                    return Err(Error::Parse(String::from("scene declares more than one camera")));
                }
            }
            "sampler" => {
                let spp = build_sampler(child)?;
                if samples_per_pixel.replace(spp).is_some() {
                    return Err(Error::Parse(String::from("scene declares more than one sampler")));
                }
            }
            "shape" => {
                let object = build_object(child)?;
                scene.add_object(object);
            }
            other => return Err(Error::Parse(format!("unexpected <{}> inside <scene>", other))),
        }
    }

    let integrator = integrator.ok_or(Error::MissingPlugin("integrator"))?;
    let sensor = sensor.ok_or(Error::MissingPlugin("camera"))?;
    if scene.is_empty() {
        log::warn!("Scene contains no shapes.");
    }
    log::info!("Scene loaded: {} objects, {} emitters.", scene.len(), scene.emitters().len());

    Ok(SceneLoadResult {
        scene,
        sensor,
        integrator,
        samples_per_pixel: samples_per_pixel.unwrap_or(1),
    })
}

fn build_sampler(node: &XmlNode) -> Result<usize> {
    let props = properties(node, &[])?;
    match node.plugin_type()? {
        "independent" => {
            let count = props.get_integer("sampleCount", 1)?;
            if count <= 0 {
                return Err(Error::InvalidProperty {
                    name: String::from("sampleCount"),
                    reason: format!("{} samples per pixel", count),
                });
            }
            Ok(count as usize)
        }
        other => Err(Error::UnknownPlugin { kind: "sampler", name: other.to_string() }),
    }
}

fn build_object(node: &XmlNode) -> Result<SceneObject> {
    let shape = create_shape(node.plugin_type()?, &properties(node, &["bsdf", "emitter"])?)?;

    let mut bsdf = None;
    let mut emitter = None;
    for child in &node.children {
        match child.tag.as_str() {
            "bsdf" => {
                let built = create_bsdf(child.plugin_type()?, &properties(child, &[])?)?;
                if bsdf.replace(built).is_some() {
                    return Err(Error::Parse(String::from("shape declares more than one bsdf")));
                }
            }
            "emitter" => {
                let built = create_emitter(child.plugin_type()?, &properties(child, &[])?, shape.clone())?;
                if emitter.replace(built).is_some() {
                    return Err(Error::Parse(String::from("shape declares more than one emitter")));
                }
            }
            _ => {}
        }
    }

    let bsdf = match bsdf {
        Some(bsdf) => bsdf,
        None => create_bsdf("diffuse", &PropertyList::new())?,
    };
    log::debug!("Created {} with {}.", shape.to_string(), bsdf.to_string());

    let mut object = SceneObject::new(shape, bsdf);
    if let Some(emitter) = emitter {
        object = object.with_emitter(emitter);
    }
    if let Some(id) = node.attributes.get("id") {
        object = object.with_name(id.clone());
    }
    Ok(object)
}

/// Collects the property children of `node`. Nested plugins listed in
/// `nested` are skipped, anything else is an error.
fn properties(node: &XmlNode, nested: &[&str]) -> Result<PropertyList> {
    let mut props = PropertyList::new();
    for child in &node.children {
        let tag = child.tag.as_str();
        if PROPERTY_TAGS.contains(&tag) {
            let name = child.attribute("name")?;
            let value = parse_property(tag, name, child.attribute("value")?)?;
            props.set(name, value)?;
        } else if !nested.contains(&tag) {
            return Err(Error::Parse(format!("unexpected <{}> inside <{}>", tag, node.tag)));
        }
    }
    Ok(props)
}

fn parse_property(tag: &str, name: &str, value: &str) -> Result<Property> {
    let property = match tag {
        "float" => Property::Float(parse_float(name, value)?),
        "integer" => Property::Integer(value.trim().parse::<i32>().map_err(|_| {
            Error::Parse(format!("property \"{}\": invalid integer \"{}\"", name, value))
        })?),
        "boolean" => match value.trim() {
            "true" => Property::Boolean(true),
            "false" => Property::Boolean(false),
            _ => return Err(Error::Parse(format!("property \"{}\": invalid boolean \"{}\"", name, value))),
        },
        "string" => Property::String(value.to_string()),
        "color" => {
            let v = parse_floats(name, value)?;
            match v.as_slice() {
                [c] => Property::Color(RGBSpectrum::splat(*c)),
                [r, g, b] => Property::Color(RGBSpectrum::new(*r, *g, *b)),
                _ => return Err(Error::Parse(format!("property \"{}\": a color needs 1 or 3 values", name))),
            }
        }
        "point" => Property::Point(parse_vector3(name, value)?),
        "vector" => Property::Vector(parse_vector3(name, value)?),
        _ => return Err(Error::Parse(format!("unknown property tag <{}>", tag))),
    };
    Ok(property)
}

fn parse_float(name: &str, value: &str) -> Result<Float> {
    value.trim().parse::<Float>()
        .map_err(|_| Error::Parse(format!("property \"{}\": invalid float \"{}\"", name, value)))
}

// Components may be separated by commas, whitespace or both.
fn parse_floats(name: &str, value: &str) -> Result<Vec<Float>> {
    value.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| parse_float(name, s))
        .collect()
}

fn parse_vector3(name: &str, value: &str) -> Result<Vector3f> {
    match parse_floats(name, value)?.as_slice() {
        [x, y, z] if [x, y, z].iter().all(|c| c.is_finite()) => Ok(Vector3f::new(*x, *y, *z)),
        [_, _, _] => Err(Error::InvalidProperty {
            name: name.to_string(),
            reason: format!("\"{}\" has non-finite components", value),
        }),
        _ => Err(Error::Parse(format!("property \"{}\": expected 3 components in \"{}\"", name, value))),
    }
}
