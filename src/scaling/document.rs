/*!
 * Streaming rewrite of Ogre XML documents.
 *
 * The document is read event by event and written back unchanged, except
 * for the elements that sit at one of the configured paths below the root:
 * their `x`/`y`/`z` attributes are multiplied by the scale factor in place.
 */

use log::{debug, trace};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

use crate::errors::ScaleError;
use crate::scaling::coordinates::CoordinateTriple;

// @struct: Element path whose coordinates get scaled
#[derive(Debug, Clone, Copy)]
struct ScaleRule {
    // @field: Element names below the root, last one carries x/y/z
    path: &'static [&'static str],
    // @field: Only the first match per parent counts and it is required
    first_child_only: bool,
}

impl ScaleRule {
    // @returns: Name of the element owning the coordinate element
    fn parent_path(&self) -> &'static [&'static str] {
        &self.path[..self.path.len() - 1]
    }
}

const MESH_RULES: &[ScaleRule] = &[
    ScaleRule {
        path: &["submeshes", "submesh", "geometry", "vertexbuffer", "vertex", "position"],
        first_child_only: true,
    },
    ScaleRule {
        path: &["sharedgeometry", "vertexbuffer", "vertex", "position"],
        first_child_only: true,
    },
];

const SKELETON_RULES: &[ScaleRule] = &[
    ScaleRule {
        path: &["bones", "bone", "position"],
        first_child_only: false,
    },
    ScaleRule {
        path: &["animations", "animation", "tracks", "track", "keyframes", "keyframe", "translate"],
        first_child_only: false,
    },
];

/// Result of rescaling a document in memory
#[derive(Debug, Clone)]
pub struct ScaledDocument {
    /// Serialized XML
    pub xml: Vec<u8>,
    /// Number of coordinate triples that were scaled
    pub scaled_triples: usize,
}

impl ScaledDocument {
    /// The serialized document as text
    pub fn as_str(&self) -> &str {
        // Built from a &str source and UTF-8 formatted numbers
        std::str::from_utf8(&self.xml).unwrap_or_default()
    }
}

/// Scale every vertex position of a mesh document
///
/// Covers submesh geometry and shared geometry. Every vertex must have a
/// `position` child; only the first one is scaled.
pub fn process_mesh(document: &str, scale: f64) -> Result<ScaledDocument, ScaleError> {
    debug!("Processing XML mesh with scale {}", scale);
    rescale(document, scale, MESH_RULES)
}

/// Scale every bone position and keyframe translation of a skeleton document
pub fn process_skeleton(document: &str, scale: f64) -> Result<ScaledDocument, ScaleError> {
    debug!("Processing XML skeleton with scale {}", scale);
    rescale(document, scale, SKELETON_RULES)
}

// @struct: Open element on the reader stack
struct Frame {
    name: String,
    // @field: Set once a first_child_only coordinate was scaled below it
    has_coordinate: bool,
    // @field: Index among elements requiring a coordinate child
    owner_index: Option<usize>,
}

fn rescale(document: &str, scale: f64, rules: &[ScaleRule]) -> Result<ScaledDocument, ScaleError> {
    let mut reader = Reader::from_str(document);
    let mut writer = Writer::new(Vec::with_capacity(document.len()));

    let mut stack: Vec<Frame> = Vec::new();
    let mut seen_root = false;
    let mut owner_count = 0usize;
    let mut scaled_triples = 0usize;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ScaleError::Parse(format!("{} at byte {}", e, reader.buffer_position())))?;

        match event {
            Event::Start(start) => {
                let name = element_name(&start)?;
                let output = rewrite_element(&start, &name, scale, rules, &mut stack, &mut scaled_triples)?;

                let owner_index = if requires_coordinate(&stack, &name, rules) {
                    owner_count += 1;
                    Some(owner_count - 1)
                } else {
                    None
                };

                seen_root = true;
                stack.push(Frame { name, has_coordinate: false, owner_index });
                write(&mut writer, Event::Start(output))?;
            }
            Event::Empty(start) => {
                let name = element_name(&start)?;

                if requires_coordinate(&stack, &name, rules) {
                    return Err(ScaleError::MissingPosition { index: owner_count });
                }

                let output = rewrite_element(&start, &name, scale, rules, &mut stack, &mut scaled_triples)?;
                seen_root = true;
                write(&mut writer, Event::Empty(output))?;
            }
            Event::End(end) => {
                if let Some(frame) = stack.pop() {
                    if let Some(index) = frame.owner_index {
                        if !frame.has_coordinate {
                            return Err(ScaleError::MissingPosition { index });
                        }
                    }
                }
                write(&mut writer, Event::End(end))?;
            }
            Event::Eof => break,
            other => write(&mut writer, other)?,
        }
    }

    if !seen_root {
        return Err(ScaleError::Parse("document has no root element".to_string()));
    }

    if let Some(frame) = stack.last() {
        return Err(ScaleError::Parse(format!("unexpected end of document inside <{}>", frame.name)));
    }

    debug!("Scaled {} coordinate triples", scaled_triples);

    Ok(ScaledDocument {
        xml: writer.into_inner(),
        scaled_triples,
    })
}

// @returns: The element to write, scaled when it matches a rule
fn rewrite_element<'a>(
    start: &BytesStart<'a>,
    name: &str,
    scale: f64,
    rules: &[ScaleRule],
    stack: &mut [Frame],
    scaled_triples: &mut usize,
) -> Result<BytesStart<'a>, ScaleError> {
    let Some(rule) = rules.iter().find(|rule| path_matches(stack, name, rule.path)) else {
        return Ok(start.clone());
    };

    if rule.first_child_only {
        // path_matches guarantees a parent frame
        if let Some(parent) = stack.last_mut() {
            if parent.has_coordinate {
                return Ok(start.clone());
            }
            parent.has_coordinate = true;
        }
    }

    let mut triple = CoordinateTriple::from_element(start, name)?;
    triple.scale(scale);
    trace!("Scaled <{}> to {:?}", name, triple);

    let mut scaled = BytesStart::new(name.to_string());
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| ScaleError::Parse(e.to_string()))?;
        match triple.formatted_axis(attribute.key.as_ref()) {
            Some(value) => {
                let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
                scaled.push_attribute((key.as_str(), value.as_str()));
            }
            None => scaled.push_attribute(attribute),
        }
    }

    *scaled_triples += 1;
    Ok(scaled)
}

// @checks: Element `name`, opened below `stack`, sits exactly at `path`
fn path_matches(stack: &[Frame], name: &str, path: &[&str]) -> bool {
    // stack[0] is the root, which is never part of a path
    if stack.is_empty() || stack.len() != path.len() {
        return false;
    }

    let (last, ancestors) = match path.split_last() {
        Some(split) => split,
        None => return false,
    };

    *last == name
        && stack[1..]
            .iter()
            .zip(ancestors.iter())
            .all(|(frame, expected)| frame.name == *expected)
}

// @checks: Element `name` must contain a coordinate child
fn requires_coordinate(stack: &[Frame], name: &str, rules: &[ScaleRule]) -> bool {
    rules
        .iter()
        .filter(|rule| rule.first_child_only)
        .any(|rule| path_matches(stack, name, rule.parent_path()))
}

fn element_name(start: &BytesStart) -> Result<String, ScaleError> {
    std::str::from_utf8(start.name().as_ref())
        .map(str::to_string)
        .map_err(|e| ScaleError::Parse(format!("invalid element name: {}", e)))
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event) -> Result<(), ScaleError> {
    writer
        .write_event(event)
        .map_err(|e| ScaleError::Parse(format!("failed to serialize document: {}", e)))
}
