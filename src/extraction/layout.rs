use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::path::Path;

use crate::errors::ExtractError;

// @module: MyGUI layout parsing

const WIDGET: &[u8] = b"Widget";
const PROPERTY: &[u8] = b"Property";
const CAPTION_KEY: &str = "Caption";

/// Collect every `Caption` property value of a layout, in document order
///
/// Only `Property` elements whose parent is a `Widget` below the root are
/// considered. Values are returned unfiltered; a caption property without a
/// `value` attribute yields an empty string.
pub fn collect_captions(document: &str, file: &Path) -> Result<Vec<String>, ExtractError> {
    let parse_error = |message: String| ExtractError::Parse {
        file: file.to_path_buf(),
        message,
    };

    let mut reader = Reader::from_str(document);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut seen_root = false;
    let mut captions = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| parse_error(format!("{} at byte {}", e, reader.buffer_position())))?;

        match event {
            Event::Start(start) => {
                if is_widget_property(&stack, &start) {
                    if let Some(caption) = caption_value(&start).map_err(parse_error)? {
                        captions.push(caption);
                    }
                }
                seen_root = true;
                stack.push(start.name().as_ref().to_vec());
            }
            Event::Empty(start) => {
                if is_widget_property(&stack, &start) {
                    if let Some(caption) = caption_value(&start).map_err(parse_error)? {
                        captions.push(caption);
                    }
                }
                seen_root = true;
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(parse_error("document has no root element".to_string()));
    }

    if !stack.is_empty() {
        return Err(parse_error("unexpected end of document".to_string()));
    }

    Ok(captions)
}

// @checks: Property element directly inside a non-root Widget
fn is_widget_property(stack: &[Vec<u8>], start: &BytesStart) -> bool {
    start.name().as_ref() == PROPERTY
        && stack.len() >= 2
        && stack.last().is_some_and(|parent| parent.as_slice() == WIDGET)
}

// @returns: The value when the property key is Caption
fn caption_value(start: &BytesStart) -> Result<Option<String>, String> {
    let key = start
        .try_get_attribute("key")
        .map_err(|e| e.to_string())?;

    let is_caption = match key {
        Some(key) => key.unescape_value().map_err(|e| e.to_string())? == CAPTION_KEY,
        None => false,
    };

    if !is_caption {
        return Ok(None);
    }

    match start.try_get_attribute("value").map_err(|e| e.to_string())? {
        Some(value) => Ok(Some(value.unescape_value().map_err(|e| e.to_string())?.into_owned())),
        None => Ok(Some(String::new())),
    }
}
