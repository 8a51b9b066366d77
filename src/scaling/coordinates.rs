/*!
 * Coordinate triples stored as `x`/`y`/`z` XML attributes.
 */

use quick_xml::events::BytesStart;

use crate::errors::ScaleError;

// @struct: 3D coordinate read from an element's attributes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTriple {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CoordinateTriple {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Read the `x`, `y` and `z` attributes of `start`
    ///
    /// All three must be present and parse as floating-point numbers.
    pub fn from_element(start: &BytesStart, element: &str) -> Result<Self, ScaleError> {
        Ok(Self {
            x: read_axis(start, element, "x")?,
            y: read_axis(start, element, "y")?,
            z: read_axis(start, element, "z")?,
        })
    }

    // @mutates: Multiplies every component by factor
    pub fn scale(&mut self, factor: f64) {
        self.x *= factor;
        self.y *= factor;
        self.z *= factor;
    }

    // @returns: Formatted attribute value for an axis name
    pub fn formatted_axis(&self, axis: &[u8]) -> Option<String> {
        match axis {
            b"x" => Some(format_coordinate(self.x)),
            b"y" => Some(format_coordinate(self.y)),
            b"z" => Some(format_coordinate(self.z)),
            _ => None,
        }
    }
}

/// Format a coordinate for an XML attribute
///
/// Uses the shortest representation that parses back to the same `f64`,
/// always with a decimal point or an exponent (`2.0`, `0.1`, `1e-7`).
pub fn format_coordinate(value: f64) -> String {
    format!("{:?}", value)
}

fn read_axis(start: &BytesStart, element: &str, axis: &str) -> Result<f64, ScaleError> {
    let attribute = start
        .try_get_attribute(axis)
        .map_err(|e| ScaleError::Parse(e.to_string()))?
        .ok_or_else(|| ScaleError::MissingAttribute {
            element: element.to_string(),
            attribute: axis.to_string(),
        })?;

    let value = attribute
        .unescape_value()
        .map_err(|e| ScaleError::Parse(e.to_string()))?;

    value.trim().parse::<f64>().map_err(|_| ScaleError::InvalidNumber {
        element: element.to_string(),
        attribute: axis.to_string(),
        value: value.to_string(),
    })
}
