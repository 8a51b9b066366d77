use std::io::{self, Write};

// @module: Translation template (POT) stanzas

/// Escape a value for a gettext double-quoted string
pub fn escape_po_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Format one `msgid`/`msgstr` stanza followed by a blank line
pub fn format_entry(value: &str) -> String {
    format!("msgid \"{}\"\nmsgstr \"\"\n\n", escape_po_string(value))
}

/// Write one stanza to `writer`
pub fn write_entry<W: Write>(writer: &mut W, value: &str) -> io::Result<()> {
    writer.write_all(format_entry(value).as_bytes())
}
