//! Wire format adapters.
//!
//! A [`Format`] turns response text into typed values, typed values into
//! request text, and re-indents bodies for the logging sink. Adapters are
//! zero-sized markers picked at the call site, so `Json` and `Xml` calls
//! never inspect the response `Content-Type`.

use quick_xml::events::Event;
use quick_xml::{Reader, Writer};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{RestError, Result};

/// A pluggable wire format.
pub trait Format: Copy + Send + Sync + 'static {
    /// Short name used in error messages.
    const NAME: &'static str;

    /// Media type sent in the `Accept` header.
    const MEDIA_TYPE: &'static str;

    /// Re-indent a body for display. Input that is not well-formed is
    /// returned unchanged.
    fn pretty(body: &str) -> String;

    /// Parse a body into `T`.
    fn parse<T: DeserializeOwned>(body: &str) -> Result<T>;

    /// Serialize a value into compact wire text.
    fn serialize<T: Serialize + ?Sized>(value: &T) -> Result<String>;

    /// Serialize a value into indented text for display.
    fn serialize_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String>;
}

// ============================================================================
// JSON
// ============================================================================

/// JSON bodies (`application/json`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Json;

impl Format for Json {
    const NAME: &'static str = "JSON";
    const MEDIA_TYPE: &'static str = "application/json";

    fn pretty(body: &str) -> String {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| serde_json::to_string_pretty(&value).ok())
            .unwrap_or_else(|| body.to_string())
    }

    fn parse<T: DeserializeOwned>(body: &str) -> Result<T> {
        serde_json::from_str(body).map_err(|e| RestError::MalformedBody {
            format: Self::NAME,
            message: e.to_string(),
        })
    }

    fn serialize<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        serde_json::to_string(value).map_err(|e| RestError::Serialization {
            format: Self::NAME,
            message: e.to_string(),
        })
    }

    fn serialize_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        serde_json::to_string_pretty(value).map_err(|e| RestError::Serialization {
            format: Self::NAME,
            message: e.to_string(),
        })
    }
}

// ============================================================================
// XML
// ============================================================================

/// XML bodies (`application/xml`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Xml;

impl Format for Xml {
    const NAME: &'static str = "XML";
    const MEDIA_TYPE: &'static str = "application/xml";

    fn pretty(body: &str) -> String {
        indent_xml(body).unwrap_or_else(|| body.to_string())
    }

    fn parse<T: DeserializeOwned>(body: &str) -> Result<T> {
        quick_xml::de::from_str(body).map_err(|e| RestError::MalformedBody {
            format: Self::NAME,
            message: e.to_string(),
        })
    }

    fn serialize<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        quick_xml::se::to_string(value).map_err(|e| RestError::Serialization {
            format: Self::NAME,
            message: e.to_string(),
        })
    }

    fn serialize_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        let compact = Self::serialize(value)?;
        Ok(Self::pretty(&compact))
    }
}

/// Re-emit an XML document with two-space indentation.
///
/// Returns `None` when the input is empty or not well-formed.
fn indent_xml(body: &str) -> Option<String> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let mut depth: usize = 0;
    let mut saw_element = false;

    loop {
        match reader.read_event().ok()? {
            Event::Eof => break,
            event => {
                match &event {
                    Event::Start(_) => {
                        depth += 1;
                        saw_element = true;
                    }
                    Event::End(_) => depth = depth.checked_sub(1)?,
                    Event::Empty(_) => saw_element = true,
                    _ => {}
                }
                writer.write_event(event).ok()?;
            }
        }
    }

    if depth != 0 || !saw_element {
        return None;
    }

    String::from_utf8(writer.into_inner()).ok()
}
