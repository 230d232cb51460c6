use serde_json::Value;
use tracing::debug;

/// Payload key carrying the free-space count.
pub const FREE_SPACES_KEY: &str = "otopark_bos_alan";
/// Payload key carrying the advisory text.
pub const INFO_TEXT_KEY: &str = "bilgilendirme";

/// Fields extracted from a payload on a best-effort basis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFields {
    pub free_spaces: Option<String>,
    pub info_text: Option<String>,
}

/// Best-effort extraction of the recognized fields from a textual payload.
///
/// The payload is expected to be a JSON object but nothing is guaranteed:
/// invalid JSON, a non-object top level, a missing key, or a non-string value
/// all leave the affected fields empty. Parsing is advisory and never fails.
pub fn parse_payload(raw: &str) -> ParsedFields {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            debug!("Payload is not JSON, storing without parsed fields: {}", e);
            return ParsedFields::default();
        }
    };

    let Some(object) = value.as_object() else {
        debug!("Payload JSON is not an object, storing without parsed fields");
        return ParsedFields::default();
    };

    // A non-string value under a known key counts as absent, not as an error.
    ParsedFields {
        free_spaces: object
            .get(FREE_SPACES_KEY)
            .and_then(Value::as_str)
            .map(str::to_string),
        info_text: object
            .get(INFO_TEXT_KEY)
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}
