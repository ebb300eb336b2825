//! JSON recovery from free-form LLM responses.
//!
//! Agents asked for JSON tend to wrap it in prose or markdown fences.
//! [`extract_json`] digs the payload out and always returns valid JSON text:
//! when nothing parses, the text itself is wrapped as `{"Response": "..."}`.

use serde_json::Value;
use tracing::warn;

/// Key used by the fallback object.
pub const FALLBACK_KEY: &str = "Response";

/// Errors from [`extract_json_value`].
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("No JSON block found in response")]
    NotFound,

    #[error("Failed to parse JSON block: {source}")]
    Invalid {
        block: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Extract a JSON value from `raw` and return it as compact JSON text.
///
/// Never fails. When no block parses, the result is
/// `{"Response": <text>}` where `<text>` is `raw` with its code fence markers
/// removed and surrounding whitespace trimmed.
///
/// ```
/// use logseg::extract::extract_json;
///
/// let raw = "Here is data: ```json\n{\"a\": 1}\n``` thanks";
/// assert_eq!(extract_json(raw), r#"{"a":1}"#);
/// assert_eq!(extract_json("no json here"), r#"{"Response":"no json here"}"#);
/// ```
pub fn extract_json(raw: &str) -> String {
    let content = strip_fences(raw);
    match parse_block(&content) {
        Ok(value) => value.to_string(),
        Err(e) => {
            match &e {
                ExtractError::NotFound => warn!("no JSON block found in response"),
                ExtractError::Invalid { block, source } => warn!(
                    error = %source,
                    block = %preview(block, 200),
                    "failed to parse JSON block"
                ),
            }
            fallback(content.trim())
        }
    }
}

/// Extract a JSON value from `raw` without the fallback.
pub fn extract_json_value(raw: &str) -> Result<Value, ExtractError> {
    parse_block(&strip_fences(raw))
}

/// Remove ```` ```json ```` markers (any case) and bare ```` ``` ```` fences.
fn strip_fences(raw: &str) -> String {
    const TAG: &[u8] = b"```json";

    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len());
    let mut copied = 0;
    let mut i = 0;
    while i + TAG.len() <= bytes.len() {
        if bytes[i..i + TAG.len()].eq_ignore_ascii_case(TAG) {
            out.push_str(&raw[copied..i]);
            i += TAG.len();
            copied = i;
        } else {
            i += 1;
        }
    }
    out.push_str(&raw[copied..]);
    out.replace("```", "")
}

/// Greedy capture from the leftmost opener to the last matching closer.
fn find_block(content: &str) -> Option<&str> {
    let object = content.find('{').zip(content.rfind('}'));
    let array = content.find('[').zip(content.rfind(']'));

    let valid = |span: Option<(usize, usize)>| span.filter(|(start, end)| start < end);
    let span = match (valid(object), valid(array)) {
        (Some(o), Some(a)) => {
            if o.0 < a.0 {
                o
            } else {
                a
            }
        }
        (Some(o), None) => o,
        (None, Some(a)) => a,
        (None, None) => return None,
    };
    Some(&content[span.0..=span.1])
}

fn parse_block(content: &str) -> Result<Value, ExtractError> {
    let block = find_block(content).ok_or(ExtractError::NotFound)?.trim();
    serde_json::from_str(block).map_err(|source| ExtractError::Invalid {
        block: block.to_string(),
        source,
    })
}

fn fallback(text: &str) -> String {
    let mut map = serde_json::Map::new();
    map.insert(FALLBACK_KEY.to_string(), Value::String(text.to_string()));
    Value::Object(map).to_string()
}

fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
