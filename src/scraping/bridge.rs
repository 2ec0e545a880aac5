use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::Value;

use crate::error::AppError;

/// Async script injected into the page to fetch a binary resource.
///
/// Page images resolve to blob URIs that are only reachable from inside the
/// document, so the request has to run there. The response body is encoded
/// to base64 in-page (the sandbox has no `Buffer`/`btoa`-for-bytes) and
/// handed back through the WebDriver callback; on a network error the
/// callback receives the numeric HTTP status instead.
pub(crate) const FETCH_SCRIPT: &str = r#"
var uri = arguments[0];
var done = arguments[1];
var ALPHABET = 'ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/';
function encode(buffer) {
    var bytes = new Uint8Array(buffer);
    var out = '';
    for (var i = 0; i < bytes.length; i += 3) {
        var chunk = (bytes[i] << 16) | ((bytes[i + 1] || 0) << 8) | (bytes[i + 2] || 0);
        out += ALPHABET[(chunk >> 18) & 63];
        out += ALPHABET[(chunk >> 12) & 63];
        out += i + 1 < bytes.length ? ALPHABET[(chunk >> 6) & 63] : '=';
        out += i + 2 < bytes.length ? ALPHABET[chunk & 63] : '=';
    }
    return out;
}
var xhr = new XMLHttpRequest();
xhr.responseType = 'arraybuffer';
xhr.onload = function () { done(encode(xhr.response)); };
xhr.onerror = function () { done(xhr.status); };
xhr.open('GET', uri);
xhr.send();
"#;

/// What the fetch script handed back: an encoded body, or the HTTP status of
/// a failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeResult {
    Payload(String),
    Status(u16),
}

impl BridgeResult {
    pub fn from_script_value(value: Value) -> Result<Self, AppError> {
        match value {
            Value::String(payload) => Ok(Self::Payload(payload)),
            Value::Number(status) => status
                .as_u64()
                .map(|s| Self::Status(s as u16))
                .ok_or_else(|| AppError::Browser(format!("non-integral fetch status: {status}"))),
            other => Err(AppError::Browser(format!(
                "unexpected fetch bridge result: {other}"
            ))),
        }
    }
}

/// Decodes the bridge's base64 payload back to raw bytes.
pub fn decode_payload(payload: &str) -> Result<Vec<u8>, AppError> {
    Ok(STANDARD.decode(payload)?)
}
