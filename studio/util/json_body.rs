use std::io::Read;

use serde::de::DeserializeOwned;
use tiny_http::Request;

/// Reads the whole request body and decodes it as JSON.
/// An empty body decodes as `{}` so every-field-optional requests work.
pub fn read_json<T: DeserializeOwned>(request: &mut Request) -> Result<T, String> {
    let mut body = String::new();
    request
        .as_reader()
        .read_to_string(&mut body)
        .map_err(|e| format!("could not read request body: {e}"))?;
    let body = if body.trim().is_empty() { "{}" } else { body.as_str() };
    serde_json::from_str(body).map_err(|e| format!("invalid JSON body: {e}"))
}
