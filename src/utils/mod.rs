use axum::http::{header, HeaderMap};
use percent_encoding::percent_decode;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Whether the request body is an urlencoded form
pub fn is_urlencoded(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
        .unwrap_or(false)
}

/// First value of `key` in an urlencoded string, decoded to raw bytes.
///
/// Later duplicates are ignored and percent-escapes are not required to
/// form valid UTF-8. A key without `=` yields an empty value.
pub fn form_value(encoded: &[u8], key: &str) -> Option<Vec<u8>> {
    encoded
        .split(|&b| b == b'&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (name, value) = match pair.iter().position(|&b| b == b'=') {
                Some(eq) => (&pair[..eq], &pair[eq + 1..]),
                None => (pair, &[][..]),
            };
            (decode_component(name) == key.as_bytes()).then(|| decode_component(value))
        })
}

fn decode_component(raw: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = raw.iter().map(|&b| if b == b'+' { b' ' } else { b }).collect();
    percent_decode(&spaced).collect()
}
