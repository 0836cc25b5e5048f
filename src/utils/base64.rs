use base64::{engine::general_purpose, Engine as _};
use once_cell::sync::Lazy;
use regex::Regex;

/// Characters a Base64-wrapped subscription body may consist of.
static BASE64_BODY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9+/=\s]+$").unwrap());

/// Encodes a string to Base64 format.
pub fn base64_encode(input: &str) -> String {
    general_purpose::STANDARD.encode(input)
}

/// Decodes a Base64 string to its original form.
///
/// Whitespace is ignored. Standard and URL-safe alphabets are accepted, with
/// or without padding. Returns `None` when the input is not valid Base64.
pub fn base64_decode(input: &str) -> Option<String> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    let engines = [
        &general_purpose::STANDARD,
        &general_purpose::STANDARD_NO_PAD,
        &general_purpose::URL_SAFE,
        &general_purpose::URL_SAFE_NO_PAD,
    ];
    engines
        .iter()
        .find_map(|engine| engine.decode(&compact).ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}

/// Whether a whole subscription body looks like Base64-wrapped plaintext.
///
/// The check is the body consisting only of Base64 alphabet characters and
/// whitespace, with a total length that is a multiple of 4. Plaintext that
/// happens to satisfy both conditions is misclassified.
pub fn looks_like_base64(text: &str) -> bool {
    text.len() % 4 == 0 && BASE64_BODY.is_match(text)
}

/// Unwraps a Base64-wrapped subscription body, leaving plaintext untouched.
pub fn decode_subscription_body(text: &str) -> String {
    if !looks_like_base64(text) {
        return text.to_string();
    }
    match base64_decode(text) {
        Some(decoded) => decoded,
        None => {
            log::debug!("Subscription body matched the Base64 alphabet but failed to decode");
            text.to_string()
        }
    }
}
