//! URL encoding/decoding utilities

/// Encodes a string using URL encoding
///
/// # Examples
/// ```
/// use prosub::utils::url::url_encode;
///
/// let encoded = url_encode("Hello World!");
/// assert_eq!(encoded, "Hello%20World%21");
/// ```
pub fn url_encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// Decodes a URL-encoded string
///
/// Returns the original string if decoding fails.
///
/// # Examples
/// ```
/// use prosub::utils::url::url_decode;
///
/// let decoded = url_decode("Hello%20World%21");
/// assert_eq!(decoded, "Hello World!");
/// ```
pub fn url_decode(input: &str) -> String {
    urlencoding::decode(input)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| input.to_string())
}

/// Splits `link` at the first `#`, returning the part before it and the
/// percent-decoded, trimmed fragment (if any and non-empty).
pub fn split_fragment(link: &str) -> (&str, Option<String>) {
    match link.split_once('#') {
        Some((main, fragment)) => {
            let fragment = url_decode(fragment).trim().to_string();
            (main, (!fragment.is_empty()).then_some(fragment))
        }
        None => (link, None),
    }
}

/// Drops the brackets around an IPv6 literal host, if present.
pub fn strip_ipv6_brackets(host: &str) -> &str {
    host.strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .unwrap_or(host)
}

/// Formats a `host:port` authority, bracketing IPv6 literals.
pub fn host_port(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_fragment() {
        assert_eq!(
            split_fragment("ss://abc#My%20Node"),
            ("ss://abc", Some("My Node".to_string()))
        );
        assert_eq!(split_fragment("ss://abc#"), ("ss://abc", None));
        assert_eq!(split_fragment("ss://abc"), ("ss://abc", None));
    }

    #[test]
    fn test_decode_invalid_returns_input() {
        assert_eq!(url_decode("%E4%ZZ"), "%E4%ZZ");
    }

    #[test]
    fn test_ipv6_hosts() {
        assert_eq!(strip_ipv6_brackets("[2001:db8::1]"), "2001:db8::1");
        assert_eq!(strip_ipv6_brackets("example.com"), "example.com");
        assert_eq!(host_port("2001:db8::1", 443), "[2001:db8::1]:443");
        assert_eq!(host_port("1.2.3.4", 443), "1.2.3.4:443");
    }
}
