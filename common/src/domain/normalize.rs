const WWW_LABEL: &str = "www.";

/// Canonicalizes a raw domain-like string into a comparable key.
///
/// Surrounding whitespace is trimmed and a leading literal `www.` label is removed.
/// Case is preserved. A `www.` that is not a leading prefix is left alone.
///
/// Stripping repeats until no leading `www.` remains, which keeps the function idempotent.
pub fn normalize(raw: &str) -> String {
    let mut current: &str = raw.trim();
    while let Some(rest) = current.strip_prefix(WWW_LABEL) {
        current = rest.trim_start();
    }
    current.to_string()
}
