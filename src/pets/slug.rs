/// Lowercase ASCII slug: alphanumerics kept, runs of whitespace, hyphens and
/// underscores collapse to a single hyphen, everything else is stripped.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_hyphen = false;

    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        // A name made entirely of stripped characters still needs a stem the
        // uniqueness loop can suffix.
        return "pet".to_string();
    }

    slug
}
