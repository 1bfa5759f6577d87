//! Public URLs for catalog images.
//!
//! Stored references are reduced to their base name before being joined to
//! the uploads endpoint, so directory components (including `..`) in a
//! reference can never escape the uploads root.

/// Last non-empty path segment of `reference`, splitting on `/` and `\`.
/// `.` and `..` resolve to the empty name.
pub fn image_basename(reference: &str) -> &str {
    let name = reference
        .rsplit(['/', '\\'])
        .find(|segment| !segment.is_empty())
        .unwrap_or_default();
    match name {
        "." | ".." => "",
        name => name,
    }
}

/// `{base_url}/uploads/{basename(reference)}`.
pub fn image_url(base_url: &str, reference: &str) -> String {
    format!(
        "{}/uploads/{}",
        base_url.trim_end_matches('/'),
        image_basename(reference)
    )
}
