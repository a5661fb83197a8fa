//! Route path normalization shared by the catalog and the router.

/// Normalizes a navigation target into the form used as a table key.
///
/// Query strings and fragments are dropped, a leading slash is added, and
/// trailing slashes are removed (the root stays `/`). Repeated slashes are
/// collapsed.
pub fn normalize_path(raw: &str) -> String {
    let without_fragment = raw.split('#').next().unwrap_or_default();
    let without_query = without_fragment.split('?').next().unwrap_or_default();

    let segments: Vec<&str> = without_query
        .trim()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.is_empty() {
        return "/".to_string();
    }
    format!("/{}", segments.join("/"))
}
