//! URL helpers.

/// Join URL segments with exactly one `/` between them.
///
/// Leading slash of `base` is kept; an empty result is `/`.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    match (base.is_empty(), path.is_empty()) {
        (true, true) => "/".to_owned(),
        (true, false) => format!("/{path}"),
        (false, true) => base.to_owned(),
        (false, false) => format!("{base}/{path}"),
    }
}
