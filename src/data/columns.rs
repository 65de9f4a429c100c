// ---------------------------------------------------------------------------
// Selectable marker columns
// ---------------------------------------------------------------------------

/// Column-name prefixes that never appear in the marker selector: study
/// metadata, geometry, identifiers and the spatial coordinates themselves.
pub const EXCLUDED_PREFIXES: [&str; 8] = [
    "Study level",
    "Distance",
    "Area",
    "LayerData",
    "Name",
    "X",
    "Y",
    "Image",
];

/// Whether a column may be chosen as the marker.
pub fn is_selectable(name: &str) -> bool {
    !EXCLUDED_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// The marker candidates among `names`, in their original order.
pub fn selectable_columns<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    names
        .iter()
        .map(|n| n.as_ref())
        .filter(|n| is_selectable(n))
        .map(str::to_string)
        .collect()
}
