pub mod pg;

/// Build a file's reference code. Assigned server-side exactly once at
/// creation; opaque to everything upstream of the store.
///
/// * `company`: Company name; its first three alphanumeric characters,
///   uppercased, become the prefix.
/// * `rack_code`: Rack storage code.
/// * `category_code`: Category code.
/// * `seq`: 1-based sequence of the file within its
///   (company, rack, category) combination.
pub(crate) fn reference_code(
    company: &str,
    rack_code: &str,
    category_code: &str,
    seq: i64,
) -> String {
    let prefix = company
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(3)
        .collect::<String>()
        .to_uppercase();

    format!("{prefix}-{rack_code}-{category_code}-{seq:04}")
}
