use regex::Regex;
use std::sync::LazyLock;

static CONCEPT_UUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("concept UUID pattern is valid")
});

/// Checks the canonical 8-4-4-4-12 hex shape, case-insensitively.
///
/// # Examples
///
/// ```
/// use concordance_core::is_valid_concept_uuid;
///
/// assert!(is_valid_concept_uuid("4f50b156-6c50-4693-b835-02f70d3f3bc0"));
/// assert!(!is_valid_concept_uuid("not-a-uuid"));
/// ```
#[must_use]
pub fn is_valid_concept_uuid(id: &str) -> bool {
    CONCEPT_UUID.is_match(id)
}
