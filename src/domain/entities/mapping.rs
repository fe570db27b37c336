//! Mapping entity: a short code bound to a target URL.

/// A persisted `(code, target_url)` pair.
///
/// Mappings are create-only. Once stored, the code always resolves to the
/// same target. The target is kept verbatim and is not validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub code: String,
    pub target_url: String,
}

impl Mapping {
    /// Creates a new Mapping instance.
    pub fn new(code: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            target_url: target_url.into(),
        }
    }
}
