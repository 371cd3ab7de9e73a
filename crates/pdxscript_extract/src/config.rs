//! Configuration for extraction.

/// Configuration for the extraction layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Warn about statements no field descriptor claims.
    pub warn_unknown_fields: bool,

    /// Warn when a non-repeatable field appears more than once.
    pub warn_duplicate_fields: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            warn_unknown_fields: true,
            warn_duplicate_fields: true,
        }
    }
}

impl ExtractConfig {
    /// Builder method to enable/disable unknown-field warnings.
    #[must_use]
    pub const fn with_warn_unknown_fields(mut self, warn: bool) -> Self {
        self.warn_unknown_fields = warn;
        self
    }

    /// Builder method to enable/disable duplicate-field warnings.
    #[must_use]
    pub const fn with_warn_duplicate_fields(mut self, warn: bool) -> Self {
        self.warn_duplicate_fields = warn;
        self
    }
}
