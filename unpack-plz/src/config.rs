use serde::Deserialize;

/// Knobs exposed to the application embedding the middleware.
///
/// ```json
/// { "max_decoded_bytes": 1048576, "strict": true }
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Cap on decoded bytes handed to the handler, zero or negative disables
    /// the cap.
    pub max_decoded_bytes: i64,
    /// Reject unsupported encodings instead of passing the request through.
    pub strict: bool,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_decoded_bytes(mut self, max: i64) -> Self {
        self.max_decoded_bytes = max;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Budget in bytes, `0` when disabled.
    pub fn limit(&self) -> u64 {
        u64::try_from(self.max_decoded_bytes).unwrap_or(0)
    }
}
