use crate::domain::product::similarity::MatcherConfig;

/// Largest accepted image payload after transport decoding (5 MiB).
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const DEFAULT_CODE_LENGTH: usize = 6;
pub const DEFAULT_CATEGORY: &str = "General";

/// Engine settings, built once at startup and handed to each component.
#[derive(Debug, Clone)]
pub struct IdentificationConfig {
    pub max_image_bytes: usize,
    pub code_length: usize,
    /// Draws the code generator makes before giving up.
    pub max_code_attempts: u32,
    /// Full registration retries after the store reports a code collision.
    pub max_register_attempts: u32,
    pub default_category: String,
    pub matcher: MatcherConfig,
}

impl Default for IdentificationConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            code_length: DEFAULT_CODE_LENGTH,
            max_code_attempts: 100,
            max_register_attempts: 5,
            default_category: DEFAULT_CATEGORY.to_string(),
            matcher: MatcherConfig::default(),
        }
    }
}
