/// Identifying code printed on (or scanned from) a physical item.
///
/// Issued codes are fixed-length numeric strings; codes read back from a scan
/// are wrapped as-is and simply fail to resolve when malformed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductCode(String);

impl ProductCode {
    /// Creates a new ProductCode from any type that can be converted into a String.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the code has exactly `length` ASCII digits.
    pub fn is_well_formed(&self, length: usize) -> bool {
        self.0.len() == length && self.0.bytes().all(|b| b.is_ascii_digit())
    }

    /// Name of the rendered symbol asset for this code.
    pub fn symbol_asset_name(&self) -> String {
        format!("{}.png", self.0)
    }
}

impl std::fmt::Display for ProductCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
