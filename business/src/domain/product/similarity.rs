use sha2::{Digest, Sha256};

/// Decides whether two image byte-streams likely depict the same item.
pub trait SimilarityMatcher: Send + Sync {
    fn evaluate(&self, captured: &[u8], reference: &[u8]) -> MatchVerdict;

    fn is_match(&self, captured: &[u8], reference: &[u8]) -> bool {
        self.evaluate(captured, reference).is_match()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatcherConfig {
    /// Length of the prefix and suffix signature windows.
    pub window_bytes: usize,
    /// Relative size difference allowed before signatures are compared.
    pub size_tolerance: f64,
    /// Stricter bound required when only one signature window agrees.
    pub strict_size_tolerance: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            window_bytes: 200,
            size_tolerance: 0.15,
            strict_size_tolerance: 0.05,
        }
    }
}

/// Which rule of the decision procedure settled the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchVerdict {
    IdenticalContent,
    SizeOutOfTolerance,
    BothWindowsMatch,
    OneWindowMatch,
    OneWindowSizeTooLoose,
    NoWindowMatch,
}

impl MatchVerdict {
    pub fn is_match(self) -> bool {
        matches!(
            self,
            MatchVerdict::IdenticalContent
                | MatchVerdict::BothWindowsMatch
                | MatchVerdict::OneWindowMatch
        )
    }
}

/// Content-hash then size-and-signature heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureMatcher {
    config: MatcherConfig,
}

impl SignatureMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }
}

impl SimilarityMatcher for SignatureMatcher {
    fn evaluate(&self, captured: &[u8], reference: &[u8]) -> MatchVerdict {
        if content_digest(captured) == content_digest(reference) {
            return MatchVerdict::IdenticalContent;
        }

        let size_difference = relative_size_difference(captured.len(), reference.len());
        if size_difference >= self.config.size_tolerance {
            return MatchVerdict::SizeOutOfTolerance;
        }

        let window = self.config.window_bytes;
        let prefix_match = prefix(captured, window) == prefix(reference, window);
        let suffix_match = suffix(captured, window) == suffix(reference, window);

        match (prefix_match, suffix_match) {
            (true, true) => MatchVerdict::BothWindowsMatch,
            (true, false) | (false, true) => {
                if size_difference < self.config.strict_size_tolerance {
                    MatchVerdict::OneWindowMatch
                } else {
                    MatchVerdict::OneWindowSizeTooLoose
                }
            }
            (false, false) => MatchVerdict::NoWindowMatch,
        }
    }
}

fn content_digest(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(bytes).into()
}

/// `|a - b| / max(a, b)`, zero when both are empty.
pub fn relative_size_difference(a: usize, b: usize) -> f64 {
    let larger = a.max(b);
    if larger == 0 {
        return 0.0;
    }
    a.abs_diff(b) as f64 / larger as f64
}

fn prefix(bytes: &[u8], window: usize) -> &[u8] {
    &bytes[..bytes.len().min(window)]
}

fn suffix(bytes: &[u8], window: usize) -> &[u8] {
    &bytes[bytes.len().saturating_sub(window)..]
}
