//! Claim module - the unit of fact-checking

use std::fmt;

/// An atomic factual statement extracted from source text
///
/// Claims are produced only by the extractor and are never modified
/// afterwards. The `context` label describes what the claim refers to and is
/// carried through for display; scoring never reads it.
///
/// # Examples
///
/// ```
/// use truthlens_domain::Claim;
///
/// let claim = Claim::new("The meeting occurred in 1787", "Year of the meeting");
/// assert_eq!(claim.text, "The meeting occurred in 1787");
/// assert_eq!(claim.context, "Year of the meeting");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Claim {
    /// The factual statement itself
    pub text: String,

    /// Short free-text label describing what the claim refers to
    pub context: String,
}

impl Claim {
    /// Create a new claim
    pub fn new(text: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: context.into(),
        }
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.context.is_empty() {
            write!(f, "{}", self.text)
        } else {
            write!(f, "{} ({})", self.text, self.context)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_display_with_context() {
        let claim = Claim::new("Paris is the capital of France", "geography");
        assert_eq!(claim.to_string(), "Paris is the capital of France (geography)");
    }

    #[test]
    fn test_claim_display_without_context() {
        let claim = Claim::new("Water boils at 100 degrees Celsius", "");
        assert_eq!(claim.to_string(), "Water boils at 100 degrees Celsius");
    }
}
