//! Verdict module - discrete labels for scores
//!
//! Two closed label sets exist: one for individual claims and one for a
//! whole evaluation. Both use stable snake_case names on the wire.

use std::fmt;

/// Display tone of a verdict, used by front ends to pick a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Truthful or supported
    Positive,
    /// Uncertain, weakly supported, or unverifiable
    Cautionary,
    /// Contradicted, hallucinated, or failed
    Negative,
}

/// Verdict for a single claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimVerdict {
    /// Evidence supports the claim
    Supported,

    /// Evidence neither clearly supports nor contradicts the claim
    Uncertain,

    /// Evidence is only loosely related to the claim
    WeakSupport,

    /// Evidence contradicts the claim
    Contradicted,

    /// No evidence was retrieved for the claim
    NoEvidence,

    /// Scoring failed
    Error,
}

impl ClaimVerdict {
    /// Get the verdict name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimVerdict::Supported => "supported",
            ClaimVerdict::Uncertain => "uncertain",
            ClaimVerdict::WeakSupport => "weak_support",
            ClaimVerdict::Contradicted => "contradicted",
            ClaimVerdict::NoEvidence => "no_evidence",
            ClaimVerdict::Error => "error",
        }
    }

    /// Parse a verdict from its wire name
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "supported" => Some(ClaimVerdict::Supported),
            "uncertain" => Some(ClaimVerdict::Uncertain),
            "weak_support" => Some(ClaimVerdict::WeakSupport),
            "contradicted" => Some(ClaimVerdict::Contradicted),
            "no_evidence" => Some(ClaimVerdict::NoEvidence),
            "error" => Some(ClaimVerdict::Error),
            _ => None,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ClaimVerdict::Supported => "Supported",
            ClaimVerdict::Uncertain => "Uncertain",
            ClaimVerdict::WeakSupport => "Weak Support",
            ClaimVerdict::Contradicted => "Contradicted",
            ClaimVerdict::NoEvidence => "No Evidence",
            ClaimVerdict::Error => "Error",
        }
    }

    /// Display tone
    pub fn tone(&self) -> Tone {
        match self {
            ClaimVerdict::Supported => Tone::Positive,
            ClaimVerdict::Uncertain | ClaimVerdict::WeakSupport | ClaimVerdict::NoEvidence => {
                Tone::Cautionary
            }
            ClaimVerdict::Contradicted | ClaimVerdict::Error => Tone::Negative,
        }
    }
}

impl fmt::Display for ClaimVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ClaimVerdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid claim verdict: {}", s))
    }
}

/// Score at or above which an evaluation is highly truthful
pub const HIGHLY_TRUTHFUL_THRESHOLD: f64 = 0.75;

/// Score at or above which an evaluation is mostly truthful
pub const MOSTLY_TRUTHFUL_THRESHOLD: f64 = 0.55;

/// Score at or above which an evaluation is uncertain rather than hallucinated
pub const UNCERTAIN_THRESHOLD: f64 = 0.35;

/// Verdict for a whole evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverallVerdict {
    /// Mean score ≥ 0.75
    HighlyTruthful,

    /// Mean score ≥ 0.55
    MostlyTruthful,

    /// Mean score ≥ 0.35
    Uncertain,

    /// Mean score < 0.35
    LikelyHallucination,

    /// Nothing checkable was found in the text
    NoClaims,
}

impl OverallVerdict {
    /// Map a mean claim score onto the four-bucket verdict table
    ///
    /// # Examples
    ///
    /// ```
    /// use truthlens_domain::OverallVerdict;
    ///
    /// assert_eq!(OverallVerdict::from_score(0.95), OverallVerdict::HighlyTruthful);
    /// assert_eq!(OverallVerdict::from_score(0.55), OverallVerdict::MostlyTruthful);
    /// assert_eq!(OverallVerdict::from_score(0.0), OverallVerdict::LikelyHallucination);
    /// ```
    pub fn from_score(score: f64) -> Self {
        if score >= HIGHLY_TRUTHFUL_THRESHOLD {
            OverallVerdict::HighlyTruthful
        } else if score >= MOSTLY_TRUTHFUL_THRESHOLD {
            OverallVerdict::MostlyTruthful
        } else if score >= UNCERTAIN_THRESHOLD {
            OverallVerdict::Uncertain
        } else {
            OverallVerdict::LikelyHallucination
        }
    }

    /// Get the verdict name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallVerdict::HighlyTruthful => "highly_truthful",
            OverallVerdict::MostlyTruthful => "mostly_truthful",
            OverallVerdict::Uncertain => "uncertain",
            OverallVerdict::LikelyHallucination => "likely_hallucination",
            OverallVerdict::NoClaims => "no_claims",
        }
    }

    /// Parse a verdict from its wire name
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "highly_truthful" => Some(OverallVerdict::HighlyTruthful),
            "mostly_truthful" => Some(OverallVerdict::MostlyTruthful),
            "uncertain" => Some(OverallVerdict::Uncertain),
            "likely_hallucination" => Some(OverallVerdict::LikelyHallucination),
            "no_claims" => Some(OverallVerdict::NoClaims),
            _ => None,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            OverallVerdict::HighlyTruthful => "Highly Truthful",
            OverallVerdict::MostlyTruthful => "Mostly Truthful",
            OverallVerdict::Uncertain => "Uncertain",
            OverallVerdict::LikelyHallucination => "Likely Hallucination",
            OverallVerdict::NoClaims => "No Claims",
        }
    }

    /// Display tone
    pub fn tone(&self) -> Tone {
        match self {
            OverallVerdict::HighlyTruthful | OverallVerdict::MostlyTruthful => Tone::Positive,
            OverallVerdict::Uncertain | OverallVerdict::NoClaims => Tone::Cautionary,
            OverallVerdict::LikelyHallucination => Tone::Negative,
        }
    }
}

impl fmt::Display for OverallVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OverallVerdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid overall verdict: {}", s))
    }
}
