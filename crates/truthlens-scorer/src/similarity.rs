//! Embedding similarity scoring

use crate::config::ScorerConfig;
use crate::error::ScorerError;

/// Calculate cosine similarity between two embedding vectors
///
/// Returns 0.0 when either vector has zero magnitude.
///
/// # Errors
///
/// Returns `ScorerError::DimensionMismatch` if the vectors differ in length.
///
/// # Examples
///
/// ```
/// use truthlens_scorer::cosine_similarity;
///
/// let sim = cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]).unwrap();
/// assert!((sim - 1.0).abs() < 1e-9);
/// assert!(cosine_similarity(&[1.0], &[1.0, 2.0]).is_err());
/// ```
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, ScorerError> {
    if a.len() != b.len() {
        return Err(ScorerError::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }

    let dot_product: f64 = a.iter().zip(b).map(|(x, y)| *x as f64 * *y as f64).sum();
    let magnitude_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let magnitude_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot_product / (magnitude_a * magnitude_b))
}

/// Combined similarity of a claim against its evidence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityScore {
    /// Weighted combination of `max_similarity` and `mean_similarity`
    pub score: f64,

    /// Best snippet similarity
    pub max_similarity: f64,

    /// Mean snippet similarity
    pub mean_similarity: f64,
}

impl SimilarityScore {
    /// Combine per-snippet similarities; an empty slice scores 0.0
    pub fn from_similarities(similarities: &[f64], config: &ScorerConfig) -> Self {
        if similarities.is_empty() {
            return Self {
                score: 0.0,
                max_similarity: 0.0,
                mean_similarity: 0.0,
            };
        }

        let max_similarity = similarities.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mean_similarity = similarities.iter().sum::<f64>() / similarities.len() as f64;

        Self {
            score: combine(max_similarity, mean_similarity, config),
            max_similarity,
            mean_similarity,
        }
    }
}

/// `max_weight * max + mean_weight * mean`
pub(crate) fn combine(max_similarity: f64, mean_similarity: f64, config: &ScorerConfig) -> f64 {
    config.max_similarity_weight * max_similarity + config.mean_similarity_weight * mean_similarity
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cosine_similarity_identical() {
        let vec = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&vec, &vec).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let sim = cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]).unwrap();
        assert!((sim + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_dimension_mismatch_is_error() {
        let err = cosine_similarity(&[1.0, 0.0, 0.0], &[1.0]).unwrap_err();
        assert!(matches!(err, ScorerError::DimensionMismatch { expected: 3, found: 1 }));
    }

    #[test]
    fn test_weighted_combination() {
        let score = SimilarityScore::from_similarities(&[1.0, 0.5, 0.0], &ScorerConfig::default());
        assert_eq!(score.max_similarity, 1.0);
        assert!((score.mean_similarity - 0.5).abs() < 1e-12);
        assert!((score.score - 0.85).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_score_monotonic_in_max(
            max in 0.0f64..=1.0,
            mean in 0.0f64..=1.0,
            bump in 0.0f64..=1.0,
        ) {
            let config = ScorerConfig::default();
            prop_assert!(combine(max + bump, mean, &config) >= combine(max, mean, &config));
        }

        #[test]
        fn prop_score_monotonic_in_mean(
            max in 0.0f64..=1.0,
            mean in 0.0f64..=1.0,
            bump in 0.0f64..=1.0,
        ) {
            let config = ScorerConfig::default();
            prop_assert!(combine(max, mean + bump, &config) >= combine(max, mean, &config));
        }

        #[test]
        fn prop_verdict_monotonic(a in -1.0f64..=1.0, b in -1.0f64..=1.0) {
            let config = ScorerConfig::default();
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(rank(config.similarity_verdict(high)) >= rank(config.similarity_verdict(low)));
        }

        #[test]
        fn prop_cosine_bounded(v in prop::collection::vec(-10.0f32..10.0, 1..16)) {
            let w: Vec<f32> = v.iter().rev().cloned().collect();
            let sim = cosine_similarity(&v, &w).unwrap();
            prop_assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&sim));
        }
    }

    fn rank(verdict: truthlens_domain::ClaimVerdict) -> u8 {
        use truthlens_domain::ClaimVerdict::*;
        match verdict {
            Contradicted => 0,
            WeakSupport => 1,
            Uncertain => 2,
            Supported => 3,
            NoEvidence | Error => unreachable!(),
        }
    }
}
