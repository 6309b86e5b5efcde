//! Aggregation of per-claim scores into an overall verdict
//!
//! The overall score is the unweighted arithmetic mean of claim scores;
//! claim importance is not modeled. The verdict follows the four-bucket
//! table in [`OverallVerdict::from_score`].

use crate::{ClaimResult, OverallVerdict};

/// Summary of a set of claim results
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    /// Mean claim score
    pub overall_score: f64,

    /// Overall verdict
    pub verdict: OverallVerdict,

    /// Number of claim results aggregated
    pub total_claims: usize,

    /// `overall_score * 100`
    pub percentage_score: f64,
}

/// Aggregate claim results into an overall score and verdict
///
/// # Examples
///
/// ```
/// use truthlens_domain::{aggregate, OverallVerdict};
///
/// let summary = aggregate(&[]);
/// assert_eq!(summary.verdict, OverallVerdict::NoClaims);
/// assert_eq!(summary.total_claims, 0);
/// ```
pub fn aggregate(claim_results: &[ClaimResult]) -> Aggregate {
    if claim_results.is_empty() {
        return Aggregate {
            overall_score: 0.0,
            verdict: OverallVerdict::NoClaims,
            total_claims: 0,
            percentage_score: 0.0,
        };
    }

    let total: f64 = claim_results.iter().map(|r| r.score).sum();
    let overall_score = total / claim_results.len() as f64;

    Aggregate {
        overall_score,
        verdict: OverallVerdict::from_score(overall_score),
        total_claims: claim_results.len(),
        percentage_score: overall_score * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Claim, ClaimVerdict};
    use proptest::prelude::*;

    fn result_with_score(score: f64) -> ClaimResult {
        ClaimResult::new(
            &Claim::new("claim", "context"),
            score,
            ClaimVerdict::Supported,
            score,
            "",
        )
    }

    #[test]
    fn test_single_claim() {
        let summary = aggregate(&[result_with_score(0.95)]);
        assert_eq!(summary.overall_score, 0.95);
        assert_eq!(summary.percentage_score, 95.0);
        assert_eq!(summary.verdict, OverallVerdict::HighlyTruthful);
        assert_eq!(summary.total_claims, 1);
    }

    #[test]
    fn test_mean_is_unweighted() {
        let summary = aggregate(&[
            result_with_score(1.0),
            result_with_score(0.3),
            result_with_score(0.2),
        ]);
        assert!((summary.overall_score - 0.5).abs() < 1e-12);
        assert_eq!(summary.verdict, OverallVerdict::Uncertain);
    }

    #[test]
    fn test_all_zero_is_hallucination() {
        let summary = aggregate(&[result_with_score(0.0), result_with_score(0.0)]);
        assert_eq!(summary.verdict, OverallVerdict::LikelyHallucination);
    }

    #[test]
    fn test_out_of_range_scores_pass_through() {
        // Upstream judgments are not clamped.
        let summary = aggregate(&[result_with_score(1.4)]);
        assert_eq!(summary.overall_score, 1.4);
        assert_eq!(summary.verdict, OverallVerdict::HighlyTruthful);
    }

    proptest! {
        #[test]
        fn prop_percentage_is_score_times_hundred(scores in prop::collection::vec(0.0f64..=1.0, 0..20)) {
            let results: Vec<_> = scores.iter().map(|s| result_with_score(*s)).collect();
            let summary = aggregate(&results);
            prop_assert_eq!(summary.percentage_score, summary.overall_score * 100.0);
            prop_assert_eq!(summary.total_claims, results.len());
        }

        #[test]
        fn prop_overall_is_mean(scores in prop::collection::vec(0.0f64..=1.0, 1..20)) {
            let results: Vec<_> = scores.iter().map(|s| result_with_score(*s)).collect();
            let summary = aggregate(&results);
            let expected = scores.iter().sum::<f64>() / scores.len() as f64;
            prop_assert!((summary.overall_score - expected).abs() < 1e-12);
            prop_assert_eq!(summary.verdict, OverallVerdict::from_score(summary.overall_score));
        }

        #[test]
        fn prop_overall_within_bounds(scores in prop::collection::vec(0.0f64..=1.0, 1..20)) {
            let results: Vec<_> = scores.iter().map(|s| result_with_score(*s)).collect();
            let summary = aggregate(&results);
            let min = scores.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(summary.overall_score >= min - 1e-12);
            prop_assert!(summary.overall_score <= max + 1e-12);
        }
    }
}
