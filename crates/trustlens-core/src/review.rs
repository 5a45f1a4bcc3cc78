// crates/trustlens-core/src/review.rs
//
// User reviews and the per-domain aggregate built from them.
//
// Reviews arrive as three 1-10 slider ratings, are scaled onto the 0-100
// trust scale, and are appended to the domain's aggregate. Every average in
// the aggregate is recomputed over the full review sequence on each append.
// Each review's `overall_score` is itself a rounded mean, so `avg_overall`
// is a mean of rounded values (double rounding is intended).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TrustLensError;
use crate::record::MAX_SCORE;

/// Slider range accepted by `ReviewScores::from_slider`.
pub const SLIDER_MIN: i32 = 1;
pub const SLIDER_MAX: i32 = 10;

/// Factor that maps a 1-10 slider value onto the 0-100 scale.
const SLIDER_SCALE: i32 = 10;

/// Round-half-up mean of a sequence of scores.
///
/// Computed in integer arithmetic so the result is exact for any number of
/// inputs. Returns `None` for an empty sequence.
pub fn round_mean<I>(values: I) -> Option<u8>
where
    I: IntoIterator<Item = u8>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), v| (sum + u64::from(v), count + 1));
    if count == 0 {
        return None;
    }
    // floor(sum / count + 1/2) without leaving the integers.
    let mean = (2 * sum + count) / (2 * count);
    u8::try_from(mean).ok()
}

/// Caller-supplied ratings on the 0-100 scale, not yet validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewScores {
    pub accuracy: i32,
    pub bias: i32,
    pub trustworthiness: i32,
}

impl ReviewScores {
    /// Build scores from three 1-10 slider values, scaled by 10.
    pub fn from_slider(accuracy: i32, bias: i32, trustworthiness: i32) -> Result<Self, TrustLensError> {
        for (field, value) in [
            ("accuracy", accuracy),
            ("bias", bias),
            ("trustworthiness", trustworthiness),
        ] {
            if !(SLIDER_MIN..=SLIDER_MAX).contains(&value) {
                return Err(TrustLensError::Validation(format!(
                    "{} rating {} is outside {}-{}",
                    field, value, SLIDER_MIN, SLIDER_MAX
                )));
            }
        }
        Ok(Self {
            accuracy: accuracy * SLIDER_SCALE,
            bias: bias * SLIDER_SCALE,
            trustworthiness: trustworthiness * SLIDER_SCALE,
        })
    }

    /// Check every field lies in 0-100 and narrow them to `u8`.
    fn checked(&self) -> Result<[u8; 3], TrustLensError> {
        let mut out = [0u8; 3];
        for (slot, (field, value)) in out.iter_mut().zip([
            ("accuracy", self.accuracy),
            ("bias", self.bias),
            ("trustworthiness", self.trustworthiness),
        ]) {
            *slot = u8::try_from(value)
                .ok()
                .filter(|v| *v <= MAX_SCORE)
                .ok_or_else(|| {
                    TrustLensError::Validation(format!(
                        "{} score {} is outside 0-{}",
                        field, value, MAX_SCORE
                    ))
                })?;
        }
        Ok(out)
    }

    /// Validate that every field lies in 0-100.
    pub fn validate(&self) -> Result<(), TrustLensError> {
        self.checked().map(|_| ())
    }
}

/// One user submission, immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub accuracy: u8,
    pub bias: u8,
    pub trustworthiness: u8,
    /// round(mean(accuracy, bias, trustworthiness)).
    pub overall_score: u8,
    pub timestamp: DateTime<Utc>,
}

impl Review {
    /// Validate `scores` and stamp them with `timestamp`.
    pub fn new(scores: ReviewScores, timestamp: DateTime<Utc>) -> Result<Self, TrustLensError> {
        let [accuracy, bias, trustworthiness] = scores.checked()?;
        let overall_score = round_mean([accuracy, bias, trustworthiness])
            .ok_or_else(|| TrustLensError::Validation("empty score set".to_string()))?;
        Ok(Self {
            accuracy,
            bias,
            trustworthiness,
            overall_score,
            timestamp,
        })
    }
}

/// Running statistics of the reviews submitted for one domain.
///
/// Only exists once a domain has at least one review; absence is modelled
/// as `Option::None` by callers, never as a zero-filled aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainAggregate {
    /// Reviews in submission order. Append-only.
    pub reviews: Vec<Review>,
    pub avg_accuracy: u8,
    pub avg_bias: u8,
    pub avg_trustworthiness: u8,
    pub avg_overall: u8,
    pub total_reviews: u64,
}

impl DomainAggregate {
    /// Build an aggregate over `reviews`, recomputing every average.
    ///
    /// Returns `None` for an empty review list.
    pub fn from_reviews(reviews: Vec<Review>) -> Option<Self> {
        if reviews.is_empty() {
            return None;
        }
        Some(Self::recompute(reviews))
    }

    /// Return a new aggregate with `review` appended to `existing` (or to
    /// an empty sequence when the domain has no aggregate yet).
    pub fn appended(existing: Option<&DomainAggregate>, review: Review) -> Self {
        let mut reviews = existing.map(|a| a.reviews.clone()).unwrap_or_default();
        reviews.push(review);
        Self::recompute(reviews)
    }

    fn recompute(reviews: Vec<Review>) -> Self {
        let avg = |field: fn(&Review) -> u8| round_mean(reviews.iter().map(field)).unwrap_or(0);
        Self {
            avg_accuracy: avg(|r| r.accuracy),
            avg_bias: avg(|r| r.bias),
            avg_trustworthiness: avg(|r| r.trustworthiness),
            avg_overall: avg(|r| r.overall_score),
            total_reviews: reviews.len() as u64,
            reviews,
        }
    }

    /// True when no reviews are recorded.
    pub fn is_empty(&self) -> bool {
        self.total_reviews == 0 || self.reviews.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(a: i32, b: i32, t: i32) -> Review {
        let scores = ReviewScores {
            accuracy: a,
            bias: b,
            trustworthiness: t,
        };
        Review::new(scores, Utc::now()).unwrap()
    }

    #[test]
    fn round_mean_rounds_half_up() {
        assert_eq!(round_mean([1u8, 2]), Some(2));
        assert_eq!(round_mean([1u8, 1, 2]), Some(1));
        assert_eq!(round_mean([70u8, 80, 80]), Some(77));
        assert_eq!(round_mean([0u8]), Some(0));
        assert_eq!(round_mean(Vec::<u8>::new()), None);
    }

    #[test]
    fn round_mean_handles_many_values() {
        let values: Vec<u8> = (0..1000).map(|i| (i % 101) as u8).collect();
        let sum: u64 = values.iter().map(|v| u64::from(*v)).sum();
        let expected = (sum as f64 / values.len() as f64).round() as u8;
        assert_eq!(round_mean(values), Some(expected));
    }

    #[test]
    fn slider_values_scale_by_ten() {
        let scores = ReviewScores::from_slider(7, 5, 10).unwrap();
        assert_eq!(scores.accuracy, 70);
        assert_eq!(scores.bias, 50);
        assert_eq!(scores.trustworthiness, 100);
    }

    #[test]
    fn slider_rejects_out_of_range() {
        assert!(matches!(
            ReviewScores::from_slider(0, 5, 5),
            Err(TrustLensError::Validation(_))
        ));
        assert!(matches!(
            ReviewScores::from_slider(5, 11, 5),
            Err(TrustLensError::Validation(_))
        ));
    }

    #[test]
    fn review_computes_overall_score() {
        let r = review(70, 80, 80);
        assert_eq!(r.overall_score, 77);
        let r = review(50, 50, 50);
        assert_eq!(r.overall_score, 50);
    }

    #[test]
    fn review_rejects_invalid_scores() {
        let bad = ReviewScores {
            accuracy: 101,
            bias: 50,
            trustworthiness: 50,
        };
        assert!(matches!(
            Review::new(bad, Utc::now()),
            Err(TrustLensError::Validation(_))
        ));
        let negative = ReviewScores {
            accuracy: 50,
            bias: -1,
            trustworthiness: 50,
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn from_reviews_empty_is_none() {
        assert!(DomainAggregate::from_reviews(Vec::new()).is_none());
    }

    #[test]
    fn appended_recomputes_averages() {
        let first = DomainAggregate::appended(None, review(100, 80, 90));
        assert_eq!(first.total_reviews, 1);
        assert_eq!(first.avg_overall, 90);

        let second = DomainAggregate::appended(Some(&first), review(50, 61, 40));
        assert_eq!(second.total_reviews, 2);
        assert_eq!(second.reviews.len(), 2);
        assert_eq!(second.avg_accuracy, 75);
        // (80 + 61) / 2 = 70.5 rounds up.
        assert_eq!(second.avg_bias, 71);
        assert_eq!(second.avg_trustworthiness, 65);
        // overall scores 90 and 50.
        assert_eq!(second.avg_overall, 70);
        // The original aggregate is left untouched.
        assert_eq!(first.total_reviews, 1);
    }

    #[test]
    fn avg_overall_uses_rounded_review_scores() {
        let a = review(0, 1, 1); // 2/3 rounds to 1
        let b = review(0, 0, 0);
        let agg = DomainAggregate::from_reviews(vec![a, b]).unwrap();
        // Mean of rounded overall scores (1 + 0) / 2 = 0.5 rounds to 1, while a
        // single mean over the raw inputs (2 / 6) would round to 0.
        assert_eq!(agg.avg_overall, 1);
    }

    #[test]
    fn aggregate_serializes_camel_case() {
        let agg = DomainAggregate::appended(None, review(50, 50, 50));
        let json = serde_json::to_value(&agg).unwrap();
        assert_eq!(json["avgAccuracy"], 50);
        assert_eq!(json["avgTrustworthiness"], 50);
        assert_eq!(json["totalReviews"], 1);
        assert_eq!(json["reviews"][0]["overallScore"], 50);
    }
}
