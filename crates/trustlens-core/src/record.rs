// crates/trustlens-core/src/record.rs
//
// Static trust records and the merged view shown to the user.
//
// A `TrustRecord` comes from the static trust database and is never mutated
// at runtime. A `MergedRecord` is recomputed on demand from a `TrustRecord`
// and the domain's review aggregate, and is never persisted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TrustLensError;

/// Sentinel domain key returned when a URL matches no trust database entry.
pub const DEFAULT_DOMAIN_KEY: &str = "default";

/// Upper bound of every 0-100 score.
pub const MAX_SCORE: u8 = 100;

/// Base trust attributes for one domain, as shipped in the trust database.
///
/// JSON shape: `{ name, trustScore, reputation, accuracy, bias,
/// transparency, userEngagement, totalReviews }`. `trustScore` may be
/// `null` or absent for sources with no known score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustRecord {
    /// Display name of the source.
    pub name: String,
    /// Overall trust score (0-100), `None` when unknown.
    #[serde(default)]
    pub trust_score: Option<u8>,
    pub reputation: u8,
    pub accuracy: u8,
    pub bias: u8,
    pub transparency: u8,
    pub user_engagement: u8,
    /// Base review count, independent of locally submitted reviews.
    pub total_reviews: u64,
}

impl TrustRecord {
    /// Check that every score lies in 0-100.
    pub fn validate(&self) -> Result<(), TrustLensError> {
        let scores = [
            ("trustScore", self.trust_score),
            ("reputation", Some(self.reputation)),
            ("accuracy", Some(self.accuracy)),
            ("bias", Some(self.bias)),
            ("transparency", Some(self.transparency)),
            ("userEngagement", Some(self.user_engagement)),
        ];
        for (field, value) in scores {
            if let Some(v) = value {
                if v > MAX_SCORE {
                    return Err(TrustLensError::Validation(format!(
                        "{} for '{}' is {}, expected 0-{}",
                        field, self.name, v, MAX_SCORE
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Categorical label derived from an effective trust score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustStatus {
    /// Score >= 80.
    Trusted,
    /// 60 <= score < 80.
    Moderate,
    /// Score < 60.
    Untrusted,
    /// No score available.
    Unknown,
}

impl TrustStatus {
    /// Derive the status for an optional score.
    pub fn from_score(score: Option<u8>) -> Self {
        match score {
            None => TrustStatus::Unknown,
            Some(s) if s >= 80 => TrustStatus::Trusted,
            Some(s) if s >= 60 => TrustStatus::Moderate,
            Some(_) => TrustStatus::Untrusted,
        }
    }

    /// Stable lowercase tag (`trusted`, `moderate`, `untrusted`, `unknown`).
    pub fn as_str(&self) -> &'static str {
        match self {
            TrustStatus::Trusted => "trusted",
            TrustStatus::Moderate => "moderate",
            TrustStatus::Untrusted => "untrusted",
            TrustStatus::Unknown => "unknown",
        }
    }

    /// Human-readable badge text.
    pub fn headline(&self) -> &'static str {
        match self {
            TrustStatus::Trusted => "Trusted Source",
            TrustStatus::Moderate => "Moderate Trust",
            TrustStatus::Untrusted => "Low Trust",
            TrustStatus::Unknown => "Unknown Source",
        }
    }
}

impl fmt::Display for TrustStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trust record blended with the domain's user review aggregate.
///
/// `name`, `reputation`, `transparency` and `user_engagement` always come
/// from the base record. `trust_score`, `accuracy` and `bias` come from the
/// aggregate when at least one review exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedRecord {
    pub name: String,
    pub trust_score: Option<u8>,
    pub reputation: u8,
    pub accuracy: u8,
    pub bias: u8,
    pub transparency: u8,
    pub user_engagement: u8,
    /// Base review count plus locally submitted reviews.
    pub total_reviews: u64,
    /// Number of locally submitted reviews folded into this record.
    pub user_reviews: u64,
    pub status: TrustStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "name": "Example News",
            "trustScore": 72,
            "reputation": 80,
            "accuracy": 70,
            "bias": 65,
            "transparency": 75,
            "userEngagement": 60,
            "totalReviews": 1200
        }"#
    }

    #[test]
    fn status_thresholds() {
        assert_eq!(TrustStatus::from_score(Some(100)), TrustStatus::Trusted);
        assert_eq!(TrustStatus::from_score(Some(80)), TrustStatus::Trusted);
        assert_eq!(TrustStatus::from_score(Some(79)), TrustStatus::Moderate);
        assert_eq!(TrustStatus::from_score(Some(60)), TrustStatus::Moderate);
        assert_eq!(TrustStatus::from_score(Some(59)), TrustStatus::Untrusted);
        assert_eq!(TrustStatus::from_score(Some(50)), TrustStatus::Untrusted);
        assert_eq!(TrustStatus::from_score(Some(0)), TrustStatus::Untrusted);
        assert_eq!(TrustStatus::from_score(None), TrustStatus::Unknown);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&TrustStatus::Moderate).unwrap();
        assert_eq!(json, "\"moderate\"");
        assert_eq!(TrustStatus::Untrusted.to_string(), "untrusted");
        assert_eq!(TrustStatus::Untrusted.headline(), "Low Trust");
    }

    #[test]
    fn trust_record_parses_camel_case() {
        let record: TrustRecord = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(record.name, "Example News");
        assert_eq!(record.trust_score, Some(72));
        assert_eq!(record.user_engagement, 60);
        assert_eq!(record.total_reviews, 1200);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn null_trust_score_is_unknown() {
        let json = r#"{"name":"Unknown Source","trustScore":null,"reputation":0,
            "accuracy":0,"bias":0,"transparency":0,"userEngagement":0,"totalReviews":0}"#;
        let record: TrustRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.trust_score, None);
    }

    #[test]
    fn out_of_range_score_fails_validation() {
        let mut record: TrustRecord = serde_json::from_str(sample_json()).unwrap();
        record.transparency = 101;
        assert!(matches!(
            record.validate(),
            Err(TrustLensError::Validation(_))
        ));
    }
}
