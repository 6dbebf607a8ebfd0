//! # Confidence Score
//!
//! A semantic-equivalence confidence in `[0.0, 1.0]`. The matching
//! backend reports these as raw floats; everything past the parsing
//! boundary carries the validated newtype, so the persistence layer
//! never has to re-check the range.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A finite confidence score in `[0.0, 1.0]`.
///
/// Ordering is total (NaN is unrepresentable), so candidate mappings can
/// be sorted by confidence without a partial-ordering escape hatch.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// The zero score, used when the backend omits a confidence field.
    pub const ZERO: Confidence = Confidence(0.0);

    /// Construct a confidence, rejecting NaN, infinities, and anything
    /// outside `[0.0, 1.0]`.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::ConfidenceOutOfRange(value))
        }
    }

    /// The raw score.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Threshold acceptance: the boundary is inclusive, so a candidate
    /// scored exactly at the threshold is persisted.
    pub fn meets(&self, threshold: Confidence) -> bool {
        self.0 >= threshold.0
    }
}

impl Eq for Confidence {}

#[allow(clippy::derive_ord_xor_partial_ord)]
impl Ord for Confidence {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Finite-by-construction, so partial_cmp cannot fail.
        self.0.partial_cmp(&other.0).unwrap_or(std::cmp::Ordering::Equal)
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_bounds() {
        assert_eq!(Confidence::new(0.0).unwrap().value(), 0.0);
        assert_eq!(Confidence::new(1.0).unwrap().value(), 1.0);
        assert_eq!(Confidence::new(0.93).unwrap().value(), 0.93);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Confidence::new(-0.01).is_err());
        assert!(Confidence::new(1.01).is_err());
        assert!(Confidence::new(f64::NAN).is_err());
        assert!(Confidence::new(f64::INFINITY).is_err());
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        let t = Confidence::new(0.8).unwrap();
        assert!(Confidence::new(0.8).unwrap().meets(t));
        assert!(Confidence::new(0.81).unwrap().meets(t));
        assert!(!Confidence::new(0.79).unwrap().meets(t));
    }

    #[test]
    fn deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Confidence>("0.5").is_ok());
        assert!(serde_json::from_str::<Confidence>("1.5").is_err());
        assert!(serde_json::from_str::<Confidence>("-1").is_err());
    }

    proptest! {
        #[test]
        fn meets_agrees_with_raw_comparison(c in 0.0f64..=1.0, t in 0.0f64..=1.0) {
            let c = Confidence::new(c).unwrap();
            let t = Confidence::new(t).unwrap();
            prop_assert_eq!(c.meets(t), c.value() >= t.value());
        }

        #[test]
        fn ordering_is_total_on_valid_scores(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let ca = Confidence::new(a).unwrap();
            let cb = Confidence::new(b).unwrap();
            prop_assert_eq!(ca.cmp(&cb), a.partial_cmp(&b).unwrap());
        }
    }
}
