//! Tunable scoring weights, rate bands and loan terms.
//!
//! `EligibilityPolicy::default()` reproduces the house policy. Any field can
//! be overridden from a partial JSON/YAML document thanks to
//! `#[serde(default)]`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CreditApprovalError;
use crate::types::{Months, Rate};
use crate::CreditApprovalResult;

/// One approval band. A score strictly above `above_score` lands here
/// unless a higher band already matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateBand {
    pub above_score: u32,
    /// Applied to the customer's approved limit to obtain the band rate.
    pub limit_multiplier: Decimal,
    /// Lower bound on the band rate before the global floor.
    pub minimum_rate: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityPolicy {
    /// Awarded when any EMI has been paid on time.
    pub on_time_points: u32,
    /// Awarded when the customer has no loans at all.
    pub no_history_points: u32,
    /// Awarded for 1..=`light_history_max_loans` loans.
    pub light_history_points: u32,
    pub light_history_max_loans: usize,
    /// Awarded above `light_history_max_loans` loans.
    pub heavy_history_points: u32,
    /// Awarded when any loan started in the evaluation year.
    pub current_year_points: u32,
    /// Ordered top-down; first match wins. No match means rejection.
    pub bands: Vec<RateBand>,
    /// Hard floor applied to every raw rate, approved or not.
    pub rate_floor: Rate,
    pub tenure_months: Months,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            on_time_points: 20,
            no_history_points: 10,
            light_history_points: 5,
            light_history_max_loans: 2,
            heavy_history_points: 2,
            current_year_points: 15,
            bands: vec![
                RateBand {
                    above_score: 50,
                    limit_multiplier: dec!(0.10),
                    minimum_rate: Decimal::ZERO,
                },
                RateBand {
                    above_score: 30,
                    limit_multiplier: dec!(0.08),
                    minimum_rate: dec!(12),
                },
                RateBand {
                    above_score: 10,
                    limit_multiplier: dec!(0.06),
                    minimum_rate: dec!(16),
                },
            ],
            rate_floor: dec!(16),
            tenure_months: 12,
        }
    }
}

impl EligibilityPolicy {
    pub fn validate(&self) -> CreditApprovalResult<()> {
        if self.tenure_months == 0 {
            return Err(CreditApprovalError::InvalidInput {
                field: "policy.tenure_months".into(),
                reason: "Tenure must be at least one month.".into(),
            });
        }
        if self.rate_floor < Decimal::ZERO {
            return Err(CreditApprovalError::InvalidInput {
                field: "policy.rate_floor".into(),
                reason: "Rate floor cannot be negative.".into(),
            });
        }
        let heaviest_history = self
            .no_history_points
            .max(self.light_history_points)
            .max(self.heavy_history_points);
        if self
            .on_time_points
            .checked_add(heaviest_history)
            .and_then(|points| points.checked_add(self.current_year_points))
            .is_none()
        {
            return Err(CreditApprovalError::InvalidInput {
                field: "policy".into(),
                reason: "Signal points must sum to a value that fits in u32.".into(),
            });
        }
        for (i, band) in self.bands.iter().enumerate() {
            if band.limit_multiplier < Decimal::ZERO || band.minimum_rate < Decimal::ZERO {
                return Err(CreditApprovalError::InvalidInput {
                    field: format!("policy.bands[{i}]"),
                    reason: "Band multiplier and minimum rate must be non-negative.".into(),
                });
            }
        }
        if self
            .bands
            .windows(2)
            .any(|pair| pair[0].above_score <= pair[1].above_score)
        {
            return Err(CreditApprovalError::InvalidInput {
                field: "policy.bands".into(),
                reason: "Bands must be strictly descending by above_score.".into(),
            });
        }
        Ok(())
    }

    /// First band whose threshold the score exceeds.
    pub fn band_for(&self, score: u32) -> Option<&RateBand> {
        self.bands.iter().find(|band| score > band.above_score)
    }
}
