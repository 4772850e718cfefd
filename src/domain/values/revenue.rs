//! Linear revenue projection for abandoned sessions.
//!
//! `sessions × average_order_value` is what was left on the table;
//! multiplying by the target recovery rate gives what a remediation is
//! expected to win back. No forecasting, no seasonality.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevenueAssumptions {
    /// Average order value in store currency.
    pub average_order_value: f64,
    /// Share of lost sessions expected to be recovered, in percent (0–100).
    pub target_recovery_rate: f64,
}

impl Default for RevenueAssumptions {
    fn default() -> Self {
        Self {
            average_order_value: 50.0,
            target_recovery_rate: 10.0,
        }
    }
}

impl RevenueAssumptions {
    pub fn validate(&self) -> Result<(), String> {
        if !self.average_order_value.is_finite() || self.average_order_value < 0.0 {
            return Err(format!(
                "average_order_value must be a non-negative number, got {}",
                self.average_order_value
            ));
        }
        if !(0.0..=100.0).contains(&self.target_recovery_rate) {
            return Err(format!(
                "target_recovery_rate must be between 0 and 100, got {}",
                self.target_recovery_rate
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueOpportunity {
    pub lost_at_cart_sessions: u64,
    pub lost_at_checkout_sessions: u64,
    pub lost_at_cart_revenue: f64,
    pub lost_at_checkout_revenue: f64,
    pub recoverable_revenue: f64,
    pub average_order_value: f64,
    pub target_recovery_rate: f64,
}

/// Project lost and recoverable revenue from abandoned-session counts.
pub fn project_revenue(
    lost_at_cart_sessions: u64,
    lost_at_checkout_sessions: u64,
    assumptions: &RevenueAssumptions,
) -> RevenueOpportunity {
    let aov = assumptions.average_order_value;
    let lost_at_cart_revenue = lost_at_cart_sessions as f64 * aov;
    let lost_at_checkout_revenue = lost_at_checkout_sessions as f64 * aov;
    let recoverable_revenue =
        (lost_at_cart_revenue + lost_at_checkout_revenue) * assumptions.target_recovery_rate / 100.0;

    RevenueOpportunity {
        lost_at_cart_sessions,
        lost_at_checkout_sessions,
        lost_at_cart_revenue,
        lost_at_checkout_revenue,
        recoverable_revenue,
        average_order_value: aov,
        target_recovery_rate: assumptions.target_recovery_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_projection() {
        let assumptions = RevenueAssumptions {
            average_order_value: 40.0,
            target_recovery_rate: 25.0,
        };
        let r = project_revenue(10, 5, &assumptions);
        assert!((r.lost_at_cart_revenue - 400.0).abs() < 1e-9);
        assert!((r.lost_at_checkout_revenue - 200.0).abs() < 1e-9);
        assert!((r.recoverable_revenue - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_recovery_rate() {
        let assumptions = RevenueAssumptions {
            average_order_value: 40.0,
            target_recovery_rate: 0.0,
        };
        let r = project_revenue(10, 5, &assumptions);
        assert_eq!(r.recoverable_revenue, 0.0);
    }

    #[test]
    fn test_validation() {
        assert!(RevenueAssumptions::default().validate().is_ok());
        let bad_rate = RevenueAssumptions {
            target_recovery_rate: 120.0,
            ..Default::default()
        };
        assert!(bad_rate.validate().is_err());
        let bad_aov = RevenueAssumptions {
            average_order_value: -1.0,
            ..Default::default()
        };
        assert!(bad_aov.validate().is_err());
    }
}
