//! Discounted Cash Flow Model
//!
//! Projects free cash flow at a constant growth rate, discounts each projected
//! flow, and adds a Gordon-growth terminal value:
//!
//! FCF_t = FCF_0 * (1 + g)^t
//! PV    = Σ_{t=1..n} FCF_t / (1 + r)^t
//! TV    = FCF_n * (1 + g_T) / (r - g_T)
//! V     = (PV + TV / (1 + r)^n) / shares
//!
//! where:
//! - g   = projection growth rate
//! - r   = discount rate
//! - g_T = terminal growth rate
//! - n   = projection horizon in years
//!
//! When `r - g_T <= 0` the spread is replaced by [`MIN_TERMINAL_SPREAD`]. This
//! keeps the terminal value finite; it is an approximation, not a valuation.

use serde::{Deserialize, Serialize};

/// Spread substituted for `r - g_T` when the terminal growth is not below the
/// discount rate.
pub const MIN_TERMINAL_SPREAD: f64 = 1e-4;

/// Longest projection horizon a configuration may request.
pub const MAX_PROJECTION_YEARS: u32 = 1_000;

/// DCF model configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DcfConfig {
    /// Discount rate r (default: 0.10)
    pub discount_rate: f64,
    /// Projection horizon in years (default: 5)
    pub years: u32,
    /// Perpetual growth after the horizon (default: 0.03)
    pub terminal_growth: f64,
}

impl Default for DcfConfig {
    fn default() -> Self {
        Self {
            discount_rate: 0.10,
            years: 5,
            terminal_growth: 0.03,
        }
    }
}

/// Lazily project `years` free cash flows growing at `growth_rate`.
///
/// The seed itself is not yielded; the first item is `initial_fcf * (1 + g)`.
pub fn project(initial_fcf: f64, growth_rate: f64, years: u32) -> impl Iterator<Item = f64> {
    std::iter::successors(Some(initial_fcf), move |fcf| Some(fcf * (1.0 + growth_rate)))
        .skip(1)
        .take(years as usize)
}

/// Intermediate values of one DCF evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfBreakdown {
    /// Projected free cash flows, year 1 first
    pub projected: Vec<f64>,
    /// Sum of the discounted projected flows
    pub present_value: f64,
    /// Undiscounted terminal value
    pub terminal_value: f64,
    /// Terminal value discounted to today
    pub discounted_terminal_value: f64,
    /// Enterprise value (present value plus discounted terminal value)
    pub total_value: f64,
    /// Intrinsic value per share
    pub per_share: f64,
}

/// Forward DCF model
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DcfModel {
    config: DcfConfig,
}

impl DcfModel {
    /// Create a model with the given configuration
    pub const fn new(config: DcfConfig) -> Self {
        Self { config }
    }

    /// Model configuration
    pub const fn config(&self) -> &DcfConfig {
        &self.config
    }

    /// Full evaluation with intermediate values.
    ///
    /// Zero shares yields an all-zero breakdown with no projection.
    pub fn breakdown(&self, initial_fcf: f64, growth_rate: f64, shares: f64) -> DcfBreakdown {
        if shares == 0.0 {
            return DcfBreakdown {
                projected: Vec::new(),
                present_value: 0.0,
                terminal_value: 0.0,
                discounted_terminal_value: 0.0,
                total_value: 0.0,
                per_share: 0.0,
            };
        }

        let DcfConfig {
            discount_rate: r,
            years,
            terminal_growth: tg,
        } = self.config;

        let projected: Vec<f64> = project(initial_fcf, growth_rate, years).collect();
        let present_value: f64 = projected
            .iter()
            .zip(1..)
            .map(|(fcf, t)| fcf / (1.0 + r).powi(t))
            .sum();

        let last = projected.last().copied().unwrap_or(initial_fcf);
        let spread = if r - tg <= 0.0 {
            MIN_TERMINAL_SPREAD
        } else {
            r - tg
        };
        let terminal_value = last * (1.0 + tg) / spread;
        let discounted_terminal_value = terminal_value / (1.0 + r).powf(f64::from(years));

        let total_value = present_value + discounted_terminal_value;

        DcfBreakdown {
            projected,
            present_value,
            terminal_value,
            discounted_terminal_value,
            total_value,
            per_share: total_value / shares,
        }
    }

    /// Intrinsic value per share. Negative values are valid output.
    pub fn intrinsic_value_per_share(&self, initial_fcf: f64, growth_rate: f64, shares: f64) -> f64 {
        self.breakdown(initial_fcf, growth_rate, shares).per_share
    }
}

/// Intrinsic value per share with an explicit configuration.
pub fn intrinsic_value_per_share(
    initial_fcf: f64,
    growth_rate: f64,
    shares: f64,
    config: &DcfConfig,
) -> f64 {
    DcfModel::new(*config).intrinsic_value_per_share(initial_fcf, growth_rate, shares)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_project() {
        let flows: Vec<f64> = project(100.0, 0.10, 3).collect();
        assert_eq!(flows.len(), 3);
        assert_relative_eq!(flows[0], 110.0, epsilon = 1e-10);
        assert_relative_eq!(flows[2], 133.1, epsilon = 1e-10);
    }

    #[test]
    fn test_project_negative_growth_and_zero_years() {
        let flows: Vec<f64> = project(100.0, -0.5, 2).collect();
        assert_eq!(flows, vec![50.0, 25.0]);
        assert_eq!(project(100.0, 0.1, 0).count(), 0);
    }

    #[test]
    fn test_zero_shares() {
        let model = DcfModel::default();
        assert_eq!(model.intrinsic_value_per_share(100.0, 0.05, 0.0), 0.0);
    }

    #[test]
    fn test_known_value() {
        // flat FCF of 100, r = 10%, g_T = 0, 1 year
        let config = DcfConfig {
            discount_rate: 0.10,
            years: 1,
            terminal_growth: 0.0,
        };
        let b = DcfModel::new(config).breakdown(100.0, 0.0, 1.0);
        assert_relative_eq!(b.present_value, 100.0 / 1.1, epsilon = 1e-10);
        assert_relative_eq!(b.terminal_value, 1_000.0, epsilon = 1e-10);
        assert_relative_eq!(b.per_share, 100.0 / 1.1 + 1_000.0 / 1.1, epsilon = 1e-10);
    }

    #[test]
    fn test_default_parameters() {
        let value = intrinsic_value_per_share(100.0, 0.05, 10.0, &DcfConfig::default());
        let flows: Vec<f64> = project(100.0, 0.05, 5).collect();
        let pv: f64 = flows
            .iter()
            .enumerate()
            .map(|(i, f)| f / 1.1_f64.powi(i as i32 + 1))
            .sum();
        let tv = flows[4] * 1.03 / 0.07 / 1.1_f64.powi(5);
        assert_relative_eq!(value, (pv + tv) / 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_terminal_spread_floor() {
        let config = DcfConfig {
            discount_rate: 0.03,
            years: 1,
            terminal_growth: 0.05,
        };
        let b = DcfModel::new(config).breakdown(100.0, 0.0, 1.0);
        assert_relative_eq!(b.terminal_value, 100.0 * 1.05 / MIN_TERMINAL_SPREAD, epsilon = 1e-6);
        assert!(b.per_share.is_finite());
    }

    #[test]
    fn test_zero_years_uses_seed() {
        let config = DcfConfig {
            years: 0,
            ..DcfConfig::default()
        };
        let b = DcfModel::new(config).breakdown(70.0, 0.5, 1.0);
        assert!(b.projected.is_empty());
        assert_eq!(b.present_value, 0.0);
        assert_relative_eq!(b.per_share, 70.0 * 1.03 / 0.07, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_fcf_is_valid() {
        let value = DcfModel::default().intrinsic_value_per_share(-50.0, 0.05, 10.0);
        assert!(value < 0.0);
    }

    #[rstest]
    #[case(-0.5, -0.25)]
    #[case(-0.1, 0.0)]
    #[case(0.0, 0.1)]
    #[case(0.3, 0.6)]
    #[case(0.9, 1.0)]
    fn test_monotonic_in_growth(#[case] lower: f64, #[case] higher: f64) {
        let model = DcfModel::default();
        assert!(
            model.intrinsic_value_per_share(100.0, lower, 10.0)
                < model.intrinsic_value_per_share(100.0, higher, 10.0)
        );
    }
}
