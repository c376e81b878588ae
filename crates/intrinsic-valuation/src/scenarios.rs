//! Scenario valuation - one forward model evaluated under bear, base and bull growth.

use crate::dcf::DcfModel;
use intrinsic_data::{Scenario, ScenarioSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Intrinsic value per share keyed by scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    values: BTreeMap<Scenario, f64>,
}

impl ValuationResult {
    /// Value of one scenario.
    pub fn get(&self, scenario: Scenario) -> Option<f64> {
        self.values.get(&scenario).copied()
    }

    /// `(scenario, value)` pairs, bear first.
    pub fn iter(&self) -> impl Iterator<Item = (Scenario, f64)> + '_ {
        self.values.iter().map(|(s, v)| (*s, *v))
    }

    /// Number of valued scenarios.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no scenario was valued.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Margin of safety of a scenario against a price, as a fraction of the value.
    ///
    /// `None` when the scenario is missing or its value is not positive.
    pub fn margin_of_safety(&self, scenario: Scenario, price: f64) -> Option<f64> {
        self.get(scenario)
            .filter(|v| *v > 0.0)
            .map(|v| (v - price) / v)
    }
}

impl FromIterator<(Scenario, f64)> for ValuationResult {
    fn from_iter<T: IntoIterator<Item = (Scenario, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Value every scenario of a set with one model.
pub fn value_scenarios(
    model: &DcfModel,
    scenarios: &ScenarioSet,
    initial_fcf: f64,
    shares: f64,
) -> ValuationResult {
    scenarios
        .iter()
        .map(|(scenario, growth)| {
            (
                scenario,
                model.intrinsic_value_per_share(initial_fcf, growth, shares),
            )
        })
        .collect()
}
