//! Growth scenarios supplied by an external analysis step.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named valuation scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// Pessimistic case
    Bear,
    /// Expected case
    Base,
    /// Optimistic case
    Bull,
}

impl Scenario {
    /// Returns all scenarios, most pessimistic first.
    pub const fn all() -> [Self; 3] {
        [Self::Bear, Self::Base, Self::Bull]
    }

    /// Lowercase scenario name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bear => "bear",
            Self::Base => "base",
            Self::Bull => "bull",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bear/base/bull growth fractions with the reasoning behind them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet {
    /// Bear case growth (fraction, e.g. 0.05)
    pub bear: f64,
    /// Base case growth
    pub base: f64,
    /// Bull case growth
    pub bull: f64,
    /// Free-text rationale
    pub reasoning: String,
}

impl ScenarioSet {
    /// Create a scenario set.
    pub fn new(bear: f64, base: f64, bull: f64, reasoning: impl Into<String>) -> Self {
        Self {
            bear,
            base,
            bull,
            reasoning: reasoning.into(),
        }
    }

    /// Fixed scenarios used when no external analysis is available.
    pub fn placeholder() -> Self {
        Self::new(
            0.05,
            0.10,
            0.15,
            "SIMULATED: no analysis available, using fixed 5% / 10% / 15% growth scenarios.",
        )
    }

    /// Growth fraction of one scenario.
    pub const fn growth(&self, scenario: Scenario) -> f64 {
        match scenario {
            Scenario::Bear => self.bear,
            Scenario::Base => self.base,
            Scenario::Bull => self.bull,
        }
    }

    /// `(scenario, growth)` pairs, bear first.
    pub fn iter(&self) -> impl Iterator<Item = (Scenario, f64)> + '_ {
        Scenario::all().into_iter().map(|s| (s, self.growth(s)))
    }
}

impl Default for ScenarioSet {
    fn default() -> Self {
        Self::placeholder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        let set = ScenarioSet::placeholder();
        assert_eq!(set.growth(Scenario::Bear), 0.05);
        assert_eq!(set.growth(Scenario::Base), 0.10);
        assert_eq!(set.growth(Scenario::Bull), 0.15);
        assert!(set.reasoning.starts_with("SIMULATED"));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Scenario::Bull).unwrap();
        assert_eq!(json, "\"bull\"");
        let set: ScenarioSet =
            serde_json::from_str(r#"{"bear":0.0,"base":0.02,"bull":0.04,"reasoning":"flat"}"#)
                .unwrap();
        assert_eq!(set.iter().count(), 3);
        assert_eq!(set.base, 0.02);
    }
}
