//! Quote estimation types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Services offered in the estimation calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    /// Website design and build.
    Web,
    /// AI integration work.
    Ia,
    /// Digital transformation consulting.
    Transformation,
}

/// Project complexity tier. Scales both price and duration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    #[default]
    Simple,
    Moyen,
    Complexe,
}

/// Optional add-ons. Each scales the price independently; none affect duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Addon {
    Seo,
    Animations,
    Formation,
    Maintenance,
}

/// A client's current calculator selection.
///
/// Mutable, session-scoped. The derived [`QuoteResult`] is recomputed from
/// scratch on every change and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSelection {
    services: BTreeSet<Service>,
    complexity: Complexity,
    addons: BTreeSet<Addon>,
}

impl QuoteSelection {
    /// Create an empty selection (no services, simple complexity, no add-ons).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn services(&self) -> &BTreeSet<Service> {
        &self.services
    }

    pub fn complexity(&self) -> Complexity {
        self.complexity
    }

    pub fn has_addon(&self, addon: Addon) -> bool {
        self.addons.contains(&addon)
    }

    /// Add the service if absent, remove it otherwise.
    pub fn toggle_service(&mut self, service: Service) {
        if !self.services.remove(&service) {
            self.services.insert(service);
        }
    }

    /// Replace the complexity tier unconditionally.
    pub fn set_complexity(&mut self, complexity: Complexity) {
        self.complexity = complexity;
    }

    /// Flip the add-on flag.
    pub fn toggle_addon(&mut self, addon: Addon) {
        if !self.addons.remove(&addon) {
            self.addons.insert(addon);
        }
    }

    /// Restore the default state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Build a selection from request lists. Duplicates collapse.
    pub fn from_parts(services: &[Service], complexity: Complexity, addons: &[Addon]) -> Self {
        Self {
            services: services.iter().copied().collect(),
            complexity,
            addons: addons.iter().copied().collect(),
        }
    }
}

/// The derived estimate for a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResult {
    /// Total price in whole EUR.
    pub total: u32,
    /// Estimated project duration in days.
    pub estimated_duration_days: u32,
}
