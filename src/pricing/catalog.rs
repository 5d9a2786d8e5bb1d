//! Constant rate and multiplier tables for the estimation calculator.
//!
//! Multipliers are expressed as integer percents (130 = ×1.3) so the engine
//! can accumulate an exact integer product and round once at the end.

use crate::pricing::types::{Addon, Complexity, Service};

/// Base rate for a single service.
#[derive(Debug, Clone, Copy)]
pub struct ServiceRate {
    /// Base price in whole EUR.
    pub price: u32,
    /// Base duration in days.
    pub duration_days: u32,
}

impl Service {
    pub const ALL: [Service; 3] = [Service::Web, Service::Ia, Service::Transformation];

    /// Base rate for this service.
    pub fn rate(self) -> ServiceRate {
        match self {
            Service::Web => ServiceRate {
                price: 1500,
                duration_days: 15,
            },
            Service::Ia => ServiceRate {
                price: 2000,
                duration_days: 12,
            },
            Service::Transformation => ServiceRate {
                price: 1000,
                duration_days: 10,
            },
        }
    }
}

impl Complexity {
    /// Price/duration multiplier as an integer percent.
    pub fn multiplier_pct(self) -> u64 {
        match self {
            Complexity::Simple => 100,
            Complexity::Moyen => 130,
            Complexity::Complexe => 170,
        }
    }
}

impl Addon {
    /// Fixed iteration order for the engine. Multiplication is commutative,
    /// but a stable order keeps test expectations exact.
    pub const ALL: [Addon; 4] = [
        Addon::Seo,
        Addon::Animations,
        Addon::Formation,
        Addon::Maintenance,
    ];

    /// Price multiplier as an integer percent.
    pub fn multiplier_pct(self) -> u64 {
        match self {
            Addon::Seo => 115,
            Addon::Animations => 110,
            Addon::Formation => 120,
            Addon::Maintenance => 125,
        }
    }
}
