//! Runtime configuration structures and loaders.
use std::env;

use sim_core::MAX_FORECAST;

/// Configuration for the simulation runtime.
#[derive(Clone, Copy, Debug)]
pub struct SimConfig {
    /// Maximum forecast rows surfaced to callers. Clamped to the engine's
    /// hard cap; the engine itself never produces more.
    pub max_forecast: usize,
    /// Surface dodge rolls 1-based. The engine keeps rolls zero-based; the
    /// +1 is purely presentation and lives here, never in the core.
    pub one_based_rolls: bool,
}

impl SimConfig {
    pub const fn new() -> Self {
        Self {
            max_forecast: MAX_FORECAST,
            one_based_rolls: true,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SIM_MAX_FORECAST` - Forecast rows to surface (default: 50, max: 50)
    /// - `SIM_ONE_BASED_ROLLS` - Display dodge rolls 1-based (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Some(rows) = read_env::<usize>("SIM_MAX_FORECAST") {
            config.max_forecast = rows.clamp(1, MAX_FORECAST);
        }

        if let Some(one_based) = read_env::<bool>("SIM_ONE_BASED_ROLLS") {
            config.one_based_rolls = one_based;
        }

        config
    }

    /// Dodge roll as this configuration displays it.
    pub fn display_roll(&self, roll: u32) -> u32 {
        if self.one_based_rolls { roll + 1 } else { roll }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
