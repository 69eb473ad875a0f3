//! Preview facade the client drives.
//!
//! `Simulator` wraps the pure engine for one decision context: it picks the
//! right entry points, applies presentation adjustments (the 1-based dodge
//! roll lives here, never in the core), and instruments each preview with
//! tracing so prediction mismatches can be diagnosed from logs.

use sim_core::{
    gold_reward, item_at, list_all_encounters, next_big_encounter, simulate_battle,
    simulate_flee, BattleReport, BigEncounter, Discovery, Encounter, FleeReport, ForecastEntry,
    Slot,
};

use crate::config::SimConfig;
use crate::error::RuntimeError;
use crate::snapshot::DecisionContext;

/// Stateless preview engine configured once and shared freely.
#[derive(Clone, Copy, Debug, Default)]
pub struct Simulator {
    config: SimConfig,
}

/// One forecast row flattened for display.
#[derive(Clone, Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterRow {
    pub xp: u32,
    pub adventurer_level: u32,
    /// "Beast", "Obstacle", "Gold", "Health", or "Loot".
    pub kind: &'static str,
    /// Beast/obstacle roster id, or the discovered item's registry id.
    pub id: Option<u8>,
    /// Encounter level, or the discovered amount for gold/health.
    pub power: Option<u32>,
    pub health: Option<u32>,
    pub location: Option<String>,
    /// Dodge roll, display-adjusted per configuration.
    pub dodge_roll: Option<u32>,
    pub damage: Option<u32>,
    pub is_critical: bool,
    pub next_xp: u32,
    pub summary: String,
}

impl Simulator {
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(SimConfig::from_env())
    }

    /// Previews the upcoming encounter tree for this context.
    pub fn explore_preview(&self, context: &DecisionContext) -> Vec<EncounterRow> {
        let forecast = list_all_encounters(
            context.adventurer.xp,
            &context.entropy,
            context.in_battle(),
            context.adventurer.level(),
        );
        tracing::debug!(
            xp = context.adventurer.xp,
            in_battle = context.in_battle(),
            rows = forecast.len(),
            "explore preview resolved"
        );

        forecast
            .iter()
            .take(self.config.max_forecast)
            .map(|entry| self.row(entry))
            .collect()
    }

    /// Scans ahead for the next beast or obstacle.
    pub fn next_big(&self, context: &DecisionContext) -> BigEncounter {
        let result = next_big_encounter(
            context.adventurer.level(),
            context.adventurer.xp,
            &context.entropy,
            &context.items,
        );
        tracing::debug!(xp = context.adventurer.xp, ?result, "big-encounter scan");
        result
    }

    /// Full battle forecast against the engaged beast.
    pub fn battle_preview(&self, context: &DecisionContext) -> Result<BattleReport, RuntimeError> {
        let beast = context.beast.as_ref().ok_or(RuntimeError::MissingBeast)?;
        let report = simulate_battle(&context.adventurer, &context.items, beast, &context.entropy);
        tracing::debug!(
            outcome = ?report.outcome,
            rounds = report.events.len().div_ceil(2),
            "battle simulated"
        );
        Ok(report)
    }

    /// Full flee forecast against the engaged beast.
    pub fn flee_preview(&self, context: &DecisionContext) -> Result<FleeReport, RuntimeError> {
        let beast = context.beast.as_ref().ok_or(RuntimeError::MissingBeast)?;
        let report = simulate_flee(&context.adventurer, &context.items, beast, &context.entropy);
        tracing::debug!(outcome = ?report.outcome, "flee simulated");
        Ok(report)
    }

    /// Gold payout if the engaged beast dies now.
    pub fn gold_preview(&self, context: &DecisionContext) -> Result<u32, RuntimeError> {
        let beast = context.beast.as_ref().ok_or(RuntimeError::MissingBeast)?;
        let ring = item_at(&context.items, Slot::Ring);
        Ok(gold_reward(
            context.adventurer.xp,
            &context.entropy,
            beast,
            ring,
        ))
    }

    fn row(&self, entry: &ForecastEntry) -> EncounterRow {
        match &entry.encounter {
            Encounter::Beast(beast) => EncounterRow {
                xp: entry.xp,
                adventurer_level: entry.adventurer_level,
                kind: "Beast",
                id: Some(beast.beast.id.get()),
                power: Some(beast.beast.level),
                health: Some(beast.beast.health),
                location: Some(beast.location.to_string()),
                dodge_roll: Some(self.config.display_roll(beast.dodge_roll)),
                damage: Some(beast.damage),
                is_critical: beast.is_critical,
                next_xp: beast.next_xp,
                summary: match beast.beast.special_name() {
                    Some((prefix, suffix)) => format!(
                        "{} {} (T{} {} lv{})",
                        prefix,
                        suffix,
                        beast.beast.tier(),
                        beast.beast.element(),
                        beast.beast.level
                    ),
                    None => format!(
                        "T{} {} lv{}",
                        beast.beast.tier(),
                        beast.beast.element(),
                        beast.beast.level
                    ),
                },
            },
            Encounter::Obstacle(obstacle) => EncounterRow {
                xp: entry.xp,
                adventurer_level: entry.adventurer_level,
                kind: "Obstacle",
                id: Some(obstacle.obstacle.id.get()),
                power: Some(obstacle.obstacle.level),
                health: None,
                location: Some(obstacle.location.to_string()),
                dodge_roll: Some(self.config.display_roll(obstacle.dodge_roll)),
                damage: Some(obstacle.damage),
                is_critical: obstacle.is_critical,
                next_xp: obstacle.next_xp,
                summary: format!(
                    "T{} {} lv{}",
                    obstacle.obstacle.tier(),
                    obstacle.obstacle.element(),
                    obstacle.obstacle.level
                ),
            },
            Encounter::Discovery(found) => {
                let (kind, id, power, summary) = match found.discovery {
                    Discovery::Gold(amount) => {
                        ("Gold", None, Some(amount), format!("{amount} gold"))
                    }
                    Discovery::Health(amount) => {
                        ("Health", None, Some(amount), format!("+{amount} health"))
                    }
                    Discovery::Loot(item) => (
                        "Loot",
                        Some(item.get()),
                        None,
                        format!("{} (T{})", item.name(), item.tier()),
                    ),
                };
                EncounterRow {
                    xp: entry.xp,
                    adventurer_level: entry.adventurer_level,
                    kind,
                    id,
                    power,
                    health: None,
                    location: None,
                    dodge_roll: None,
                    damage: None,
                    is_critical: false,
                    next_xp: found.next_xp,
                    summary,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::Entropy;

    fn context(beast_health: u32) -> DecisionContext {
        let document = format!(
            r#"{{
                "adventurer": {{
                    "xp": 100, "health": 90, "beastHealth": {beast_health},
                    "strength": 4, "dexterity": 5, "luck": 20
                }},
                "items": [ {{ "item": "Katana", "xp": 400 }} ],
                "entropy": "0x4a7c3b9f2e8d165a0b1c2d3e4f5a6b7c8d9e0f1a2b3c4d5e6f708192a3b4c5d6",
                "beast": {{ "id": 30, "level": 12, "prefix": 12, "suffix": 3 }}
            }}"#
        );
        DecisionContext::from_json(&document).unwrap()
    }

    #[test]
    fn explore_rows_are_display_adjusted() {
        let simulator = Simulator::default();
        let rows = simulator.explore_preview(&context(0));
        assert!(!rows.is_empty());
        for row in &rows {
            if let Some(roll) = row.dodge_roll {
                // Engine rolls are zero-based; the default display is not.
                assert!(roll >= 1);
            }
            assert!(row.next_xp > row.xp);
        }
    }

    #[test]
    fn in_battle_previews_lead_with_the_beast() {
        let simulator = Simulator::default();
        let rows = simulator.explore_preview(&context(60));
        assert_eq!(rows[0].kind, "Beast");
    }

    #[test]
    fn forecast_row_budget_is_respected() {
        let config = SimConfig {
            max_forecast: 5,
            ..SimConfig::new()
        };
        let rows = Simulator::new(config).explore_preview(&context(0));
        assert!(rows.len() <= 5);
    }

    #[test]
    fn battle_previews_need_a_beast() {
        let simulator = Simulator::default();
        let mut context = context(60);
        context.beast = None;
        assert!(matches!(
            simulator.battle_preview(&context),
            Err(RuntimeError::MissingBeast)
        ));
    }

    #[test]
    fn previews_are_deterministic() {
        let simulator = Simulator::default();
        let context = context(60);
        let first = simulator.battle_preview(&context).unwrap();
        let second = simulator.battle_preview(&context).unwrap();
        assert_eq!(first, second);

        let gold = simulator.gold_preview(&context).unwrap();
        assert_eq!(gold, simulator.gold_preview(&context).unwrap());
        assert!(gold >= sim_core::MIN_GOLD_REWARD);
    }

    #[test]
    fn zero_entropy_previews_are_empty() {
        let mut context = context(0);
        context.entropy = Entropy::ZERO;
        let rows = Simulator::default().explore_preview(&context);
        assert!(rows.is_empty());
    }
}
