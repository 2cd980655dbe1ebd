use std::env;

use serde::{Deserialize, Serialize};

use crate::model::Role;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoleLimit {
    pub min: usize,
    pub max: usize,
}

/// Published squad rules. Process-wide; the default is the only set the app uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositionRules {
    pub wicket_keepers: RoleLimit,
    pub batters: RoleLimit,
    pub all_rounders: RoleLimit,
    pub bowlers: RoleLimit,
    pub squad_size: usize,
    pub max_from_one_team: usize,
    pub total_credits: f64,
}

impl Default for CompositionRules {
    fn default() -> Self {
        Self {
            wicket_keepers: RoleLimit { min: 1, max: 4 },
            batters: RoleLimit { min: 3, max: 6 },
            all_rounders: RoleLimit { min: 1, max: 4 },
            bowlers: RoleLimit { min: 3, max: 6 },
            squad_size: 11,
            max_from_one_team: 7,
            total_credits: 100.0,
        }
    }
}

impl CompositionRules {
    pub fn limit(&self, role: Role) -> RoleLimit {
        match role {
            Role::WicketKeeper => self.wicket_keepers,
            Role::Batter => self.batters,
            Role::AllRounder => self.all_rounders,
            Role::Bowler => self.bowlers,
        }
    }
}

/// Heuristics the generator applies on top of [`CompositionRules`].
///
/// These are deliberately different from the published rules: the generator
/// admits up to `role_ceiling` of a role during its scan, and only keeps
/// squads with at least one of every role and `min_per_team` from each side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratorLimits {
    pub role_ceiling: usize,
    pub min_per_role: usize,
    pub min_per_team: usize,
    pub max_attempts: usize,
    pub batch_attempt_factor: usize,
}

impl Default for GeneratorLimits {
    fn default() -> Self {
        Self {
            role_ceiling: 8,
            min_per_role: 1,
            min_per_team: 4,
            max_attempts: 1000,
            batch_attempt_factor: 2,
        }
    }
}

impl GeneratorLimits {
    /// Defaults, with `XI_MAX_ATTEMPTS` honoured when set.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_attempts: env_usize("XI_MAX_ATTEMPTS")
                .unwrap_or(defaults.max_attempts)
                .clamp(1, 100_000),
            ..defaults
        }
    }
}

pub fn env_usize(key: &str) -> Option<usize> {
    env::var(key)
        .ok()
        .and_then(|val| val.trim().parse::<usize>().ok())
}

pub fn env_u64(key: &str) -> Option<u64> {
    env::var(key)
        .ok()
        .and_then(|val| val.trim().parse::<u64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_thresholds_stay_distinct_from_published_rules() {
        let rules = CompositionRules::default();
        let limits = GeneratorLimits::default();
        assert_eq!(rules.max_from_one_team, 7);
        assert_eq!(limits.min_per_team, 4);
        assert!(limits.role_ceiling > rules.batters.max);
        assert!(limits.min_per_role < rules.bowlers.min);
    }

    #[test]
    fn role_limits_map_per_role() {
        let rules = CompositionRules::default();
        assert_eq!(rules.limit(Role::WicketKeeper), RoleLimit { min: 1, max: 4 });
        assert_eq!(rules.limit(Role::Bowler).min, 3);
    }
}
