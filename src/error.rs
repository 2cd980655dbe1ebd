use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Could not generate valid teams after {attempts} attempts. Please try again or adjust the playing XI.")]
    Exhausted { attempts: usize },

    #[error("{team} playing XI has {found} players, {required} required")]
    PlayingXiSize {
        team: String,
        found: usize,
        required: usize,
    },

    #[error("Unknown player: {id}")]
    UnknownPlayer { id: String },

    #[error("Player {id} does not play for {team}")]
    ForeignPlayer { id: String, team: String },

    #[error("Player pool has {found} players, {required} required")]
    PoolTooSmall { found: usize, required: usize },

    #[error("Player {id} appears more than once in the pool")]
    DuplicatePlayer { id: String },

    #[error("Pool has {found} players from {team}, {required} required")]
    TooFewFromTeam {
        team: String,
        found: usize,
        required: usize,
    },

    #[error("Match lists {team} on both sides")]
    SameTeams { team: String },

    #[error("Number of teams to generate must be at least 1")]
    ZeroCount,
}

impl GenerationError {
    /// Nothing in generation is fatal; every failure can be retried or fixed
    /// by changing the input.
    pub fn is_recoverable(&self) -> bool {
        true
    }

    /// True when the search ran and came up short, as opposed to bad input.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, GenerationError::Exhausted { .. })
    }
}
