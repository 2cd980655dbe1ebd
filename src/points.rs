use serde::Serialize;

use crate::model::{BattingAggregate, BowlingAggregate, Match, Player};

pub const RUN_POINTS: f64 = 1.0;
pub const FOUR_POINTS: f64 = 1.0;
pub const SIX_POINTS: f64 = 2.0;
pub const WICKET_POINTS: f64 = 25.0;
pub const THREE_WICKET_BONUS: f64 = 4.0;
pub const FOUR_WICKET_BONUS: f64 = 8.0;
pub const FIVE_WICKET_BONUS: f64 = 16.0;

pub const CAPTAIN_MULTIPLIER: f64 = 2.0;
pub const VICE_CAPTAIN_MULTIPLIER: f64 = 1.5;

// Recent-form rating shown beside the generator's picks.
pub const FORM_DECAY: f64 = 0.2;
pub const MATCHUP_BASE: f64 = 50.0;
pub const FORM_WEIGHT: f64 = 0.4;
pub const MATCHUP_WEIGHT: f64 = 0.3;
pub const CONSISTENCY_WEIGHT: f64 = 0.3;

// Checked top to bottom; the first hit is the only adjustment applied.
const STRIKE_RATE_LADDER: [(StrikeRateBand, f64); 6] = [
    (StrikeRateBand::Above(170.0), 6.0),
    (StrikeRateBand::Above(150.0), 4.0),
    (StrikeRateBand::Above(130.0), 2.0),
    (StrikeRateBand::Below(50.0), -6.0),
    (StrikeRateBand::Below(60.0), -4.0),
    (StrikeRateBand::Below(70.0), -2.0),
];

#[derive(Debug, Clone, Copy)]
enum StrikeRateBand {
    Above(f64),
    Below(f64),
}

impl StrikeRateBand {
    fn contains(self, strike_rate: f64) -> bool {
        match self {
            StrikeRateBand::Above(t) => strike_rate > t,
            StrikeRateBand::Below(t) => strike_rate < t,
        }
    }
}

/// Fantasy value of a player from their last-10-match aggregates.
///
/// The match is accepted so callers can pass context, but the value does not
/// currently depend on format or venue.
pub fn score(player: &Player, _match: &Match) -> f64 {
    let stats = &player.statistics;
    batting_points(&stats.batting.last10_matches) + bowling_points(&stats.bowling.last10_matches)
}

fn batting_points(b: &BattingAggregate) -> f64 {
    let mut points = b.total_runs as f64 * RUN_POINTS
        + b.fours as f64 * FOUR_POINTS
        + b.sixes as f64 * SIX_POINTS;
    if let Some(sr) = b.strike_rate {
        points += strike_rate_adjustment(sr);
    }
    points
}

pub fn strike_rate_adjustment(strike_rate: f64) -> f64 {
    STRIKE_RATE_LADDER
        .iter()
        .find(|(band, _)| band.contains(strike_rate))
        .map(|(_, pts)| *pts)
        .unwrap_or(0.0)
}

fn bowling_points(b: &BowlingAggregate) -> f64 {
    let mut points = b.wickets as f64 * WICKET_POINTS;
    if b.three_wickets > 0 {
        points += THREE_WICKET_BONUS;
    }
    if b.four_wickets > 0 {
        points += FOUR_WICKET_BONUS;
    }
    if b.five_wickets > 0 {
        points += FIVE_WICKET_BONUS;
    }
    points
}

#[derive(Debug, Clone, Serialize)]
pub struct FormPoint {
    pub runs: u32,
    pub wickets: u32,
    pub points: f64,
}

/// Secondary rating from recent form. Informational only; squads are
/// scored and led by [`score`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FormRating {
    pub recent_form: f64,
    pub matchup: f64,
    pub consistency: f64,
    pub total: f64,
}

/// Most recent entry first. Each older entry weighs `FORM_DECAY` less, down
/// to zero.
pub fn form_rating(player: &Player) -> FormRating {
    let recent_form = player
        .statistics
        .recent_form
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let weight = (1.0 - i as f64 * FORM_DECAY).max(0.0);
            form_points(entry.runs, entry.wickets) * weight
        })
        .sum::<f64>();
    let consistency = player.statistics.batting.last10_matches.total_runs as f64 / 10.0;
    FormRating {
        recent_form,
        matchup: MATCHUP_BASE,
        consistency,
        total: recent_form * FORM_WEIGHT
            + MATCHUP_BASE * MATCHUP_WEIGHT
            + consistency * CONSISTENCY_WEIGHT,
    }
}

fn form_points(runs: u32, wickets: u32) -> f64 {
    runs as f64 * RUN_POINTS + wickets as f64 * WICKET_POINTS
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerSummary {
    pub player_id: String,
    pub base_points: f64,
    pub captain_points: f64,
    pub vice_captain_points: f64,
    pub batting_average: f64,
    pub strike_rate: Option<f64>,
    pub economy: f64,
    pub recent_form: Vec<FormPoint>,
    pub rating: FormRating,
}

/// Derived numbers shown next to a player when picking a team.
pub fn summarize(player: &Player, m: &Match) -> PlayerSummary {
    let base = score(player, m);
    let batting = &player.statistics.batting.last10_matches;
    let bowling = &player.statistics.bowling.last10_matches;

    let dismissals = batting.innings_played.saturating_sub(batting.not_outs);
    let batting_average = batting.total_runs as f64 / dismissals.max(1) as f64;

    let recent_form = player
        .statistics
        .recent_form
        .iter()
        .map(|entry| FormPoint {
            runs: entry.runs,
            wickets: entry.wickets,
            points: form_points(entry.runs, entry.wickets),
        })
        .collect();

    PlayerSummary {
        player_id: player.id.clone(),
        base_points: base,
        captain_points: base * CAPTAIN_MULTIPLIER,
        vice_captain_points: base * VICE_CAPTAIN_MULTIPLIER,
        batting_average,
        strike_rate: batting.strike_rate,
        economy: bowling.economy,
        recent_form,
        rating: form_rating(player),
    }
}
