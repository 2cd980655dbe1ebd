use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "WK")]
    WicketKeeper,
    #[serde(rename = "BAT")]
    Batter,
    #[serde(rename = "ALL")]
    AllRounder,
    #[serde(rename = "BOWL")]
    Bowler,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::WicketKeeper,
        Role::Batter,
        Role::AllRounder,
        Role::Bowler,
    ];

    pub fn index(self) -> usize {
        match self {
            Role::WicketKeeper => 0,
            Role::Batter => 1,
            Role::AllRounder => 2,
            Role::Bowler => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchFormat {
    #[serde(rename = "T20")]
    T20,
    #[serde(rename = "ODI")]
    Odi,
    #[serde(rename = "TEST")]
    Test,
    #[serde(rename = "T10")]
    T10,
    #[serde(rename = "THE_HUNDRED")]
    TheHundred,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Upcoming,
    Live,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BattingHand {
    #[serde(rename = "Left Hand")]
    Left,
    #[default]
    #[serde(rename = "Right Hand")]
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BowlingKind {
    Fast,
    Spin,
    Medium,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayingStyle {
    #[serde(default)]
    pub batting: BattingHand,
    #[serde(default)]
    pub bowling: Option<BowlingKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub team: String,
    pub role: Role,
    pub credit: f64,
    #[serde(default)]
    pub playing_style: PlayingStyle,
    #[serde(default, rename = "isPlaying11")]
    pub is_playing_xi: bool,
    #[serde(default)]
    pub statistics: PlayerStatistics,
}

// Everything below defaults to zero so sparse feeds still score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerStatistics {
    pub batting: BattingStats,
    pub bowling: BowlingStats,
    pub fielding: FieldingStats,
    pub recent_form: Vec<FormEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BattingStats {
    pub last10_matches: BattingAggregate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BattingAggregate {
    pub total_runs: u32,
    pub innings_played: u32,
    pub not_outs: u32,
    pub centuries: u32,
    pub half_centuries: u32,
    pub thirties: u32,
    pub fours: u32,
    pub sixes: u32,
    /// Absent when the feed has no batting record to rate.
    pub strike_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BowlingStats {
    pub last10_matches: BowlingAggregate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BowlingAggregate {
    pub wickets: u32,
    pub three_wickets: u32,
    pub four_wickets: u32,
    pub five_wickets: u32,
    pub economy: f64,
    pub maidens: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldingStats {
    pub catches: u32,
    pub stumpings: u32,
    pub run_outs: RunOuts,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunOuts {
    pub direct: u32,
    pub indirect: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormEntry {
    pub match_id: String,
    pub runs: u32,
    pub wickets: u32,
    pub catches: u32,
    pub stumpings: u32,
    pub date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchPlayers {
    #[serde(default)]
    pub team1: Vec<String>,
    #[serde(default)]
    pub team2: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub team1: String,
    pub team2: String,
    pub format: MatchFormat,
    pub venue: String,
    pub date: String,
    pub status: MatchStatus,
    #[serde(default)]
    pub players: MatchPlayers,
}

impl Match {
    pub fn involves(&self, team: &str) -> bool {
        self.team1 == team || self.team2 == team
    }

    pub fn teams(&self) -> [&str; 2] {
        [self.team1.as_str(), self.team2.as_str()]
    }

    /// Kickoff time, when `date` is an ISO-ish timestamp.
    pub fn kickoff(&self) -> Option<NaiveDateTime> {
        let raw = self.date.trim().trim_end_matches('Z');
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    }
}

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::WicketKeeper => "WK",
        Role::Batter => "BAT",
        Role::AllRounder => "ALL",
        Role::Bowler => "BOWL",
    }
}

pub fn format_label(format: MatchFormat) -> &'static str {
    match format {
        MatchFormat::T20 => "T20",
        MatchFormat::Odi => "ODI",
        MatchFormat::Test => "Test",
        MatchFormat::T10 => "T10",
        MatchFormat::TheHundred => "The Hundred",
    }
}

pub fn status_label(status: MatchStatus) -> &'static str {
    match status {
        MatchStatus::Upcoming => "Upcoming",
        MatchStatus::Live => "Live",
        MatchStatus::Completed => "Completed",
    }
}
