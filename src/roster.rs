use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::model::{Match, MatchStatus, Player};

/// Read-only players and matches, as supplied by the data provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub matches: Vec<Match>,
}

impl Roster {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read roster {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("parse roster {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let roster: Roster = serde_json::from_str(raw).context("decode roster json")?;
        Ok(roster)
    }

    pub fn match_by_id(&self, id: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Earliest upcoming match. Undated matches sort last, in listing order.
    pub fn next_upcoming(&self) -> Option<&Match> {
        self.matches
            .iter()
            .filter(|m| m.status == MatchStatus::Upcoming)
            .min_by_key(|m| (m.kickoff().is_none(), m.kickoff()))
    }

    pub fn team_players<'a>(&'a self, team: &'a str) -> impl Iterator<Item = &'a Player> + 'a {
        self.players.iter().filter(move |p| p.team == team)
    }

    /// Every player from either side of the match.
    pub fn match_pool(&self, m: &Match) -> Vec<&Player> {
        self.players.iter().filter(|p| m.involves(&p.team)).collect()
    }

    /// Point each match's listed players at the first `per_side` pool players
    /// of each team, so listed ids always resolve.
    pub fn sync_match_players(&mut self, per_side: usize) {
        for i in 0..self.matches.len() {
            let team1 = first_ids(&self.players, &self.matches[i].team1, per_side);
            let team2 = first_ids(&self.players, &self.matches[i].team2, per_side);
            let m = &mut self.matches[i];
            m.players.team1 = team1;
            m.players.team2 = team2;
        }
    }

    /// Ids for a default playing XI on one side: flagged starters when there
    /// are enough of them, otherwise the match listing, otherwise pool order.
    pub fn default_playing_xi(&self, m: &Match, team: &str, size: usize) -> Result<Vec<String>> {
        if !m.involves(team) {
            return Err(anyhow!("{team} is not playing in match {}", m.id));
        }
        let flagged: Vec<String> = self
            .team_players(team)
            .filter(|p| p.is_playing_xi)
            .map(|p| p.id.clone())
            .take(size)
            .collect();
        if flagged.len() == size {
            return Ok(flagged);
        }
        let listed = if team == m.team1 {
            &m.players.team1
        } else {
            &m.players.team2
        };
        if listed.len() >= size {
            return Ok(listed.iter().take(size).cloned().collect());
        }
        Ok(first_ids(&self.players, team, size))
    }
}

fn first_ids(players: &[Player], team: &str, n: usize) -> Vec<String> {
    players
        .iter()
        .filter(|p| p.team == team)
        .take(n)
        .map(|p| p.id.clone())
        .collect()
}
