use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::model::{Match, Player};
use crate::points::{self, CAPTAIN_MULTIPLIER, VICE_CAPTAIN_MULTIPLIER};

/// A finished lineup: eleven players, a captain and a vice captain.
#[derive(Debug, Clone, Serialize)]
pub struct Squad {
    pub id: String,
    pub players: Vec<Player>,
    pub captain: String,
    pub vice_captain: String,
    pub predicted_points: f64,
    pub team_value: f64,
}

impl Squad {
    /// Builds a squad with captain and vice captain taken from the score ranking.
    /// Returns `None` for fewer than two players.
    pub fn from_players(players: Vec<Player>, m: &Match) -> Option<Self> {
        let refs: Vec<&Player> = players.iter().collect();
        let (captain, vice_captain) = pick_leaders(&refs, m)?;
        Some(Self::with_leaders(players, m, captain, vice_captain))
    }

    pub fn with_leaders(players: Vec<Player>, m: &Match, captain: String, vice_captain: String) -> Self {
        let refs: Vec<&Player> = players.iter().collect();
        let predicted_points = score_squad(&refs, m, &captain, &vice_captain);
        let team_value = refs.iter().map(|p| p.credit).sum();
        let id = squad_id(&signature(&refs));
        Self {
            id,
            players,
            captain,
            vice_captain,
            predicted_points,
            team_value,
        }
    }

    pub fn signature(&self) -> String {
        let refs: Vec<&Player> = self.players.iter().collect();
        signature(&refs)
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }
}

pub fn multiplier(player_id: &str, captain: &str, vice_captain: &str) -> f64 {
    if player_id == captain {
        CAPTAIN_MULTIPLIER
    } else if player_id == vice_captain {
        VICE_CAPTAIN_MULTIPLIER
    } else {
        1.0
    }
}

/// Total predicted points with captain and vice captain multipliers applied.
pub fn score_squad(players: &[&Player], m: &Match, captain: &str, vice_captain: &str) -> f64 {
    players
        .iter()
        .map(|p| points::score(p, m) * multiplier(&p.id, captain, vice_captain))
        .sum()
}

/// Highest scorer captains, runner-up is vice captain. Equal scores go to the
/// lower player id so the choice never depends on pick order.
pub fn pick_leaders(players: &[&Player], m: &Match) -> Option<(String, String)> {
    let mut ranked: Vec<(f64, &str)> = players
        .iter()
        .map(|p| (points::score(p, m), p.id.as_str()))
        .collect();
    ranked.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.1.cmp(b.1))
    });
    match ranked.as_slice() {
        [first, second, ..] => Some((first.1.to_string(), second.1.to_string())),
        _ => None,
    }
}

/// Sorted player ids joined by commas; equal for the same set in any order.
pub fn signature(players: &[&Player]) -> String {
    let mut ids: Vec<&str> = players.iter().map(|p| p.id.as_str()).collect();
    ids.sort_unstable();
    ids.join(",")
}

fn squad_id(signature: &str) -> String {
    let digest = Sha256::digest(signature.as_bytes());
    digest.iter().take(6).map(|b| format!("{b:02x}")).collect()
}

/// Signatures already handed out within one generation batch.
#[derive(Debug, Default, Clone)]
pub struct SignatureSet {
    seen: HashSet<String>,
}

impl SignatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, signature: &str) -> bool {
        self.seen.contains(signature)
    }

    /// Returns false when the signature was already present.
    pub fn insert(&mut self, signature: String) -> bool {
        self.seen.insert(signature)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Best predicted points first; ties keep the earlier squad first.
pub fn rank_squads(squads: &mut [Squad]) {
    squads.sort_by(|a, b| {
        b.predicted_points
            .partial_cmp(&a.predicted_points)
            .unwrap_or(Ordering::Equal)
    });
}
