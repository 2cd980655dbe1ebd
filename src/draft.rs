use crate::model::{Match, Player};
use crate::rules::CompositionRules;
use crate::squad::Squad;
use crate::validate::{self, Candidate, CompositionReport};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Toggle {
    Added,
    Removed,
    SquadFull,
    OverBudget { credit: f64, remaining: f64 },
    NotInMatch,
}

/// A team being picked by hand. The caller owns the session; nothing here is
/// shared between drafts.
#[derive(Debug, Clone)]
pub struct TeamDraft {
    m: Match,
    rules: CompositionRules,
    picked: Vec<Player>,
    captain: Option<String>,
    vice_captain: Option<String>,
}

impl TeamDraft {
    pub fn new(m: &Match) -> Self {
        Self::with_rules(m, CompositionRules::default())
    }

    pub fn with_rules(m: &Match, rules: CompositionRules) -> Self {
        Self {
            m: m.clone(),
            rules,
            picked: Vec::with_capacity(rules.squad_size),
            captain: None,
            vice_captain: None,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.picked
    }

    pub fn captain(&self) -> Option<&str> {
        self.captain.as_deref()
    }

    pub fn vice_captain(&self) -> Option<&str> {
        self.vice_captain.as_deref()
    }

    pub fn remaining_credits(&self) -> f64 {
        self.rules.total_credits - self.picked.iter().map(|p| p.credit).sum::<f64>()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.picked.iter().any(|p| p.id == id)
    }

    /// Remove the player if picked, otherwise add them when there is room and
    /// budget. Removing a captain or vice captain clears that choice.
    pub fn toggle_player(&mut self, player: &Player) -> Toggle {
        if let Some(pos) = self.picked.iter().position(|p| p.id == player.id) {
            self.picked.remove(pos);
            if self.captain.as_deref() == Some(player.id.as_str()) {
                self.captain = None;
            }
            if self.vice_captain.as_deref() == Some(player.id.as_str()) {
                self.vice_captain = None;
            }
            return Toggle::Removed;
        }
        if !self.m.involves(&player.team) {
            return Toggle::NotInMatch;
        }
        if self.picked.len() >= self.rules.squad_size {
            return Toggle::SquadFull;
        }
        let remaining = self.remaining_credits();
        if player.credit > remaining {
            return Toggle::OverBudget {
                credit: player.credit,
                remaining,
            };
        }
        self.picked.push(player.clone());
        Toggle::Added
    }

    /// Make `id` captain, or clear it if it already is. Returns false for a
    /// player who is not in the draft.
    pub fn toggle_captain(&mut self, id: &str) -> bool {
        if !self.is_selected(id) {
            return false;
        }
        if self.captain.as_deref() == Some(id) {
            self.captain = None;
        } else {
            self.captain = Some(id.to_string());
            if self.vice_captain.as_deref() == Some(id) {
                self.vice_captain = None;
            }
        }
        true
    }

    pub fn toggle_vice_captain(&mut self, id: &str) -> bool {
        if !self.is_selected(id) {
            return false;
        }
        if self.vice_captain.as_deref() == Some(id) {
            self.vice_captain = None;
        } else {
            self.vice_captain = Some(id.to_string());
            if self.captain.as_deref() == Some(id) {
                self.captain = None;
            }
        }
        true
    }

    /// Everything wrong with the draft right now, role maximums included.
    pub fn preview(&self) -> CompositionReport {
        let refs: Vec<&Player> = self.picked.iter().collect();
        let candidate =
            Candidate::players(&refs).with_leaders(self.captain(), self.vice_captain());
        let mut report = validate::validate_with(&candidate, &self.m, &self.rules);
        report
            .errors
            .extend(validate::check_role_maximums(&refs, &self.rules));
        report
    }

    /// Turn a complete, clean draft into a scored squad.
    pub fn finalize(&self) -> Result<Squad, CompositionReport> {
        let report = self.preview();
        if !report.is_valid() {
            return Err(report);
        }
        match (&self.captain, &self.vice_captain) {
            (Some(c), Some(vc)) if self.picked.len() == self.rules.squad_size => Ok(
                Squad::with_leaders(self.picked.clone(), &self.m, c.clone(), vc.clone()),
            ),
            _ => Err(report),
        }
    }
}
