use serde::Serialize;
use thiserror::Error;

use crate::model::{Match, Player, Role};
use crate::rules::CompositionRules;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum CompositionError {
    #[error("Need at least {min} {}", role_noun(.role, .min))]
    TooFewInRole { role: Role, min: usize },
    #[error("Maximum {max} {} allowed", role_noun(.role, .max))]
    TooManyInRole { role: Role, max: usize },
    #[error("Maximum {max} players allowed from {team}")]
    TooManyFromTeam { team: String, max: usize },
    #[error("Captain must be selected")]
    CaptainMissing,
    #[error("Vice Captain must be selected")]
    ViceCaptainMissing,
    #[error("Captain and Vice Captain must be different players")]
    CaptainIsViceCaptain,
    #[error("Player {id} is not part of the team")]
    NotInSquad { id: String },
}

fn role_noun(role: &Role, n: &usize) -> &'static str {
    match (*role, *n != 1) {
        (Role::WicketKeeper, false) => "wicketkeeper",
        (Role::WicketKeeper, true) => "wicketkeepers",
        (Role::Batter, false) => "batsman",
        (Role::Batter, true) => "batsmen",
        (Role::AllRounder, false) => "all-rounder",
        (Role::AllRounder, true) => "all-rounders",
        (Role::Bowler, false) => "bowler",
        (Role::Bowler, true) => "bowlers",
    }
}

/// A set of picked players plus whatever leadership has been chosen so far.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub players: &'a [&'a Player],
    pub captain: Option<&'a str>,
    pub vice_captain: Option<&'a str>,
}

impl<'a> Candidate<'a> {
    pub fn players(players: &'a [&'a Player]) -> Self {
        Self {
            players,
            captain: None,
            vice_captain: None,
        }
    }

    pub fn with_leaders(mut self, captain: Option<&'a str>, vice_captain: Option<&'a str>) -> Self {
        self.captain = captain;
        self.vice_captain = vice_captain;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompositionReport {
    pub errors: Vec<CompositionError>,
}

impl CompositionReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

pub fn role_counts(players: &[&Player]) -> [usize; 4] {
    let mut counts = [0usize; 4];
    for p in players {
        counts[p.role.index()] += 1;
    }
    counts
}

pub fn team_count(players: &[&Player], team: &str) -> usize {
    players.iter().filter(|p| p.team == team).count()
}

/// Check a candidate against the published rules, collecting every violation.
///
/// Role minimums and the per-team cap are always checked. Captain and vice
/// captain are only checked once the candidate has a full squad.
pub fn validate(candidate: &Candidate<'_>, m: &Match) -> CompositionReport {
    validate_with(candidate, m, &CompositionRules::default())
}

pub fn validate_with(
    candidate: &Candidate<'_>,
    m: &Match,
    rules: &CompositionRules,
) -> CompositionReport {
    let mut errors = Vec::new();
    let counts = role_counts(candidate.players);

    for role in Role::ALL {
        let min = rules.limit(role).min;
        if counts[role.index()] < min {
            errors.push(CompositionError::TooFewInRole { role, min });
        }
    }

    for team in m.teams() {
        if team_count(candidate.players, team) > rules.max_from_one_team {
            errors.push(CompositionError::TooManyFromTeam {
                team: team.to_string(),
                max: rules.max_from_one_team,
            });
        }
    }

    if candidate.players.len() == rules.squad_size {
        errors.extend(leadership_errors(candidate));
    }

    CompositionReport { errors }
}

fn leadership_errors(candidate: &Candidate<'_>) -> Vec<CompositionError> {
    let mut errors = Vec::new();
    match candidate.captain {
        None => errors.push(CompositionError::CaptainMissing),
        Some(id) if !contains(candidate.players, id) => {
            errors.push(CompositionError::NotInSquad { id: id.to_string() })
        }
        Some(_) => {}
    }
    match candidate.vice_captain {
        None => errors.push(CompositionError::ViceCaptainMissing),
        Some(id) if !contains(candidate.players, id) => {
            errors.push(CompositionError::NotInSquad { id: id.to_string() })
        }
        Some(_) => {}
    }
    if let (Some(c), Some(vc)) = (candidate.captain, candidate.vice_captain)
        && c == vc
    {
        errors.push(CompositionError::CaptainIsViceCaptain);
    }
    errors
}

fn contains(players: &[&Player], id: &str) -> bool {
    players.iter().any(|p| p.id == id)
}

/// Role maximums, used when a team is built by hand.
pub fn check_role_maximums(players: &[&Player], rules: &CompositionRules) -> Vec<CompositionError> {
    let counts = role_counts(players);
    Role::ALL
        .into_iter()
        .filter_map(|role| {
            let max = rules.limit(role).max;
            (counts[role.index()] > max).then_some(CompositionError::TooManyInRole { role, max })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MatchFormat, MatchPlayers, MatchStatus};

    fn m() -> Match {
        Match {
            id: "m1".into(),
            team1: "India".into(),
            team2: "Australia".into(),
            format: MatchFormat::T20,
            venue: "MCG".into(),
            date: "2024-01-01T10:00:00".into(),
            status: MatchStatus::Upcoming,
            players: MatchPlayers::default(),
        }
    }

    fn p(id: &str, team: &str, role: Role) -> Player {
        Player {
            id: id.into(),
            name: id.to_uppercase(),
            team: team.into(),
            role,
            credit: 9.0,
            playing_style: Default::default(),
            is_playing_xi: true,
            statistics: Default::default(),
        }
    }

    fn balanced_eleven() -> Vec<Player> {
        vec![
            p("a1", "India", Role::WicketKeeper),
            p("a2", "India", Role::Batter),
            p("a3", "India", Role::Batter),
            p("a4", "India", Role::AllRounder),
            p("a5", "India", Role::Bowler),
            p("a6", "India", Role::Bowler),
            p("b1", "Australia", Role::Batter),
            p("b2", "Australia", Role::Batter),
            p("b3", "Australia", Role::AllRounder),
            p("b4", "Australia", Role::Bowler),
            p("b5", "Australia", Role::Bowler),
        ]
    }

    #[test]
    fn partial_team_reports_every_missing_role() {
        let players = [p("a1", "India", Role::Batter)];
        let refs: Vec<&Player> = players.iter().collect();
        let report = validate(&Candidate::players(&refs), &m());
        assert!(!report.is_valid());
        assert_eq!(
            report.messages(),
            vec![
                "Need at least 1 wicketkeeper",
                "Need at least 3 batsmen",
                "Need at least 1 all-rounder",
                "Need at least 3 bowlers",
            ]
        );
    }

    #[test]
    fn team_cap_is_reported_per_side() {
        let players: Vec<Player> = (0..8)
            .map(|i| p(&format!("i{i}"), "India", Role::Batter))
            .collect();
        let refs: Vec<&Player> = players.iter().collect();
        let report = validate(&Candidate::players(&refs), &m());
        assert!(report.errors.contains(&CompositionError::TooManyFromTeam {
            team: "India".into(),
            max: 7
        }));
        assert_eq!(
            report.errors.iter().filter(|e| matches!(e, CompositionError::TooManyFromTeam { .. })).count(),
            1
        );
    }

    #[test]
    fn leadership_is_checked_only_for_full_squads() {
        let players = balanced_eleven();
        let refs: Vec<&Player> = players.iter().collect();

        let report = validate(&Candidate::players(&refs[..10]), &m());
        assert!(!report.errors.contains(&CompositionError::CaptainMissing));

        let report = validate(&Candidate::players(&refs), &m());
        assert_eq!(
            report.errors,
            vec![CompositionError::CaptainMissing, CompositionError::ViceCaptainMissing]
        );

        let same = Candidate::players(&refs).with_leaders(Some("a1"), Some("a1"));
        assert_eq!(validate(&same, &m()).errors, vec![CompositionError::CaptainIsViceCaptain]);

        let ok = Candidate::players(&refs).with_leaders(Some("a1"), Some("b1"));
        assert!(validate(&ok, &m()).is_valid());
    }

    #[test]
    fn validation_is_idempotent() {
        let players = balanced_eleven();
        let refs: Vec<&Player> = players.iter().collect();
        let candidate = Candidate::players(&refs).with_leaders(Some("zz"), None);
        let first = validate(&candidate, &m());
        let second = validate(&candidate, &m());
        assert_eq!(first, second);
        assert!(first.errors.contains(&CompositionError::NotInSquad { id: "zz".into() }));
    }

    #[test]
    fn role_maximums_flag_overfilled_roles() {
        let players: Vec<Player> = (0..5)
            .map(|i| p(&format!("w{i}"), "India", Role::WicketKeeper))
            .collect();
        let refs: Vec<&Player> = players.iter().collect();
        let errs = check_role_maximums(&refs, &CompositionRules::default());
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].to_string(), "Maximum 4 wicketkeepers allowed");
    }
}
