use std::collections::HashSet;

use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::error::GenerationError;
use crate::model::{Match, Player, Role};
use crate::rules::{CompositionRules, GeneratorLimits};
use crate::squad::{self, SignatureSet, Squad};

const CREDIT_EPS: f64 = 1e-9;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationConfig {
    pub rules: CompositionRules,
    pub limits: GeneratorLimits,
}

/// The players a user marked as starting for each side of a match.
#[derive(Debug, Clone)]
pub struct PlayingXi<'a> {
    players: Vec<&'a Player>,
}

impl<'a> PlayingXi<'a> {
    /// Looks up the chosen ids in `pool` and checks each side has exactly a
    /// full squad of its own players.
    pub fn resolve(
        pool: &'a [Player],
        m: &Match,
        team1_ids: &[String],
        team2_ids: &[String],
        rules: &CompositionRules,
    ) -> Result<Self, GenerationError> {
        if m.team1 == m.team2 {
            return Err(GenerationError::SameTeams {
                team: m.team1.clone(),
            });
        }
        let mut players = Vec::with_capacity(rules.squad_size * 2);
        for (team, ids) in [(&m.team1, team1_ids), (&m.team2, team2_ids)] {
            let mut unique: HashSet<&str> = HashSet::new();
            for id in ids {
                if !unique.insert(id.as_str()) {
                    continue;
                }
                let player = pool
                    .iter()
                    .find(|p| &p.id == id)
                    .ok_or_else(|| GenerationError::UnknownPlayer { id: id.clone() })?;
                if &player.team != team {
                    return Err(GenerationError::ForeignPlayer {
                        id: id.clone(),
                        team: team.clone(),
                    });
                }
                players.push(player);
            }
            if unique.len() != rules.squad_size {
                return Err(GenerationError::PlayingXiSize {
                    team: team.clone(),
                    found: unique.len(),
                    required: rules.squad_size,
                });
            }
        }
        Ok(Self { players })
    }

    pub fn players(&self) -> &[&'a Player] {
        &self.players
    }
}

#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub squads: Vec<Squad>,
    pub requested: usize,
    pub attempts: usize,
}

impl GenerationOutcome {
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.squads.len())
    }

    pub fn is_complete(&self) -> bool {
        self.shortfall() == 0
    }
}

/// Generate one squad, retrying up to `limits.max_attempts` times.
pub fn generate<R: Rng + ?Sized>(
    pool: &[&Player],
    m: &Match,
    cfg: &GenerationConfig,
    rng: &mut R,
) -> Result<Squad, GenerationError> {
    check_pool(pool, m, cfg)?;
    let mut seen = SignatureSet::new();
    let (squad, attempts) = generate_unique(pool, m, cfg, &mut seen, rng);
    squad.ok_or(GenerationError::Exhausted { attempts })
}

/// Generate up to `count` distinct squads, best predicted points first.
///
/// Makes at most `batch_attempt_factor * count` single-squad searches. A
/// partial result is returned with its shortfall; finding nothing at all is
/// reported as [`GenerationError::Exhausted`].
pub fn generate_batch<R: Rng + ?Sized>(
    pool: &[&Player],
    m: &Match,
    cfg: &GenerationConfig,
    count: usize,
    rng: &mut R,
) -> Result<GenerationOutcome, GenerationError> {
    if count == 0 {
        return Err(GenerationError::ZeroCount);
    }
    check_pool(pool, m, cfg)?;

    let mut seen = SignatureSet::new();
    let mut squads = Vec::with_capacity(count);
    let mut attempts = 0usize;
    let searches = count.saturating_mul(cfg.limits.batch_attempt_factor.max(1));

    for _ in 0..searches {
        if squads.len() >= count {
            break;
        }
        let (squad, used) = generate_unique(pool, m, cfg, &mut seen, rng);
        attempts += used;
        if let Some(squad) = squad {
            squads.push(squad);
        }
    }

    if squads.is_empty() {
        warn!("match {}: no valid squads after {attempts} attempts", m.id);
        return Err(GenerationError::Exhausted { attempts });
    }

    squad::rank_squads(&mut squads);
    let outcome = GenerationOutcome {
        squads,
        requested: count,
        attempts,
    };
    if outcome.is_complete() {
        info!(
            "match {}: generated {} squads in {attempts} attempts",
            m.id,
            outcome.squads.len()
        );
    } else {
        warn!(
            "match {}: generated {} of {count} squads ({} short)",
            m.id,
            outcome.squads.len(),
            outcome.shortfall()
        );
    }
    Ok(outcome)
}

pub struct GenerationJob<'a> {
    pub m: &'a Match,
    pub pool: Vec<&'a Player>,
}

/// Run independent batch requests in parallel. Each job gets its own RNG
/// stream derived from `seed`, so results do not depend on thread timing.
pub fn generate_for_matches(
    jobs: &[GenerationJob<'_>],
    cfg: &GenerationConfig,
    count: usize,
    seed: u64,
) -> Vec<(String, Result<GenerationOutcome, GenerationError>)> {
    jobs.par_iter()
        .enumerate()
        .map(|(i, job)| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            rng.set_stream(i as u64);
            let result = generate_batch(&job.pool, job.m, cfg, count, &mut rng);
            (job.m.id.clone(), result)
        })
        .collect()
}

fn check_pool(pool: &[&Player], m: &Match, cfg: &GenerationConfig) -> Result<(), GenerationError> {
    if m.team1 == m.team2 {
        return Err(GenerationError::SameTeams {
            team: m.team1.clone(),
        });
    }
    if let Some(p) = pool.iter().find(|p| !m.involves(&p.team)) {
        return Err(GenerationError::ForeignPlayer {
            id: p.id.clone(),
            team: p.team.clone(),
        });
    }
    let mut ids: HashSet<&str> = HashSet::with_capacity(pool.len());
    if let Some(p) = pool.iter().find(|p| !ids.insert(p.id.as_str())) {
        return Err(GenerationError::DuplicatePlayer { id: p.id.clone() });
    }
    if pool.len() < cfg.rules.squad_size {
        return Err(GenerationError::PoolTooSmall {
            found: pool.len(),
            required: cfg.rules.squad_size,
        });
    }
    for team in m.teams() {
        let found = pool.iter().filter(|p| p.team == team).count();
        if found < cfg.limits.min_per_team {
            return Err(GenerationError::TooFewFromTeam {
                team: team.to_string(),
                found,
                required: cfg.limits.min_per_team,
            });
        }
    }
    Ok(())
}

/// Search for a squad whose signature is not yet in `seen`. Returns the
/// squad, if any, and the number of attempts spent.
fn generate_unique<R: Rng + ?Sized>(
    pool: &[&Player],
    m: &Match,
    cfg: &GenerationConfig,
    seen: &mut SignatureSet,
    rng: &mut R,
) -> (Option<Squad>, usize) {
    let max_attempts = cfg.limits.max_attempts.max(1);
    for attempt in 1..=max_attempts {
        let Some(picked) = build_candidate(pool, m, cfg, rng) else {
            continue;
        };
        let sig = squad::signature(&picked);
        if seen.contains(&sig) {
            continue;
        }
        let Some((captain, vice_captain)) = squad::pick_leaders(&picked, m) else {
            continue;
        };
        seen.insert(sig);
        let players = picked.into_iter().cloned().collect();
        return (
            Some(Squad::with_leaders(players, m, captain, vice_captain)),
            attempt,
        );
    }
    debug!("match {}: attempt budget of {max_attempts} spent", m.id);
    (None, max_attempts)
}

/// One randomized greedy pass over the pool. Returns the picked players only
/// if they pass the generator's own acceptance check.
fn build_candidate<'a, R: Rng + ?Sized>(
    pool: &[&'a Player],
    m: &Match,
    cfg: &GenerationConfig,
    rng: &mut R,
) -> Option<Vec<&'a Player>> {
    let rules = &cfg.rules;
    let limits = &cfg.limits;
    let mut picked: Vec<&'a Player> = Vec::with_capacity(rules.squad_size);
    let mut remaining = rules.total_credits;
    let mut roles = [0usize; 4];
    let mut teams = [0usize; 2];
    let side = |p: &Player| usize::from(p.team != m.team1);

    let keepers: Vec<&'a Player> = pool
        .iter()
        .copied()
        .filter(|p| p.role == Role::WicketKeeper && p.credit <= remaining + CREDIT_EPS)
        .collect();
    if let Some(&wk) = keepers.choose(rng) {
        picked.push(wk);
        roles[wk.role.index()] += 1;
        teams[side(wk)] += 1;
        remaining -= wk.credit;
    }

    let mut rest: Vec<&'a Player> = pool
        .iter()
        .copied()
        .filter(|p| !picked.iter().any(|q| q.id == p.id))
        .collect();
    rest.shuffle(rng);

    for p in rest {
        if picked.len() >= rules.squad_size {
            break;
        }
        let fits = roles[p.role.index()] < limits.role_ceiling
            && teams[side(p)] < rules.max_from_one_team
            && p.credit <= remaining + CREDIT_EPS;
        if fits {
            picked.push(p);
            roles[p.role.index()] += 1;
            teams[side(p)] += 1;
            remaining -= p.credit;
        }
    }

    let accepted = picked.len() == rules.squad_size
        && roles.iter().all(|&n| n >= limits.min_per_role)
        && teams.iter().all(|&n| n >= limits.min_per_team);
    accepted.then_some(picked)
}
