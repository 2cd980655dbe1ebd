use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use env_logger::Env;
use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use xi_builder::generator::{self, GenerationConfig, GenerationJob, GenerationOutcome, PlayingXi};
use xi_builder::model::{Match, format_label, role_label, status_label};
use xi_builder::points;
use xi_builder::roster::Roster;
use xi_builder::rules::{CompositionRules, GeneratorLimits, env_u64, env_usize};

const DEFAULT_ROSTER: &str = "data/roster.json";

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let roster_path = arg_value("--roster")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ROSTER));
    let count = arg_value("--count")
        .and_then(|raw| raw.parse::<usize>().ok())
        .or_else(|| env_usize("XI_TEAM_COUNT"))
        .unwrap_or(3)
        .clamp(1, 20);
    let seed = arg_value("--seed")
        .and_then(|raw| raw.parse::<u64>().ok())
        .or_else(|| env_u64("XI_SEED"));

    let mut roster = Roster::load(&roster_path)?;
    info!(
        "loaded {} players and {} matches from {}",
        roster.players.len(),
        roster.matches.len(),
        roster_path.display()
    );
    if roster
        .matches
        .iter()
        .all(|m| m.players.team1.is_empty() && m.players.team2.is_empty())
    {
        roster.sync_match_players(CompositionRules::default().squad_size);
    }

    let cfg = GenerationConfig {
        rules: CompositionRules::default(),
        limits: GeneratorLimits::from_env(),
    };

    match arg_value("--match").as_deref() {
        Some("all") => run_all(&roster, &cfg, count, seed),
        Some(id) => {
            let m = roster
                .match_by_id(id)
                .with_context(|| format!("match {id} not found"))?;
            run_one(&roster, m, &cfg, count, seed)
        }
        None => {
            let m = roster
                .next_upcoming()
                .ok_or_else(|| anyhow!("no upcoming match in {}", roster_path.display()))?;
            run_one(&roster, m, &cfg, count, seed)
        }
    }
}

fn run_one(
    roster: &Roster,
    m: &Match,
    cfg: &GenerationConfig,
    count: usize,
    seed: Option<u64>,
) -> Result<()> {
    let size = cfg.rules.squad_size;
    let team1 = roster.default_playing_xi(m, &m.team1, size)?;
    let team2 = roster.default_playing_xi(m, &m.team2, size)?;
    let xi = PlayingXi::resolve(&roster.players, m, &team1, &team2, &cfg.rules)?;

    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let outcome = generator::generate_batch(xi.players(), m, cfg, count, &mut rng)?;
    print_outcome(m, &outcome);
    Ok(())
}

fn run_all(
    roster: &Roster,
    cfg: &GenerationConfig,
    count: usize,
    seed: Option<u64>,
) -> Result<()> {
    let size = cfg.rules.squad_size;
    let mut jobs = Vec::new();
    for m in &roster.matches {
        let team1 = roster.default_playing_xi(m, &m.team1, size)?;
        let team2 = roster.default_playing_xi(m, &m.team2, size)?;
        match PlayingXi::resolve(&roster.players, m, &team1, &team2, &cfg.rules) {
            Ok(xi) => jobs.push(GenerationJob {
                m,
                pool: xi.players().to_vec(),
            }),
            Err(err) => warn!("skipping match {}: {err}", m.id),
        }
    }

    let seed = seed.unwrap_or_else(rand::random);
    for (match_id, result) in generator::generate_for_matches(&jobs, cfg, count, seed) {
        let Some(m) = roster.match_by_id(&match_id) else {
            continue;
        };
        match result {
            Ok(outcome) => print_outcome(m, &outcome),
            Err(err) => println!("{} vs {}: {err}", m.team1, m.team2),
        }
    }
    Ok(())
}

fn print_outcome(m: &Match, outcome: &GenerationOutcome) {
    println!(
        "{} vs {} ({}, {}, {})",
        m.team1,
        m.team2,
        format_label(m.format),
        m.venue,
        status_label(m.status)
    );
    if !outcome.is_complete() {
        println!(
            "Only {} of {} teams could be generated",
            outcome.squads.len(),
            outcome.requested
        );
    }
    for (idx, squad) in outcome.squads.iter().enumerate() {
        println!(
            "Team {} [{}]  points {:.1}  credits {:.1}",
            idx + 1,
            squad.id,
            squad.predicted_points,
            squad.team_value
        );
        for p in &squad.players {
            let tag = if p.id == squad.captain {
                " (C)"
            } else if p.id == squad.vice_captain {
                " (VC)"
            } else {
                ""
            };
            println!(
                "  {:<4} {:<24} {:<14} {:>5.1} cr {:>7.1} pts{tag}",
                role_label(p.role),
                p.name,
                p.team,
                p.credit,
                points::score(p, m)
            );
        }
    }
}

fn arg_value(flag: &str) -> Option<String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg.strip_prefix(&prefix) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == flag
            && let Some(next) = args.get(idx + 1)
            && !next.trim().is_empty()
        {
            return Some(next.trim().to_string());
        }
    }
    None
}
