use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::core::{Engine, EngineConfig, MoveBudgetSession, Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoplayArgs {
    pub seed: Option<u32>,
    /// Stop after this many turns even if moves remain
    pub turns: Option<u32>,
    pub config: Option<PathBuf>,
}

pub fn parse_autoplay_args(args: &[String]) -> Result<AutoplayArgs> {
    let mut out = AutoplayArgs {
        seed: None,
        turns: None,
        config: None,
    };
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                out.seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--turns" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --turns"))?;
                out.turns = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --turns value: {}", v))?,
                );
            }
            "--config" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                out.config = Some(PathBuf::from(v));
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(out)
}

/// Resolve the engine config: file first, then the command-line seed
pub fn load_config(args: &AutoplayArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            EngineConfig::from_json(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutoplaySummary {
    pub turns: u32,
    pub rounds: u32,
    pub specials_created: u32,
    pub shuffles: u32,
    pub score: u32,
}

/// Play hinted moves until the session ends or `max_turns` is reached
///
/// `on_turn` sees the engine and session after every resolved turn.
pub fn run_autoplay(
    engine: &mut Engine,
    session: &mut MoveBudgetSession,
    max_turns: Option<u32>,
    mut on_turn: impl FnMut(u32, &Engine, &MoveBudgetSession),
) -> Result<AutoplaySummary> {
    let mut summary = AutoplaySummary::default();

    while !session.is_session_over() && max_turns.map_or(true, |m| summary.turns < m) {
        if engine.is_deadlocked() {
            summary.shuffles += engine.drive(session)?.shuffles;
        }
        let Some(hint) = engine.request_hint() else {
            break;
        };
        let report = engine.play_swap(hint.first, hint.second, session)?;
        if let Some(reason) = report.rejected {
            return Err(anyhow!("hinted swap {:?} rejected: {:?}", hint, reason));
        }

        summary.turns += 1;
        summary.rounds += report.rounds;
        summary.specials_created += report.specials_created;
        summary.shuffles += report.shuffles;
        on_turn(summary.turns, engine, session);
    }

    summary.score = session.score();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_autoplay_args_reads_all_flags() {
        let parsed =
            parse_autoplay_args(&args(&["--seed", "42", "--turns", "5", "--config", "g.json"]))
                .unwrap();
        assert_eq!(
            parsed,
            AutoplayArgs {
                seed: Some(42),
                turns: Some(5),
                config: Some(PathBuf::from("g.json")),
            }
        );
    }

    #[test]
    fn parse_autoplay_args_uses_defaults() {
        let parsed = parse_autoplay_args(&[]).unwrap();
        assert_eq!(parsed.seed, None);
        assert_eq!(parsed.turns, None);
        assert_eq!(parsed.config, None);
    }

    #[test]
    fn parse_autoplay_args_rejects_bad_values() {
        assert!(parse_autoplay_args(&args(&["--seed"])).is_err());
        assert!(parse_autoplay_args(&args(&["--turns", "many"])).is_err());
        assert!(parse_autoplay_args(&args(&["--fast"])).is_err());
    }

    #[test]
    fn load_config_applies_seed_override() {
        let parsed = parse_autoplay_args(&args(&["--seed", "9"])).unwrap();
        let config = load_config(&parsed).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.width, 8);
    }

    #[test]
    fn run_autoplay_spends_the_budget() {
        let mut engine = Engine::new(EngineConfig::default().with_seed(3)).unwrap();
        let mut session = MoveBudgetSession::new(5);
        let mut seen = Vec::new();
        let summary = run_autoplay(&mut engine, &mut session, None, |turn, _, _| seen.push(turn))
            .unwrap();

        assert_eq!(summary.turns, 5);
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
        assert!(session.game_over());
        assert!(summary.score >= 150);
        assert_eq!(summary.score, session.best_score());
    }

    #[test]
    fn run_autoplay_honors_turn_limit() {
        let mut engine = Engine::new(EngineConfig::default().with_seed(4)).unwrap();
        let mut session = MoveBudgetSession::default();
        let summary = run_autoplay(&mut engine, &mut session, Some(2), |_, _, _| {}).unwrap();
        assert_eq!(summary.turns, 2);
        assert_eq!(session.moves_left(), 28);
        assert!(!session.game_over());
    }
}
