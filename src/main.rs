//! Headless autoplay runner (default binary).
//!
//! Plays hinted moves until the move budget runs out and prints the board
//! after every turn:
//!
//! ```text
//! gem-cascade [--seed N] [--turns N] [--config FILE]
//! ```

use anyhow::Result;

use gem_cascade::autoplay::{load_config, parse_autoplay_args, run_autoplay};
use gem_cascade::core::{Engine, MoveBudgetSession};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_autoplay_args(&args)?;
    let config = load_config(&args)?;

    let mut session = MoveBudgetSession::new(config.initial_moves);
    let mut engine = Engine::new(config)?;

    println!("seed {}", engine.config().seed);
    print!("{}", engine.board());

    let summary = run_autoplay(&mut engine, &mut session, args.turns, |turn, engine, session| {
        println!();
        println!(
            "turn {:>3}  score {:>6}  moves left {:>3}",
            turn,
            session.score(),
            session.moves_left()
        );
        print!("{}", engine.board());
    })?;

    println!();
    println!(
        "{} turns, {} rounds, {} specials, {} shuffles, final score {}",
        summary.turns, summary.rounds, summary.specials_created, summary.shuffles, summary.score
    );
    Ok(())
}
