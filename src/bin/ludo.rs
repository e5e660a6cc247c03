//! Play a match in the terminal.
//!
//! ```text
//! ludo --players Ann,Bob,Cid --seed 7
//! ludo --config match.toml --auto
//! RUST_LOG=debug ludo --auto
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use clap::Parser;

use rust_ludo::board::{BoardView, Match};
use rust_ludo::core::{MatchConfig, TokenId};
use rust_ludo::turn::{Candidate, Chooser, ExitOrMove, FirstOptionChooser, TurnEngine};

#[derive(Parser, Debug)]
#[command(about = "Race your tokens around the board")]
struct Args {
    /// TOML file with a match configuration; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Contestant names in seat order.
    #[arg(long, value_delimiter = ',')]
    players: Option<Vec<String>>,
    #[arg(long)]
    fields: Option<usize>,
    #[arg(long)]
    tokens: Option<usize>,
    /// Dice faces, e.g. 1,2,3,4,5,6.
    #[arg(long, value_delimiter = ',')]
    dice: Option<Vec<u32>>,
    #[arg(long)]
    exit_attempts: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    /// Let the computer answer every question.
    #[arg(long)]
    auto: bool,
}

impl Args {
    fn match_config(&self) -> anyhow::Result<MatchConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                toml::from_str(&text).context("Failed to parse config")?
            }
            None => MatchConfig::default(),
        };

        if let Some(players) = &self.players {
            config.names = players.clone();
        }
        if let Some(fields) = self.fields {
            config = config.with_fields_per_contestant(fields);
        }
        if let Some(tokens) = self.tokens {
            config = config.with_tokens_per_contestant(tokens);
        }
        if let Some(dice) = &self.dice {
            config = config.with_dice_faces(dice.iter().copied());
        }
        if let Some(attempts) = self.exit_attempts {
            config = config.with_exit_attempts(attempts);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }

        config
            .validate()
            .map_err(|e| anyhow!("Config validation failed: {e}"))?;
        Ok(config)
    }
}

/// Asks the person at the keyboard, re-prompting until the answer is valid.
///
/// The rules never proceed without a real answer, so closed input ends
/// the program.
struct PromptChooser<R> {
    input: R,
}

impl<R: BufRead> PromptChooser<R> {
    fn new(input: R) -> Self {
        Self { input }
    }

    fn read_answer(&mut self) -> anyhow::Result<String> {
        io::stdout().flush().context("Failed to flush prompt")?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("Failed to read answer")?;
        if read == 0 {
            bail!("input closed before the match was over");
        }
        Ok(line.trim().to_string())
    }

    fn answer(&mut self) -> String {
        match self.read_answer() {
            Ok(answer) => answer,
            Err(e) => {
                log::error!("{e:#}");
                eprintln!("Error: {e:#}");
                std::process::exit(1);
            }
        }
    }
}

fn describe(game: &Match, candidate: &Candidate) -> String {
    let mut text = format!("{} | ", candidate.token.letter());
    match candidate.fields_to_finish {
        Some(fields) => text.push_str(&format!("{fields:>2} fields to finish")),
        None => text.push_str("Inside finish"),
    }
    if let Some(victim) = candidate.captures {
        text.push_str(&format!(
            " | Would throw out {} of {}",
            victim.letter(),
            game.contestant(victim.seat).name()
        ));
    }
    text
}

impl<R: BufRead> Chooser for PromptChooser<R> {
    fn exit_or_move(&mut self, _game: &Match, _roll: u32, candidates: &[Candidate]) -> ExitOrMove {
        println!(
            "You could move one of {}x pieces. Or would you like to move a piece out of the house? (y/n)",
            candidates.len()
        );
        loop {
            match self.answer().to_lowercase().as_str() {
                "y" => return ExitOrMove::ExitHome,
                "n" => return ExitOrMove::MoveToken,
                _ => {}
            }
        }
    }

    fn pick_token(&mut self, game: &Match, _roll: u32, candidates: &[Candidate]) -> TokenId {
        println!("The following pieces can be moved:");
        for candidate in candidates {
            println!("{}", describe(game, candidate));
        }
        println!("Please select piece to move");

        loop {
            let answer = self.answer().to_uppercase();
            if let Some(candidate) = candidates
                .iter()
                .find(|c| answer.chars().eq(std::iter::once(c.token.letter())))
            {
                return candidate.token;
            }
        }
    }
}

fn play(game: &mut Match, chooser: Box<dyn Chooser>) {
    let mut engine = TurnEngine::new(game, chooser);

    loop {
        let seat = game.current_seat();
        println!("======== TURN {} ========", engine.turns_played() + 1);
        println!("Currently playing: {}", game.contestant(seat).name());
        print!("{}", BoardView::new(game));

        let Some(report) = engine.play_turn(game) else {
            break;
        };
        let rolls: Vec<String> = report.rolls.iter().map(u32::to_string).collect();
        println!("Rolled {}", rolls.join(", "));
        if let Some(rank) = report.finished_rank {
            println!("Congratulations {} you finished as {}", game.contestant(seat).name(), rank);
        }
        println!();
        if report.next.is_none() {
            break;
        }
    }

    print!("{}", BoardView::new(game));
    if let Some(standings) = engine.standings() {
        for seat in standings.podium() {
            println!("{}. {}", standings.rank(seat), game.contestant(seat).name());
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = args.match_config()?;
    let mut game = Match::new(config);

    let chooser: Box<dyn Chooser> = if args.auto {
        Box::new(FirstOptionChooser)
    } else {
        Box::new(PromptChooser::new(io::stdin().lock()))
    };
    play(&mut game, chooser);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_ludo::core::SeatId;

    fn candidate(ordinal: u8, from: usize) -> Candidate {
        Candidate {
            token: TokenId::new(SeatId::new(0), ordinal),
            from,
            fields_to_finish: Some(40 - from),
            captures: None,
        }
    }

    #[test]
    fn test_exit_or_move_reprompts() {
        let game = Match::new(MatchConfig::default());
        let mut chooser = PromptChooser::new(io::Cursor::new("maybe\nY\n"));

        let answer = chooser.exit_or_move(&game, 6, &[candidate(1, 3)]);
        assert_eq!(answer, ExitOrMove::ExitHome);
    }

    #[test]
    fn test_pick_token_by_letter() {
        let game = Match::new(MatchConfig::default());
        let mut chooser = PromptChooser::new(io::Cursor::new("d\nb\n"));

        let picked = chooser.pick_token(&game, 2, &[candidate(3, 12), candidate(2, 5)]);
        assert_eq!(picked, TokenId::new(SeatId::new(0), 2));
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut chooser = PromptChooser::new(io::Cursor::new("n\n"));

        assert_eq!(chooser.read_answer().unwrap(), "n");
        let err = chooser.read_answer().unwrap_err();
        assert!(err.to_string().contains("input closed"));
    }
}
