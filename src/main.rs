use anyhow::Result;
use clap::{Parser, ValueEnum};
use snake_arena::game::{Difficulty, RoundConfig};
use snake_arena::modes::{SoloMode, VersusMode};
use snake_arena::score::ScoreLedger;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake-arena")]
#[command(version, about = "Terminal snake with presets, a timed challenge, and a two-player arena")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "solo")]
    mode: Mode,

    /// Difficulty preset (solo and timed)
    #[arg(long, default_value = "medium")]
    difficulty: DifficultyChoice,

    /// Grid width (solo and timed; the versus arena is fixed at 60x25)
    #[arg(long, default_value = "40")]
    width: usize,

    /// Grid height
    #[arg(long, default_value = "20")]
    height: usize,

    /// Player name recorded in the score ledger
    #[arg(long, default_value = "Player")]
    name: String,

    /// Path of the persisted score store
    #[arg(long, default_value = "scores.txt")]
    scores: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// One snake, obstacles, level progression
    Solo,
    /// One-minute blitz with bonus food
    Timed,
    /// Local two-player arena
    Versus,
}

#[derive(Clone, Copy, ValueEnum)]
enum DifficultyChoice {
    Easy,
    Medium,
    Hard,
}

impl DifficultyChoice {
    fn preset(self) -> Difficulty {
        match self {
            DifficultyChoice::Easy => Difficulty::easy(),
            DifficultyChoice::Medium => Difficulty::medium(),
            DifficultyChoice::Hard => Difficulty::hard(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.mode {
        Mode::Solo | Mode::Timed => {
            let mut config = RoundConfig::new(cli.width, cli.height, cli.difficulty.preset());
            if matches!(cli.mode, Mode::Timed) {
                config = config.timed();
            }
            let ledger = ScoreLedger::new(cli.scores);
            let mut solo_mode = SoloMode::new(config, cli.name, ledger);
            solo_mode.run().await?;
        }
        Mode::Versus => {
            let mut versus_mode = VersusMode::new();
            versus_mode.run().await?;
        }
    }

    Ok(())
}
