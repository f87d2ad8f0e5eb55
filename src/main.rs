//! dlgo: play Go against a random or MCTS bot on the command line.
//!
//! ## Usage
//!
//! - `dlgo play` - Human (black by default) against the bot
//! - `dlgo selfplay` - MCTS against the random bot, moves logged

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use flexi_logger::{Logger, opt_format};
use log::{info, warn};

use dlgo::agent::{Agent, RandomBot};
use dlgo::config::MctsConfig;
use dlgo::constants::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, N_SIMS, TEMPERATURE};
use dlgo::coords::{format_move, parse_move};
use dlgo::game::GameState;
use dlgo::mcts::MctsAgent;
use dlgo::playout::{StoneCountJudge, decide_winner};
use dlgo::types::Player;

/// dlgo: Go rules engine with a Monte Carlo Tree Search bot
#[derive(Parser)]
#[command(name = "dlgo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args, Clone)]
struct EngineArgs {
    /// Board size (NxN)
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,

    /// MCTS simulations per move
    #[arg(long, default_value_t = N_SIMS)]
    sims: usize,

    /// UCT exploration weight
    #[arg(long, default_value_t = TEMPERATURE)]
    temperature: f64,

    /// Seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the bot from the terminal
    Play {
        #[command(flatten)]
        engine: EngineArgs,

        /// Opponent type
        #[arg(long, value_enum, default_value_t = BotKind::Random)]
        bot: BotKind,

        /// Color the human plays
        #[arg(long, value_enum, default_value_t = Side::Black)]
        human: Side,
    },
    /// Let MCTS play against the random bot
    Selfplay {
        #[command(flatten)]
        engine: EngineArgs,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum BotKind {
    Random,
    Mcts,
}

#[derive(Copy, Clone, ValueEnum)]
enum Side {
    Black,
    White,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => Player::Black,
            Side::White => Player::White,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _logger = Logger::try_with_env_or_str(&cli.log_level)
        .context("invalid log specification")?
        .format(opt_format)
        .start()
        .context("failed to start logger")?;

    match cli.command {
        Some(Commands::Play { engine, bot, human }) => {
            let bot = make_bot(&engine, bot)?;
            run_human_game(&engine, bot, human.into())
        }
        Some(Commands::Selfplay { engine }) => run_selfplay(&engine),
        None => run_selfplay(&EngineArgs {
            size: DEFAULT_BOARD_SIZE,
            sims: N_SIMS,
            temperature: TEMPERATURE,
            seed: None,
        }),
    }
}

fn check_size(size: usize) -> Result<()> {
    if size == 0 || size > MAX_BOARD_SIZE {
        bail!("board size must be between 1 and {MAX_BOARD_SIZE} (got {size})");
    }
    Ok(())
}

fn mcts_agent(engine: &EngineArgs) -> MctsAgent {
    let config = MctsConfig::with_simulations(engine.sims).temperature(engine.temperature);
    match engine.seed {
        Some(seed) => MctsAgent::with_seed(config, seed),
        None => MctsAgent::new(config),
    }
}

fn random_bot(engine: &EngineArgs) -> RandomBot {
    match engine.seed {
        // Offset so the random bot does not mirror the MCTS stream.
        Some(seed) => RandomBot::with_seed(seed.wrapping_add(1)),
        None => RandomBot::new(),
    }
}

fn make_bot(engine: &EngineArgs, kind: BotKind) -> Result<Box<dyn Agent>> {
    check_size(engine.size)?;
    Ok(match kind {
        BotKind::Random => Box::new(random_bot(engine)),
        BotKind::Mcts => Box::new(mcts_agent(engine)),
    })
}

fn report_result(game: &GameState) {
    let winner = decide_winner(game, &StoneCountJudge);
    let board = game.board();
    info!(
        "game over after {} moves: {winner} wins (black {} stones, white {} stones)",
        game.move_number(),
        board.count_stones(Player::Black),
        board.count_stones(Player::White)
    );
    println!("{winner} wins");
}

fn run_human_game(engine: &EngineArgs, mut bot: Box<dyn Agent>, human: Player) -> Result<()> {
    let mut game = GameState::new_square(engine.size);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    while !game.is_over() {
        print!("\x1b[2J");
        println!("{}", game.board());

        let mv = if game.next_player() == human {
            write!(stdout, "-- ")?;
            stdout.flush()?;
            let Some(line) = lines.next() else {
                bail!("input closed before the game ended");
            };
            let line = line.context("failed to read move")?;
            match parse_move(&line) {
                Ok(mv) => mv,
                Err(err) => {
                    warn!("{err}");
                    continue;
                }
            }
        } else {
            bot.select_move(&game)
        };

        match game.try_apply_move(mv) {
            Ok(next) => {
                println!("{}", format_move(game.next_player(), mv));
                game = next;
            }
            Err(err) => warn!("{err}"),
        }
    }

    println!("{}", game.board());
    report_result(&game);
    Ok(())
}

fn run_selfplay(engine: &EngineArgs) -> Result<()> {
    check_size(engine.size)?;
    let mut black = mcts_agent(engine);
    let mut white = random_bot(engine);
    let mut game = GameState::new_square(engine.size);
    let max_moves = black.config().max_rollout_moves(engine.size, engine.size);

    while !game.is_over() && game.move_number() < max_moves {
        let mv = match game.next_player() {
            Player::Black => black.select_move(&game),
            Player::White => white.select_move(&game),
        };
        info!("{}", format_move(game.next_player(), mv));
        game = game.apply_move(mv);
    }

    println!("{}", game.board());
    report_result(&game);
    Ok(())
}
