use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tenbo::config::Config;
use tenbo::ledger::{DateKey, HistoryTable, LedgerStore};
use tenbo::scoring::Player;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_VALIDATION: i32 = 1;
const EXIT_STORAGE: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the interactive scorekeeper (default if no subcommand)
    Play,
    /// Compute final scores for one game without recording it
    Calc {
        /// Raw points for seats 1 to 4
        #[arg(required = true, num_args = 4, allow_negative_numbers = true)]
        points: Vec<i64>,
        /// Seat (1-4) that receives the tobi bonus; repeat for several
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
        tobi: Vec<u8>,
        /// Comma-separated seat names (defaults to the configured names)
        #[arg(long, value_delimiter = ',')]
        names: Option<Vec<String>>,
        /// Tab-separated output
        #[arg(long)]
        tsv: bool,
    },
    /// Show the games recorded on one date with all-time totals
    History {
        /// Date to show as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<DateKey>,
        /// Tab-separated output
        #[arg(long)]
        tsv: bool,
    },
    /// List recorded dates with their game counts
    Dates,
    /// Delete every recorded game
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "tenbo")]
#[command(about = "Four-player mahjong scorekeeper with dated history", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/tenbo/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to history file (overrides the config's history_path)
    #[arg(long, global = true)]
    history: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    tenbo::logging::init(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Play);
    let config_path = cli.config.map(PathBuf::from);

    // Handle init before loading config (config may not exist yet)
    if let Commands::Init = command {
        if let Err(e) = tenbo::config::init::run_init_wizard(config_path) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let config = match tenbo::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate rules at startup
    if let Err(errors) = tenbo::scoring::validate_rules(&config.rules) {
        eprintln!("Rule config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let today = DateKey::today();

    match command {
        Commands::Calc {
            points,
            tobi,
            names,
            tsv,
        } => run_calc(&config, &points, &tobi, names, tsv),
        Commands::Play => {
            let store = open_store(&config, cli.history, today);
            let session = tenbo::session::Session::new(config.seat_names(), config.rules.clone());
            // Query the terminal before raw mode takes over
            let theme = tenbo::tui::resolve_theme(config.theme);
            let app = tenbo::tui::App::new(session, store, today, theme);
            if let Err(e) = tenbo::tui::run_tui(app) {
                eprintln!("TUI error: {:#}", e);
                std::process::exit(EXIT_STORAGE);
            }
        }
        Commands::History { date, tsv } => {
            let store = open_store(&config, cli.history, today);
            let date = date.unwrap_or(today);
            let names = config.seat_names();
            let table = HistoryTable::build(store.ledger(), date, names.iter().map(String::as_str));

            if tsv {
                println!("{}", tenbo::output::format_history_tsv(&table));
            } else {
                let use_colors = tenbo::output::should_use_colors();
                println!("{}", tenbo::output::format_history_table(&table, use_colors));
            }
        }
        Commands::Dates => {
            let store = open_store(&config, cli.history, today);
            println!("{}", tenbo::output::format_dates(store.ledger()));
        }
        Commands::Clear { yes } => {
            let mut store = open_store(&config, cli.history, today);
            let games = store.ledger().game_count();
            if games == 0 {
                println!("History is already empty.");
                std::process::exit(EXIT_SUCCESS);
            }

            if !yes {
                let prompt = format!("Delete all {} recorded games? This cannot be undone.", games);
                match tenbo::config::init::prompt_yes_no(&prompt, false) {
                    Ok(true) => {}
                    Ok(false) => {
                        println!("Aborted.");
                        std::process::exit(EXIT_SUCCESS);
                    }
                    Err(e) => {
                        eprintln!("{:#}", e);
                        std::process::exit(EXIT_VALIDATION);
                    }
                }
            }

            if let Err(e) = store.clear() {
                eprintln!("Failed to clear history: {:#}", e);
                std::process::exit(EXIT_STORAGE);
            }
            println!("Cleared {} games from {}", games, store.path().display());
        }
        // Handled before config load
        Commands::Init => {}
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Open the history file: `--history` wins over the config, which wins over
/// the default location. Exits with the storage code on failure.
fn open_store(config: &Config, flag: Option<String>, today: DateKey) -> LedgerStore {
    let path = match flag.map(PathBuf::from).or_else(|| config.history_path.clone()) {
        Some(p) => p,
        None => match tenbo::ledger::get_history_path() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Storage error: {:#}", e);
                std::process::exit(EXIT_STORAGE);
            }
        },
    };

    match LedgerStore::open(&path, today) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Storage error: {:#}", e);
            std::process::exit(EXIT_STORAGE);
        }
    }
}

fn run_calc(config: &Config, points: &[i64], tobi: &[u8], names: Option<Vec<String>>, tsv: bool) {
    let mut seat_names = config.seat_names();
    if let Some(names) = names {
        if names.len() != 4 {
            eprintln!("--names needs exactly 4 names, got {}", names.len());
            std::process::exit(EXIT_VALIDATION);
        }
        for (slot, name) in seat_names.iter_mut().zip(names) {
            *slot = name.trim().to_string();
        }
    }

    let players: [Player; 4] = std::array::from_fn(|i| {
        Player::new(i as u8 + 1, seat_names[i].clone(), points[i])
    });
    let mut danger = [false; 4];
    for &seat in tobi {
        danger[usize::from(seat) - 1] = true;
    }

    match tenbo::scoring::transform(&players, &danger, &config.rules) {
        Ok(finals) => {
            if tsv {
                println!("{}", tenbo::output::format_finals_tsv(&players, &finals));
            } else {
                let use_colors = tenbo::output::should_use_colors();
                println!("{}", tenbo::output::format_finals(&players, &finals, use_colors));
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(EXIT_VALIDATION);
        }
    }
}
