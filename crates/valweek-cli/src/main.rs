use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "valweek", version, about = "A week of little games, one per day")]
struct Cli {
    /// Unlock every day regardless of the date
    #[arg(long, global = true)]
    dev: bool,

    /// Override today's date (YYYY-MM-DD)
    #[arg(long, global = true)]
    date: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the week's days with unlock and completion state
    Days {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Play a day's minigame in the terminal
    Play {
        /// Day key (rose, propose, chocolate, teddy, promise, hug, kiss, valentine)
        day: String,
    },
    /// Completion progress
    Progress {
        #[command(subcommand)]
        action: commands::progress::ProgressAction,
    },
    /// Photo library management
    Photos {
        #[command(subcommand)]
        action: commands::photos::PhotosAction,
    },
    /// Promise card rendering
    Card {
        #[command(subcommand)]
        action: commands::card::CardAction,
    },
    /// Generate shell completions
    Completions { shell: clap_complete::Shell },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let unlock = commands::UnlockArgs {
        dev: cli.dev,
        date: cli.date.clone(),
    };
    let result = match cli.command {
        Commands::Days { json } => commands::days::run(&unlock, json),
        Commands::Play { day } => commands::play::run(&unlock, &day),
        Commands::Progress { action } => commands::progress::run(action),
        Commands::Photos { action } => commands::photos::run(action),
        Commands::Card { action } => commands::card::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "valweek",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
