use clap::Subcommand;
use valweek_core::storage::{self, JsonProgressStore, ProgressStore};

#[derive(Subcommand)]
pub enum ProgressAction {
    /// Show which days have been completed
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Forget all completions
    Reset {
        /// Actually do it
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: ProgressAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ProgressAction::Show { json } => {
            let store = JsonProgressStore::open_default()?;
            let all = store.load_all();
            if json {
                println!("{}", serde_json::to_string_pretty(&all)?);
            } else if all.is_empty() {
                println!("Nothing completed yet.");
            } else {
                for (day, record) in &all {
                    println!("{:<12} completed {}", day.to_string(), record.completed_at);
                }
            }
        }
        ProgressAction::Reset { yes } => {
            if !yes {
                println!("This forgets every completion. Re-run with --yes to confirm.");
                return Ok(());
            }
            let path = storage::data_dir()?.join("progress.json");
            match std::fs::remove_file(&path) {
                Ok(()) => println!("Progress cleared."),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    println!("Nothing to clear.");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
    Ok(())
}
