use serde::Serialize;
use valweek_core::storage::{JsonProgressStore, ProgressStore};
use valweek_core::{days, unlock};

use super::{short_date, UnlockArgs};

#[derive(Serialize)]
struct DayRow {
    key: String,
    title: &'static str,
    blurb: &'static str,
    unlock_date: String,
    unlocked: bool,
    completed: bool,
}

pub fn run(args: &UnlockArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let today = args.today();
    let progress = JsonProgressStore::open_default()?;

    let rows: Vec<DayRow> = days::all()
        .into_iter()
        .map(|d| DayRow {
            key: d.key.to_string(),
            title: d.title,
            blurb: d.blurb,
            unlock_date: d.unlock_date.to_string(),
            unlocked: unlock::is_unlocked(today, d.unlock_date, args.dev),
            completed: progress.is_completed(d.key),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for (row, d) in rows.iter().zip(days::all()) {
        let mark = if row.completed { " ✓" } else { "" };
        let action = if !row.unlocked {
            format!("Locked · unlocks {}", short_date(d.unlock_date))
        } else if row.completed {
            "Replay".to_string()
        } else {
            "Play".to_string()
        };
        println!(
            "{:<12} {:<22} {:<10} {}{}",
            row.key,
            row.title,
            short_date(d.unlock_date),
            action,
            mark
        );
        println!("{:<12} {}", "", row.blurb);
    }
    Ok(())
}
