use std::path::PathBuf;

use clap::Subcommand;
use valweek_core::card::{self, CardSpec};
use valweek_core::error::CardError;
use valweek_core::Config;

#[derive(Subcommand)]
pub enum CardAction {
    /// List the configured pledge texts
    Pledges,
    /// Compose a promise card without the interactive game
    Render {
        /// Index into the pledge list (see `card pledges`)
        pledge: usize,
        /// Output PNG path
        #[arg(long)]
        out: PathBuf,
        /// JSON file of signature strokes: [[[x, y], ...], ...]
        #[arg(long)]
        signature: Option<PathBuf>,
    },
}

pub fn run(action: CardAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    match action {
        CardAction::Pledges => {
            for (idx, pledge) in config.pledge.pledges.iter().enumerate() {
                println!("{idx}: {pledge}");
            }
        }
        CardAction::Render {
            pledge,
            out,
            signature,
        } => {
            let text = config
                .pledge
                .pledges
                .get(pledge)
                .ok_or(CardError::UnknownPledge(pledge))?;
            let strokes: Vec<Vec<(f32, f32)>> = match signature {
                Some(path) => {
                    let raw = std::fs::read_to_string(&path)?;
                    serde_json::from_str(&raw)
                        .map_err(|e| CardError::BadSignature(e.to_string()))?
                }
                None => Vec::new(),
            };
            card::render_to(
                &out,
                &CardSpec {
                    pledge: text,
                    strokes: &strokes,
                },
            )?;
            println!("Wrote {}", out.display());
        }
    }
    Ok(())
}
