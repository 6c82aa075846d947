use std::path::PathBuf;

use clap::Subcommand;
use valweek_core::storage::{PhotoDb, PhotoStore};

#[derive(Subcommand)]
pub enum PhotosAction {
    /// Add or replace a photo under an id
    Import { id: String, path: PathBuf },
    /// List stored photo ids and sizes
    List,
    /// Write a stored photo back out to a file
    Export { id: String, path: PathBuf },
    /// Remove a photo
    Delete { id: String },
}

pub fn run(action: PhotosAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = PhotoDb::open_default()?;
    match action {
        PhotosAction::Import { id, path } => {
            let bytes = std::fs::read(&path)?;
            db.put(&id, &bytes)?;
            println!("Imported {} ({} bytes) as '{}'", path.display(), bytes.len(), id);
        }
        PhotosAction::List => {
            let all = db.get_all()?;
            if all.is_empty() {
                println!("No photos stored.");
            }
            for record in all {
                println!("{:<12} {} bytes", record.id, record.bytes.len());
            }
        }
        PhotosAction::Export { id, path } => match db.get(&id)? {
            Some(bytes) => {
                std::fs::write(&path, bytes)?;
                println!("Wrote {}", path.display());
            }
            None => println!("image not found: '{id}'"),
        },
        PhotosAction::Delete { id } => {
            db.delete(&id)?;
            println!("Deleted '{id}'");
        }
    }
    Ok(())
}
