//! # Valweek Core Library
//!
//! Core logic for a week of date-gated minigames: day unlocking, progress
//! and photo stores, the per-game state machines, and the promise-card
//! renderer. The CLI binary is a thin frontend over this crate.
//!
//! ## Architecture
//!
//! - **Unlock resolver**: pure civil-date comparison in a fixed reference
//!   timezone, with a developer flag and an override date
//! - **Stores**: progress as one atomically-written JSON document, photos in
//!   SQLite; both behind injectable traits with in-memory fakes
//! - **Minigame engines**: caller-driven state machines -- the frontend
//!   feeds `input()` and `tick()`, the engine reports wins
//! - **Session**: the dispatcher that owns one engine, its ticker, and the
//!   win/celebration/teardown lifecycle
//!
//! ## Key Components
//!
//! - [`GameSession`]: open/close lifecycle around one minigame
//! - [`ProgressStore`] / [`PhotoStore`]: persistence seams
//! - [`Config`]: TOML-backed tuning, pledge texts, and memory rounds
//! - [`card`]: fixed-layout promise-card PNG composition

pub mod card;
pub mod config;
pub mod days;
pub mod error;
pub mod events;
pub mod games;
pub mod session;
pub mod storage;
pub mod ticker;
pub mod unlock;

pub use config::Config;
pub use days::{DayDescriptor, DayKey};
pub use error::{CardError, ConfigError, CoreError, StoreError};
pub use events::Event;
pub use games::{GameEvent, GameInput, GameView, Minigame, Phase};
pub use session::GameSession;
pub use storage::{
    JsonProgressStore, MemoryPhotoStore, MemoryProgressStore, PhotoDb, PhotoStore, ProgressStore,
};
pub use ticker::{TickHandle, Ticker};
