#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const ECHOES_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Room, item and other world-object identifiers.
pub type Id = String;

// Core modules
pub mod command;
pub mod config;
pub mod dice;
pub mod enemy;
pub mod health;
pub mod item;
pub mod loader;
pub mod player;
pub mod repl;
pub mod room;
pub mod style;
pub mod view;
pub mod world;

// Re-exports for convenience
pub use config::GameConfig;
pub use dice::{Dice, GameDice, ScriptedDice};
pub use enemy::{Enemy, EnemyKind};
pub use item::{Item, ItemHolder, ItemKind};
pub use loader::build_world;
pub use player::Player;
pub use repl::{GameOutcome, run_repl};
pub use room::{Hazard, Room};
pub use view::{View, ViewItem};
pub use world::{EchoesWorld, WorldError, WorldObject};
