//! REPL and command handling utilities.
//!
//! The game runs in a read-eval-print loop. This module and its submodules
//! implement the various command handlers that manipulate the [`EchoesWorld`].

pub mod combat;
pub mod input;
pub mod inventory;
pub mod item;
pub mod look;
pub mod movement;
pub mod system;

pub use combat::*;
pub use input::{InputEvent, InputManager, LineSource, ScriptedInput};
pub use inventory::*;
pub use item::*;
pub use look::*;
pub use movement::*;
pub use system::*;

use crate::command::{Command, parse_command, tokenize};
use crate::dice::Dice;
use crate::health::LivingEntity;
use crate::style::GameStyle;
use crate::world::EchoesWorld;
use crate::{GameConfig, View, ViewItem};

use anyhow::Result;
use log::{error, info, warn};

/// Consecutive failed reads tolerated before input is treated as gone.
pub const MAX_READ_FAILURES: u32 = 3;

/// Control flow signal used by handlers to exit the REPL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplControl {
    Continue,
    Quit,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// The Shadow Lord fell and the player remembers it.
    Won,
    /// The player's health reached zero.
    Lost,
    /// The player quit or input ran out.
    Quit,
}

/// Run the main read-eval-print loop until the game is won, lost or abandoned.
///
/// Greets the player and describes the starting room, then reads one command per
/// turn. Every non-empty line is a turn: after its handler runs, room hazards are
/// applied and the win condition is checked.
///
/// # Errors
/// - Propagates failures from handlers, such as a missing room for the player.
pub fn run_repl(
    world: &mut EchoesWorld,
    view: &mut View,
    input: &mut dyn LineSource,
    dice: &mut dyn Dice,
    config: &GameConfig,
) -> Result<GameOutcome> {
    #[allow(clippy::enum_glob_use)]
    use Command::*;

    view.push(ViewItem::EngineMessage(format!("Welcome, {}!", world.player.name)));
    view.push(ViewItem::EngineMessage("Type 'help' for available commands.".to_string()));
    look_handler(world, view)?;
    view.flush();

    let mut running = true;
    let mut read_failures = 0;
    while running && world.player.is_alive() {
        let prompt = format!(
            "\n[Turn: {}|HP: {}/{}]> ",
            world.turn_count,
            world.player.current_hp(),
            world.player.max_hp()
        )
        .prompt_style()
        .to_string();

        let event = input.read_line(&prompt);
        if event.is_ok() {
            read_failures = 0;
        }
        let line = match event {
            Ok(InputEvent::Line(line)) => line,
            Ok(InputEvent::Eof) => {
                info!("input closed at the main prompt; ending session");
                break;
            },
            Ok(InputEvent::Interrupted) => {
                view.push(ViewItem::EngineMessage("Command canceled.".to_string()));
                view.flush();
                continue;
            },
            Err(err) => {
                read_failures += 1;
                if read_failures >= MAX_READ_FAILURES {
                    error!("giving up after {read_failures} failed reads: {err}");
                    view.push(ViewItem::Error("Input is unavailable. Ending the session.".to_string()));
                    view.flush();
                    break;
                }
                warn!("failed to read input: {err}");
                view.push(ViewItem::Error("Failed to read input. Try again.".to_string()));
                view.flush();
                continue;
            },
        };

        let Some(command) = parse_command(&tokenize(&line)) else {
            continue;
        };
        info!("================> TURN {} <================", world.turn_count + 1);
        info!("command: {command:?}");

        match command {
            Look => look_handler(world, view)?,
            MoveTo(direction) => move_to_handler(world, view, dice, config, &direction)?,
            Take(item_name) => take_handler(world, view, &item_name)?,
            UseItem(item_name) => use_handler(world, view, &item_name)?,
            Attack => {
                if attack_handler(world, view, input, dice, config)? == ReplControl::Quit {
                    running = false;
                }
            },
            Inventory => inv_handler(world, view),
            Memory => memory_handler(world, view),
            Status => status_handler(world, view),
            Save => save_handler(world, view),
            Load => load_handler(world, view),
            Help => help_handler(view),
            Quit => {
                if quit_handler(world, view, input)? == ReplControl::Quit {
                    running = false;
                }
            },
            MissingArgument(message) => view.push(ViewItem::ActionFailure(message.to_string())),
            Unknown(verb) => {
                info!("unrecognized command verb '{verb}'");
                view.push(ViewItem::Error(
                    "I don't understand that command. Type 'help' for available commands.".to_string(),
                ));
            },
        }

        world.turn_count += 1;
        apply_hazards(world, view)?;
        if world.has_won() {
            info!("victory condition met on turn {}", world.turn_count);
            running = false;
        }
        view.flush();
    }

    let outcome = if !world.player.is_alive() {
        GameOutcome::Lost
    } else if world.has_won() {
        GameOutcome::Won
    } else {
        GameOutcome::Quit
    };
    info!("session over after {} turns: {outcome:?}", world.turn_count);
    if outcome != GameOutcome::Quit {
        game_over_handler(world, view, outcome == GameOutcome::Won);
    }
    view.flush();
    Ok(outcome)
}

/// Damage the player according to the current room's hazard.
///
/// # Errors
/// - if the player's room cannot be found
pub fn apply_hazards(world: &mut EchoesWorld, view: &mut View) -> Result<()> {
    let hazard = world.player_room_ref()?.hazard;
    let amount = hazard.damage_per_turn();
    if amount == 0 || !world.player.is_alive() {
        return Ok(());
    }
    world.player.damage(amount);
    info!(
        "{} took {amount} hazard damage from {hazard:?} ({} hp left)",
        world.player.name,
        world.player.current_hp()
    );
    view.push(ViewItem::CharacterHarmed {
        name: world.player.name.clone(),
        cause: hazard.cause().to_string(),
        amount,
    });
    if !world.player.is_alive() {
        view.push(ViewItem::CharacterDeath {
            name: world.player.name.clone(),
            is_player: true,
        });
    }
    Ok(())
}

/// Add a memory to the player's journal, announcing it only the first time.
pub fn record_memory(world: &mut EchoesWorld, view: &mut View, memory: &str) {
    if world.player.add_memory(memory) {
        view.push(ViewItem::MemoryRecovered(memory.to_string()));
    }
}
