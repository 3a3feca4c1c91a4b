//! `repl::system` module
//!
//! Game-level commands: help, status, the save/load stand-ins, quitting and the
//! end-of-game summary.

use crate::command::help_commands;
use crate::health::LivingEntity;
use crate::repl::ReplControl;
use crate::repl::input::{InputEvent, LineSource};
use crate::view::StatusLines;
use crate::world::BOSS_MEMORY;
use crate::{EchoesWorld, View, ViewItem, WorldObject};

use anyhow::Result;
use log::{info, warn};

/// Name used when the player declines to give one.
pub const DEFAULT_PLAYER_NAME: &str = "Unknown";

/// Ask for the player's name. Blank answers and closed input give the default.
pub fn prompt_player_name(input: &mut dyn LineSource) -> String {
    match input.read_line("Enter your name: ") {
        Ok(InputEvent::Line(line)) if !line.trim().is_empty() => line.trim().to_string(),
        Ok(_) => DEFAULT_PLAYER_NAME.to_string(),
        Err(err) => {
            warn!("failed to read player name: {err}");
            DEFAULT_PLAYER_NAME.to_string()
        },
    }
}

/// Show help menu.
pub fn help_handler(view: &mut View) {
    view.push(ViewItem::Help(help_commands()));
}

/// Show the player's vital statistics.
pub fn status_handler(world: &EchoesWorld, view: &mut View) {
    let player = &world.player;
    view.push(ViewItem::CharacterStatus(StatusLines {
        name: player.name().to_string(),
        description: player.description().to_string(),
        hp: player.current_hp(),
        max_hp: player.max_hp(),
        attack: player.attack(),
        defense: player.defense,
        gold: player.gold,
        location: world.current_room_name(),
        turns: world.turn_count,
    }));
}

/// Saving is not supported; acknowledge the request without writing anything.
pub fn save_handler(world: &EchoesWorld, view: &mut View) {
    info!("save requested on turn {} (no state written)", world.turn_count);
    view.push(ViewItem::EngineMessage(
        "Game saved! (Save system would store current state)".to_string(),
    ));
}

/// Loading is not supported; acknowledge the request without changing anything.
pub fn load_handler(world: &EchoesWorld, view: &mut View) {
    info!("load requested on turn {} (no state read)", world.turn_count);
    view.push(ViewItem::EngineMessage(
        "Game loaded! (Load system would restore saved state)".to_string(),
    ));
}

/// Confirm and quit. Closed input counts as a yes.
///
/// # Errors
/// Currently infallible; returns `Result` to match the other handlers.
pub fn quit_handler(world: &EchoesWorld, view: &mut View, input: &mut dyn LineSource) -> Result<ReplControl> {
    view.flush();
    let confirmed = match input.read_line("Are you sure you want to quit? (y/n): ") {
        Ok(InputEvent::Line(answer)) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Ok(InputEvent::Eof) => true,
        Ok(InputEvent::Interrupted) => false,
        Err(err) => {
            warn!("failed to read quit confirmation: {err}");
            false
        },
    };
    if !confirmed {
        return Ok(ReplControl::Continue);
    }

    info!("{} quit on turn {}", world.player.name, world.turn_count);
    info!("ending inventory:");
    world
        .player
        .inventory
        .iter()
        .for_each(|item| info!("- {} ({})", item.name, item.id));
    view.push(ViewItem::EngineMessage(
        "Thanks for playing Echoes of the Forgotten Realm!".to_string(),
    ));
    Ok(ReplControl::Quit)
}

/// Push the final victory or defeat summary.
pub fn game_over_handler(world: &EchoesWorld, view: &mut View, won: bool) {
    view.push(ViewItem::GameOver {
        won,
        turns: world.turn_count,
        memory_recovered: world.player.has_memory(BOSS_MEMORY),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::input::ScriptedInput;

    #[test]
    fn blank_name_becomes_unknown() {
        assert_eq!(prompt_player_name(&mut ScriptedInput::new(["   "])), "Unknown");
        assert_eq!(prompt_player_name(&mut ScriptedInput::new(Vec::<String>::new())), "Unknown");
        assert_eq!(prompt_player_name(&mut ScriptedInput::new([" Aria "])), "Aria");
    }

    #[test]
    fn quit_accepts_y_and_yes_only() {
        let world = EchoesWorld::new_empty();
        for (answer, expected) in [
            ("y", ReplControl::Quit),
            ("YES", ReplControl::Quit),
            ("n", ReplControl::Continue),
            ("yep", ReplControl::Continue),
        ] {
            let mut view = View::capture();
            let mut input = ScriptedInput::new([answer]);
            assert_eq!(quit_handler(&world, &mut view, &mut input).unwrap(), expected, "answer: {answer}");
            assert_eq!(
                view.mentions("Thanks for playing"),
                expected == ReplControl::Quit,
                "answer: {answer}"
            );
        }
    }

    #[test]
    fn quit_with_closed_input_is_confirmed() {
        let world = EchoesWorld::new_empty();
        let mut view = View::capture();
        let mut input = ScriptedInput::default();
        assert_eq!(quit_handler(&world, &mut view, &mut input).unwrap(), ReplControl::Quit);
    }

    #[test]
    fn status_reports_location_and_turns() {
        let mut world = EchoesWorld::new_empty();
        world
            .rooms
            .insert("hut".into(), crate::room::Room::new("hut", "Hermit's Hut", ""));
        world.current_room = "hut".into();
        world.turn_count = 4;
        let mut view = View::capture();
        status_handler(&world, &mut view);
        assert!(view.mentions("Current Location: Hermit's Hut"));
        assert!(view.mentions("Turns Played: 4"));
        assert!(view.mentions("Health: 100/100"));
        assert!(view.mentions("Description: a wanderer with no memory"));
    }

    #[test]
    fn save_and_load_are_acknowledged() {
        let world = EchoesWorld::new_empty();
        let mut view = View::capture();
        save_handler(&world, &mut view);
        load_handler(&world, &mut view);
        assert!(view.mentions("Game saved!"));
        assert!(view.mentions("Game loaded!"));
    }
}
