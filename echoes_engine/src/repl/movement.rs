//! `repl::movement` module
//!
//! Contains repl loop handlers for commands that change player location

use crate::dice::Dice;
use crate::repl::look_handler;
use crate::{EchoesWorld, Enemy, GameConfig, View, ViewItem};

use anyhow::Result;
use log::{error, info};

/// Rooms where wandering creatures may appear each time the player enters.
pub const ENCOUNTER_ROOMS: &[&str] = &["forest", "cave"];

/// Move the player to a neighboring location, if nothing bars the way.
///
/// # Errors
/// - if the player's room cannot be found
pub fn move_to_handler(
    world: &mut EchoesWorld,
    view: &mut View,
    dice: &mut dyn Dice,
    config: &GameConfig,
    direction: &str,
) -> Result<()> {
    let current_room = world.player_room_ref()?;
    if current_room.has_living_enemies() {
        info!("{} tried to leave '{}' with enemies present", world.player.name, current_room.id);
        view.push(ViewItem::ActionFailure(
            "You can't leave while enemies are present! You must fight or find another way.".to_string(),
        ));
        return Ok(());
    }
    let Some(destination_id) = current_room.exit_to(direction).cloned() else {
        view.push(ViewItem::ActionFailure("You can't go that way.".to_string()));
        return Ok(());
    };

    let leaving_id = current_room.id.clone();
    let Some(destination) = world.rooms.get_mut(&destination_id) else {
        error!("exit '{direction}' from '{leaving_id}' leads to missing room '{destination_id}'");
        view.push(ViewItem::Error("Error: Room not found.".to_string()));
        return Ok(());
    };

    view.push(ViewItem::TransitionMessage(format!("You move {direction}...")));
    destination.visited = true;
    if ENCOUNTER_ROOMS.contains(&destination_id.as_str()) && dice.percent(config.encounter_chance) {
        let enemy = Enemy::random_encounter(dice);
        view.push(ViewItem::EnemyAppears(enemy.name.clone()));
        destination.add_enemy(enemy);
    }
    info!("{} moved from '{leaving_id}' to '{destination_id}'", world.player.name);
    world.current_room = destination_id;

    look_handler(world, view)
}
