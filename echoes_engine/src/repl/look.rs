//! `repl::look` module
//!
//! Room description handler.

use crate::{EchoesWorld, View, ViewItem};

use anyhow::Result;
use log::info;

/// Describe the player's current room in full.
///
/// A pending special event is shown once and then discarded.
///
/// # Errors
/// - if the player's room cannot be found
pub fn look_handler(world: &mut EchoesWorld, view: &mut View) -> Result<()> {
    let special_event = world.player_room_mut()?.special_event.take();
    let room = world.player_room_ref()?;
    room.show(world, view);
    if let Some(event) = special_event {
        info!("special event in '{}' shown", room.id);
        view.push(ViewItem::TriggeredEvent(event));
    }
    Ok(())
}
