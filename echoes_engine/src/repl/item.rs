//! `repl::item` module
//!
//! Handlers for picking items up and using them.

use crate::health::LivingEntity;
use crate::item::{Item, ItemHolder, ItemKind};
use crate::repl::record_memory;
use crate::{EchoesWorld, View, ViewItem};

use anyhow::Result;
use log::info;

/// Memories stirred by picking up particular items.
const ITEM_MEMORIES: &[(&str, &str)] = &[
    (
        "rusty sword",
        "You remember wielding this blade in battle against the Shadow Forces...",
    ),
    (
        "ancient key",
        "This key once opened the doors to your forgotten castle...",
    ),
    (
        "crystal shard",
        "The crystal resonates with power - a fragment of the Realm's heart...",
    ),
];

/// The key, the room it works in, and where the passage it opens leads.
const HIDDEN_PASSAGE_KEY: &str = "ancient key";
const HIDDEN_PASSAGE_ROOM: &str = "temple";
const HIDDEN_PASSAGE_DIRECTION: &str = "north";
const HIDDEN_PASSAGE_TO: &str = "chamber";
const HIDDEN_PASSAGE_EVENT: &str = "You unlock the hidden chamber! A passage opens to the north.";

fn memory_for(item_name: &str) -> Option<&'static str> {
    ITEM_MEMORIES
        .iter()
        .find(|(name, _)| *name == item_name)
        .map(|(_, memory)| *memory)
}

/// Move an item from the current room into the player's inventory.
///
/// Weapons are wielded at once; lore items stir a memory.
///
/// # Errors
/// - if the player's room cannot be found
pub fn take_handler(world: &mut EchoesWorld, view: &mut View, item_name: &str) -> Result<()> {
    let Some(item) = world.player_room_mut()?.remove_item(item_name) else {
        view.push(ViewItem::ActionFailure(format!("There's no {item_name} here.")));
        return Ok(());
    };
    info!("{} took '{}' ({}) from '{}'", world.player.name, item.name, item.id, world.current_room);
    view.push(ViewItem::ActionSuccess(format!("You picked up the {}.", item.name)));

    if let Some(memory) = memory_for(&item.name) {
        record_memory(world, view, memory);
    }
    let weapon = item.is_weapon().then(|| (item.id.clone(), item.name.clone()));
    world.player.add_item(item);
    if let Some((weapon_id, weapon_name)) = weapon {
        world.player.equip(&weapon_id);
        view.push(ViewItem::ActionSuccess(format!("You equip the {weapon_name}.")));
    }
    Ok(())
}

/// Use an item from the player's inventory.
///
/// # Errors
/// - if the player's room cannot be found
pub fn use_handler(world: &mut EchoesWorld, view: &mut View, item_name: &str) -> Result<()> {
    let Some(item) = world.player.find_item(item_name).cloned() else {
        view.push(ViewItem::ActionFailure(format!("You don't have a {item_name}.")));
        return Ok(());
    };
    match item.kind {
        ItemKind::Potion => drink_potion(world, view, &item),
        ItemKind::Key => use_key(world, view, &item)?,
        ItemKind::Weapon | ItemKind::QuestItem => {
            view.push(ViewItem::ActionFailure("You can't use that item.".to_string()));
        },
    }
    Ok(())
}

fn drink_potion(world: &mut EchoesWorld, view: &mut View, potion: &Item) {
    let before = world.player.current_hp();
    world.player.heal(potion.effect);
    world.player.remove_item(&potion.name);
    let healed = world.player.current_hp() - before;
    info!("{} drank '{}' and recovered {healed} hp", world.player.name, potion.id);

    view.push(ViewItem::ActionSuccess(format!("You used the {}.", potion.name)));
    if healed > 0 {
        view.push(ViewItem::CharacterHealed {
            name: world.player.name.clone(),
            cause: potion.name.clone(),
            amount: healed,
        });
    }
}

fn use_key(world: &mut EchoesWorld, view: &mut View, key: &Item) -> Result<()> {
    if key.name != HIDDEN_PASSAGE_KEY || world.current_room != HIDDEN_PASSAGE_ROOM {
        view.push(ViewItem::ActionFailure(format!("The {} doesn't work here.", key.name)));
        return Ok(());
    }
    let room = world.player_room_mut()?;
    if room
        .exit_to(HIDDEN_PASSAGE_DIRECTION)
        .is_some_and(|to| to == HIDDEN_PASSAGE_TO)
    {
        view.push(ViewItem::ActionFailure(
            "The hidden passage already stands open.".to_string(),
        ));
        return Ok(());
    }

    room.special_event = Some(HIDDEN_PASSAGE_EVENT.to_string());
    room.add_exit(HIDDEN_PASSAGE_DIRECTION, HIDDEN_PASSAGE_TO);
    info!("'{}' opened the passage {HIDDEN_PASSAGE_DIRECTION} to '{HIDDEN_PASSAGE_TO}'", key.id);
    view.push(ViewItem::ActionSuccess(
        "The ancient key fits perfectly! A hidden passage opens.".to_string(),
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameConfig;
    use crate::loader::build_world;
    use crate::player::{PLAYER_BASE_ATTACK, PLAYER_MAX_HP};
    use crate::repl::look_handler;

    fn setup() -> (EchoesWorld, View) {
        (build_world(&GameConfig::default()).unwrap(), View::capture())
    }

    #[test]
    fn taking_rusty_sword_equips_it_and_stirs_memory() {
        let (mut world, mut view) = setup();
        take_handler(&mut world, &mut view, "rusty sword").unwrap();

        assert!(world.player.contains_item("rusty sword"));
        assert!(!world.rooms["village"].contains_item("rusty sword"));
        assert_eq!(world.player.equipped.as_deref(), Some("rusty_sword"));
        assert_eq!(world.player.attack(), PLAYER_BASE_ATTACK + 5);
        assert_eq!(world.player.memories.len(), 1);
        assert!(view.mentions("You picked up the rusty sword."));
        assert!(view.mentions("You remember wielding this blade"));
    }

    #[test]
    fn take_missing_item_changes_nothing() {
        let (mut world, mut view) = setup();
        take_handler(&mut world, &mut view, "iron dagger").unwrap();
        assert!(world.player.inventory.is_empty());
        assert!(view.mentions("There's no iron dagger here."));
    }

    #[test]
    fn item_moves_exactly_once() {
        let (mut world, mut view) = setup();
        take_handler(&mut world, &mut view, "health potion").unwrap();
        take_handler(&mut world, &mut view, "health potion").unwrap();
        assert_eq!(world.player.inventory.len(), 1);
        assert!(view.mentions("There's no health potion here."));
    }

    #[test]
    fn potion_heals_capped_and_is_consumed() {
        let (mut world, mut view) = setup();
        take_handler(&mut world, &mut view, "health potion").unwrap();
        world.player.damage(5);
        use_handler(&mut world, &mut view, "health potion").unwrap();

        assert_eq!(world.player.current_hp(), PLAYER_MAX_HP);
        assert!(!world.player.contains_item("health potion"));
        assert!(view.mentions("You used the health potion."));
        assert!(view.mentions("(+5 hp)"));
    }

    #[test]
    fn potion_at_full_health_is_still_consumed() {
        let (mut world, mut view) = setup();
        take_handler(&mut world, &mut view, "health potion").unwrap();
        use_handler(&mut world, &mut view, "health potion").unwrap();
        assert!(world.player.inventory.is_empty());
        assert!(!view.entries().iter().any(|entry| entry.view_item.is_character_healed()));
    }

    #[test]
    fn using_unheld_item_fails() {
        let (mut world, mut view) = setup();
        use_handler(&mut world, &mut view, "ancient key").unwrap();
        assert!(view.mentions("You don't have a ancient key."));
    }

    #[test]
    fn weapons_and_quest_items_cannot_be_used() {
        let (mut world, mut view) = setup();
        take_handler(&mut world, &mut view, "rusty sword").unwrap();
        use_handler(&mut world, &mut view, "rusty sword").unwrap();
        assert!(view.mentions("You can't use that item."));
        assert!(world.player.contains_item("rusty sword"));
    }

    #[test]
    fn key_only_works_in_temple() {
        let (mut world, mut view) = setup();
        world.current_room = "temple".into();
        take_handler(&mut world, &mut view, "ancient key").unwrap();
        world.current_room = "village".into();
        use_handler(&mut world, &mut view, "ancient key").unwrap();
        assert!(view.mentions("The ancient key doesn't work here."));
        assert!(world.rooms["temple"].exit_to("north").is_some_and(|to| to == "keep"));
    }

    #[test]
    fn key_opens_chamber_once() {
        let (mut world, mut view) = setup();
        world.current_room = "temple".into();
        take_handler(&mut world, &mut view, "ancient key").unwrap();
        use_handler(&mut world, &mut view, "ancient key").unwrap();

        let temple = &world.rooms["temple"];
        assert_eq!(temple.exit_to("north").map(String::as_str), Some("chamber"));
        assert!(temple.special_event.is_some());
        assert!(world.player.contains_item("ancient key"));
        assert!(view.mentions("The ancient key fits perfectly! A hidden passage opens."));
        assert!(world.validate().is_ok());

        look_handler(&mut world, &mut view).unwrap();
        assert!(view.mentions("You unlock the hidden chamber!"));

        view.reset();
        let exits_before = world.rooms["temple"].exits.clone();
        let memories_before = world.player.memories.clone();
        use_handler(&mut world, &mut view, "ancient key").unwrap();
        assert_eq!(world.rooms["temple"].exits, exits_before);
        assert_eq!(world.player.memories, memories_before);
        assert!(world.rooms["temple"].special_event.is_none());
        assert!(view.mentions("already stands open"));
    }

    #[test]
    fn lore_items_record_their_memories() {
        let (mut world, mut view) = setup();
        world.current_room = "temple".into();
        take_handler(&mut world, &mut view, "crystal shard").unwrap();
        take_handler(&mut world, &mut view, "ancient key").unwrap();
        assert_eq!(
            world.player.memories,
            [
                "The crystal resonates with power - a fragment of the Realm's heart...",
                "This key once opened the doors to your forgotten castle...",
            ]
        );
    }
}
