//! Builds the fixed world of the Forgotten Realm.
//!
//! The map is small and hand-authored, so it is described here as static tables and
//! assembled into an [`EchoesWorld`], which is validated before play begins.

use crate::item::{Item, ItemHolder, ItemKind};
use crate::room::{Hazard, Room};
use crate::{EchoesWorld, Enemy, GameConfig};

use anyhow::{Context, Result};
use log::info;

/// Static description of one room.
struct RoomDef {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    hazard: Hazard,
    exits: &'static [(&'static str, &'static str)],
}

/// Static description of one item and where it starts.
struct ItemDef {
    id: &'static str,
    room: &'static str,
    name: &'static str,
    description: &'static str,
    kind: ItemKind,
    value: u32,
    effect: u32,
}

const ROOMS: &[RoomDef] = &[
    RoomDef {
        id: "village",
        name: "Wrecked Village",
        description: "You stand in the ruins of what was once a thriving village. Collapsed houses and broken carts litter the area. A sense of ancient tragedy hangs in the air.",
        hazard: Hazard::None,
        exits: &[("north", "forest"), ("east", "temple")],
    },
    RoomDef {
        id: "forest",
        name: "Misty Forest",
        description: "Dense fog swirls between ancient trees. The forest feels alive with whispers of the past. Strange shadows dance between the branches.",
        hazard: Hazard::None,
        exits: &[("south", "village"), ("north", "cave"), ("east", "keep")],
    },
    RoomDef {
        id: "temple",
        name: "Abandoned Temple",
        description: "Crumbling stone pillars support a partially collapsed roof. Ancient runes glow faintly on the walls, hinting at forgotten power.",
        hazard: Hazard::None,
        exits: &[("west", "village"), ("north", "keep")],
    },
    RoomDef {
        id: "cave",
        name: "Underground Cave",
        description: "Dark tunnels stretch into the depths. Water drips steadily from stalactites, echoing in the darkness. The air is cold and damp.",
        hazard: Hazard::Cold,
        exits: &[("south", "forest"), ("east", "keep")],
    },
    RoomDef {
        id: "keep",
        name: "Ruined Keep",
        description: "The once-mighty fortress now lies in ruins. A throne room opens before you, where shadows seem to gather with unnatural purpose.",
        hazard: Hazard::None,
        exits: &[("west", "forest"), ("south", "temple")],
    },
    RoomDef {
        id: "chamber",
        name: "Hidden Chamber",
        description: "A secret chamber revealed by the ancient key. Mystical energy fills the air, and a portal of swirling darkness dominates the center.",
        hazard: Hazard::Cursed,
        exits: &[("south", "temple")],
    },
];

const ITEMS: &[ItemDef] = &[
    ItemDef {
        id: "rusty_sword",
        room: "village",
        name: "rusty sword",
        description: "An old but serviceable blade",
        kind: ItemKind::Weapon,
        value: 10,
        effect: 5,
    },
    ItemDef {
        id: "village_potion",
        room: "village",
        name: "health potion",
        description: "A small vial of red liquid",
        kind: ItemKind::Potion,
        value: 25,
        effect: 20,
    },
    ItemDef {
        id: "iron_dagger",
        room: "forest",
        name: "iron dagger",
        description: "A sharp, well-balanced dagger",
        kind: ItemKind::Weapon,
        value: 20,
        effect: 3,
    },
    ItemDef {
        id: "ancient_key",
        room: "temple",
        name: "ancient key",
        description: "An ornate key humming with power",
        kind: ItemKind::Key,
        value: 0,
        effect: 0,
    },
    ItemDef {
        id: "crystal_shard",
        room: "temple",
        name: "crystal shard",
        description: "A glowing fragment of pure energy",
        kind: ItemKind::QuestItem,
        value: 100,
        effect: 0,
    },
    ItemDef {
        id: "steel_sword",
        room: "cave",
        name: "steel sword",
        description: "A finely crafted blade",
        kind: ItemKind::Weapon,
        value: 50,
        effect: 8,
    },
    ItemDef {
        id: "cave_potion",
        room: "cave",
        name: "health potion",
        description: "A small vial of red liquid",
        kind: ItemKind::Potion,
        value: 25,
        effect: 20,
    },
    ItemDef {
        id: "legendary_blade",
        room: "chamber",
        name: "legendary blade",
        description: "The weapon of a forgotten hero",
        kind: ItemKind::Weapon,
        value: 200,
        effect: 15,
    },
];

/// Room the Shadow Lord waits in.
pub const BOSS_ROOM: &str = "keep";

/// Assemble and validate the world, placing the player in the configured start room.
///
/// # Errors
/// - if the room graph is malformed or the start room does not exist
pub fn build_world(config: &GameConfig) -> Result<EchoesWorld> {
    let mut world = EchoesWorld::new_empty();
    for def in ROOMS {
        world
            .insert_room(build_room(def))
            .with_context(|| format!("while adding room '{}'", def.id))?;
    }
    info!("{} rooms added to EchoesWorld", world.rooms.len());

    for def in ITEMS {
        let room = world
            .rooms
            .get_mut(def.room)
            .with_context(|| format!("item '{}' placed in unknown room '{}'", def.id, def.room))?;
        room.add_item(Item::new(def.id, def.name, def.description, def.kind, def.value, def.effect));
    }
    info!("{} items added to EchoesWorld", ITEMS.len());

    world
        .rooms
        .get_mut(BOSS_ROOM)
        .with_context(|| format!("boss room '{BOSS_ROOM}' not found"))?
        .add_enemy(Enemy::shadow_lord());
    info!("boss placed in '{BOSS_ROOM}'");

    world.current_room.clone_from(&config.start_room);
    world.validate().context("while validating world")?;
    world.player_room_mut()?.visited = true;
    info!("player will start in '{}'", world.current_room);

    Ok(world)
}

fn build_room(def: &RoomDef) -> Room {
    let mut room = Room::new(def.id, def.name, def.description);
    room.hazard = def.hazard;
    for (direction, to) in def.exits {
        room.add_exit(direction, to);
    }
    room
}
