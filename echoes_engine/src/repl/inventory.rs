//! `repl::inventory` module
//!
//! Handlers that report on what the player carries and remembers.

use crate::view::ContentLine;
use crate::{EchoesWorld, View, ViewItem};

/// Show the player's inventory and gold.
pub fn inv_handler(world: &EchoesWorld, view: &mut View) {
    let player = &world.player;
    let lines = player
        .inventory
        .iter()
        .map(|item| ContentLine {
            item_name: item.name.clone(),
            kind: item.kind,
            description: item.description.clone(),
            equipped: player.equipped.as_ref() == Some(&item.id),
        })
        .collect();
    view.push(ViewItem::Inventory {
        lines,
        gold: player.gold,
    });
}

/// Show recovered memories in the order they were found.
pub fn memory_handler(world: &EchoesWorld, view: &mut View) {
    view.push(ViewItem::MemoryJournal(world.player.memories.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameConfig;
    use crate::loader::build_world;
    use crate::repl::take_handler;

    #[test]
    fn inventory_marks_only_the_wielded_weapon() {
        let mut world = build_world(&GameConfig::default()).unwrap();
        let mut view = View::capture();
        take_handler(&mut world, &mut view, "rusty sword").unwrap();
        world.current_room = "forest".into();
        take_handler(&mut world, &mut view, "iron dagger").unwrap();
        view.reset();

        inv_handler(&world, &mut view);
        let ViewItem::Inventory { lines, gold } = view.entries()[0].view_item.clone() else {
            panic!("expected an inventory listing");
        };
        assert_eq!(gold, 0);
        assert_eq!(lines.len(), 2);
        assert!(!lines[0].equipped);
        assert!(lines[1].equipped);
        assert_eq!(lines[1].item_name, "iron dagger");
    }

    #[test]
    fn inventory_shows_item_kinds() {
        let mut world = build_world(&GameConfig::default()).unwrap();
        let mut view = View::capture();
        take_handler(&mut world, &mut view, "health potion").unwrap();
        world.current_room = "temple".into();
        take_handler(&mut world, &mut view, "ancient key").unwrap();
        view.reset();

        inv_handler(&world, &mut view);
        assert!(view.mentions("health potion (potion) - "));
        assert!(view.mentions("ancient key (key) - "));
    }

    #[test]
    fn empty_journal_says_so() {
        let world = build_world(&GameConfig::default()).unwrap();
        let mut view = View::capture();
        memory_handler(&world, &mut view);
        assert!(view.mentions("You have not recovered any memories yet."));
    }
}
