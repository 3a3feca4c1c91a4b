//! `repl::combat` module
//!
//! The combat sub-loop. Once engaged, the player is held in a round-by-round menu
//! until the enemy dies, the player dies, the player escapes, or input runs out.

use crate::command::{CombatChoice, parse_combat_choice, tokenize};
use crate::dice::Dice;
use crate::health::LivingEntity;
use crate::repl::input::{InputEvent, LineSource};
use crate::repl::{MAX_READ_FAILURES, ReplControl, record_memory, use_handler};
use crate::style::GameStyle;
use crate::world::BOSS_MEMORY;
use crate::{EchoesWorld, Enemy, GameConfig, View, ViewItem, WorldObject};

use anyhow::{Context, Result};
use log::{error, info, warn};

/// Engage the first living enemy in the room and run combat to its end.
///
/// Returns `ReplControl::Quit` if input ran out mid-fight.
///
/// # Errors
/// - if the player's room or the engaged enemy cannot be found
pub fn attack_handler(
    world: &mut EchoesWorld,
    view: &mut View,
    input: &mut dyn LineSource,
    dice: &mut dyn Dice,
    config: &GameConfig,
) -> Result<ReplControl> {
    let room = world.player_room_ref()?;
    let Some(enemy_idx) = room.living_enemy_index() else {
        view.push(ViewItem::ActionFailure("There's nothing to attack here.".to_string()));
        return Ok(ReplControl::Continue);
    };
    let enemy = &room.enemies[enemy_idx];
    info!("{} engages {} in '{}'", world.player.name, enemy.name, room.id);
    view.push(ViewItem::CombatBegins {
        enemy: enemy.name().to_string(),
        description: enemy.description().to_string(),
        hp: enemy.current_hp(),
        max_hp: enemy.max_hp(),
        attack: enemy.attack,
    });

    let mut control = ReplControl::Continue;
    while world.player.is_alive() {
        view.push(ViewItem::CombatMenu);
        let Some(line) = read_combat_line(view, input, "> ") else {
            info!("input closed mid-combat; abandoning the fight");
            control = ReplControl::Quit;
            break;
        };

        match parse_combat_choice(&line) {
            CombatChoice::Attack => {
                if player_strikes(world, view, enemy_idx)? {
                    break;
                }
                enemy_strikes(world, view, enemy_idx)?;
            },
            CombatChoice::UseItem => {
                let Some(item_name) = read_combat_line(view, input, "Use which item? ") else {
                    info!("input closed mid-combat; abandoning the fight");
                    control = ReplControl::Quit;
                    break;
                };
                use_handler(world, view, &tokenize(&item_name).join(" "))?;
            },
            CombatChoice::Flee => {
                view.push(ViewItem::CombatEvent("You attempt to flee...".to_string()));
                if dice.percent(config.flee_chance) {
                    info!("{} fled from combat", world.player.name);
                    view.push(ViewItem::CombatEvent("You successfully escape!".to_string()));
                    break;
                }
                view.push(ViewItem::CombatEvent("You couldn't escape!".to_string()));
                enemy_strikes(world, view, enemy_idx)?;
            },
            CombatChoice::Invalid => view.push(ViewItem::ActionFailure("Invalid choice.".to_string())),
        }
    }

    view.push(ViewItem::CombatEnds);
    Ok(control)
}

/// Flush pending output and read one line for the combat menu.
///
/// Returns `None` when input is exhausted or keeps failing. An interrupt yields an
/// empty line, which the menu treats as an invalid choice.
fn read_combat_line(view: &mut View, input: &mut dyn LineSource, prompt: &str) -> Option<String> {
    view.flush();
    let prompt = prompt.prompt_style().to_string();
    for attempt in 1..=MAX_READ_FAILURES {
        match input.read_line(&prompt) {
            Ok(InputEvent::Line(line)) => return Some(line),
            Ok(InputEvent::Eof) => return None,
            Ok(InputEvent::Interrupted) => return Some(String::new()),
            Err(err) => warn!("failed to read combat input (attempt {attempt}): {err}"),
        }
    }
    error!("combat input failed {MAX_READ_FAILURES} times in a row");
    None
}

fn engaged_enemy(world: &mut EchoesWorld, enemy_idx: usize) -> Result<&mut Enemy> {
    world
        .player_room_mut()?
        .enemies
        .get_mut(enemy_idx)
        .with_context(|| format!("engaged enemy #{enemy_idx} missing from room"))
}

/// The player hits the engaged enemy. Returns true if the blow was fatal.
fn player_strikes(world: &mut EchoesWorld, view: &mut View, enemy_idx: usize) -> Result<bool> {
    let damage = world.player.attack();
    let enemy = engaged_enemy(world, enemy_idx)?;
    enemy.damage(damage);
    view.push(ViewItem::CombatEvent(format!(
        "You attack the {} for {damage} damage!",
        enemy.name
    )));
    if enemy.is_alive() {
        return Ok(false);
    }

    let (name, gold, boss) = (enemy.name.clone(), enemy.gold_reward, enemy.is_boss());
    info!("{} defeated {name} and earned {gold} gold", world.player.name);
    view.push(ViewItem::CombatEvent(format!("You defeated the {name}!")));
    world.player.add_gold(gold);
    view.push(ViewItem::GoldAwarded(gold));
    if boss {
        world.boss_defeated = true;
        record_memory(world, view, BOSS_MEMORY);
    }
    world.player_room_mut()?.remove_dead_enemies();
    Ok(true)
}

/// The engaged enemy hits back. Defense does not soften the blow.
fn enemy_strikes(world: &mut EchoesWorld, view: &mut View, enemy_idx: usize) -> Result<()> {
    let enemy = engaged_enemy(world, enemy_idx)?;
    let (name, damage) = (enemy.name.clone(), enemy.attack);
    world.player.damage(damage);
    view.push(ViewItem::CombatStrike {
        attacker: name.clone(),
        target: "you".to_string(),
        amount: damage,
    });
    if !world.player.is_alive() {
        info!("{} was slain by {name}", world.player.name);
        view.push(ViewItem::CombatEvent("You have been defeated...".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use crate::enemy::EnemyKind;
    use crate::item::{Item, ItemHolder, ItemKind};
    use crate::repl::input::{BrokenInput, ScriptedInput};
    use crate::room::Room;

    fn arena(enemy: Enemy) -> EchoesWorld {
        let mut world = EchoesWorld::new_empty();
        let mut room = Room::new("pit", "Pit", "Sand and old blood.");
        room.add_exit("up", "pit");
        room.add_enemy(enemy);
        world.rooms.insert("pit".into(), room);
        world.current_room = "pit".into();
        world
    }

    fn goblin() -> Enemy {
        Enemy::new("Goblin", "", EnemyKind::Normal, 30, 5, 10)
    }

    fn fight(world: &mut EchoesWorld, lines: &[&str], rolls: &[u32]) -> (ReplControl, View, ScriptedInput) {
        let mut view = View::capture();
        let mut input = ScriptedInput::new(lines.iter().copied());
        let mut dice = ScriptedDice::new(rolls.iter().copied());
        let control = attack_handler(world, &mut view, &mut input, &mut dice, &GameConfig::default()).unwrap();
        (control, view, input)
    }

    #[test]
    fn nothing_to_attack_in_an_empty_room() {
        let mut world = arena(goblin());
        world.player_room_mut().unwrap().enemies.clear();
        let (control, view, input) = fight(&mut world, &["attack"], &[]);
        assert_eq!(control, ReplControl::Continue);
        assert!(view.mentions("There's nothing to attack here."));
        assert_eq!(input.remaining(), 1);
    }

    #[test]
    fn three_blows_kill_a_goblin() {
        let mut world = arena(goblin());
        let (control, view, _) = fight(&mut world, &["1", "a", "attack!"], &[]);

        assert_eq!(control, ReplControl::Continue);
        assert!(view.mentions("You defeated the Goblin!"));
        assert!(view.mentions("You gained 10 gold."));
        assert!(view.mentions("*** COMBAT ENDS ***"));
        assert_eq!(world.player.gold, 10);
        // two retaliations before the killing blow
        assert_eq!(world.player.current_hp(), 90);
        assert!(world.rooms["pit"].enemies.is_empty());
        assert!(!world.boss_defeated);
    }

    #[test]
    fn invalid_choice_costs_nothing() {
        let mut world = arena(goblin());
        let (control, view, _) = fight(&mut world, &["dance"], &[]);
        assert_eq!(control, ReplControl::Quit);
        assert!(view.mentions("Invalid choice."));
        assert_eq!(world.player.current_hp(), 100);
        assert_eq!(world.rooms["pit"].enemies[0].current_hp(), 30);
    }

    #[test]
    fn successful_flee_ends_combat_unharmed() {
        let mut world = arena(goblin());
        let (control, view, _) = fight(&mut world, &["flee"], &[70]);
        assert_eq!(control, ReplControl::Continue);
        assert!(view.mentions("You successfully escape!"));
        assert_eq!(world.player.current_hp(), 100);
        assert!(world.rooms["pit"].has_living_enemies());
    }

    #[test]
    fn failed_flee_draws_a_counterattack() {
        let mut world = arena(goblin());
        let (_, view, _) = fight(&mut world, &["3", "3"], &[71, 1]);
        assert!(view.mentions("You couldn't escape!"));
        assert!(view.mentions("Goblin attacks you for 5 damage!"));
        assert_eq!(world.player.current_hp(), 95);
    }

    #[test]
    fn failed_flee_can_be_fatal() {
        let mut world = arena(Enemy::new("Troll", "", EnemyKind::Normal, 80, 40, 0));
        world.player.damage(70);
        let (control, view, input) = fight(&mut world, &["flee", "attack"], &[71]);

        assert_eq!(control, ReplControl::Continue);
        assert!(view.mentions("You couldn't escape!"));
        assert!(view.mentions("Troll attacks you for 40 damage!"));
        assert!(view.mentions("You have been defeated..."));
        assert!(view.mentions("*** COMBAT ENDS ***"));
        assert!(!world.player.is_alive());
        assert_eq!(input.remaining(), 1);
    }

    #[test]
    fn broken_input_abandons_the_fight() {
        let mut world = arena(goblin());
        let mut view = View::capture();
        let mut input = BrokenInput::default();
        let mut dice = ScriptedDice::default();
        let control = attack_handler(&mut world, &mut view, &mut input, &mut dice, &GameConfig::default()).unwrap();

        assert_eq!(control, ReplControl::Quit);
        assert_eq!(input.reads, MAX_READ_FAILURES);
        assert_eq!(world.player.current_hp(), 100);
        assert!(!view.mentions("Invalid choice."));
    }

    #[test]
    fn combat_opens_with_the_enemy_description() {
        let mut world = arena(Enemy::shadow_lord());
        let (_, view, _) = fight(&mut world, &[], &[]);
        assert!(view.mentions("*** COMBAT BEGINS ***"));
        assert!(view.mentions("A towering figure of living darkness"));
    }

    #[test]
    fn using_an_item_gives_no_free_attack() {
        let mut world = arena(goblin());
        world.player.damage(30);
        world
            .player
            .add_item(Item::new("p", "health potion", "", ItemKind::Potion, 25, 20));
        let (control, view, _) = fight(&mut world, &["use", "  Health   POTION "], &[]);

        assert_eq!(control, ReplControl::Quit);
        assert!(view.mentions("You used the health potion."));
        assert_eq!(world.player.current_hp(), 90);
    }

    #[test]
    fn eof_abandons_fight_without_damage() {
        let mut world = arena(goblin());
        let (control, view, _) = fight(&mut world, &[], &[]);
        assert_eq!(control, ReplControl::Quit);
        assert!(view.mentions("*** COMBAT ENDS ***"));
        assert_eq!(world.player.current_hp(), 100);
    }

    #[test]
    fn player_death_ends_combat() {
        let mut world = arena(Enemy::new("Ogre", "", EnemyKind::Normal, 500, 60, 0));
        let (control, view, input) = fight(&mut world, &["attack", "attack", "attack"], &[]);
        assert_eq!(control, ReplControl::Continue);
        assert!(!world.player.is_alive());
        assert!(view.mentions("You have been defeated..."));
        assert_eq!(input.remaining(), 1);
    }

    #[test]
    fn boss_kill_sets_flag_and_memory() {
        let mut world = arena(Enemy::shadow_lord());
        world.player.base_attack = 100;
        let (control, view, _) = fight(&mut world, &["attack"], &[]);
        assert_eq!(control, ReplControl::Continue);
        assert!(world.boss_defeated);
        assert!(world.player.has_memory(BOSS_MEMORY));
        assert!(world.has_won());
        assert!(view.mentions("You gained 500 gold."));
    }

    #[test]
    fn dead_enemies_are_skipped_when_engaging() {
        let mut dead = goblin();
        dead.damage(30);
        let mut world = arena(dead);
        world
            .player_room_mut()
            .unwrap()
            .add_enemy(Enemy::new("Rat", "", EnemyKind::Normal, 5, 1, 1));
        let (_, view, _) = fight(&mut world, &["attack"], &[]);
        assert!(view.mentions("You defeated the Rat!"));
        assert!(world.rooms["pit"].enemies.is_empty());
    }
}
