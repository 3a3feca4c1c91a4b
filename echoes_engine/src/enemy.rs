//! Enemy module
//!
//! Enemies are fixed stat blocks. They live inside the `Room` they were spawned into
//! and are pruned from it once dead.
use log::info;

use crate::WorldObject;
use crate::dice::Dice;
use crate::health::{HealthState, LifeState, LivingEntity};

/// The closed set of enemy kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Normal,
    Boss,
}

/// A hostile creature the player can fight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    pub name: String,
    pub description: String,
    pub kind: EnemyKind,
    pub health: HealthState,
    pub attack: u32,
    pub gold_reward: u32,
}

/// Stat block for one member of the wandering-monster roster.
struct EnemyTemplate {
    name: &'static str,
    description: &'static str,
    max_hp: u32,
    attack: u32,
    gold_reward: u32,
}

/// Creatures that may appear on entering an encounter room.
const ENCOUNTER_ROSTER: &[EnemyTemplate] = &[
    EnemyTemplate {
        name: "Goblin",
        description: "A wiry scavenger clutching a notched knife.",
        max_hp: 30,
        attack: 5,
        gold_reward: 10,
    },
    EnemyTemplate {
        name: "Shadow Wolf",
        description: "A wolf woven from smoke, its eyes like dying embers.",
        max_hp: 25,
        attack: 7,
        gold_reward: 15,
    },
    EnemyTemplate {
        name: "Skeleton Warrior",
        description: "Old bones held together by older hatred.",
        max_hp: 40,
        attack: 6,
        gold_reward: 20,
    },
];

impl Enemy {
    pub fn new(name: &str, description: &str, kind: EnemyKind, max_hp: u32, attack: u32, gold_reward: u32) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            kind,
            health: HealthState::new_at_max(max_hp),
            attack,
            gold_reward,
        }
    }

    /// The Shadow Lord, whose defeat ends the game.
    pub fn shadow_lord() -> Self {
        Enemy::new(
            "Shadow Lord",
            "A towering figure of living darkness, crowned with the ruin of your kingdom.",
            EnemyKind::Boss,
            100,
            15,
            500,
        )
    }

    /// Pick one creature from the encounter roster, uniformly at random.
    pub fn random_encounter(dice: &mut dyn Dice) -> Self {
        let last = u32::try_from(ENCOUNTER_ROSTER.len()).unwrap_or(1);
        let pick = dice.roll(1, last) as usize;
        let template = &ENCOUNTER_ROSTER[pick.saturating_sub(1).min(ENCOUNTER_ROSTER.len() - 1)];
        info!("rolled random encounter: {}", template.name);
        Enemy::new(
            template.name,
            template.description,
            EnemyKind::Normal,
            template.max_hp,
            template.attack,
            template.gold_reward,
        )
    }

    pub fn is_boss(&self) -> bool {
        self.kind == EnemyKind::Boss
    }
}
impl WorldObject for Enemy {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}
impl LivingEntity for Enemy {
    fn max_hp(&self) -> u32 {
        self.health.max_hp()
    }

    fn current_hp(&self) -> u32 {
        self.health.current_hp()
    }

    fn damage(&mut self, amount: u32) {
        self.health.damage(amount);
    }

    fn heal(&mut self, amount: u32) {
        self.health.heal(amount);
    }

    fn life_state(&self) -> LifeState {
        self.health.life_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;

    #[test]
    fn shadow_lord_is_the_boss() {
        let boss = Enemy::shadow_lord();
        assert!(boss.is_boss());
        assert_eq!(boss.current_hp(), boss.max_hp());
    }

    #[test]
    fn random_encounters_are_never_bosses() {
        let mut dice = ScriptedDice::new([1, 2, 3]);
        let names: Vec<_> = (0..3)
            .map(|_| {
                let enemy = Enemy::random_encounter(&mut dice);
                assert_eq!(enemy.kind, EnemyKind::Normal);
                enemy.name
            })
            .collect();
        assert_eq!(names, ["Goblin", "Shadow Wolf", "Skeleton Warrior"]);
    }

    #[test]
    fn enemy_health_clamps_at_zero() {
        let mut goblin = Enemy::new("Goblin", "", EnemyKind::Normal, 30, 5, 10);
        goblin.damage(45);
        assert_eq!(goblin.current_hp(), 0);
        assert!(!goblin.is_alive());
    }
}
