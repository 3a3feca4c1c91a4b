#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Echoes of the Forgotten Realm **
//! A short text adventure: recover your memories and break the Shadow Lord's hold.

use echoes_engine::repl::{InputManager, prompt_player_name};
use echoes_engine::style::GameStyle;
use echoes_engine::{GameConfig, GameDice, Player, View, build_world, run_repl};

use anyhow::{Context, Result};
use colored::Colorize;

use log::info;

fn main() -> Result<()> {
    env_logger::init();
    let config = GameConfig::load().context("while loading game settings")?;
    info!("Start: building Echoes world...");
    let mut world = build_world(&config).context("while building EchoesWorld")?;
    info!("EchoesWorld built successfully.");

    println!("{}", "========================================".bright_yellow());
    println!("{:^40}", "Echoes of the Forgotten Realm".bright_yellow().bold());
    println!("{}", "========================================".bright_yellow());
    println!("\n{}", "You awaken in a ruined world with no memory...".description_style());
    println!("{}\n", "Explore, survive, and uncover your forgotten past.".description_style());

    let mut input = InputManager::new();
    world.player = Player::new(&prompt_player_name(&mut input));
    let mut dice = GameDice::new(config.seed);
    info!(
        "Starting the game for {} (seed: {:?})",
        world.player.name,
        dice.seed()
    );

    let mut view = View::new();
    let outcome = run_repl(&mut world, &mut view, &mut input, &mut dice, &config)?;
    info!("game finished: {outcome:?}");
    Ok(())
}
