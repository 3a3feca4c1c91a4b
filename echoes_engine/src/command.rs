//! Command module
//!
//! Describes possible commands used during gameplay and turns raw input into them.
use variantly::Variantly;

/// Commands that can be executed by the player.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum Command {
    Attack,
    Help,
    Inventory,
    Load,
    Look,
    Memory,
    /// A verb that needs an argument arrived without one; carries the prompt to show.
    MissingArgument(&'static str),
    MoveTo(String),
    Quit,
    Save,
    Status,
    Take(String),
    /// Carries the verb that was not understood.
    Unknown(String),
    UseItem(String),
}

/// A single line of the help listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpCommand {
    pub section: &'static str,
    pub command: &'static str,
    pub description: &'static str,
}

const HELP_COMMANDS: &[(&str, &str, &str)] = &[
    ("Movement", "move [direction] / go [direction] / [direction]", "Travel to a neighboring area"),
    ("Movement", "north/n, south/s, east/e, west/w", "Shortcuts for each direction"),
    ("Interaction", "look/l", "Examine your surroundings"),
    ("Interaction", "take [item] / get [item]", "Pick up an item"),
    ("Interaction", "use [item]", "Use an item from inventory"),
    ("Interaction", "attack [enemy] / fight", "Start combat"),
    ("Info", "inventory/i", "Show your items"),
    ("Info", "memory/journal", "View recovered memories"),
    ("Info", "status", "Show your character status"),
    ("Game", "save", "Save your progress"),
    ("Game", "load", "Load saved game"),
    ("Game", "help/h", "Show this help"),
    ("Game", "quit/exit/q", "Exit the game"),
];

/// The help listing, grouped by section.
pub fn help_commands() -> Vec<HelpCommand> {
    HELP_COMMANDS
        .iter()
        .map(|&(section, command, description)| HelpCommand {
            section,
            command,
            description,
        })
        .collect()
}

/// Split raw input into lowercase, whitespace-delimited tokens.
pub fn tokenize(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_lowercase).collect()
}

/// Parses tokenized input and returns the corresponding `Command`.
///
/// Returns `None` only for empty input, which is not a turn.
pub fn parse_command(tokens: &[String]) -> Option<Command> {
    let (verb, args) = tokens.split_first()?;
    let rest = args.join(" ");
    let command = match verb.as_str() {
        "look" | "l" => Command::Look,
        "move" | "go" | "m" => match args.first() {
            Some(dir) => Command::MoveTo(dir.clone()),
            None => Command::MissingArgument("Move where? (north, south, east, west)"),
        },
        "north" | "n" => Command::MoveTo("north".into()),
        "south" | "s" => Command::MoveTo("south".into()),
        "east" | "e" => Command::MoveTo("east".into()),
        "west" | "w" => Command::MoveTo("west".into()),
        "take" | "get" | "pick" if rest.is_empty() => Command::MissingArgument("Take what?"),
        "take" | "get" | "pick" => Command::Take(rest),
        "use" if rest.is_empty() => Command::MissingArgument("Use what?"),
        "use" => Command::UseItem(rest),
        "attack" | "fight" => Command::Attack,
        "inventory" | "i" | "inv" => Command::Inventory,
        "memory" | "journal" => Command::Memory,
        "save" => Command::Save,
        "load" => Command::Load,
        "help" | "h" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "status" | "stats" => Command::Status,
        _ => Command::Unknown(verb.clone()),
    };
    Some(command)
}

/// What the player chose to do during a combat round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatChoice {
    Attack,
    UseItem,
    Flee,
    Invalid,
}

/// Interpret one line typed at the combat menu.
///
/// Matching is deliberately loose: any text containing "attack" is an attack and any text
/// containing "flee" is an escape attempt, with attack taking precedence.
pub fn parse_combat_choice(input: &str) -> CombatChoice {
    let choice = input.trim().to_lowercase();
    if choice == "1" || choice == "a" || choice.contains("attack") {
        CombatChoice::Attack
    } else if choice == "2" || choice == "use" || choice == "use item" {
        CombatChoice::UseItem
    } else if choice == "3" || choice.contains("flee") {
        CombatChoice::Flee
    } else {
        CombatChoice::Invalid
    }
}
