//! View module.
//! This contains the view to the game world / messages.
//! Rather than printing to the console from each handler, we aggregate needed information and messages
//! to be organized and displayed at the end of the turn (or combat round).
use std::fmt::{self, Display, Write as _};

use colored::Colorize;
use textwrap::{fill, termwidth};
use variantly::Variantly;

use crate::command::HelpCommand;
use crate::item::ItemKind;
use crate::style::{GameStyle, indented_block, normal_block};

const ICON_SUCCESS: &str = "\u{2611}"; // ✔
const ICON_FAILURE: &str = "\u{274C}"; // ✖
const ICON_ERROR: &str = "⚠︎"; // U+26A0 U+FE0E
const ICON_TRIGGER: &str = "⚡︎"; // U+26A1 U+FE0E
const ICON_ENGINE: &str = "⚙";
const ICON_HARMED: &str = "\u{2623}"; // biohazard sign
const ICON_HEALED: &str = "\u{2624}"; // caduceus
const ICON_DEATH: &str = "☠";
const ICON_MEMORY: &str = "✧";
const ICON_GOLD: &str = "◎";
const ICON_SWORDS: &str = "⚔";

const BANNER_RULE: &str = "========================================";

/// Where flushed frames go.
#[derive(Debug, Clone)]
enum Sink {
    /// Render to stdout.
    Terminal,
    /// Keep every flushed entry in memory instead of printing it.
    Capture(Vec<ViewEntry>),
}

/// View aggregates information to be displayed on each pass through the REPL and then organizes
/// and displays the result.
#[derive(Debug, Clone)]
pub struct View {
    pub width: usize,
    pub items: Vec<ViewEntry>,
    pub sequence: usize,
    sink: Sink,
}
impl Default for View {
    fn default() -> Self {
        Self::new()
    }
}

impl View {
    /// Create a new empty view that renders to the terminal.
    pub fn new() -> Self {
        Self {
            width: termwidth(),
            items: Vec::new(),
            sequence: 0,
            sink: Sink::Terminal,
        }
    }

    /// Create a view that records frames instead of printing them.
    pub fn capture() -> Self {
        Self {
            width: 80,
            items: Vec::new(),
            sequence: 0,
            sink: Sink::Capture(Vec::new()),
        }
    }

    pub fn push(&mut self, item: ViewItem) {
        self.items.push(ViewEntry {
            section: item.section(),
            priority: item.default_priority(),
            view_item: item,
            sequence: self.sequence,
        });
        self.sequence += 1;
    }

    /// Compose and display all message contents in the current frame.
    pub fn flush(&mut self) {
        if self.items.is_empty() {
            return;
        }
        match &mut self.sink {
            Sink::Capture(history) => {
                history.append(&mut self.items);
            },
            Sink::Terminal => {
                // re-check terminal width in case it's been resized
                self.width = termwidth();
                for entry in self.display_entries() {
                    render(&entry.view_item, self.width);
                }
                self.items.clear();
            },
        }
    }

    /// Pending entries in the order the terminal shows them, section by section.
    fn display_entries(&self) -> Vec<&ViewEntry> {
        Section::DISPLAY_ORDER
            .into_iter()
            .flat_map(|section| self.section_entries(section))
            .collect()
    }

    /// Entries of one section in display order.
    ///
    /// World responses are ordered by priority first, then by the order they were pushed.
    fn section_entries(&self, section: Section) -> Vec<&ViewEntry> {
        let mut entries: Vec<&ViewEntry> = self.items.iter().filter(|entry| entry.section == section).collect();
        if section == Section::WorldResponse {
            entries.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.sequence.cmp(&b.sequence)));
        }
        entries
    }

    /// Every entry recorded so far, flushed or pending, in the order pushed.
    /// Entries already printed to the terminal are not retained.
    pub fn entries(&self) -> Vec<&ViewEntry> {
        let mut all: Vec<&ViewEntry> = match &self.sink {
            Sink::Capture(history) => history.iter().collect(),
            Sink::Terminal => Vec::new(),
        };
        all.extend(self.items.iter());
        all
    }

    /// Plain-text rendering of every recorded entry.
    pub fn transcript(&self) -> Vec<String> {
        self.entries().iter().map(|entry| entry.view_item.to_string()).collect()
    }

    /// True if any recorded entry's plain text contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.transcript().iter().any(|line| line.contains(needle))
    }

    /// Clears the View's buffer and any captured history.
    pub fn reset(&mut self) {
        self.items.clear();
        if let Sink::Capture(history) = &mut self.sink {
            history.clear();
        }
    }
}

/// Subsections of the output, listed in the order they are displayed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Section {
    /// Movement text and arrivals shown before a new scene.
    Transition,
    /// Room description, exits, items and enemies.
    Environment,
    /// Blow-by-blow combat narration.
    Combat,
    /// Direct results of the player's command.
    DirectResult,
    /// Follow-up reactions from the world (hazards, recovered memories).
    WorldResponse,
    /// Meta/game-system feedback (save stubs, help, end of game).
    System,
    /// Menus that precede a read from the player.
    Prompt,
}
impl Section {
    const DISPLAY_ORDER: [Section; 7] = [
        Section::Transition,
        Section::Environment,
        Section::Combat,
        Section::DirectResult,
        Section::WorldResponse,
        Section::System,
        Section::Prompt,
    ];
}

/// Wrapper for a `ViewItem` to allow flexible ordering of display items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEntry {
    pub section: Section,
    pub priority: isize,
    pub view_item: ViewItem,
    pub sequence: usize,
}

/// `ViewItems` are each of the various types of information / messages that may be displayed to the player.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum ViewItem {
    ActionFailure(String),
    ActionSuccess(String),
    CharacterDeath {
        name: String,
        is_player: bool,
    },
    CharacterHarmed {
        name: String,
        cause: String,
        amount: u32,
    },
    CharacterHealed {
        name: String,
        cause: String,
        amount: u32,
    },
    CharacterStatus(StatusLines),
    CombatBegins {
        enemy: String,
        description: String,
        hp: u32,
        max_hp: u32,
        attack: u32,
    },
    CombatEnds,
    CombatEvent(String),
    CombatMenu,
    CombatStrike {
        attacker: String,
        target: String,
        amount: u32,
    },
    EnemyAppears(String),
    EngineMessage(String),
    Error(String),
    GameOver {
        won: bool,
        turns: usize,
        memory_recovered: bool,
    },
    GoldAwarded(u32),
    Help(Vec<HelpCommand>),
    Inventory {
        lines: Vec<ContentLine>,
        gold: u32,
    },
    MemoryJournal(Vec<String>),
    MemoryRecovered(String),
    RoomDescription {
        name: String,
        description: String,
    },
    RoomEnemies(Vec<EnemyLine>),
    RoomExits(Vec<ExitLine>),
    RoomItems(Vec<String>),
    TransitionMessage(String),
    TriggeredEvent(String),
}
impl ViewItem {
    /// Classify a view item into a top-level output section.
    pub fn section(&self) -> Section {
        match self {
            ViewItem::RoomDescription { .. }
            | ViewItem::RoomItems(_)
            | ViewItem::RoomExits(_)
            | ViewItem::RoomEnemies(_) => Section::Environment,
            ViewItem::CombatBegins { .. }
            | ViewItem::CombatEnds
            | ViewItem::CombatEvent(_)
            | ViewItem::CombatStrike { .. }
            | ViewItem::GoldAwarded(_) => Section::Combat,
            ViewItem::ActionSuccess(_)
            | ViewItem::ActionFailure(_)
            | ViewItem::Error(_)
            | ViewItem::CharacterStatus(_)
            | ViewItem::Inventory { .. }
            | ViewItem::MemoryJournal(_) => Section::DirectResult,
            ViewItem::CharacterHarmed { .. }
            | ViewItem::CharacterHealed { .. }
            | ViewItem::CharacterDeath { .. }
            | ViewItem::MemoryRecovered(_)
            | ViewItem::TriggeredEvent(_) => Section::WorldResponse,
            ViewItem::EngineMessage(_) | ViewItem::Help(_) | ViewItem::GameOver { .. } => Section::System,
            ViewItem::TransitionMessage(_) | ViewItem::EnemyAppears(_) => Section::Transition,
            ViewItem::CombatMenu => Section::Prompt,
        }
    }

    pub fn default_priority(&self) -> isize {
        match &self {
            ViewItem::TriggeredEvent(_) => -30,
            ViewItem::CharacterHarmed { .. } => -20,
            ViewItem::CharacterHealed { .. } => -10,
            ViewItem::CharacterDeath { .. } => 100,
            _ => 0,
        }
    }
}

/// Plain (unstyled) text of a view item, used for transcripts.
impl Display for ViewItem {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewItem::ActionFailure(msg)
            | ViewItem::ActionSuccess(msg)
            | ViewItem::CombatEvent(msg)
            | ViewItem::EngineMessage(msg)
            | ViewItem::Error(msg)
            | ViewItem::MemoryRecovered(msg)
            | ViewItem::TransitionMessage(msg)
            | ViewItem::TriggeredEvent(msg) => write!(f, "{msg}"),
            ViewItem::CharacterDeath { name, is_player } => {
                if *is_player {
                    write!(f, "{name} has fallen.")
                } else {
                    write!(f, "{name} dies.")
                }
            },
            ViewItem::CharacterHarmed { name, cause, amount } => write!(f, "{name} injured by {cause}! (-{amount} hp)"),
            ViewItem::CharacterHealed { name, cause, amount } => write!(f, "{name} healed by {cause}. (+{amount} hp)"),
            ViewItem::CharacterStatus(status) => write!(f, "{status}"),
            ViewItem::CombatBegins {
                enemy,
                description,
                hp,
                max_hp,
                attack,
            } => write!(
                f,
                "*** COMBAT BEGINS ***\n{enemy} - Health: {hp}/{max_hp}, Attack: {attack}\n{description}\n**********************"
            ),
            ViewItem::CombatEnds => write!(f, "*** COMBAT ENDS ***"),
            ViewItem::CombatMenu => write!(
                f,
                "What do you want to do?\n1. Attack (or type 'attack')\n2. Use item (or type 'use')\n3. Try to flee (or type 'flee')"
            ),
            ViewItem::CombatStrike {
                attacker,
                target,
                amount,
            } => write!(f, "{attacker} attacks {target} for {amount} damage!"),
            ViewItem::EnemyAppears(name) => write!(f, "A {name} appears!"),
            ViewItem::GameOver {
                won,
                turns,
                memory_recovered,
            } => {
                let (title, lines) = game_over_text(*won);
                writeln!(f, "{title}")?;
                for line in lines {
                    writeln!(f, "{line}")?;
                }
                writeln!(f, "Turns played: {turns}")?;
                write!(f, "Memories recovered: {}", if *memory_recovered { "yes" } else { "no" })
            },
            ViewItem::GoldAwarded(amount) => write!(f, "You gained {amount} gold."),
            ViewItem::Help(commands) => {
                let lines: Vec<_> = commands
                    .iter()
                    .map(|cmd| format!("{} - {}", cmd.command, cmd.description))
                    .collect();
                write!(f, "{}", lines.join("\n"))
            },
            ViewItem::Inventory { lines, gold } => {
                let mut text = String::from("Inventory:");
                if lines.is_empty() {
                    text.push_str("\n   (empty)");
                }
                for line in lines {
                    let _ = write!(text, "\n   {line}");
                }
                write!(f, "{text}\nGold: {gold}")
            },
            ViewItem::MemoryJournal(memories) => {
                if memories.is_empty() {
                    write!(f, "You have not recovered any memories yet.")
                } else {
                    write!(f, "Memory Journal:\n{}", memories.join("\n"))
                }
            },
            ViewItem::RoomDescription { name, description } => write!(f, "{name}\n{description}"),
            ViewItem::RoomEnemies(enemies) => {
                let lines: Vec<_> = enemies.iter().map(ToString::to_string).collect();
                write!(f, "Enemies: {}", lines.join(", "))
            },
            ViewItem::RoomExits(exits) => {
                let dirs: Vec<_> = exits.iter().map(|exit| exit.direction.as_str()).collect();
                write!(f, "Exits: {}", dirs.join(", "))
            },
            ViewItem::RoomItems(names) => write!(f, "Items: {}", names.join(", ")),
        }
    }
}

/// Snapshot of the player's vital statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLines {
    pub name: String,
    pub description: String,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub gold: u32,
    pub location: String,
    pub turns: usize,
}
impl Display for StatusLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}\nDescription: {}\nHealth: {}/{}\nAttack: {}\nDefense: {}\nGold: {}\nCurrent Location: {}\nTurns Played: {}",
            self.name, self.description, self.hp, self.max_hp, self.attack, self.defense, self.gold, self.location, self.turns
        )
    }
}

/// Row data for listing carried items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    pub item_name: String,
    pub kind: ItemKind,
    pub description: String,
    pub equipped: bool,
}
impl Display for ContentLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - {}", self.item_name, self.kind, self.description)?;
        if self.equipped {
            write!(f, " [equipped]")?;
        }
        Ok(())
    }
}

/// Row data for the exit listing portion of the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitLine {
    pub direction: String,
    pub destination: String,
    pub dest_visited: bool,
}

/// Row data for the enemy list within room descriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnemyLine {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub boss: bool,
}
impl Display for EnemyLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{} hp)", self.name, self.hp, self.max_hp)
    }
}

fn game_over_text(won: bool) -> (&'static str, [&'static str; 3]) {
    if won {
        (
            "CONGRATULATIONS!",
            [
                "You have restored the realm!",
                "Your memories have returned, and the",
                "Shadow Lord's curse is broken forever.",
            ],
        )
    } else {
        (
            "GAME OVER",
            [
                "Your journey ends here...",
                "The realm remains shrouded in darkness.",
                "",
            ],
        )
    }
}

// INDIVIDUAL VIEW ITEM RENDERERS START HERE -------------------------------

#[allow(clippy::too_many_lines)]
fn render(item: &ViewItem, width: usize) {
    match item {
        ViewItem::TransitionMessage(msg) => println!("\n{}", fill(msg, normal_block()).transition_style()),
        ViewItem::RoomDescription { name, description } => {
            println!("\n{:^width$}", name.room_titlebar_style());
            println!("{}", fill(description, normal_block()).description_style());
            println!();
        },
        ViewItem::RoomExits(exits) => {
            println!("{}:", "Exits".subheading_style());
            for exit in exits {
                if exit.dest_visited {
                    println!(
                        "    > {} (to {})",
                        exit.direction.exit_visited_style(),
                        exit.destination.room_style()
                    );
                } else {
                    println!("    > {}", exit.direction.exit_unvisited_style());
                }
            }
        },
        ViewItem::RoomItems(names) => {
            println!("{}:", "Items".subheading_style());
            for name in names {
                println!("    * {}", name.item_style());
            }
        },
        ViewItem::RoomEnemies(enemies) => {
            println!("{}:", "Enemies".subheading_style());
            for enemy in enemies {
                let label = if enemy.boss {
                    format!("{} (boss)", enemy.name)
                } else {
                    enemy.name.clone()
                };
                println!("    ! {} [{}/{} hp]", label.enemy_style(), enemy.hp, enemy.max_hp);
            }
        },
        ViewItem::CombatBegins {
            enemy,
            description,
            hp,
            max_hp,
            attack,
        } => {
            println!("\n{}", "*** COMBAT BEGINS ***".combat_style());
            println!(
                "{:<4}{} - Health: {hp}/{max_hp}, Attack: {attack}",
                ICON_SWORDS.red(),
                enemy.enemy_style()
            );
            println!("{}", fill(description, indented_block()).description_style());
            println!("{}", "**********************".combat_style());
        },
        ViewItem::CombatEnds => println!("\n{}", "*** COMBAT ENDS ***".combat_style()),
        ViewItem::CombatEvent(msg) => println!("{}", fill(msg, normal_block()).italic()),
        ViewItem::CombatStrike {
            attacker,
            target,
            amount,
        } => println!(
            "{:<4}{} attacks {} for {} damage!",
            ICON_SWORDS.red(),
            attacker.bold(),
            target.bold(),
            amount.to_string().bright_red()
        ),
        ViewItem::GoldAwarded(amount) => println!("{:<4}You gained {} gold.", ICON_GOLD.yellow(), amount.to_string().yellow()),
        ViewItem::CombatMenu => {
            println!("\n{}", "What do you want to do?".bold());
            println!("1. Attack (or type 'attack')");
            println!("2. Use item (or type 'use')");
            println!("3. Try to flee (or type 'flee')");
        },
        ViewItem::ActionSuccess(msg) => println!(
            "{}",
            fill(format!("{} {msg}", ICON_SUCCESS.bright_green()).as_str(), normal_block())
        ),
        ViewItem::ActionFailure(msg) => println!(
            "{}",
            fill(format!("{} {msg}", ICON_FAILURE.bright_red()).as_str(), normal_block())
        ),
        ViewItem::Error(msg) => println!(
            "{}",
            fill(format!("{ICON_ERROR:<4}{}", msg.error_style()).as_str(), normal_block())
        ),
        ViewItem::CharacterStatus(status) => {
            println!("{}", "Character Status".subheading_style());
            for line in status.to_string().lines() {
                println!("    {line}");
            }
        },
        ViewItem::Inventory { lines, gold } => {
            println!("{}:", "Inventory".subheading_style());
            if lines.is_empty() {
                println!("   {}", "You have... nothing at all.".italic().dimmed());
            } else {
                for line in lines {
                    let marker = if line.equipped { " [equipped]".green().to_string() } else { String::new() };
                    println!(
                        "   {} ({}) - {}{marker}",
                        line.item_name.item_style(),
                        line.kind,
                        line.description.as_str().description_style()
                    );
                }
            }
            println!("{:<4}Gold: {}", ICON_GOLD.yellow(), gold.to_string().yellow());
        },
        ViewItem::MemoryJournal(memories) => {
            println!("{}", "Memory Journal".subheading_style());
            if memories.is_empty() {
                println!("   {}", "Your past remains a blank page.".italic().dimmed());
            } else {
                for (idx, memory) in memories.iter().enumerate() {
                    println!("{}", fill(&format!("{}. {memory}", idx + 1), indented_block()).memory_style());
                }
            }
        },
        ViewItem::CharacterHarmed { name, cause, amount } => println!(
            "{:<4}{} injured by {}! (-{} hp)",
            ICON_HARMED.bright_yellow(),
            name.bold(),
            cause.underline(),
            amount.to_string().bright_red()
        ),
        ViewItem::CharacterHealed { name, cause, amount } => println!(
            "{:<4}{} healed by {}. (+{} hp)",
            ICON_HEALED.bright_green(),
            name.bold(),
            cause.underline(),
            amount.to_string().bright_green()
        ),
        ViewItem::CharacterDeath { name, is_player } => {
            let suffix = if *is_player { " has fallen." } else { " dies." };
            println!("{:<4}{}{suffix}", ICON_DEATH.red(), name.bold());
        },
        ViewItem::EnemyAppears(name) => println!("{:<4}A {} appears!", ICON_SWORDS.red(), name.enemy_style()),
        ViewItem::MemoryRecovered(memory) => println!(
            "{}",
            fill(format!("{ICON_MEMORY:<4}{}", memory.memory_style()).as_str(), normal_block())
        ),
        ViewItem::TriggeredEvent(msg) => println!(
            "{}",
            fill(format!("{ICON_TRIGGER:<4}{}", msg.triggered_style()).as_str(), normal_block())
        ),
        ViewItem::EngineMessage(msg) => println!("{}", fill(format!("{ICON_ENGINE:<4}{msg}").as_str(), normal_block())),
        ViewItem::Help(commands) => {
            println!("\n{}", "=== AVAILABLE COMMANDS ===".bold().yellow());
            let mut heading = "";
            for command in commands {
                if command.section != heading {
                    heading = command.section;
                    println!("{}", format!("{heading}:").subheading_style());
                }
                println!("  {} - {}", command.command.bold().green(), command.description.italic());
            }
        },
        ViewItem::GameOver {
            won,
            turns,
            memory_recovered,
        } => {
            let (title, lines) = game_over_text(*won);
            println!("\n{BANNER_RULE}");
            if *won {
                println!("{:^40}", title.bright_yellow().bold());
            } else {
                println!("{:^40}", title.red().bold());
            }
            for line in lines.iter().filter(|line| !line.is_empty()) {
                println!("{line:^40}");
            }
            println!("{BANNER_RULE}");
            println!("\nFinal Stats:");
            println!("Turns played: {turns}");
            println!("Memories recovered: {}", if *memory_recovered { "yes" } else { "no" });
            println!("\nThank you for playing Echoes of the Forgotten Realm!");
        },
    }
}
