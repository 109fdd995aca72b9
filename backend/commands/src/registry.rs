/// Slash command registry.
use crate::types::{ArgType, CommandArg, CommandDef};

fn arg(name: &str, description: &str, ty: ArgType, required: bool) -> CommandArg {
    CommandArg {
        name: name.to_string(),
        description: description.to_string(),
        arg_type: ty,
        required,
    }
}

fn required_string_arg(name: &str, description: &str) -> CommandArg {
    arg(name, description, ArgType::String, true)
}

fn bool_arg(name: &str, description: &str) -> CommandArg {
    arg(name, description, ArgType::Boolean, false)
}

/// Build the built-in command registry.
pub fn builtin_commands() -> Vec<CommandDef> {
    vec![
        CommandDef {
            key: "steaminvite".into(),
            description: "Create a clickable button to join a steam lobby.".into(),
            args: vec![
                required_string_arg(
                    "steamurl",
                    "Link to either your steam profile or your game session.",
                ),
                bool_arg("neverexpire", "Decide if you want the invite to never expire."),
            ],
        },
        CommandDef {
            key: "playerlookup".into(),
            description: "Display information for a given TEKKEN 8 player.".into(),
            args: vec![required_string_arg("playerid", "In-game player ID or name.")],
        },
        CommandDef {
            key: "help".into(),
            description: "Show available commands.".into(),
            args: vec![],
        },
    ]
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CommandRegistry {
    commands: Vec<CommandDef>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: builtin_commands(),
        }
    }

    pub fn register(&mut self, def: CommandDef) {
        self.commands.push(def);
    }

    pub fn all(&self) -> &[CommandDef] {
        &self.commands
    }

    pub fn find_by_key(&self, key: &str) -> Option<&CommandDef> {
        self.commands.iter().find(|c| c.key == key)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
