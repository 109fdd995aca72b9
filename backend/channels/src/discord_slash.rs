//! Discord Slash Commands
//!
//! Registers the command registry as application commands and turns incoming
//! command interactions back into platform-neutral invocations.

use anyhow::Result;
use lobbybot_commands::{ArgType, ArgValue, CommandArg, CommandDef, CommandInvocation, CommandRegistry};
use serenity::all::{
    Command, CommandDataOptionValue, CommandInteraction, CommandOptionType, CreateCommand,
    CreateCommandOption, GuildId, Http,
};
use tracing::info;

pub struct DiscordSlash;

impl DiscordSlash {
    pub fn build_commands(registry: &CommandRegistry) -> Vec<CreateCommand> {
        registry.all().iter().map(Self::build_command).collect()
    }

    fn build_command(def: &CommandDef) -> CreateCommand {
        def.args.iter().fold(
            CreateCommand::new(&def.key).description(&def.description),
            |command, arg| command.add_option(Self::build_option(arg)),
        )
    }

    fn build_option(arg: &CommandArg) -> CreateCommandOption {
        let kind = match arg.arg_type {
            ArgType::String => CommandOptionType::String,
            ArgType::Boolean => CommandOptionType::Boolean,
        };
        CreateCommandOption::new(kind, &arg.name, &arg.description).required(arg.required)
    }

    /// Registers the commands to one guild (visible immediately) or globally.
    pub async fn register_commands(
        http: &Http,
        registry: &CommandRegistry,
        guild_id: Option<GuildId>,
    ) -> Result<usize> {
        let commands = Self::build_commands(registry);
        let registered = match guild_id {
            Some(guild) => {
                info!(guild = %guild, "Registering guild slash commands");
                guild.set_commands(http, commands).await?
            }
            None => {
                info!("Registering global slash commands");
                Command::set_global_commands(http, commands).await?
            }
        };
        Ok(registered.len())
    }

    pub fn option_value(value: &CommandDataOptionValue) -> Option<ArgValue> {
        match value {
            CommandDataOptionValue::String(s) => Some(ArgValue::String(s.clone())),
            CommandDataOptionValue::Boolean(b) => Some(ArgValue::Boolean(*b)),
            _ => None,
        }
    }

    pub fn invocation_from(command: &CommandInteraction) -> CommandInvocation {
        command
            .data
            .options
            .iter()
            .filter_map(|opt| Self::option_value(&opt.value).map(|v| (opt.name.clone(), v)))
            .fold(CommandInvocation::new(&command.data.name), |inv, (name, value)| {
                inv.with_option(name, value)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_every_registered_command() {
        let commands = DiscordSlash::build_commands(&CommandRegistry::new());
        let json: Vec<_> = commands
            .iter()
            .map(|c| serde_json::to_value(c).unwrap())
            .collect();

        let names: Vec<_> = json.iter().map(|c| c["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["steaminvite", "playerlookup", "help"]);

        let options = &json[0]["options"];
        assert_eq!(options[0]["name"], "steamurl");
        assert_eq!(options[0]["required"], true);
        assert_eq!(options[1]["name"], "neverexpire");
        assert_ne!(options[1]["required"], true);
    }

    #[test]
    fn option_values_map_to_args() {
        assert_eq!(
            DiscordSlash::option_value(&CommandDataOptionValue::String("x".into())),
            Some(ArgValue::String("x".into()))
        );
        assert_eq!(
            DiscordSlash::option_value(&CommandDataOptionValue::Boolean(true)),
            Some(ArgValue::Boolean(true))
        );
        assert_eq!(DiscordSlash::option_value(&CommandDataOptionValue::Integer(3)), None);
    }
}
