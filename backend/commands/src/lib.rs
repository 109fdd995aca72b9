pub mod dispatch;
pub mod handlers;
pub mod registry;
pub mod types;

use std::sync::Arc;

use lobbybot_core::{PlayerSearch, SteamDirectory};
use lobbybot_invite::InvitePipeline;

pub use dispatch::{
    CommandContext, CommandDispatcher, CommandHandler, CommandResponse, InviteCard, PlayerCard,
};
pub use handlers::{
    region_name, HelpHandler, InviteSettings, LookupSettings, PlayerLookupHandler,
    SteamInviteHandler,
};
pub use registry::{builtin_commands, CommandRegistry};
pub use types::{ArgType, ArgValue, CommandArg, CommandDef, CommandInvocation};

/// Remote capabilities and settings the built-in handlers need.
pub struct CommandServices {
    pub steam: Arc<dyn SteamDirectory>,
    pub players: Arc<dyn PlayerSearch>,
    pub invite: InviteSettings,
    pub lookup: LookupSettings,
}

/// Build a dispatcher pre-wired with all built-in handlers.
pub fn build_dispatcher(services: CommandServices) -> CommandDispatcher {
    let mut dispatcher = CommandDispatcher::new();
    let pipeline = Arc::new(InvitePipeline::new(services.steam));

    dispatcher.register(
        "steaminvite",
        Arc::new(SteamInviteHandler::new(pipeline, services.invite)),
    );
    dispatcher.register(
        "playerlookup",
        Arc::new(PlayerLookupHandler::new(services.players, services.lookup)),
    );
    dispatcher.register(
        "help",
        Arc::new(HelpHandler {
            registry: CommandRegistry::new(),
        }),
    );

    dispatcher
}
