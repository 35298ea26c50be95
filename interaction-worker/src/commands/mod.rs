mod context;
pub use context::CommandContext;

mod ping;
pub use ping::PingCommand;

mod weather;
pub use weather::WeatherCommand;

mod remind;
pub use remind::RemindCommand;

use crate::interaction::{BackgroundTask, InteractionResponder, ResponseState};
use crate::requester::RequesterClient;
use crate::Error;
use model::interaction::{ApplicationCommandInteraction, InteractionResponse};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// A slash command. `execute` is synchronous: it runs on the acknowledgement path, so anything
/// slow must be queued through [`CommandContext::spawn`] instead.
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;

    fn execute(&self, ctx: &mut CommandContext<'_>) -> Result<(), Error>;
}

/// Static name to handler table, built once at startup.
pub struct CommandRegistry {
    commands: HashMap<&'static str, Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> CommandRegistry {
        CommandRegistry {
            commands: HashMap::new(),
        }
    }

    pub fn register<C: Command + 'static>(mut self, command: C) -> CommandRegistry {
        self.commands.insert(command.name(), Box::new(command));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|command| command.as_ref())
    }

    /// Runs the matching command, returning any background work it queued. Unknown commands are
    /// answered with an ephemeral message so the interaction is never left unacknowledged.
    pub fn dispatch(
        &self,
        interaction: &ApplicationCommandInteraction,
        responder: &mut InteractionResponder,
        requester: Arc<RequesterClient>,
    ) -> Result<Vec<BackgroundTask>, Error> {
        let name = &*interaction.data.name;

        let command = match self.get(name) {
            Some(command) => command,
            None => {
                info!(command = name, "Received unhandled command");

                let content = format!("Unhandled command: {}", name);
                responder.acknowledge(InteractionResponse::new_message(content, true))?;
                return Ok(Vec::new());
            }
        };

        let mut ctx = CommandContext::new(interaction, responder, requester);
        command.execute(&mut ctx)?;

        let tasks = ctx.into_tasks();
        if responder.state() == ResponseState::Received {
            return Err(Error::NotAcknowledged);
        }

        Ok(tasks)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        CommandRegistry::new()
            .register(PingCommand)
            .register(WeatherCommand)
            .register(RemindCommand)
    }
}
