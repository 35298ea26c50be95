use crate::interaction::{BackgroundTask, Followups, InteractionResponder};
use crate::requester::RequesterClient;
use crate::Error;
use model::interaction::{ApplicationCommandInteraction, InteractionResponse};
use std::future::Future;
use std::sync::Arc;

pub struct CommandContext<'a> {
    pub interaction: &'a ApplicationCommandInteraction,
    responder: &'a mut InteractionResponder,
    requester: Arc<RequesterClient>,
    tasks: Vec<BackgroundTask>,
}

impl<'a> CommandContext<'a> {
    pub(crate) fn new(
        interaction: &'a ApplicationCommandInteraction,
        responder: &'a mut InteractionResponder,
        requester: Arc<RequesterClient>,
    ) -> CommandContext<'a> {
        CommandContext {
            interaction,
            responder,
            requester,
            tasks: Vec::new(),
        }
    }

    pub fn responder(&self) -> &InteractionResponder {
        self.responder
    }

    /// Acknowledges with a message shown straight away.
    pub fn reply(&mut self, content: impl Into<Box<str>>, ephemeral: bool) -> Result<(), Error> {
        self.responder
            .acknowledge(InteractionResponse::new_message(content, ephemeral))
    }

    /// Acknowledges without content; the reply follows later as a follow-up.
    pub fn defer(&mut self, ephemeral: bool) -> Result<(), Error> {
        self.responder
            .acknowledge(InteractionResponse::new_deferred_message_with_source(ephemeral))
    }

    /// Queues work to run once the acknowledgement has been produced. Must be called after
    /// [`reply`](Self::reply) or [`defer`](Self::defer).
    pub fn spawn<F, Fut>(&mut self, f: F) -> Result<(), Error>
    where
        F: FnOnce(Followups) -> Fut,
        Fut: Future<Output = Result<(), Error>> + Send + 'static,
    {
        let followups = self.responder.followups(Arc::clone(&self.requester))?;

        self.tasks.push(BackgroundTask::new(
            &self.interaction.data.name,
            self.interaction.id,
            f(followups),
        ));

        Ok(())
    }

    pub(crate) fn into_tasks(self) -> Vec<BackgroundTask> {
        self.tasks
    }
}
