use super::{Command, CommandContext};
use crate::Error;
use model::channel::{CreateMessage, FollowupMessage};

pub struct PingCommand;

impl Command for PingCommand {
    fn name(&self) -> &'static str {
        "ping"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> Result<(), Error> {
        ctx.reply("Pong!", false)?;

        let channel_id = ctx.interaction.channel_id;
        ctx.spawn(move |followups| async move {
            let content = "This message was sent via bot-requester!";

            match channel_id {
                Some(channel_id) => {
                    let message = CreateMessage {
                        content: content.into(),
                    };
                    followups
                        .requester()
                        .create_message(channel_id, &message)
                        .await?;
                }
                None => followups.send(FollowupMessage::new(content)).await?,
            }

            Ok(())
        })
    }
}
