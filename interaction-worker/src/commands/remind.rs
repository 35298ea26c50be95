use super::{Command, CommandContext};
use crate::Error;
use chrono::{Duration as ChronoDuration, Utc};
use model::channel::FollowupMessage;
use std::time::Duration;

/// Deferred reminder, delivered as a follow-up while the interaction token is still valid.
pub struct RemindCommand;

impl Command for RemindCommand {
    fn name(&self) -> &'static str {
        "remind"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> Result<(), Error> {
        let data = &ctx.interaction.data;
        let minutes = data.integer_option("minutes").unwrap_or(0);
        let private = data.boolean_option("private").unwrap_or(false);
        let text = data
            .string_option("message")
            .unwrap_or("Reminder!")
            .to_owned();

        let max_minutes = ctx
            .responder()
            .expires_at()
            .map(|expires_at| (expires_at - Utc::now()).num_minutes())
            .unwrap_or(0);

        if minutes < 1 || minutes >= max_minutes {
            let content = if max_minutes > 1 {
                format!(
                    "I can only set reminders between 1 and {} minutes from now.",
                    max_minutes - 1
                )
            } else {
                "This interaction is too old to set a reminder from.".to_owned()
            };

            return ctx.reply(content, true);
        }

        ctx.defer(private)?;

        ctx.spawn(move |followups| async move {
            let unit = if minutes == 1 { "minute" } else { "minutes" };
            let confirmation = format!("I'll remind you in {} {}.", minutes, unit);
            followups
                .send(FollowupMessage::new(confirmation).ephemeral(private))
                .await?;

            let delay = ChronoDuration::minutes(minutes)
                .to_std()
                .unwrap_or(Duration::ZERO);
            tokio::time::sleep(delay).await;

            followups
                .send(FollowupMessage::new(format!("⏰ {}", text)).ephemeral(private))
                .await
        })
    }
}
