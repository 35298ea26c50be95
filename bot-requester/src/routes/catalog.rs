use super::RouteSpec;
use std::fmt;
use warp::http::Method;

macro_rules! routes {
    (@major) => { None };
    (@major $major:literal) => { Some($major) };

    ($($route:ident => $method:ident $template:literal $(, major = $major:literal)?;)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Route {
            $($route,)*
        }

        impl Route {
            pub fn name(self) -> &'static str {
                match self {
                    $(Route::$route => stringify!($route),)*
                }
            }
        }

        pub static CATALOG: &[RouteSpec] = &[
            $(RouteSpec {
                route: Route::$route,
                method: Method::$method,
                template: $template,
                major: routes!(@major $($major)?),
            },)*
        ];
    };
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

routes! {
    // Application commands
    GetGlobalApplicationCommands => GET "applications/{application_id}/commands";
    CreateGlobalApplicationCommand => POST "applications/{application_id}/commands";
    BulkOverwriteGlobalApplicationCommands => PUT "applications/{application_id}/commands";
    GetGlobalApplicationCommand => GET "applications/{application_id}/commands/{command_id}";
    EditGlobalApplicationCommand => PATCH "applications/{application_id}/commands/{command_id}";
    DeleteGlobalApplicationCommand => DELETE "applications/{application_id}/commands/{command_id}";
    GetGuildApplicationCommands => GET "applications/{application_id}/guilds/{guild_id}/commands", major = "guild_id";
    CreateGuildApplicationCommand => POST "applications/{application_id}/guilds/{guild_id}/commands", major = "guild_id";
    BulkOverwriteGuildApplicationCommands => PUT "applications/{application_id}/guilds/{guild_id}/commands", major = "guild_id";
    GetGuildApplicationCommand => GET "applications/{application_id}/guilds/{guild_id}/commands/{command_id}", major = "guild_id";
    EditGuildApplicationCommand => PATCH "applications/{application_id}/guilds/{guild_id}/commands/{command_id}", major = "guild_id";
    DeleteGuildApplicationCommand => DELETE "applications/{application_id}/guilds/{guild_id}/commands/{command_id}", major = "guild_id";
    GetGuildApplicationCommandPermissions => GET "applications/{application_id}/guilds/{guild_id}/commands/permissions", major = "guild_id";
    GetApplicationCommandPermissions => GET "applications/{application_id}/guilds/{guild_id}/commands/{command_id}/permissions", major = "guild_id";
    EditApplicationCommandPermissions => PUT "applications/{application_id}/guilds/{guild_id}/commands/{command_id}/permissions", major = "guild_id";

    // Interactions
    CreateInteractionResponse => POST "interactions/{interaction_id}/{interaction_token}/callback", major = "interaction_token";
    GetOriginalInteractionResponse => GET "webhooks/{application_id}/{interaction_token}/messages/@original", major = "interaction_token";
    EditOriginalInteractionResponse => PATCH "webhooks/{application_id}/{interaction_token}/messages/@original", major = "interaction_token";
    DeleteOriginalInteractionResponse => DELETE "webhooks/{application_id}/{interaction_token}/messages/@original", major = "interaction_token";
    CreateFollowupMessage => POST "webhooks/{application_id}/{interaction_token}", major = "interaction_token";
    GetFollowupMessage => GET "webhooks/{application_id}/{interaction_token}/messages/{message_id}", major = "interaction_token";
    EditFollowupMessage => PATCH "webhooks/{application_id}/{interaction_token}/messages/{message_id}", major = "interaction_token";
    DeleteFollowupMessage => DELETE "webhooks/{application_id}/{interaction_token}/messages/{message_id}", major = "interaction_token";

    // Applications
    GetCurrentApplication => GET "applications/@me";
    EditCurrentApplication => PATCH "applications/@me";

    // Channels
    GetChannel => GET "channels/{channel_id}", major = "channel_id";
    ModifyChannel => PATCH "channels/{channel_id}", major = "channel_id";
    DeleteChannel => DELETE "channels/{channel_id}", major = "channel_id";
    EditChannelPermissions => PUT "channels/{channel_id}/permissions/{overwrite_id}", major = "channel_id";
    DeleteChannelPermission => DELETE "channels/{channel_id}/permissions/{overwrite_id}", major = "channel_id";
    GetChannelInvites => GET "channels/{channel_id}/invites", major = "channel_id";
    CreateChannelInvite => POST "channels/{channel_id}/invites", major = "channel_id";
    TriggerTypingIndicator => POST "channels/{channel_id}/typing", major = "channel_id";
    GetPinnedMessages => GET "channels/{channel_id}/pins", major = "channel_id";
    PinMessage => PUT "channels/{channel_id}/pins/{message_id}", major = "channel_id";
    UnpinMessage => DELETE "channels/{channel_id}/pins/{message_id}", major = "channel_id";

    // Messages
    GetChannelMessages => GET "channels/{channel_id}/messages", major = "channel_id";
    CreateMessage => POST "channels/{channel_id}/messages", major = "channel_id";
    BulkDeleteMessages => POST "channels/{channel_id}/messages/bulk-delete", major = "channel_id";
    GetChannelMessage => GET "channels/{channel_id}/messages/{message_id}", major = "channel_id";
    EditMessage => PATCH "channels/{channel_id}/messages/{message_id}", major = "channel_id";
    DeleteMessage => DELETE "channels/{channel_id}/messages/{message_id}", major = "channel_id";
    CrosspostMessage => POST "channels/{channel_id}/messages/{message_id}/crosspost", major = "channel_id";

    // Reactions
    GetReactions => GET "channels/{channel_id}/messages/{message_id}/reactions/{emoji}", major = "channel_id";
    CreateReaction => PUT "channels/{channel_id}/messages/{message_id}/reactions/{emoji}/@me", major = "channel_id";
    DeleteOwnReaction => DELETE "channels/{channel_id}/messages/{message_id}/reactions/{emoji}/@me", major = "channel_id";
    DeleteUserReaction => DELETE "channels/{channel_id}/messages/{message_id}/reactions/{emoji}/{user_id}", major = "channel_id";
    DeleteAllReactions => DELETE "channels/{channel_id}/messages/{message_id}/reactions", major = "channel_id";
    DeleteAllReactionsForEmoji => DELETE "channels/{channel_id}/messages/{message_id}/reactions/{emoji}", major = "channel_id";

    // Threads
    StartThreadFromMessage => POST "channels/{channel_id}/messages/{message_id}/threads", major = "channel_id";
    StartThreadWithoutMessage => POST "channels/{channel_id}/threads", major = "channel_id";
    JoinThread => PUT "channels/{channel_id}/thread-members/@me", major = "channel_id";
    LeaveThread => DELETE "channels/{channel_id}/thread-members/@me", major = "channel_id";
    AddThreadMember => PUT "channels/{channel_id}/thread-members/{user_id}", major = "channel_id";
    RemoveThreadMember => DELETE "channels/{channel_id}/thread-members/{user_id}", major = "channel_id";
    GetThreadMember => GET "channels/{channel_id}/thread-members/{user_id}", major = "channel_id";
    ListThreadMembers => GET "channels/{channel_id}/thread-members", major = "channel_id";

    // Webhooks
    CreateWebhook => POST "channels/{channel_id}/webhooks", major = "channel_id";
    GetChannelWebhooks => GET "channels/{channel_id}/webhooks", major = "channel_id";
    GetGuildWebhooks => GET "guilds/{guild_id}/webhooks", major = "guild_id";
    GetWebhook => GET "webhooks/{webhook_id}", major = "webhook_id";
    ModifyWebhook => PATCH "webhooks/{webhook_id}", major = "webhook_id";
    DeleteWebhook => DELETE "webhooks/{webhook_id}", major = "webhook_id";
    GetWebhookWithToken => GET "webhooks/{webhook_id}/{webhook_token}", major = "webhook_id";

    // Guilds
    GetGuild => GET "guilds/{guild_id}", major = "guild_id";
    ModifyGuild => PATCH "guilds/{guild_id}", major = "guild_id";
    GetGuildAuditLog => GET "guilds/{guild_id}/audit-logs", major = "guild_id";
    GetGuildChannels => GET "guilds/{guild_id}/channels", major = "guild_id";
    CreateGuildChannel => POST "guilds/{guild_id}/channels", major = "guild_id";
    ListActiveGuildThreads => GET "guilds/{guild_id}/threads/active", major = "guild_id";
    ListGuildEmojis => GET "guilds/{guild_id}/emojis", major = "guild_id";

    // Members
    ListGuildMembers => GET "guilds/{guild_id}/members", major = "guild_id";
    SearchGuildMembers => GET "guilds/{guild_id}/members/search", major = "guild_id";
    GetGuildMember => GET "guilds/{guild_id}/members/{user_id}", major = "guild_id";
    ModifyGuildMember => PATCH "guilds/{guild_id}/members/{user_id}", major = "guild_id";
    RemoveGuildMember => DELETE "guilds/{guild_id}/members/{user_id}", major = "guild_id";
    AddGuildMemberRole => PUT "guilds/{guild_id}/members/{user_id}/roles/{role_id}", major = "guild_id";
    RemoveGuildMemberRole => DELETE "guilds/{guild_id}/members/{user_id}/roles/{role_id}", major = "guild_id";

    // Bans
    GetGuildBans => GET "guilds/{guild_id}/bans", major = "guild_id";
    GetGuildBan => GET "guilds/{guild_id}/bans/{user_id}", major = "guild_id";
    CreateGuildBan => PUT "guilds/{guild_id}/bans/{user_id}", major = "guild_id";
    RemoveGuildBan => DELETE "guilds/{guild_id}/bans/{user_id}", major = "guild_id";

    // Roles
    GetGuildRoles => GET "guilds/{guild_id}/roles", major = "guild_id";
    CreateGuildRole => POST "guilds/{guild_id}/roles", major = "guild_id";
    ModifyGuildRole => PATCH "guilds/{guild_id}/roles/{role_id}", major = "guild_id";
    DeleteGuildRole => DELETE "guilds/{guild_id}/roles/{role_id}", major = "guild_id";

    // Users
    GetCurrentUser => GET "users/@me";
    GetUser => GET "users/{user_id}";
    GetCurrentUserGuilds => GET "users/@me/guilds";
    LeaveGuild => DELETE "users/@me/guilds/{guild_id}";
    CreateDm => POST "users/@me/channels";

    // Gateway
    GetGateway => GET "gateway";
    GetGatewayBot => GET "gateway/bot";
}
