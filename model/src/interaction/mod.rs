mod interaction;
pub use interaction::{
    ApplicationCommandInteraction, Interaction, InteractionType, MessageComponentInteraction,
    MessageComponentInteractionData, ModalInteractionActionRowData, ModalInteractionComponentData,
    ModalInteractionData, ModalSubmitInteraction, PingInteraction,
};

mod application_command_interaction_data;
pub use application_command_interaction_data::ApplicationCommandInteractionData;

mod application_command_interaction_data_option;
pub use application_command_interaction_data_option::{
    ApplicationCommandInteractionDataOption, ApplicationCommandOptionType, EntityKind, EntityRef,
    OptionValue,
};

mod interaction_response;
pub use interaction_response::{
    ApplicationCommandResponse, DeferredApplicationCommandResponse,
    DeferredApplicationCommandResponseData, InteractionResponse, InteractionResponseType,
    SimpleInteractionResponse,
};

mod interaction_application_command_callback_data;
pub use interaction_application_command_callback_data::InteractionApplicationCommandCallbackData;
