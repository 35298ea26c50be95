mod responder;
pub use responder::{
    Acknowledgement, InteractionResponder, ResponseState, ACKNOWLEDGEMENT_DEADLINE,
    TOKEN_VALIDITY_MINUTES,
};

mod followup;
pub use followup::Followups;

mod task;
pub use task::BackgroundTask;
