use crate::http::Server;
use crate::interaction::{BackgroundTask, InteractionResponder};
use crate::Error;
use model::interaction::{Interaction, InteractionResponse};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use warp::http::header::CONTENT_TYPE;
use warp::hyper::body::Bytes;
use warp::{reply::Response, Rejection, Reply};

pub async fn handle(
    server: Arc<Server>,
    signature: Option<String>,
    timestamp: Option<String>,
    body: Bytes,
) -> Result<Response, Rejection> {
    let received_at = Instant::now();

    if let Err(e) = server
        .verifier
        .verify(signature.as_deref(), timestamp.as_deref(), &body[..])
    {
        debug!(error = %e, "Rejected interaction");
        return Err(e.into());
    }

    let interaction: Interaction = serde_json::from_slice(&body[..]).map_err(Error::JsonError)?;

    let (response, tasks) = acknowledge(&server, &interaction, received_at)?;
    let encoded = serde_json::to_vec(&response).map_err(Error::EncodeError)?;

    debug!(
        interaction_type = %interaction.r#type(),
        elapsed_ms = received_at.elapsed().as_millis() as u64,
        "Acknowledged interaction"
    );

    for task in tasks {
        task.spawn();
    }

    Ok(warp::reply::with_header(encoded, CONTENT_TYPE, "application/json").into_response())
}

/// Produces the acknowledgement without awaiting anything, so it cannot be held up by I/O.
fn acknowledge(
    server: &Server,
    interaction: &Interaction,
    received_at: Instant,
) -> Result<(InteractionResponse, Vec<BackgroundTask>), Error> {
    let mut responder = InteractionResponder::new(interaction, received_at);

    let tasks = match interaction {
        Interaction::Ping(_) => {
            responder.acknowledge(InteractionResponse::new_pong())?;
            Vec::new()
        }

        Interaction::ApplicationCommand(data) => {
            server
                .commands
                .dispatch(data, &mut responder, Arc::clone(&server.requester))?
        }

        Interaction::MessageComponent(_) | Interaction::ModalSubmit(_) => {
            info!(interaction_type = %interaction.r#type(), "Received unsupported interaction");

            responder.acknowledge(InteractionResponse::new_message(
                "This interaction is not supported.",
                true,
            ))?;
            Vec::new()
        }
    };

    Ok((responder.into_response()?, tasks))
}
