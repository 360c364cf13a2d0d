//! Live chat delivery over WebSocket.
//!
//! Browsers cannot set the Authorization header on a WebSocket upgrade, so
//! the bearer token rides in the query string. After the upgrade the socket
//! receives each newly created message in the match as a JSON frame; inbound
//! text frames are treated as message sends from the connected user.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, Query, State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::auth::verify_token;
use crate::chat::handlers::{authorized_match, store_message};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WsAuthQuery {
    pub token: String,
}

/// GET /api/v1/matches/:id/ws?token=
pub async fn handle_chat_ws(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
    Query(params): Query<WsAuthQuery>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, AppError> {
    let user_id = verify_token(&state, &params.token).await?;
    authorized_match(&state.db, match_id, user_id).await?;

    Ok(ws.on_upgrade(move |socket| chat_session(socket, state, match_id, user_id)))
}

async fn chat_session(socket: WebSocket, state: AppState, match_id: Uuid, user_id: Uuid) {
    let mut rx = state.hub.subscribe(match_id);
    let (mut sender, mut receiver) = socket.split();

    let mut forward_task = tokio::spawn(async move {
        while let Ok(frame) = rx.recv().await {
            if sender.send(Message::Text(frame)).await.is_err() {
                break;
            }
        }
    });

    loop {
        tokio::select! {
            _ = &mut forward_task => break,
            inbound = receiver.next() => {
                let Some(Ok(message)) = inbound else { break };
                if let Message::Text(content) = message {
                    if let Err(e) = store_message(&state, match_id, user_id, &content).await {
                        debug!("Dropping inbound chat frame: {e}");
                    }
                }
            }
        }
    }

    forward_task.abort();
    debug!("Chat session closed for match {match_id}, user {user_id}");
}
