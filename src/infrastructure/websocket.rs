//! WebSocket progress stream for one generation run
//!
//! A client connecting to `/ws/generations/{id}` first receives every event
//! the run has already emitted, then live events as they happen. The server
//! closes the socket after the terminal event.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;

use crate::domain::value_objects::{GenerationProgress, GenerationRunId};
use crate::infrastructure::http::parse_run_id;
use crate::infrastructure::runs::RunSubscription;
use crate::infrastructure::state::AppState;

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let run_id = match parse_run_id(&id) {
        Ok(run_id) => run_id,
        Err(rejection) => return rejection.into_response(),
    };

    // Subscribe before upgrading so nothing emitted during the handshake is lost
    let Some(subscription) = state.runs.subscribe(run_id) else {
        return (StatusCode::NOT_FOUND, "Generation run not found").into_response();
    };

    ws.on_upgrade(move |socket| stream_progress(socket, run_id, subscription))
}

/// Outcome of pushing one event to the client
enum Forwarded {
    More,
    Terminal,
    Disconnected,
}

async fn forward(
    sender: &mut SplitSink<WebSocket, Message>,
    event: &GenerationProgress,
) -> Forwarded {
    let json = match serde_json::to_string(event) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize progress event: {}", e);
            return Forwarded::More;
        }
    };

    if sender.send(Message::Text(json.into())).await.is_err() {
        return Forwarded::Disconnected;
    }

    if event.is_terminal() {
        Forwarded::Terminal
    } else {
        Forwarded::More
    }
}

async fn stream_progress(socket: WebSocket, run_id: GenerationRunId, subscription: RunSubscription) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let RunSubscription { history, live } = subscription;

    tracing::info!(
        "Progress stream opened for run {} ({} events replayed)",
        run_id,
        history.len()
    );

    for event in &history {
        match forward(&mut ws_sender, event).await {
            Forwarded::More => {}
            Forwarded::Terminal => {
                let _ = ws_sender.send(Message::Close(None)).await;
                return;
            }
            Forwarded::Disconnected => return,
        }
    }

    let Some(mut live) = live else {
        // Finished without a terminal event in history; nothing more will come
        let _ = ws_sender.send(Message::Close(None)).await;
        return;
    };

    loop {
        tokio::select! {
            received = live.recv() => match received {
                Ok(event) => match forward(&mut ws_sender, &event).await {
                    Forwarded::More => {}
                    Forwarded::Terminal => break,
                    Forwarded::Disconnected => return,
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Progress stream for run {} skipped {} events", run_id, skipped);
                }
                Err(RecvError::Closed) => break,
            },
            incoming = ws_receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Progress stream for run {} closed by client", run_id);
                    return;
                }
                Some(Err(e)) => {
                    tracing::error!("WebSocket error on run {}: {}", run_id, e);
                    return;
                }
                // Clients have nothing to say on this socket
                Some(Ok(_)) => {}
            },
        }
    }

    let _ = ws_sender.send(Message::Close(None)).await;
    tracing::info!("Progress stream for run {} finished", run_id);
}
