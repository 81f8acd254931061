//! Live change feed over WebSocket.
//!
//! DESIGN
//! ======
//! On upgrade, the connection subscribes to the [`FeedHub`] broadcast and
//! enters a `select!` loop:
//! - Incoming client frames → `feed:subscribe` / `feed:unsubscribe`
//! - Broadcast change frames → forwarded when their topic is subscribed
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → send `session:connected` with `client_id`
//! 2. Client subscribes to `posts` and/or `posts/{id}/comments`
//! 3. Server pushes `post:created` / `comment:created` for those topics
//! 4. Close → the broadcast receiver is dropped
//!
//! [`FeedHub`]: crate::services::feed::FeedHub

use std::collections::HashSet;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use uuid::Uuid;

use crate::frame::{Data, FRAME_MESSAGE, Frame, Status};
use crate::services::feed::{FeedError, Topic};
use crate::state::AppState;

/// Topics one connection is subscribed to.
pub(crate) type Subscriptions = HashSet<Topic>;

// =============================================================================
// UPGRADE
// =============================================================================

/// `GET /api/live`: anonymous viewers may watch the feed.
pub async fn handle_live(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_live(socket, state))
}

// =============================================================================
// CONNECTION
// =============================================================================

async fn run_live(mut socket: WebSocket, state: AppState) {
    let client_id = Uuid::new_v4();
    let mut feed_rx = state.feed.subscribe();

    let welcome = Frame::event("session:connected", Data::new()).with_data("client_id", client_id.to_string());
    if send_frame(&mut socket, &welcome).await.is_err() {
        return;
    }
    info!(%client_id, "live: client connected");

    let mut subscriptions = Subscriptions::new();

    'conn: loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(Ok(msg)) = msg else { break };
                match msg {
                    Message::Text(text) => {
                        for frame in process_inbound_text(&mut subscriptions, client_id, text.as_str()) {
                            if send_frame(&mut socket, &frame).await.is_err() {
                                break 'conn;
                            }
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            event = feed_rx.recv() => {
                match event {
                    Ok(frame) => {
                        if should_forward(&subscriptions, &frame) && send_frame(&mut socket, &frame).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(%client_id, skipped, "live: subscriber lagged, events dropped");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }

    drop(feed_rx);
    info!(
        %client_id,
        topics = subscriptions.len(),
        remaining = state.feed.receiver_count(),
        "live: client disconnected"
    );
}

async fn send_frame(socket: &mut WebSocket, frame: &Frame) -> Result<(), axum::Error> {
    let json = match serde_json::to_string(frame) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, syscall = %frame.syscall, "live: frame serialization failed");
            return Ok(());
        }
    };
    socket.send(Message::Text(json.into())).await
}

// =============================================================================
// FRAME DISPATCH
// =============================================================================

/// Parse and process one inbound text frame and return frames for the sender.
pub(crate) fn process_inbound_text(subscriptions: &mut Subscriptions, client_id: Uuid, text: &str) -> Vec<Frame> {
    let req: Frame = match serde_json::from_str(text) {
        Ok(r) => r,
        Err(e) => {
            warn!(%client_id, error = %e, "live: invalid inbound frame");
            let mut err =
                Frame::event("gateway:error", Data::new()).with_data(FRAME_MESSAGE, format!("invalid json: {e}"));
            err.status = Status::Error;
            return vec![err];
        }
    };

    let reply = match req.prefix() {
        "feed" => handle_feed(subscriptions, &req),
        prefix => req.error(format!("unknown prefix: {prefix}")),
    };
    vec![reply]
}

fn handle_feed(subscriptions: &mut Subscriptions, req: &Frame) -> Frame {
    let topic = match requested_topic(req) {
        Ok(topic) => topic,
        Err(e) => return req.error_from(&e),
    };
    match req.syscall.as_str() {
        "feed:subscribe" => {
            subscriptions.insert(topic);
        }
        "feed:unsubscribe" => {
            subscriptions.remove(&topic);
        }
        other => return req.error(format!("unknown syscall: {other}")),
    }
    req.done().with_topic(topic.to_string())
}

fn requested_topic(req: &Frame) -> Result<Topic, FeedError> {
    let raw = req
        .data_str("topic")
        .or(req.topic.as_deref())
        .ok_or(FeedError::MissingTopic)?;
    Topic::parse(raw)
}

/// Whether a broadcast change frame belongs to a subscribed topic.
pub(crate) fn should_forward(subscriptions: &Subscriptions, frame: &Frame) -> bool {
    frame
        .topic
        .as_deref()
        .and_then(|raw| Topic::parse(raw).ok())
        .is_some_and(|topic| subscriptions.contains(&topic))
}

#[cfg(test)]
#[path = "live_test.rs"]
mod tests;
