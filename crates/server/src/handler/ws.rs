use crate::state::AppState;
use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use shared::{
    domain::event::{FeedCommand, OrderFeedEvent},
    realtime::OrderFeed,
};
use std::{collections::HashMap, sync::Arc};
use tokio::{
    sync::{broadcast, mpsc},
    task::JoinHandle,
};
use tracing::{info, warn};
use uuid::Uuid;

/// Realtime order feed. Clients send `join-order` / `leave-order` /
/// `join-admin` commands and receive `order-update` / `new-order` events.
/// Joining is unauthenticated: knowing the order number is the capability.
pub async fn order_feed_handler(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let feed = state.feed.clone();
    ws.on_upgrade(move |socket| handle_connection(socket, feed))
}

async fn handle_connection(socket: WebSocket, feed: Arc<OrderFeed>) {
    let connection_id = Uuid::new_v4();
    info!("🔌 Client connected: {connection_id}");

    let (mut sink, mut stream) = socket.split();

    // All room forwarders funnel into one writer task so frames never
    // interleave on the socket.
    let (out_tx, mut out_rx) = mpsc::channel::<String>(64);
    let mut writer: JoinHandle<()> = tokio::spawn(async move {
        while let Some(text) = out_rx.recv().await {
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let mut rooms: HashMap<String, JoinHandle<()>> = HashMap::new();
    let mut admin_task: Option<JoinHandle<()>> = None;

    loop {
        tokio::select! {
            message = stream.next() => {
                let Some(Ok(message)) = message else { break };

                let text = match message {
                    Message::Text(text) => text,
                    Message::Close(_) => break,
                    _ => continue,
                };

                let command = match serde_json::from_str::<FeedCommand>(text.as_str()) {
                    Ok(command) => command,
                    Err(err) => {
                        warn!("⚠️ Ignoring malformed feed command from {connection_id}: {err}");
                        continue;
                    }
                };

                match command {
                    FeedCommand::JoinOrder { order_number } => {
                        if rooms.contains_key(&order_number) {
                            continue;
                        }
                        info!("👥 Client {connection_id} joined order room: {order_number}");
                        let rx = feed.subscribe(&order_number).await;
                        let task = tokio::spawn(forward(rx, out_tx.clone()));
                        rooms.insert(order_number, task);
                    }
                    FeedCommand::LeaveOrder { order_number } => {
                        if let Some(task) = rooms.remove(&order_number) {
                            info!("👋 Client {connection_id} left order room: {order_number}");
                            task.abort();
                        }
                    }
                    FeedCommand::JoinAdmin => {
                        if admin_task.is_some() {
                            continue;
                        }
                        info!("🛠️ Admin {connection_id} joined admin room");
                        let rx = feed.subscribe_admin();
                        admin_task = Some(tokio::spawn(forward(rx, out_tx.clone())));
                    }
                }
            }
            _ = &mut writer => break,
        }
    }

    for (_, task) in rooms {
        task.abort();
    }
    if let Some(task) = admin_task {
        task.abort();
    }
    writer.abort();

    info!("🔌 Client disconnected: {connection_id}");
}

/// Pumps one broadcast subscription into the connection's writer channel.
/// A lagged receiver just skips ahead: the feed is best-effort and the
/// client resyncs through the query API.
async fn forward(
    mut rx: broadcast::Receiver<OrderFeedEvent>,
    out: mpsc::Sender<String>,
) {
    loop {
        match rx.recv().await {
            Ok(event) => {
                let Ok(text) = serde_json::to_string(&event) else {
                    continue;
                };
                if out.send(text).await.is_err() {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!("⚠️ Feed subscriber lagged, dropped {skipped} event(s)");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
