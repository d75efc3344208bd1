/// WebSocket handler for real-time snapshot streaming

use axum::{
    extract::ws::{Message, WebSocket},
    extract::{State, WebSocketUpgrade},
    response::Response,
};
use futures::{sink::SinkExt, stream::StreamExt};
use tokio::time::{interval, Duration, MissedTickBehavior};

use super::AppState;

pub async fn ws_metrics_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_metrics_websocket(socket, state))
}

async fn handle_metrics_websocket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    let mut interval = interval(Duration::from_secs(state.refresh_secs));
    // A sample already takes a full second; don't queue up catch-up ticks
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match state.sampler.sample_async().await {
                    Ok(snapshot) => {
                        if let Ok(json) = serde_json::to_string(&snapshot) {
                            if sender.send(Message::Text(json)).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "skipping websocket snapshot");
                    }
                }
            }

            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(Message::Ping(data))) => {
                        if sender.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Err(err)) => {
                        tracing::debug!(error = %err, "websocket receive failed");
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("metrics websocket closed");
}
