//! Event stream channel.
//!
//! One channel per session, attached after the lifecycle call yields a
//! session identifier. The channel owns the socket and the keepalive
//! timer; everything it learns is reported as `ChannelSignal`s on an mpsc
//! the dispatcher consumes. Malformed frames are logged and dropped here,
//! so they can never desynchronize the reducer.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use wonderland_protocol::{ClientMessage, ServerMessage};

/// What the channel observed, in delivery order.
#[derive(Debug)]
pub enum ChannelSignal {
    /// The socket opened; the session is live.
    Opened,
    /// One decoded server message.
    Message(Box<ServerMessage>),
    /// Transport-level failure; the session moves to `error`.
    Failed(String),
    /// The socket closed. Always a session conclusion, whatever the cause.
    Closed,
}

/// Handle owning the channel task's shutdown signal.
///
/// `close()` stops the keepalive timer and closes the socket. Dropping the
/// handle has the same effect, so an abandoned session cannot leak a timer
/// that keeps firing after the UI discarded it.
pub struct ChannelHandle {
    shutdown: Option<oneshot::Sender<()>>,
}

impl ChannelHandle {
    /// Request shutdown. The task sends a close frame and stops.
    pub fn close(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Open a channel for one session stream URL.
///
/// Returns immediately; connection progress and everything after arrives
/// as signals on the receiver. The first signal is either `Opened` or
/// `Failed`.
pub fn connect(url: String, keepalive: Duration) -> (ChannelHandle, mpsc::Receiver<ChannelSignal>) {
    let (signal_tx, signal_rx) = mpsc::channel(32);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    tokio::spawn(run_stream(url, keepalive, signal_tx, shutdown_rx));

    (
        ChannelHandle {
            shutdown: Some(shutdown_tx),
        },
        signal_rx,
    )
}

async fn run_stream(
    url: String,
    keepalive: Duration,
    signals: mpsc::Sender<ChannelSignal>,
    mut shutdown: oneshot::Receiver<()>,
) {
    let ws_stream = tokio::select! {
        result = connect_async(&url) => match result {
            Ok((stream, _)) => stream,
            Err(e) => {
                tracing::error!("Failed to connect to event stream: {}", e);
                let _ = signals.send(ChannelSignal::Failed(e.to_string())).await;
                return;
            }
        },
        _ = &mut shutdown => return,
    };

    tracing::info!("Event stream connected at {}", url);
    if signals.send(ChannelSignal::Opened).await.is_err() {
        return;
    }

    let (mut write, mut read) = ws_stream.split();

    // First keepalive fires one full interval after open, not immediately
    let start = tokio::time::Instant::now() + keepalive;
    let mut ticker = tokio::time::interval_at(start, keepalive);

    let mut outcome = ChannelSignal::Closed;
    loop {
        tokio::select! {
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<ServerMessage>(&text) {
                        Ok(message) => {
                            let signal = ChannelSignal::Message(Box::new(message));
                            if signals.send(signal).await.is_err() {
                                return;
                            }
                        }
                        Err(e) => {
                            tracing::warn!("Dropping malformed stream frame: {}", e);
                        }
                    }
                }
                Some(Ok(Message::Close(_))) => {
                    tracing::info!("Server closed event stream");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::error!("Event stream error: {}", e);
                    outcome = ChannelSignal::Failed(e.to_string());
                    break;
                }
                None => break,
            },
            _ = ticker.tick() => {
                let json = match serde_json::to_string(&ClientMessage::Keepalive) {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::error!("Failed to serialize keepalive: {}", e);
                        continue;
                    }
                };
                if let Err(e) = write.send(Message::Text(json)).await {
                    // The read side reports the authoritative closure
                    tracing::warn!("Keepalive send failed: {}", e);
                    break;
                }
            },
            _ = &mut shutdown => {
                let _ = write.send(Message::Close(None)).await;
                break;
            }
        }
    }

    let _ = signals.send(outcome).await;
}
