//! WebSocket client transport.
//!
//! Lifecycle: `Idle -> Connecting -> Open -> Closing -> Closed`, with
//! `Open -> Closed` reachable directly on a transport fault. The state lives
//! in an atomic cell; whichever party wins the `Open -> Closed`
//! compare-and-swap (a lifecycle call or the receive loop) emits the single
//! `Disconnected` event for that connection.
//!
//! Event channel policy: bounded, and the receive loop awaits `send`, so a
//! consumer more than `event_buffer` events behind backpressures the socket
//! read instead of dropping messages. The protocol has no redelivery, so
//! dropping is the worse failure mode.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch, Mutex};
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use deskmate_core::error::{LinkError, Result};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Connection lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LinkState {
    Idle = 0,
    Connecting = 1,
    Open = 2,
    Closing = 3,
    Closed = 4,
}

impl LinkState {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => LinkState::Idle,
            1 => LinkState::Connecting,
            2 => LinkState::Open,
            3 => LinkState::Closing,
            _ => LinkState::Closed,
        }
    }
}

/// Atomic state cell. `transition` is the only way to claim an edge.
#[derive(Debug)]
struct StateCell(AtomicU8);

impl StateCell {
    fn new(s: LinkState) -> Self {
        Self(AtomicU8::new(s as u8))
    }

    fn load(&self) -> LinkState {
        LinkState::from_u8(self.0.load(Ordering::Acquire))
    }

    fn store(&self, s: LinkState) {
        self.0.store(s as u8, Ordering::Release);
    }

    /// Returns true when this caller performed the transition.
    fn transition(&self, from: LinkState, to: LinkState) -> bool {
        self.0
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Lifecycle and message notifications emitted by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Connected,
    Disconnected,
    /// One fully reassembled inbound text message.
    MessageReceived(String),
    /// Fault on a connection that was nominally open. Always followed by
    /// `Disconnected`.
    ConnectionError(String),
}

/// Live connection half: write sink plus the cancellation scope governing
/// the receive loop. Replaced wholesale on every connect attempt so a stale
/// handle is never reused.
struct Conn {
    writer: SplitSink<WsStream, Message>,
    cancel: watch::Sender<bool>,
    /// Monotonic connection number. Lets a finishing receive loop tell its
    /// own handle apart from one belonging to a newer connection.
    generation: u64,
}

/// WebSocket transport for one logical connection.
///
/// Callers must serialize `connect`/`disconnect`; `send` may be called from
/// any number of tasks.
pub struct WsTransport {
    url: String,
    state: Arc<StateCell>,
    conn: Arc<Mutex<Option<Conn>>>,
    events: mpsc::Sender<TransportEvent>,
    generation: AtomicU64,
}

impl WsTransport {
    /// Build a transport for `url`. Events arrive on the returned receiver.
    pub fn new(url: impl Into<String>, event_buffer: usize) -> (Self, mpsc::Receiver<TransportEvent>) {
        let (events, events_rx) = mpsc::channel(event_buffer);
        (
            Self {
                url: url.into(),
                state: Arc::new(StateCell::new(LinkState::Idle)),
                conn: Arc::new(Mutex::new(None)),
                events,
                generation: AtomicU64::new(0),
            },
            events_rx,
        )
    }

    pub fn state(&self) -> LinkState {
        self.state.load()
    }

    pub fn is_connected(&self) -> bool {
        self.state.load() == LinkState::Open
    }

    /// One connection attempt. No-op when already open or connecting; no
    /// automatic retry on failure (retry policy belongs to the caller).
    pub async fn connect(&self) -> Result<()> {
        if matches!(self.state.load(), LinkState::Open | LinkState::Connecting) {
            return Ok(());
        }
        self.state.store(LinkState::Connecting);

        // A handle left over from a previous connection is terminal. Discard
        // it before the fresh attempt.
        self.conn.lock().await.take();

        let stream = match connect_async(self.url.as_str()).await {
            Ok((stream, _response)) => stream,
            Err(e) => {
                self.state.store(LinkState::Closed);
                return Err(LinkError::Connect(e.to_string()));
            }
        };

        let (writer, reader) = stream.split();
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        *self.conn.lock().await = Some(Conn {
            writer,
            cancel: cancel_tx,
            generation,
        });
        self.state.store(LinkState::Open);
        let _ = self.events.send(TransportEvent::Connected).await;
        tracing::info!(url = %self.url, "link open");

        tokio::spawn(receive_loop(
            reader,
            Arc::clone(&self.conn),
            Arc::clone(&self.state),
            self.events.clone(),
            cancel_rx,
            generation,
        ));
        Ok(())
    }

    /// Best-effort shutdown. No-op unless open; close-handshake failures are
    /// swallowed but the transition and `Disconnected` event still happen.
    pub async fn disconnect(&self) -> Result<()> {
        if !self.state.transition(LinkState::Open, LinkState::Closing) {
            return Ok(());
        }
        if let Some(mut conn) = self.conn.lock().await.take() {
            let _ = conn.cancel.send(true);
            let frame = CloseFrame {
                code: CloseCode::Normal,
                reason: "client disconnect".into(),
            };
            if let Err(e) = conn.writer.send(Message::Close(Some(frame))).await {
                tracing::debug!(error = %e, "close frame not delivered");
            }
        }
        self.state.store(LinkState::Closed);
        let _ = self.events.send(TransportEvent::Disconnected).await;
        tracing::info!("link closed");
        Ok(())
    }

    /// Send one logical text message. Fails fast when the link is not open;
    /// never silently dropped.
    pub async fn send(&self, text: String) -> Result<()> {
        if self.state.load() != LinkState::Open {
            return Err(LinkError::NotConnected);
        }
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or(LinkError::NotConnected)?;
        conn.writer
            .send(Message::Text(text))
            .await
            .map_err(|e| LinkError::Transport(e.to_string()))
    }
}

/// Runs once per successful connect. Frame reassembly is handled by
/// tungstenite: fragmented text arrives here as one `Message::Text`.
async fn receive_loop(
    mut reader: SplitStream<WsStream>,
    conn: Arc<Mutex<Option<Conn>>>,
    state: Arc<StateCell>,
    events: mpsc::Sender<TransportEvent>,
    mut cancel: watch::Receiver<bool>,
    generation: u64,
) {
    loop {
        let next = tokio::select! {
            _ = cancel.changed() => break,
            next = reader.next() => next,
        };
        match next {
            Some(Ok(Message::Text(text))) => {
                if events
                    .send(TransportEvent::MessageReceived(text))
                    .await
                    .is_err()
                {
                    break;
                }
            }
            Some(Ok(Message::Close(_))) => {
                // Echo the close acknowledgment, then settle.
                if let Some(c) = conn.lock().await.as_mut() {
                    if c.generation == generation {
                        let _ = c.writer.send(Message::Close(None)).await;
                    }
                }
                if is_current(&conn, generation).await
                    && state.transition(LinkState::Open, LinkState::Closed)
                {
                    tracing::info!("peer closed the link");
                    let _ = events.send(TransportEvent::Disconnected).await;
                }
                break;
            }
            // Ping/pong are answered inside tungstenite; binary frames are
            // not part of this protocol.
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                if is_current(&conn, generation).await
                    && state.transition(LinkState::Open, LinkState::Closed)
                {
                    tracing::warn!(error = %e, "link fault");
                    let _ = events
                        .send(TransportEvent::ConnectionError(format!("receive error: {e}")))
                        .await;
                    let _ = events.send(TransportEvent::Disconnected).await;
                }
                break;
            }
            None => {
                if is_current(&conn, generation).await
                    && state.transition(LinkState::Open, LinkState::Closed)
                {
                    let _ = events.send(TransportEvent::Disconnected).await;
                }
                break;
            }
        }
    }
    // Release our own socket handle; a newer connection keeps its handle.
    let mut guard = conn.lock().await;
    if guard.as_ref().map(|c| c.generation) == Some(generation) {
        guard.take();
    }
}

/// Whether the stored handle (if any) still belongs to this loop's
/// connection. A lagging loop must not touch the state of a newer one.
async fn is_current(conn: &Mutex<Option<Conn>>, generation: u64) -> bool {
    conn.lock()
        .await
        .as_ref()
        .map_or(true, |c| c.generation == generation)
}
