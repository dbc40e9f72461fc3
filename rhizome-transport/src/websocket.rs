//! WebSocket server that broadcasts frames to browser front ends and
//! forwards their clicks back as [`InteractionEvent`]s.

use crate::interaction::InteractionEvent;
use crate::{Sender, TransportError};
use crossbeam_channel::Sender as EventSender;
use futures::sink::SinkExt;
use futures::stream::StreamExt;
use log::{debug, info, warn};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::runtime::Runtime;
use tokio::sync::broadcast;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};

/// Frames buffered per client before a slow client starts skipping.
const BROADCAST_CAPACITY: usize = 16;

pub struct WebSocketSender {
    addr: SocketAddr,
    tx: broadcast::Sender<String>,
    clients: Arc<AtomicUsize>,
    _runtime: Runtime,
}

impl WebSocketSender {
    /// Bind `host:port` and start accepting clients on a background runtime.
    /// Port 0 picks a free port; see [`local_addr`](Self::local_addr).
    pub fn start(
        host: &str,
        port: u16,
        events: EventSender<InteractionEvent>,
    ) -> Result<Self, TransportError> {
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .map_err(|e| TransportError::WebSocket(format!("Invalid address: {}", e)))?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let listener = runtime.block_on(TcpListener::bind(addr))?;
        let addr = listener.local_addr()?;

        let (tx, _) = broadcast::channel::<String>(BROADCAST_CAPACITY);
        let clients = Arc::new(AtomicUsize::new(0));
        runtime.spawn(accept_loop(listener, tx.clone(), clients.clone(), events));

        info!("WebSocket server listening on ws://{}", addr);
        Ok(Self {
            addr,
            tx,
            clients,
            _runtime: runtime,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the number of connected clients
    pub fn client_count(&self) -> usize {
        self.clients.load(Ordering::SeqCst)
    }
}

impl Sender for WebSocketSender {
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        if self.client_count() == 0 {
            return Ok(());
        }
        let text = std::str::from_utf8(data)
            .map_err(|e| TransportError::WebSocket(format!("Invalid UTF-8: {}", e)))?;
        // An error here only means every client left since the count was read.
        let _ = self.tx.send(text.to_string());
        Ok(())
    }
}

async fn accept_loop(
    listener: TcpListener,
    tx: broadcast::Sender<String>,
    clients: Arc<AtomicUsize>,
    events: EventSender<InteractionEvent>,
) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                tokio::spawn(handle_connection(
                    stream,
                    peer,
                    tx.subscribe(),
                    clients.clone(),
                    events.clone(),
                ));
            }
            Err(e) => warn!("WebSocket accept failed: {}", e),
        }
    }
}

async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    mut rx: broadcast::Receiver<String>,
    clients: Arc<AtomicUsize>,
    events: EventSender<InteractionEvent>,
) {
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!("WebSocket handshake with {} failed: {}", peer, e);
            return;
        }
    };

    let total = clients.fetch_add(1, Ordering::SeqCst) + 1;
    info!("Client connected: {}. Total clients: {}", peer, total);

    let (mut outgoing, mut incoming) = ws_stream.split();
    loop {
        tokio::select! {
            frame = rx.recv() => {
                match frame {
                    Ok(text) => {
                        if let Err(e) = outgoing.send(Message::Text(text)).await {
                            if !is_disconnect_error(&e) {
                                warn!("WebSocket send error: {} - {}", peer, e);
                            }
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!("Client {} lagging, skipped {} frames", peer, skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            message = incoming.next() => {
                match message {
                    Some(Ok(Message::Text(text))) => forward_interaction(&text, &events, peer),
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        if !is_disconnect_error(&e) {
                            warn!("WebSocket receive error: {} - {}", peer, e);
                        }
                        break;
                    }
                }
            }
        }
    }

    let remaining = clients.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
    info!("Client disconnected: {}. Total clients: {}", peer, remaining);
}

fn forward_interaction(text: &str, events: &EventSender<InteractionEvent>, peer: SocketAddr) {
    match InteractionEvent::from_json(text) {
        Some(event) => {
            if events.send(event).is_err() {
                debug!("Interaction receiver gone, dropping event from {}", peer);
            }
        }
        None => debug!("Ignoring message from {}: {}", peer, text),
    }
}

// Helper function to check if an error is due to disconnection
fn is_disconnect_error(e: &WsError) -> bool {
    match e {
        WsError::ConnectionClosed | WsError::AlreadyClosed => true,
        WsError::Io(io_err) => matches!(
            io_err.kind(),
            std::io::ErrorKind::BrokenPipe
                | std::io::ErrorKind::ConnectionReset
                | std::io::ErrorKind::ConnectionAborted
        ),
        _ => false,
    }
}
