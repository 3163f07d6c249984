//! X11 event readiness
//!
//! The event loop sleeps in `wait_readable` between batches. A dedicated
//! thread blocks in mio on the X11 socket and signals a tokio `Notify` when
//! bytes arrive; the loop then drains every queued event with
//! `poll_next_event` on its own thread, so only the loop reads the
//! connection.
//!
//! Replies read by the loop (for example the round trip after creating a
//! window) can pull events into x11rb's buffer without the socket staying
//! readable. `wait_readable` checks that buffer before sleeping and keeps the
//! event it finds for the next drain.

use std::os::unix::io::AsRawFd;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::{oneshot, Notify};
use tracing::{debug, trace, warn};
use x11rb::connection::Connection;
use x11rb::protocol::Event;
use x11rb::rust_connection::RustConnection;

/// Upper bound on how long the socket thread blocks before it rechecks
/// whether the stream is still alive
const SOCKET_POLL_INTERVAL: Duration = Duration::from_millis(100);

const X11_SOCKET: mio::Token = mio::Token(0);

pub struct X11EventStream {
    conn: Arc<RustConnection>,
    readable: Arc<Notify>,
    /// Event taken from x11rb's buffer by `wait_readable`
    held: Option<Event>,
    /// Closed on drop, which ends the socket thread
    _alive: oneshot::Receiver<()>,
}

impl X11EventStream {
    pub fn new(conn: Arc<RustConnection>) -> Result<Self> {
        let readable = Arc::new(Notify::new());
        let (alive_tx, alive_rx) = oneshot::channel::<()>();

        let fd = conn.stream().as_raw_fd();
        let mut poll = mio::Poll::new().context("Failed to create mio Poll")?;
        poll.registry()
            .register(&mut mio::unix::SourceFd(&fd), X11_SOCKET, mio::Interest::READABLE)
            .context("Failed to register X11 socket with mio")?;

        let signal = readable.clone();
        std::thread::Builder::new()
            .name("objwin-x11-poll".into())
            .spawn(move || watch_socket(poll, alive_tx, signal))
            .context("Failed to spawn X11 socket thread")?;

        Ok(Self {
            conn,
            readable,
            held: None,
            _alive: alive_rx,
        })
    }

    /// Next event without blocking; `None` once the buffer and socket are empty
    pub fn poll_next_event(&mut self) -> Result<Option<Event>> {
        if let Some(event) = self.held.take() {
            return Ok(Some(event));
        }
        Ok(self.conn.poll_for_event()?)
    }

    /// Sleep until there is at least one event to drain
    pub async fn wait_readable(&mut self) {
        if self.held.is_some() {
            return;
        }
        match self.conn.poll_for_event() {
            Ok(Some(event)) => {
                trace!("X11 event already buffered, not sleeping");
                self.held = Some(event);
                return;
            }
            Ok(None) => {}
            Err(e) => {
                // Let the next drain report the broken connection
                warn!("X11 connection check failed: {}", e);
                return;
            }
        }
        self.readable.notified().await;
    }

    /// Send queued requests (window changes, swaps) to the server
    pub fn flush(&self) -> Result<()> {
        self.conn.flush()?;
        Ok(())
    }
}

fn watch_socket(mut poll: mio::Poll, alive: oneshot::Sender<()>, readable: Arc<Notify>) {
    let mut events = mio::Events::with_capacity(1);
    while !alive.is_closed() {
        if let Err(e) = poll.poll(&mut events, Some(SOCKET_POLL_INTERVAL)) {
            warn!("X11 socket poll failed: {:?}", e);
            continue;
        }
        if events.iter().any(|event| event.token() == X11_SOCKET) {
            readable.notify_one();
        }
    }
    debug!("X11 socket thread stopped");
}
