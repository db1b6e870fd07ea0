//! Long-lived connection workers.
//!
//! Each worker is one pool slot: a state machine that serves an unbounded
//! sequence of connections, one at a time, looping accept → read → dispatch
//! → write → accept. Exactly N workers exist for the lifetime of the
//! process; a slot is reused for every successive connection and never torn
//! down per request. The (N+1)-th concurrent client waits in the listen
//! backlog until a slot frees up; the pool's fixed size is the admission
//! control.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::http::{self, Request};
use crate::router::Router;
use crate::server::LogCallback;

/// Idle deadline armed on accept; expiry forces the connection closed.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(60);

pub struct ConnectionWorker {
    id: usize,
    listener: Arc<TcpListener>,
    router: Arc<Router>,
    log: LogCallback,
    buf: Vec<u8>,
}

impl ConnectionWorker {
    pub fn new(
        id: usize,
        listener: Arc<TcpListener>,
        router: Arc<Router>,
        log: LogCallback,
    ) -> ConnectionWorker {
        ConnectionWorker {
            id,
            listener,
            router,
            log,
            buf: Vec::with_capacity(4 * 1024),
        }
    }

    /// Drives the slot forever. Transient accept failures retry
    /// immediately; per-connection failures drop that connection and
    /// re-enter accept.
    pub async fn run(mut self) {
        loop {
            let (stream, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    trace!(worker = self.id, error = %e, "accept failed");
                    continue;
                }
            };
            self.serve_connection(stream, peer).await;
        }
    }

    /// Serves a single connection: one request, one response, close.
    async fn serve_connection(&mut self, mut stream: TcpStream, peer: SocketAddr) {
        self.buf.clear();
        let deadline = Instant::now() + IDLE_TIMEOUT;

        let request = tokio::select! {
            read = http::read_request(&mut stream, &mut self.buf) => match read {
                Ok(Some(request)) => request,
                Ok(None) => return,
                Err(e) => {
                    trace!(worker = self.id, error = %e, "read failed");
                    return;
                }
            },
            _ = tokio::time::sleep_until(deadline) => {
                debug!(worker = self.id, %peer, "idle deadline expired");
                return;
            }
        };

        self.log_request(&peer, &request);

        // Dispatch blocks this runtime thread for the duration of the
        // handler call; in-flight computations are bounded by the thread
        // count, not the pool size.
        let response = self.router.execute(&request);

        let bytes = response.to_bytes();
        if let Err(e) = stream.write_all(&bytes).await {
            trace!(worker = self.id, error = %e, "write failed");
            return;
        }
        let _ = stream.flush().await;
        // Half-close the send side; the peer sees EOF after the body.
        let _ = stream.shutdown().await;
    }

    fn log_request(&self, peer: &SocketAddr, request: &Request) {
        (self.log)(&format!(
            "{} {} {}",
            peer.ip(),
            request.method.as_str(),
            request.target
        ));
    }
}
