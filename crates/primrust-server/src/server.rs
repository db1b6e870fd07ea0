//! Server loop: owns the shared listener and the worker pool.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::router::Router;
use crate::worker::ConnectionWorker;

/// Default port, matching the service's historical deployment.
pub const DEFAULT_PORT: u16 = 31337;

/// Per-request log sink, invoked by workers with a formatted
/// `peer method target` line.
pub type LogCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Cloneable view of the server's lifecycle, handed to handlers that report
/// loop state. Lives exactly as long as the server.
#[derive(Clone, Default)]
pub struct ServerHandle {
    stopped: Arc<AtomicBool>,
}

impl ServerHandle {
    pub fn new() -> ServerHandle {
        ServerHandle::default()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    pub fn mark_stopped(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

/// The connection-serving engine: N reusable workers sharing one listener.
pub struct Server {
    router: Arc<Router>,
    workers: usize,
    handle: ServerHandle,
    log: LogCallback,
}

impl Server {
    pub fn new(router: Router, workers: usize, handle: ServerHandle, log: LogCallback) -> Server {
        Server {
            router: Arc::new(router),
            workers: workers.max(1),
            handle,
            log,
        }
    }

    /// Runs the pool on `listener` until `shutdown` resolves.
    ///
    /// Spawns exactly N worker tasks sharing the listener; any runtime
    /// thread may execute any worker's pending step, but a single worker is
    /// never polled concurrently with itself.
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send,
    ) -> anyhow::Result<()> {
        let listener = Arc::new(listener);
        let mut tasks = Vec::with_capacity(self.workers);
        for id in 0..self.workers {
            let worker = ConnectionWorker::new(
                id,
                Arc::clone(&listener),
                Arc::clone(&self.router),
                Arc::clone(&self.log),
            );
            tasks.push(tokio::spawn(worker.run()));
        }

        shutdown.await;

        info!("shutting down");
        self.handle.mark_stopped();
        for task in &tasks {
            task.abort();
        }
        Ok(())
    }
}

/// Resolves on SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = terminate.recv() => {}
                }
            }
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
