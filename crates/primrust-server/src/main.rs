//! PrimRust HTTP Server - Binary Entry Point
//!
//! Parses the command line, builds a multi-threaded runtime with the
//! requested thread count, and runs the worker pool until SIGINT/SIGTERM.

use std::net::IpAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use primrust_server::{create_app, shutdown_signal, LogCallback, Server, ServerHandle};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command-line arguments for the server.
#[derive(Parser)]
#[command(name = "primrust-server", version, about = "PrimRust HTTP API Server")]
struct Args {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on.
    #[arg(short, long, default_value_t = primrust_server::DEFAULT_PORT)]
    port: u16,

    /// Connection worker pool size (default: number of CPU cores).
    #[arg(short, long)]
    workers: Option<usize>,

    /// Runtime thread count (default: number of CPU cores).
    #[arg(short, long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cores = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    let workers = args.workers.unwrap_or(cores).max(1);
    let threads = args.threads.unwrap_or(cores).max(1);

    println!("primrust micro webservice v{}", VERSION);
    println!();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(threads)
        .enable_all()
        .build()
        .context("cannot build runtime")?;

    runtime.block_on(async move {
        let listener = TcpListener::bind((args.host, args.port))
            .await
            .with_context(|| format!("cannot bind {}:{}", args.host, args.port))?;

        println!(
            "{} in {} listening on {}:{} ...",
            if workers > 1 {
                format!("{} workers", workers)
            } else {
                "1 worker".to_string()
            },
            if threads > 1 {
                format!("{} threads", threads)
            } else {
                "1 thread".to_string()
            },
            args.host,
            args.port
        );

        let handle = ServerHandle::new();
        let router = create_app(handle.clone());
        let log: LogCallback = Arc::new(|line: &str| info!("{line}"));

        Server::new(router, workers, handle, log)
            .serve(listener, shutdown_signal())
            .await
    })
}
