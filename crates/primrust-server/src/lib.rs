//! PrimRust HTTP Server Library
//!
//! A small webservice answering two questions about an arbitrary-precision
//! integer ("is it prime?" and "what are its prime factors?"), served by a
//! fixed pool of reusable connection workers multiplexed across a
//! configurable number of runtime threads.
//!
//! # Endpoints
//!
//! - `POST /prime` with `{"number": "<decimal>"}` (or `GET /prime?number=`):
//!   primality verdict; add the `fast` query flag for the probabilistic
//!   mode on huge inputs.
//! - `POST /factor` / `GET /factor?number=`: ascending prime factors.
//! - `GET /countdown`: serialized counter.
//! - `GET /square/{x}`, `GET /mult/{a}/{b}`: small arithmetic endpoints.
//! - `GET /status`: whether the server loop is running.
//!
//! The main entry point is [`create_app`], which builds the configured route
//! table, and [`Server::serve`], which runs the worker pool on a listener.

pub mod handlers;
pub mod http;
pub mod router;
pub mod server;
pub mod target;
pub mod worker;

pub use router::{Handler, Router};
pub use server::{shutdown_signal, LogCallback, Server, ServerHandle, DEFAULT_PORT};

use handlers::{
    CountdownHandler, FactorHandler, MultHandler, PrimeHandler, SquareHandler, StatusHandler,
};

/// Builds the service's route table.
///
/// `/countdown` carries the serialize flag: its handler mutates shared state
/// and must never run concurrently with itself. Every other route may run on
/// any number of runtime threads simultaneously.
pub fn create_app(handle: ServerHandle) -> Router {
    Router::new()
        .post("/prime", PrimeHandler, false)
        .get("/prime", PrimeHandler, false)
        .post("/factor", FactorHandler, false)
        .get("/factor", FactorHandler, false)
        .get("/countdown", CountdownHandler::new(10), true)
        .get("/square/{x}", SquareHandler, false)
        .get("/mult/{a}/{b}", MultHandler, false)
        .get("/status", StatusHandler::new(handle), false)
}
