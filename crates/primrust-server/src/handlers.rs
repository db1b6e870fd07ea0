//! Request handlers for the arithmetic endpoints.
//!
//! Handlers validate their input strictly and translate every validation
//! failure into a 400 response themselves; nothing is thrown past the router
//! boundary. The error body convention is uniformly `{"error": "<message>"}`.

use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Instant;

use serde::Serialize;

use primrust_core::{classify, factors, Natural};

use crate::http::{Method, Request, Response, Status};
use crate::router::Handler;
use crate::server::ServerHandle;
use crate::target::Target;

const MISSING_NUMBER: &str = "field \"number\" is missing";
const INVALID_NUMBER: &str = "field \"number\" must contain a positive integer number";

/// Extracts the `number` operand: from the query string on GET, from the
/// JSON body otherwise.
fn number_from(req: &Request, target: &Target) -> Result<Natural, Response> {
    let raw = match req.method {
        Method::Get => match target.get("number") {
            Some(value) => value.to_string(),
            None => return Err(Response::error(Status::BadRequest, MISSING_NUMBER)),
        },
        _ => {
            let body: serde_json::Value = serde_json::from_str(&req.body)
                .map_err(|e| Response::error(Status::BadRequest, &e.to_string()))?;
            match body.get("number") {
                None => return Err(Response::error(Status::BadRequest, MISSING_NUMBER)),
                Some(serde_json::Value::String(s)) => s.clone(),
                // A bare JSON number is accepted; its exact decimal text is
                // preserved by the arbitrary-precision representation.
                Some(serde_json::Value::Number(n)) => n.to_string(),
                Some(_) => return Err(Response::error(Status::BadRequest, INVALID_NUMBER)),
            }
        }
    };
    Natural::from_str(&raw).map_err(|_| Response::error(Status::BadRequest, INVALID_NUMBER))
}

/// Renders big naturals as bare JSON numbers; exact at any magnitude thanks
/// to serde_json's arbitrary-precision representation.
fn bare_numbers(values: &[Natural]) -> Result<Vec<serde_json::Number>, Response> {
    values
        .iter()
        .map(|value| {
            serde_json::Number::from_str(&value.to_string())
                .map_err(|e| Response::error(Status::InternalServerError, &e.to_string()))
        })
        .collect()
}

fn json_response<T: Serialize>(report: &T) -> Response {
    match serde_json::to_string(report) {
        Ok(body) => Response::json(Status::Ok, body),
        Err(e) => Response::error(Status::InternalServerError, &e.to_string()),
    }
}

#[derive(Serialize)]
struct PrimeReport {
    number: String,
    isprime: bool,
    elapsed_msecs: f64,
    algo: &'static str,
}

/// `GET|POST /prime`: primality classification.
///
/// The `fast` query flag selects the probabilistic witness sample for inputs
/// beyond the deterministic tables; without it classification is exhaustive
/// (and potentially slow) in that range.
pub struct PrimeHandler;

impl Handler for PrimeHandler {
    fn handle(&self, req: &Request, target: &Target, _captures: &[String]) -> Response {
        let x = match number_from(req, target) {
            Ok(x) => x,
            Err(response) => return response,
        };
        let fast = target.has("fast");
        let t0 = Instant::now();
        let verdict = classify(&x, fast);
        let elapsed = t0.elapsed();
        json_response(&PrimeReport {
            number: x.to_string(),
            isprime: verdict.is_prime(),
            elapsed_msecs: 1e3 * elapsed.as_secs_f64(),
            algo: if fast {
                "near-deterministic"
            } else {
                "deterministic"
            },
        })
    }
}

#[derive(Serialize)]
struct FactorReport {
    number: String,
    factors: Vec<serde_json::Number>,
    isprime: bool,
    elapsed_msecs: f64,
}

/// `GET|POST /factor`: trial-division factorization.
///
/// `factors` is empty when the input is prime (or probably prime); `isprime`
/// is derived from that emptiness.
pub struct FactorHandler;

impl Handler for FactorHandler {
    fn handle(&self, req: &Request, target: &Target, _captures: &[String]) -> Response {
        let x = match number_from(req, target) {
            Ok(x) => x,
            Err(response) => return response,
        };
        let t0 = Instant::now();
        let factor_list = factors(&x);
        let elapsed = t0.elapsed();
        let factors = match bare_numbers(&factor_list) {
            Ok(factors) => factors,
            Err(response) => return response,
        };
        json_response(&FactorReport {
            number: x.to_string(),
            isprime: factors.is_empty(),
            factors,
            elapsed_msecs: 1e3 * elapsed.as_secs_f64(),
        })
    }
}

/// `GET /countdown`: returns and decrements an internal counter.
///
/// The counter is a plain load/store pair, not an atomic decrement: the
/// route must be registered with the serialize flag, which makes the pair
/// exclusive per call.
pub struct CountdownHandler {
    counter: AtomicI64,
}

impl CountdownHandler {
    pub fn new(start: i64) -> CountdownHandler {
        CountdownHandler {
            counter: AtomicI64::new(start),
        }
    }
}

impl Handler for CountdownHandler {
    fn handle(&self, _req: &Request, _target: &Target, _captures: &[String]) -> Response {
        let value = self.counter.load(Ordering::SeqCst);
        self.counter.store(value - 1, Ordering::SeqCst);
        Response::text(Status::Ok, value.to_string())
    }
}

/// `GET /square/{x}`: squares a signed 64-bit integer.
pub struct SquareHandler;

impl Handler for SquareHandler {
    fn handle(&self, _req: &Request, _target: &Target, captures: &[String]) -> Response {
        let x = match captures.first().and_then(|c| c.parse::<i64>().ok()) {
            Some(x) => x,
            None => return Response::error(Status::BadRequest, "not an integer"),
        };
        let square = x as i128 * x as i128;
        Response::text(Status::Ok, square.to_string())
    }
}

/// `GET /mult/{a}/{b}`: multiplies two signed 64-bit integers.
pub struct MultHandler;

impl Handler for MultHandler {
    fn handle(&self, _req: &Request, _target: &Target, captures: &[String]) -> Response {
        let operands: Option<(i64, i64)> = match captures {
            [a, b] => a.parse().ok().zip(b.parse().ok()),
            _ => None,
        };
        let (a, b) = match operands {
            Some(pair) => pair,
            None => return Response::error(Status::BadRequest, "not an integer"),
        };
        let product = a as i128 * b as i128;
        Response::text(Status::Ok, product.to_string())
    }
}

/// `GET /status`: reports whether the server loop is running.
///
/// Holds a [`ServerHandle`] whose lifetime equals the server's.
pub struct StatusHandler {
    handle: ServerHandle,
}

impl StatusHandler {
    pub fn new(handle: ServerHandle) -> StatusHandler {
        StatusHandler { handle }
    }
}

impl Handler for StatusHandler {
    fn handle(&self, _req: &Request, _target: &Target, _captures: &[String]) -> Response {
        let state = if self.handle.is_stopped() {
            "stopped"
        } else {
            "running"
        };
        Response::text(Status::Ok, state.to_string())
    }
}
