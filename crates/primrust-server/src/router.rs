//! Ordered route table with optional per-route serialization.
//!
//! Routes are registered once at startup and never mutated afterwards, so
//! lookups need no synchronization. The only mutable piece is the optional
//! exclusivity lock a route owns for its lifetime: a route registered with
//! `serialize = true` runs its handler under that lock, guaranteeing at most
//! one in-flight execution of that specific handler across all runtime
//! threads. Handlers on non-serialized routes must be safe to run
//! concurrently with themselves.

use std::sync::Mutex;

use crate::http::{Method, Request, Response, Status};
use crate::target::Target;

/// A request handler.
///
/// Implementations are structs owning whatever state they need; captured
/// configuration is owned or reference-counted, never borrowed from a
/// transient scope.
pub trait Handler: Send + Sync {
    fn handle(&self, req: &Request, target: &Target, captures: &[String]) -> Response;
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Capture,
}

/// Path matcher: literal segments plus `{name}` captures.
///
/// Matches the entire path, never a prefix. Capture values are returned in
/// declaration order.
#[derive(Debug, Clone)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn new(pattern: &str) -> PathPattern {
        let segments = pattern
            .split('/')
            .skip(1)
            .map(|segment| {
                if segment.starts_with('{') && segment.ends_with('}') {
                    Segment::Capture
                } else {
                    Segment::Literal(segment.to_string())
                }
            })
            .collect();
        PathPattern { segments }
    }

    pub fn matches(&self, path: &str) -> Option<Vec<String>> {
        let mut parts = path.split('/');
        // Origin-form paths start with '/', so the first split part is empty.
        if parts.next() != Some("") {
            return None;
        }
        let parts: Vec<&str> = parts.collect();
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut captures = Vec::new();
        for (segment, part) in self.segments.iter().zip(&parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Capture => captures.push((*part).to_string()),
            }
        }
        Some(captures)
    }
}

struct Route {
    method: Method,
    pattern: PathPattern,
    handler: Box<dyn Handler>,
    serialize: bool,
    lock: Mutex<()>,
}

/// Ordered route table; first full match wins.
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Router {
        Router::default()
    }

    pub fn get(self, pattern: &str, handler: impl Handler + 'static, serialize: bool) -> Router {
        self.route(Method::Get, pattern, handler, serialize)
    }

    pub fn post(self, pattern: &str, handler: impl Handler + 'static, serialize: bool) -> Router {
        self.route(Method::Post, pattern, handler, serialize)
    }

    pub fn head(self, pattern: &str, handler: impl Handler + 'static, serialize: bool) -> Router {
        self.route(Method::Head, pattern, handler, serialize)
    }

    fn route(
        mut self,
        method: Method,
        pattern: &str,
        handler: impl Handler + 'static,
        serialize: bool,
    ) -> Router {
        self.routes.push(Route {
            method,
            pattern: PathPattern::new(pattern),
            handler: Box::new(handler),
            serialize,
            lock: Mutex::new(()),
        });
        self
    }

    /// Dispatches a request to the first matching route.
    ///
    /// A syntactically malformed target answers 400 before any route is
    /// tried; an unmatched path answers 404 naming the path.
    pub fn execute(&self, req: &Request) -> Response {
        let target = match Target::parse(&req.target) {
            Some(target) => target,
            None => return Response::error(Status::BadRequest, "invalid target"),
        };
        for route in &self.routes {
            if route.method != req.method {
                continue;
            }
            if let Some(captures) = route.pattern.matches(&target.path) {
                return if route.serialize {
                    // A poisoned lock only means an earlier handler call
                    // panicked; the route stays usable.
                    let _guard = route.lock.lock().unwrap_or_else(|e| e.into_inner());
                    route.handler.handle(req, &target, &captures)
                } else {
                    route.handler.handle(req, &target, &captures)
                };
            }
        }
        Response::error(
            Status::NotFound,
            &format!("{} not found", target.path),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    fn request(method: Method, target: &str) -> Request {
        Request {
            method,
            target: target.to_string(),
            body: String::new(),
        }
    }

    struct Echo(&'static str);

    impl Handler for Echo {
        fn handle(&self, _req: &Request, _target: &Target, captures: &[String]) -> Response {
            Response::text(Status::Ok, format!("{}:{}", self.0, captures.join(",")))
        }
    }

    // ========================================================================
    // Matching
    // ========================================================================

    #[test]
    fn pattern_matches_whole_path_only() {
        let pattern = PathPattern::new("/prime");
        assert_eq!(pattern.matches("/prime"), Some(vec![]));
        assert_eq!(pattern.matches("/prime/extra"), None);
        assert_eq!(pattern.matches("/prim"), None);
        assert_eq!(pattern.matches("/prime/"), None);
    }

    #[test]
    fn pattern_captures_segments() {
        let pattern = PathPattern::new("/mult/{a}/{b}");
        assert_eq!(
            pattern.matches("/mult/6/7"),
            Some(vec!["6".to_string(), "7".to_string()])
        );
        assert_eq!(pattern.matches("/mult/6"), None);
    }

    #[test]
    fn first_registered_route_wins() {
        let router = Router::new()
            .get("/x", Echo("first"), false)
            .get("/x", Echo("second"), false);
        let response = router.execute(&request(Method::Get, "/x"));
        assert_eq!(response.body, "first:");
    }

    #[test]
    fn method_must_match() {
        let router = Router::new().post("/prime", Echo("post"), false);
        let response = router.execute(&request(Method::Get, "/prime"));
        assert_eq!(response.status, Status::NotFound);
    }

    #[test]
    fn unmatched_path_names_itself() {
        let router = Router::new().get("/x", Echo("x"), false);
        let response = router.execute(&request(Method::Get, "/nonexistent"));
        assert_eq!(response.status, Status::NotFound);
        assert!(response.body.contains("/nonexistent not found"));
    }

    #[test]
    fn malformed_target_is_bad_request() {
        let router = Router::new().get("/x", Echo("x"), false);
        let response = router.execute(&request(Method::Get, "no-slash"));
        assert_eq!(response.status, Status::BadRequest);
    }

    #[test]
    fn query_does_not_affect_matching() {
        let router = Router::new().get("/prime", Echo("prime"), false);
        let response = router.execute(&request(Method::Get, "/prime?number=97&fast"));
        assert_eq!(response.status, Status::Ok);
    }

    // ========================================================================
    // Serialized routes
    // ========================================================================

    /// Deliberately non-atomic read-modify-write: correct only when the
    /// route's exclusivity lock serializes calls.
    struct RacyCountdown {
        counter: AtomicI64,
    }

    impl Handler for RacyCountdown {
        fn handle(&self, _req: &Request, _target: &Target, _captures: &[String]) -> Response {
            let value = self.counter.load(Ordering::SeqCst);
            std::thread::yield_now(); // widen the race window
            self.counter.store(value - 1, Ordering::SeqCst);
            Response::text(Status::Ok, value.to_string())
        }
    }

    #[test]
    fn serialized_route_loses_no_decrements() {
        const THREADS: usize = 8;
        const CALLS: usize = 25;

        let router = Arc::new(Router::new().get(
            "/countdown",
            RacyCountdown {
                counter: AtomicI64::new(0),
            },
            true,
        ));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let router = Arc::clone(&router);
                std::thread::spawn(move || {
                    let mut seen = Vec::with_capacity(CALLS);
                    for _ in 0..CALLS {
                        let response = router.execute(&request(Method::Get, "/countdown"));
                        seen.push(response.body.parse::<i64>().unwrap());
                    }
                    seen
                })
            })
            .collect();

        let mut all: Vec<i64> = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect();
        all.sort_unstable();

        // Exactly one decrement per call: the observed values are a
        // permutation of 0, -1, ..., -(N-1).
        let expected: Vec<i64> = (0..(THREADS * CALLS) as i64).map(|v| -v).rev().collect();
        assert_eq!(all, expected);
    }
}
