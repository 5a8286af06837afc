//! Path-based request routing.
//!
//! Routes are checked in table order and the first match wins. Matching is a
//! literal comparison on the path bytes: no wildcards, no decoding.

use crate::handlers::{self, echo, files, user_agent};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::store::FileStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Prefix,
}

/// Which handler a request is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Root,
    Echo,
    UserAgent,
    Files,
    NotFound,
}

#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub kind: MatchKind,
    pub pattern: &'static str,
    pub handler: Handler,
}

impl Route {
    pub fn matches(&self, path: &str) -> bool {
        match self.kind {
            MatchKind::Exact => path == self.pattern,
            MatchKind::Prefix => path.starts_with(self.pattern),
        }
    }
}

pub const ROUTES: &[Route] = &[
    Route {
        kind: MatchKind::Exact,
        pattern: "/",
        handler: Handler::Root,
    },
    Route {
        kind: MatchKind::Prefix,
        pattern: echo::PREFIX,
        handler: Handler::Echo,
    },
    Route {
        kind: MatchKind::Exact,
        pattern: user_agent::PATH,
        handler: Handler::UserAgent,
    },
    Route {
        kind: MatchKind::Prefix,
        pattern: files::PREFIX,
        handler: Handler::Files,
    },
];

/// Finds the handler for `path`, falling back to [`Handler::NotFound`].
///
/// # Example
///
/// ```
/// # use courier::router::{resolve, Handler};
/// assert_eq!(resolve("/echo/abc"), Handler::Echo);
/// assert_eq!(resolve("/echo"), Handler::NotFound);
/// ```
pub fn resolve(path: &str) -> Handler {
    ROUTES
        .iter()
        .find(|route| route.matches(path))
        .map(|route| route.handler)
        .unwrap_or(Handler::NotFound)
}

/// Dispatches requests to handlers. Holds the only shared state, the
/// optional file store, which is read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct Router {
    store: Option<FileStore>,
}

impl Router {
    pub fn new(store: Option<FileStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> Option<&FileStore> {
        self.store.as_ref()
    }

    pub async fn dispatch(&self, req: &Request) -> Response {
        match resolve(&req.path) {
            Handler::Root => handlers::root(req),
            Handler::Echo => echo::handle(req),
            Handler::UserAgent => user_agent::handle(req),
            Handler::Files => files::handle(self.store(), req).await,
            Handler::NotFound => handlers::not_found(req),
        }
    }
}
