//! # oxide-trie-router
//!
//! The request-routing core of a web framework: a route tree keyed by path
//! segments, with middleware attached to any node.
//!
//! This crate provides:
//! - A trie of [`RouteNode`]s, one node per distinct path segment
//! - Actions bound to the nodes that terminate a route
//! - Middleware that runs for a node and every route below it
//! - A two-phase lifecycle: register on a [`Router`], then
//!   [`freeze`](Router::freeze) it into a [`SharedRouter`] for serving
//!
//! The transport layer owns I/O: it builds a context for each request, hands
//! it to the router and reads the outcome back out of the context.
//!
//! ## Quick Start
//!
//! ```
//! use oxide_trie_router::{HandlerResult, RequestContext, Response, Router};
//!
//! fn list_users(ctx: &mut RequestContext) -> HandlerResult {
//!     ctx.respond(Response::text("all users"));
//!     Ok(())
//! }
//!
//! let mut router: Router = Router::new();
//! router.route("/users", list_users).unwrap();
//!
//! let mut ctx = RequestContext::new("/users");
//! router.dispatch(&mut ctx).unwrap();
//! assert_eq!(ctx.response().unwrap().body_string().unwrap(), "all users");
//! ```
//!
//! ## Middleware
//!
//! Middleware runs root to leaf for every node on the matched path, in the
//! order it was added, before the action:
//!
//! ```
//! use oxide_trie_router::{HandlerResult, LoggingMiddleware, RequestContext, Router, shared};
//!
//! fn authenticate(ctx: &mut RequestContext) -> HandlerResult {
//!     ctx.insert("user", "alice");
//!     Ok(())
//! }
//!
//! fn show_user(ctx: &mut RequestContext) -> HandlerResult {
//!     assert!(ctx.contains("user"));
//!     Ok(())
//! }
//!
//! let mut router: Router = Router::new();
//! router.use_middleware("/", [shared(LoggingMiddleware)]).unwrap();
//! router.use_middleware("/users", [shared(authenticate)]).unwrap();
//! router.route("/users/me", show_user).unwrap();
//!
//! let router = router.freeze();
//! router.dispatch(&mut RequestContext::new("/users/me")).unwrap();
//! ```
//!
//! ## Errors
//!
//! ```
//! use oxide_trie_router::{HandlerResult, RequestContext, Router, RouterError};
//!
//! let mut router: Router = Router::new();
//! router
//!     .route("/a/b", |_: &mut RequestContext| -> HandlerResult { Ok(()) })
//!     .unwrap();
//!
//! let mut ctx = RequestContext::new("/");
//! let err = router.resolve("/missing", &mut ctx).unwrap_err();
//! assert!(matches!(err, RouterError::RouteNotFound { .. }));
//!
//! let err = router.resolve("/a", &mut ctx).unwrap_err();
//! assert!(matches!(err, RouterError::NoHandlerBound { .. }));
//! ```

mod config;
mod context;
mod error;
mod list;
mod middleware;
mod node;
mod response;
mod router;

pub use config::{DuplicatePolicy, RouterConfig};
pub use context::{Context, RequestContext};
pub use error::{Result, RouterError};
pub use list::RouteList;
pub use middleware::{
    Action, HandlerError, HandlerResult, LoggingMiddleware, Middleware, SharedMiddleware, shared,
};
pub use node::RouteNode;
pub use response::Response;
pub use router::{RouteMatch, Router, SharedRouter};
