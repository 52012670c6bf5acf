//! Middleware and action abstractions.
//!
//! Both are synchronous: they receive the shared, mutable request context,
//! do their work and return. A middleware that wants to stop the request
//! signals it through the context (see
//! [`RequestContext::respond`](crate::RequestContext::respond)); the router
//! never inspects what middleware did.

use std::sync::Arc;

use tracing::info;

use crate::context::Context;

/// Error raised by a middleware or an action.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result returned by middleware and actions.
pub type HandlerResult = std::result::Result<(), HandlerError>;

/// A middleware shared between the nodes it is attached to.
pub type SharedMiddleware<C> = Arc<dyn Middleware<C>>;

/// A unit of request processing that runs before the action.
///
/// Closures of the form `Fn(&mut C) -> HandlerResult` implement this trait.
///
/// # Example
///
/// ```
/// use oxide_trie_router::{HandlerResult, Middleware, RequestContext};
///
/// struct Tag;
///
/// impl Middleware<RequestContext> for Tag {
///     fn run(&self, ctx: &mut RequestContext) -> HandlerResult {
///         ctx.insert("tagged", true);
///         Ok(())
///     }
/// }
///
/// let mut ctx = RequestContext::new("/");
/// Tag.run(&mut ctx).unwrap();
/// assert_eq!(ctx.get("tagged"), Some(&serde_json::json!(true)));
/// ```
pub trait Middleware<C>: Send + Sync {
    /// Processes the context.
    ///
    /// An error aborts the rest of the chain, including the action.
    fn run(&self, ctx: &mut C) -> HandlerResult;
}

impl<C, F> Middleware<C> for F
where
    F: Fn(&mut C) -> HandlerResult + Send + Sync,
{
    fn run(&self, ctx: &mut C) -> HandlerResult {
        self(ctx)
    }
}

/// The terminal handler bound to a route.
pub trait Action<C>: Send + Sync {
    /// Handles the request.
    fn invoke(&self, ctx: &mut C) -> HandlerResult;
}

impl<C, F> Action<C> for F
where
    F: Fn(&mut C) -> HandlerResult + Send + Sync,
{
    fn invoke(&self, ctx: &mut C) -> HandlerResult {
        self(ctx)
    }
}

/// Wraps a middleware so it can be attached to one or more nodes.
pub fn shared<C, M>(middleware: M) -> SharedMiddleware<C>
where
    M: Middleware<C> + 'static,
{
    Arc::new(middleware)
}

/// Middleware that logs requests.
///
/// Logs once per node it is attached to, so attaching it to the root logs
/// every dispatched request exactly once.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingMiddleware;

impl<C: Context> Middleware<C> for LoggingMiddleware {
    fn run(&self, ctx: &mut C) -> HandlerResult {
        info!(path = ctx.path(), "--> request");
        Ok(())
    }
}
