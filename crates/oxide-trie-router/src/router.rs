//! Main router implementation.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::config::{DuplicatePolicy, RouterConfig};
use crate::context::{Context, RequestContext};
use crate::error::{Result, RouterError};
use crate::middleware::{Action, SharedMiddleware};
use crate::node::RouteNode;

/// Splits a path into its non-empty segments.
fn split_path(path: &str, separator: char) -> impl Iterator<Item = &str> {
    path.split(separator).filter(|s| !s.is_empty())
}

/// The nodes a path resolved to, root first.
pub struct RouteMatch<'r, C> {
    path: &'r str,
    nodes: Vec<&'r RouteNode<C>>,
}

impl<'r, C> RouteMatch<'r, C> {
    /// The path that was matched.
    #[must_use]
    pub const fn path(&self) -> &'r str {
        self.path
    }

    /// Every node on the matched path, starting with the root.
    #[must_use]
    pub fn nodes(&self) -> &[&'r RouteNode<C>] {
        &self.nodes
    }

    /// The node the path ends on.
    #[must_use]
    pub fn target(&self) -> &'r RouteNode<C> {
        // Always holds at least the root.
        self.nodes[self.nodes.len() - 1]
    }

    /// Total number of middleware a dispatch of this match runs.
    #[must_use]
    pub fn middleware_count(&self) -> usize {
        self.nodes.iter().map(|node| node.middleware_count()).sum()
    }

    /// Runs the middleware of every matched node, root to leaf, then the
    /// target's action.
    ///
    /// The first failing middleware aborts the dispatch: later middleware and
    /// the action do not run.
    pub fn execute(&self, ctx: &mut C) -> Result<()> {
        let target = self.target();
        if !target.has_action() {
            debug!(path = self.path, "no handler bound");
            return Err(RouterError::NoHandlerBound {
                path: self.path.to_string(),
            });
        }

        for node in &self.nodes {
            trace!(segment = node.segment(), "running middleware");
            node.run_middleware(ctx).map_err(|source| RouterError::Middleware {
                path: self.path.to_string(),
                segment: node.segment().to_string(),
                source,
            })?;
        }

        target
            .execute_action(ctx)
            .map_err(|source| RouterError::Action {
                path: self.path.to_string(),
                source,
            })
    }
}

impl<C> fmt::Debug for RouteMatch<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("path", &self.path)
            .field(
                "segments",
                &self.nodes.iter().map(|n| n.segment()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// The route tree owner.
///
/// Routes and middleware are registered with `&mut self`; once setup is
/// done, [`Router::freeze`] turns the router into a [`SharedRouter`] that
/// can be cloned across threads and only dispatches.
pub struct Router<C = RequestContext> {
    root: RouteNode<C>,
    config: RouterConfig,
}

impl<C> Default for Router<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Router<C> {
    /// Creates an empty router with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// Creates an empty router.
    #[must_use]
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            root: RouteNode::new(""),
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Returns the root node.
    #[must_use]
    pub const fn root(&self) -> &RouteNode<C> {
        &self.root
    }

    /// Walks `path` from the root, creating missing nodes.
    fn node_for_path_mut(&mut self, path: &str) -> Result<&mut RouteNode<C>> {
        let separator = self.config.separator;
        let mut node = &mut self.root;
        for segment in split_path(path, separator) {
            node = node.child_or_insert(segment)?;
        }
        Ok(node)
    }

    /// Registers an action and its middleware for a path.
    ///
    /// Missing nodes along the path are created; existing ones are shared
    /// with the routes already registered. The middleware is attached to the
    /// terminal node, so it also runs for every route registered below it.
    ///
    /// Registering a path that already has an action follows
    /// [`RouterConfig::on_duplicate`].
    pub fn register<I, A>(&mut self, path: &str, middleware: I, action: A) -> Result<()>
    where
        I: IntoIterator<Item = SharedMiddleware<C>>,
        A: Action<C> + 'static,
    {
        let policy = self.config.on_duplicate;
        let node = self.node_for_path_mut(path)?;

        if node.has_action() && policy == DuplicatePolicy::Reject {
            debug!(path, "rejecting duplicate route");
            return Err(RouterError::DuplicateRegistration {
                path: path.to_string(),
            });
        }

        node.add_middleware(middleware);
        if node.set_action(action).is_some() {
            warn!(path, "replaced existing route action");
        }
        debug!(path, "registered route");
        Ok(())
    }

    /// Registers an action with no middleware of its own.
    pub fn route<A>(&mut self, path: &str, action: A) -> Result<()>
    where
        A: Action<C> + 'static,
    {
        self.register(path, Vec::new(), action)
    }

    /// Attaches middleware to the node for `path` without binding an action.
    ///
    /// The middleware runs for the route at `path` and every route below it.
    /// An empty path (or the bare separator) targets the root.
    pub fn use_middleware<I>(&mut self, path: &str, middleware: I) -> Result<()>
    where
        I: IntoIterator<Item = SharedMiddleware<C>>,
    {
        let node = self.node_for_path_mut(path)?;
        node.add_middleware(middleware);
        debug!(path, total = node.middleware_count(), "attached middleware");
        Ok(())
    }

    /// Matches `path` against the tree without running anything.
    pub fn find<'r>(&'r self, path: &'r str) -> Result<RouteMatch<'r, C>> {
        let mut node = &self.root;
        let mut nodes = vec![node];

        for segment in split_path(path, self.config.separator) {
            node = node.get_child(segment).ok_or_else(|| {
                debug!(path, segment, "no route matched");
                RouterError::RouteNotFound {
                    path: path.to_string(),
                    segment: segment.to_string(),
                }
            })?;
            nodes.push(node);
        }

        Ok(RouteMatch { path, nodes })
    }

    /// Resolves `path` and dispatches it.
    ///
    /// The path is matched in full before anything runs, so a request that
    /// fails with [`RouterError::RouteNotFound`] or
    /// [`RouterError::NoHandlerBound`] leaves the context untouched.
    /// Otherwise the middleware of each node on the path runs, root to leaf,
    /// followed by the action.
    pub fn resolve(&self, path: &str, ctx: &mut C) -> Result<()> {
        self.find(path)?.execute(ctx)
    }

    /// Resolves the path the context carries.
    pub fn dispatch(&self, ctx: &mut C) -> Result<()>
    where
        C: Context,
    {
        let path = ctx.path().to_owned();
        self.resolve(&path, ctx)
    }

    /// Returns every path with an action bound, depth first in registration
    /// order.
    #[must_use]
    pub fn routes(&self) -> Vec<String> {
        let mut routes = Vec::new();
        collect_routes(&self.root, &mut Vec::new(), self.config.separator, &mut routes);
        routes
    }

    /// Ends the registration phase.
    #[must_use]
    pub fn freeze(self) -> SharedRouter<C> {
        debug!(routes = self.routes().len(), "router frozen");
        SharedRouter {
            inner: Arc::new(self),
        }
    }
}

fn collect_routes<'a, C>(
    node: &'a RouteNode<C>,
    trail: &mut Vec<&'a str>,
    separator: char,
    out: &mut Vec<String>,
) {
    if node.has_action() {
        let sep = separator.to_string();
        out.push(format!("{sep}{}", trail.join(sep.as_str())));
    }
    for child in node.children() {
        trail.push(child.segment());
        collect_routes(child, trail, separator, out);
        trail.pop();
    }
}

impl<C> fmt::Display for Router<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

impl<C> fmt::Debug for Router<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .field("root", &self.root)
            .finish()
    }
}

/// A router whose registration phase is over.
///
/// Cheap to clone; every clone dispatches against the same tree.
pub struct SharedRouter<C = RequestContext> {
    inner: Arc<Router<C>>,
}

impl<C> Clone for SharedRouter<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C> Deref for SharedRouter<C> {
    type Target = Router<C>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<C> fmt::Debug for SharedRouter<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedRouter").field(&self.inner).finish()
    }
}
