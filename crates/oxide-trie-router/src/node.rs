//! Route tree nodes.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::error::{Result, RouterError};
use crate::list::RouteList;
use crate::middleware::{Action, HandlerResult, SharedMiddleware};

/// A single node of the route tree, keyed by one path segment.
///
/// A node owns its children, an optional action and the middleware that
/// runs whenever a dispatch passes through it. Segments are matched by
/// exact, case-sensitive comparison.
pub struct RouteNode<C> {
    segment: String,
    action: Option<Arc<dyn Action<C>>>,
    children: RouteList<C>,
    /// Segment to position in `children`.
    index: HashMap<String, usize>,
    middleware: Vec<SharedMiddleware<C>>,
}

impl<C> RouteNode<C> {
    /// Creates a node with no action.
    pub fn new(segment: impl Into<String>) -> Self {
        Self {
            segment: segment.into(),
            action: None,
            children: RouteList::new(),
            index: HashMap::new(),
            middleware: Vec::new(),
        }
    }

    /// Creates a node with an action bound.
    pub fn with_action<A>(segment: impl Into<String>, action: A) -> Self
    where
        A: Action<C> + 'static,
    {
        let mut node = Self::new(segment);
        node.action = Some(Arc::new(action));
        node
    }

    /// Returns the segment this node represents.
    #[must_use]
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// Adds a child node.
    ///
    /// Fails with [`RouterError::DuplicateSegment`] if a child with the
    /// same segment exists; the tree is left unchanged.
    pub fn add_child(&mut self, node: Self) -> Result<&mut Self> {
        if self.index.contains_key(&node.segment) {
            return Err(RouterError::DuplicateSegment {
                segment: node.segment,
            });
        }
        self.index.insert(node.segment.clone(), self.children.len());
        Ok(self.children.push(node))
    }

    /// Returns true if a child with this exact segment exists.
    #[must_use]
    pub fn has_child(&self, segment: &str) -> bool {
        self.index.contains_key(segment)
    }

    /// Gets the child for a segment.
    #[must_use]
    pub fn get_child(&self, segment: &str) -> Option<&Self> {
        self.index
            .get(segment)
            .and_then(|&position| self.children.get(position))
    }

    /// Gets the child for a segment, creating it if missing.
    pub(crate) fn child_or_insert(&mut self, segment: &str) -> Result<&mut Self> {
        if let Some(&position) = self.index.get(segment) {
            return Ok(self.children.node_mut(position));
        }
        trace!(parent = %self.segment, segment, "creating route node");
        self.add_child(Self::new(segment))
    }

    /// Returns the children in insertion order.
    #[must_use]
    pub const fn children(&self) -> &RouteList<C> {
        &self.children
    }

    /// Returns the number of children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Appends middleware, in order.
    ///
    /// Adding the same middleware twice runs it twice.
    pub fn add_middleware<I>(&mut self, middleware: I)
    where
        I: IntoIterator<Item = SharedMiddleware<C>>,
    {
        self.middleware.extend(middleware);
    }

    /// Returns the number of middleware attached to this node.
    #[must_use]
    pub fn middleware_count(&self) -> usize {
        self.middleware.len()
    }

    /// Runs this node's middleware in insertion order.
    ///
    /// Stops at the first failure and returns its error unchanged.
    pub fn run_middleware(&self, ctx: &mut C) -> HandlerResult {
        for mw in &self.middleware {
            mw.run(ctx)?;
        }
        Ok(())
    }

    /// Binds an action, returning the one it replaces.
    pub fn set_action<A>(&mut self, action: A) -> Option<Arc<dyn Action<C>>>
    where
        A: Action<C> + 'static,
    {
        self.action.replace(Arc::new(action))
    }

    /// Returns true if an action is bound.
    #[must_use]
    pub const fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Invokes the bound action. Does nothing when no action is bound.
    pub fn execute_action(&self, ctx: &mut C) -> HandlerResult {
        match &self.action {
            Some(action) => action.invoke(ctx),
            None => Ok(()),
        }
    }
}

/// Renders `segment => [child1,child2,...]`, recursively.
impl<C> fmt::Display for RouteNode<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => [", self.segment)?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{child}")?;
        }
        f.write_str("]")
    }
}

impl<C> fmt::Debug for RouteNode<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteNode")
            .field("segment", &self.segment)
            .field("has_action", &self.has_action())
            .field("middleware", &self.middleware.len())
            .field("children", &self.children)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::context::RequestContext;
    use crate::middleware::shared;

    type Node = RouteNode<RequestContext>;

    fn recorder(log: &Arc<Mutex<Vec<String>>>, name: &str) -> SharedMiddleware<RequestContext> {
        let log = Arc::clone(log);
        let name = name.to_string();
        shared(move |_: &mut RequestContext| -> HandlerResult {
            log.lock().unwrap().push(name.clone());
            Ok(())
        })
    }

    #[test]
    fn test_child_lookup() {
        let mut node = Node::new("");
        node.add_child(Node::new("a")).unwrap();
        node.add_child(Node::new("b")).unwrap();

        assert!(node.has_child("a"));
        assert!(!node.has_child("A"));
        assert_eq!(node.get_child("b").map(RouteNode::segment), Some("b"));
        assert!(node.get_child("missing").is_none());
        assert_eq!(node.child_count(), 2);
    }

    #[test]
    fn test_add_child_rejects_duplicate_segment() {
        let mut node = Node::new("");
        node.add_child(Node::new("a")).unwrap();
        let err = node.add_child(Node::new("a")).unwrap_err();
        assert!(matches!(err, RouterError::DuplicateSegment { ref segment } if segment == "a"));
        assert_eq!(node.child_count(), 1);
    }

    #[test]
    fn test_child_or_insert_reuses_existing() {
        let mut node = Node::new("");
        node.child_or_insert("users").unwrap();
        node.child_or_insert("users").unwrap();
        assert_eq!(node.child_count(), 1);
        assert!(node.has_child("users"));
    }

    #[test]
    fn test_middleware_order_and_duplicates() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let m1 = recorder(&log, "m1");
        let m2 = recorder(&log, "m2");

        let mut node = Node::new("users");
        node.add_middleware([Arc::clone(&m1), m2]);
        node.add_middleware([m1]);
        assert_eq!(node.middleware_count(), 3);

        let mut ctx = RequestContext::new("/users");
        node.run_middleware(&mut ctx).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["m1", "m2", "m1"]);
    }

    #[test]
    fn test_middleware_failure_aborts_chain() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let failing: SharedMiddleware<RequestContext> =
            shared(|_: &mut RequestContext| -> HandlerResult { Err("denied".into()) });

        let mut node = Node::new("admin");
        node.add_middleware([recorder(&log, "before"), failing, recorder(&log, "after")]);

        let mut ctx = RequestContext::new("/admin");
        let err = node.run_middleware(&mut ctx).unwrap_err();
        assert_eq!(err.to_string(), "denied");
        assert_eq!(*log.lock().unwrap(), vec!["before"]);
    }

    #[test]
    fn test_execute_action() {
        let mut node = Node::new("x");
        let mut ctx = RequestContext::new("/x");
        node.execute_action(&mut ctx).unwrap();
        assert!(!ctx.is_responded());

        let previous = node.set_action(|ctx: &mut RequestContext| -> HandlerResult {
            ctx.insert("handled", true);
            Ok(())
        });
        assert!(previous.is_none());
        assert!(node.has_action());
        node.execute_action(&mut ctx).unwrap();
        assert!(ctx.contains("handled"));
    }

    #[test]
    fn test_with_action() {
        let mut root = Node::new("");
        let ping = Node::with_action("ping", |ctx: &mut RequestContext| -> HandlerResult {
            ctx.insert("pong", true);
            Ok(())
        });
        assert!(ping.has_action());
        root.add_child(ping).unwrap();

        let mut ctx = RequestContext::new("/ping");
        root.get_child("ping").unwrap().execute_action(&mut ctx).unwrap();
        assert!(ctx.contains("pong"));
        assert!(!root.has_action());
    }

    #[test]
    fn test_display() {
        let mut root = Node::new("");
        let users = root.add_child(Node::new("users")).unwrap();
        users.add_child(Node::new(":id")).unwrap();
        root.add_child(Node::new("posts")).unwrap();

        assert_eq!(root.to_string(), " => [users => [:id => []],posts => []]");
        assert_eq!(Node::new("leaf").to_string(), "leaf => []");
    }
}
