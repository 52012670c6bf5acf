//! Ordered container of route nodes.

use std::ops::Index;

use crate::error::{Result, RouterError};
use crate::node::RouteNode;

/// An insertion-ordered list of route nodes.
///
/// The list does not enforce segment uniqueness; that is the owning
/// [`RouteNode`]'s job. Nodes are never removed.
pub struct RouteList<C> {
    nodes: Vec<RouteNode<C>>,
}

impl<C> Default for RouteList<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> RouteList<C> {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Appends a node.
    pub fn add(&mut self, node: RouteNode<C>) {
        self.nodes.push(node);
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the list holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Gets a node by position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&RouteNode<C>> {
        self.nodes.get(index)
    }

    /// Appends a node and returns it.
    pub(crate) fn push(&mut self, node: RouteNode<C>) -> &mut RouteNode<C> {
        let position = self.nodes.len();
        self.nodes.push(node);
        &mut self.nodes[position]
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> &mut RouteNode<C> {
        &mut self.nodes[index]
    }

    /// Gets a node by position, failing when the index is out of range.
    pub fn at(&self, index: usize) -> Result<&RouteNode<C>> {
        self.nodes.get(index).ok_or(RouterError::IndexOutOfRange {
            index,
            len: self.nodes.len(),
        })
    }

    /// Iterates over the nodes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, RouteNode<C>> {
        self.nodes.iter()
    }
}

impl<C> Index<usize> for RouteList<C> {
    type Output = RouteNode<C>;

    /// # Panics
    ///
    /// Panics if `index` is out of range.
    fn index(&self, index: usize) -> &Self::Output {
        match self.nodes.get(index) {
            Some(node) => node,
            None => panic!(
                "index {index} out of range for route list of length {}",
                self.nodes.len()
            ),
        }
    }
}

impl<'a, C> IntoIterator for &'a RouteList<C> {
    type Item = &'a RouteNode<C>;
    type IntoIter = std::slice::Iter<'a, RouteNode<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<C> std::fmt::Debug for RouteList<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.nodes.iter().map(RouteNode::segment))
            .finish()
    }
}
