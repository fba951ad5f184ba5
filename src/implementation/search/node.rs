// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module provides the search tree explored by the branch-and-bound
//! engine. The tree is stored as an arena: nodes are appended to a vector and
//! refer to their parent by its position in that vector.

use crate::{Assignment, ItemId};

/// The identifier of a node: it indicates the position of the referenced node
/// in the `nodes` vector of the `SearchTree` structure.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub usize);

/// Materializes the link between a node and its parent. It is labeled with
/// the assignment that was made to go from the parent to the child.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Edge {
    pub parent: NodeId,
    pub assignment: Assignment,
}

/// One decision point of the search tree
#[derive(Debug, Clone, Copy)]
pub struct SearchNode {
    /// The link towards the parent node. The root has none.
    pub edge: Option<Edge>,
    /// Number of assignments between the root and this node
    pub depth: usize,
    /// Profit of the items which are bound in the sack at this node
    pub current_profit: i64,
    /// An upper bound on the profit reachable from this node
    pub profit_upper_bound: i64,
    /// The item to branch on when this node gets expanded
    pub next_item: Option<ItemId>,
}
impl SearchNode {
    pub fn parent(&self) -> Option<NodeId> {
        self.edge.map(|e| e.parent)
    }
    pub fn assignment(&self) -> Option<Assignment> {
        self.edge.map(|e| e.assignment)
    }
    pub fn is_root(&self) -> bool {
        self.edge.is_none()
    }
}

/// The search tree itself. Nodes are never removed from the tree: the whole
/// tree is discarded at once when the search is over (or restarted). This is
/// what makes it safe for any node to be the common ancestor of nodes that
/// are still waiting to be explored.
#[derive(Debug, Clone, Default)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}
impl SearchTree {
    pub fn new() -> Self {
        Self::default()
    }
    /// Discards all the nodes of the tree
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    /// Creates the root of the tree. It must only be called on an empty tree.
    pub fn add_root(&mut self, current_profit: i64, profit_upper_bound: i64, next_item: Option<ItemId>) -> NodeId {
        assert!(self.nodes.is_empty(), "the search tree already has a root");
        self.nodes.push(SearchNode {
            edge: None,
            depth: 0,
            current_profit,
            profit_upper_bound,
            next_item,
        });
        NodeId(0)
    }
    /// Creates a new child of `parent` reached by making the given assignment
    pub fn add_child(&mut self, parent: NodeId, assignment: Assignment) -> NodeId {
        let depth = self.node(parent).depth + 1;
        let id = NodeId(self.nodes.len());
        self.nodes.push(SearchNode {
            edge: Some(Edge { parent, assignment }),
            depth,
            current_profit: 0,
            profit_upper_bound: i64::MAX,
            next_item: None,
        });
        id
    }
    #[inline]
    pub fn node(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }
    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0]
    }
    /// Returns the parent of the given node. Asking the parent of the root is
    /// a bug.
    fn lift(&self, id: NodeId) -> NodeId {
        match self.node(id).parent() {
            Some(parent) => parent,
            None => unreachable!("the root has no parent"),
        }
    }
    /// Returns the lowest common ancestor of `a` and `b`: the deeper node is
    /// lifted until both are at the same depth, then both are lifted in
    /// lockstep until they coincide.
    pub fn lowest_common_ancestor(&self, a: NodeId, b: NodeId) -> NodeId {
        let (mut a, mut b) = (a, b);
        while self.node(a).depth > self.node(b).depth {
            a = self.lift(a);
        }
        while self.node(b).depth > self.node(a).depth {
            b = self.lift(b);
        }
        while a != b {
            a = self.lift(a);
            b = self.lift(b);
        }
        a
    }
}

#[cfg(test)]
mod test_search_tree {
    use crate::*;

    fn a(item: usize, is_in: bool) -> Assignment {
        Assignment::new(ItemId(item), is_in)
    }

    #[test]
    fn by_default_it_is_empty() {
        let tree = SearchTree::new();
        assert!(tree.is_empty());
        assert_eq!(0, tree.len());
    }
    #[test]
    fn the_root_has_depth_zero_and_no_parent() {
        let mut tree = SearchTree::new();
        let root = tree.add_root(0, 10, Some(ItemId(2)));
        assert_eq!(NodeId(0), root);
        assert_eq!(0, tree.node(root).depth);
        assert!(tree.node(root).is_root());
        assert_eq!(None, tree.node(root).parent());
        assert_eq!(None, tree.node(root).assignment());
        assert_eq!(Some(ItemId(2)), tree.node(root).next_item);
    }
    #[test]
    #[should_panic]
    fn there_can_only_be_one_root() {
        let mut tree = SearchTree::new();
        tree.add_root(0, 10, None);
        tree.add_root(0, 10, None);
    }
    #[test]
    fn children_are_one_level_deeper_than_their_parent() {
        let mut tree = SearchTree::new();
        let root = tree.add_root(0, 10, None);
        let x = tree.add_child(root, a(0, true));
        let y = tree.add_child(x, a(1, false));
        assert_eq!(1, tree.node(x).depth);
        assert_eq!(2, tree.node(y).depth);
        assert_eq!(Some(x), tree.node(y).parent());
        assert_eq!(Some(a(1, false)), tree.node(y).assignment());
        assert_eq!(3, tree.len());
    }
    #[test]
    fn clearing_the_tree_discards_all_nodes() {
        let mut tree = SearchTree::new();
        let root = tree.add_root(0, 10, None);
        tree.add_child(root, a(0, true));
        tree.clear();
        assert!(tree.is_empty());
    }
    #[test]
    fn the_lca_of_a_node_with_itself_is_the_node() {
        let mut tree = SearchTree::new();
        let root = tree.add_root(0, 10, None);
        let x = tree.add_child(root, a(0, true));
        assert_eq!(x, tree.lowest_common_ancestor(x, x));
        assert_eq!(root, tree.lowest_common_ancestor(root, root));
    }
    #[test]
    fn the_lca_of_a_node_and_its_descendant_is_the_node() {
        let mut tree = SearchTree::new();
        let root = tree.add_root(0, 10, None);
        let x = tree.add_child(root, a(0, true));
        let y = tree.add_child(x, a(1, true));
        let z = tree.add_child(y, a(2, true));
        assert_eq!(x, tree.lowest_common_ancestor(x, z));
        assert_eq!(x, tree.lowest_common_ancestor(z, x));
        assert_eq!(root, tree.lowest_common_ancestor(z, root));
    }
    #[test]
    fn the_lca_of_siblings_is_their_parent() {
        let mut tree = SearchTree::new();
        let root = tree.add_root(0, 10, None);
        let x = tree.add_child(root, a(0, true));
        let y = tree.add_child(root, a(0, false));
        let xx = tree.add_child(x, a(1, true));
        let xy = tree.add_child(x, a(1, false));
        let yx = tree.add_child(y, a(1, true));
        assert_eq!(root, tree.lowest_common_ancestor(x, y));
        assert_eq!(x, tree.lowest_common_ancestor(xx, xy));
        assert_eq!(root, tree.lowest_common_ancestor(xx, yx));
        assert_eq!(root, tree.lowest_common_ancestor(yx, xy));
    }
}
