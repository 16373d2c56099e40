// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

/// The position of a node inside the list's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// A forward link. `None` marks the end of a level.
pub(crate) type Link = Option<NodeId>;

/// A position during a descent. `None` is the head sentinel.
pub(crate) type Cursor = Option<NodeId>;

#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    /// One link per level this node occupies, so the height is `next.len()`.
    pub(crate) next: Box<[Link]>,
    /// Level 0 predecessor, `None` when the predecessor is the head. Only kept
    /// for diagnostics.
    pub(crate) prev: Cursor,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T, height: usize) -> Self {
        Node {
            value,
            next: vec![None; height].into_boxed_slice(),
            prev: None,
        }
    }

    #[inline]
    pub(crate) fn height(&self) -> usize {
        self.next.len()
    }
}

/// Append-only storage for the list's nodes. Nodes are never removed, so a
/// `NodeId` stays valid for the life of the arena.
#[derive(Debug)]
pub(crate) struct Arena<T> {
    nodes: Vec<Node<T>>,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Arena { nodes: Vec::new() }
    }

    pub(crate) fn push(&mut self, node: Node<T>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl<T> std::ops::Index<NodeId> for Arena<T> {
    type Output = Node<T>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.index()]
    }
}

impl<T> std::ops::IndexMut<NodeId> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id.index()]
    }
}
