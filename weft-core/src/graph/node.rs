//! Graph Nodes
//!
//! This module defines the node types that live in the dependency graph.
//!
//! Two levels of structure exist side by side:
//!
//! - Inner nodes ([`Node`]): the operation and time-source nodes that
//!   relations connect. These live in the graph's node arena and carry
//!   the link lists and valency scratch state.
//! - Outer nodes ([`EntityNode`], [`ComponentNode`]): the bookkeeping
//!   that groups operations by the scene entity and aspect they were
//!   built for. Outer nodes are never relation endpoints.

use indexmap::IndexMap;
use smallvec::SmallVec;

use super::relation::RelationId;

/// Handle to a node in the graph's node arena.
///
/// Handles are stable integer indices; they stay valid for the lifetime
/// of the graph that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Get the raw handle value.
    pub fn raw(&self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Handle to a top-level entity node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(u32);

impl EntityId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to a component node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(u32);

impl ComponentId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// The kind of an inner node in the dependency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// An atomic unit of scheduled work. Operation nodes are what the
    /// evaluation scheduler dispatches; they carry valency scratch state.
    Operation,

    /// The distinguished node representing the global time dependency.
    /// A graph has at most one.
    TimeSource,
}

/// Inline storage for per-node link lists; most nodes have few links.
pub(crate) type LinkList = SmallVec<[RelationId; 4]>;

/// An inner node in the dependency graph.
#[derive(Debug)]
pub struct Node {
    /// Handle of this node in the owning graph's arena.
    id: NodeId,

    /// What kind of node this is.
    kind: NodeKind,

    /// Human-readable identifier, used in diagnostics.
    identifier: String,

    /// Count of not-yet-satisfied incoming dependencies. This is scratch
    /// state owned by evaluation scheduling; the valency validator zeroes
    /// and rebuilds it.
    pub(crate) num_links_pending: u32,

    /// Traversal scratch marker. Not meaningful between passes.
    pub(crate) visited: bool,

    /// Relations leaving this node, in registration order.
    pub(crate) outlinks: LinkList,

    /// Relations arriving at this node, in registration order.
    pub(crate) inlinks: LinkList,
}

impl Node {
    pub(crate) fn new(id: NodeId, kind: NodeKind, identifier: String) -> Self {
        Self {
            id,
            kind,
            identifier,
            num_links_pending: 0,
            visited: false,
            outlinks: LinkList::new(),
            inlinks: LinkList::new(),
        }
    }

    /// Get the node's handle.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Get the node's kind.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Whether this node is an operation node.
    pub fn is_operation(&self) -> bool {
        self.kind == NodeKind::Operation
    }

    /// Get the node's identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Current cached valency (unsatisfied incoming dependency count).
    pub fn num_links_pending(&self) -> u32 {
        self.num_links_pending
    }

    /// Relations leaving this node.
    pub fn outlinks(&self) -> &[RelationId] {
        &self.outlinks
    }

    /// Relations arriving at this node.
    pub fn inlinks(&self) -> &[RelationId] {
        &self.inlinks
    }
}

/// A top-level outer node: one scene entity and the components built
/// for it.
#[derive(Debug)]
pub struct EntityNode {
    id: EntityId,
    name: String,

    /// Components keyed by name, in creation order.
    pub(crate) components: IndexMap<String, ComponentId>,
}

impl EntityNode {
    pub(crate) fn new(id: EntityId, name: String) -> Self {
        Self {
            id,
            name,
            components: IndexMap::new(),
        }
    }

    /// Get the entity's handle.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Get the entity's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a component by name.
    pub fn component(&self, name: &str) -> Option<ComponentId> {
        self.components.get(name).copied()
    }

    /// Iterate over the entity's components in creation order.
    pub fn components(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.components.values().copied()
    }
}

/// A grouping of the operations belonging to one logical aspect of an
/// entity.
#[derive(Debug)]
pub struct ComponentNode {
    id: ComponentId,
    name: String,

    /// Operations owned by this component, in registration order.
    pub(crate) operations: Vec<NodeId>,
}

impl ComponentNode {
    pub(crate) fn new(id: ComponentId, name: String) -> Self {
        Self {
            id,
            name,
            operations: Vec::new(),
        }
    }

    /// Get the component's handle.
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Get the component's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Operations owned by this component.
    pub fn operations(&self) -> &[NodeId] {
        &self.operations
    }
}
