//! Graph Store
//!
//! The root container owning every node and relation in the dependency
//! graph, together with the outer entity/component bookkeeping and the
//! canonical operation list that evaluation scheduling walks.
//!
//! The store only provides the population surface an upstream graph
//! builder fills in and the read surface the validators and diagnostics
//! consume. How a scene description is translated into nodes and
//! relations is the builder's business, not the store's.

use tracing::trace;

use super::node::{ComponentId, ComponentNode, EntityId, EntityNode, Node, NodeId, NodeKind};
use super::relation::{Relation, RelationId};
use crate::debug::DebugSettings;

/// The dependency graph.
///
/// All nodes and relations live in arenas owned by this struct and are
/// referenced by `Copy` integer handles. A relation handle is pushed
/// onto the source node's outlinks and the destination node's inlinks
/// at creation, so a freshly built graph is symmetric by construction;
/// the consistency validator exists to catch bookkeeping that has gone
/// wrong after the fact.
#[derive(Debug)]
pub struct Graph {
    /// Debug configuration attached at construction.
    pub(crate) debug: DebugSettings,

    /// Arena of inner nodes (operations and the time source).
    pub(crate) nodes: Vec<Node>,

    /// Arena of relations.
    pub(crate) relations: Vec<Relation>,

    /// Top-level entity nodes, in creation order.
    pub(crate) entities: Vec<EntityNode>,

    /// Component nodes, in creation order.
    pub(crate) components: Vec<ComponentNode>,

    /// Canonical list of every operation node, in registration order.
    /// Evaluation scheduling and the validators iterate this list.
    pub(crate) operations: Vec<NodeId>,

    /// The distinguished time-source node, if one was created.
    pub(crate) time_source: Option<NodeId>,
}

impl Graph {
    /// Create an empty graph with default (silent) debug settings.
    pub fn new() -> Self {
        Self::with_debug(DebugSettings::default())
    }

    /// Create an empty graph with the given debug settings.
    pub fn with_debug(debug: DebugSettings) -> Self {
        Self {
            debug,
            nodes: Vec::new(),
            relations: Vec::new(),
            entities: Vec::new(),
            components: Vec::new(),
            operations: Vec::new(),
            time_source: None,
        }
    }

    /// Add a top-level entity node.
    pub fn add_entity(&mut self, name: impl Into<String>) -> EntityId {
        let id = EntityId::new(self.entities.len());
        self.entities.push(EntityNode::new(id, name.into()));
        id
    }

    /// Add a component node under an entity.
    ///
    /// Panics if the handle does not belong to this graph.
    pub fn add_component(&mut self, entity: EntityId, name: impl Into<String>) -> ComponentId {
        let name = name.into();
        let id = ComponentId::new(self.components.len());
        self.components.push(ComponentNode::new(id, name.clone()));
        self.entities[entity.index()].components.insert(name, id);
        id
    }

    /// Add an operation node to a component.
    ///
    /// The node is appended both to the component's operation list and to
    /// the graph's canonical operation list.
    pub fn add_operation(
        &mut self,
        component: ComponentId,
        identifier: impl Into<String>,
    ) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes
            .push(Node::new(id, NodeKind::Operation, identifier.into()));
        self.components[component.index()].operations.push(id);
        self.operations.push(id);
        id
    }

    /// Add the time-source node, or return the existing one.
    pub fn add_time_source(&mut self) -> NodeId {
        if let Some(id) = self.time_source {
            return id;
        }
        let id = NodeId::new(self.nodes.len());
        self.nodes
            .push(Node::new(id, NodeKind::TimeSource, "Time Source".into()));
        self.time_source = Some(id);
        id
    }

    /// Add a directed relation `from -> to`.
    ///
    /// The new handle is recorded on both endpoints: in `from`'s outlinks
    /// and in `to`'s inlinks.
    pub fn add_relation(
        &mut self,
        from: NodeId,
        to: NodeId,
        label: impl Into<String>,
    ) -> RelationId {
        let label = label.into();
        let id = RelationId::new(self.relations.len());

        if self.debug.flags.log_build {
            trace!(
                target: "weft::build",
                "{}relation '{}' added: {} -> {}",
                self.log_prefix(),
                label,
                self.nodes[from.index()].identifier(),
                self.nodes[to.index()].identifier(),
            );
        }

        self.relations.push(Relation::new(id, from, to, label));
        self.nodes[from.index()].outlinks.push(id);
        self.nodes[to.index()].inlinks.push(id);
        id
    }

    /// Get a node by handle.
    ///
    /// Panics if the handle does not belong to this graph.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Get a relation by handle.
    ///
    /// Panics if the handle does not belong to this graph.
    pub fn relation(&self, id: RelationId) -> &Relation {
        &self.relations[id.index()]
    }

    /// Get an entity by handle.
    pub fn entity(&self, id: EntityId) -> &EntityNode {
        &self.entities[id.index()]
    }

    /// Get a component by handle.
    pub fn component(&self, id: ComponentId) -> &ComponentNode {
        &self.components[id.index()]
    }

    /// Canonical list of operation nodes, in registration order.
    pub fn operations(&self) -> &[NodeId] {
        &self.operations
    }

    /// Iterate over the top-level entity nodes.
    pub fn entities(&self) -> impl Iterator<Item = &EntityNode> {
        self.entities.iter()
    }

    /// The time-source node, if one exists.
    pub fn time_source(&self) -> Option<NodeId> {
        self.time_source
    }

    /// Total number of inner nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of relations in the graph.
    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
