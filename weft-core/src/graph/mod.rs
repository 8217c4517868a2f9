//! Dependency Graph
//!
//! This module implements the data model for the scene dependency graph:
//! operation nodes connected by directed relations, grouped under
//! entity/component outer nodes.
//!
//! # Overview
//!
//! The graph is a directed acyclic graph (DAG) where:
//!
//! - Inner nodes represent units of scheduled work (operations) plus the
//!   distinguished global time source
//! - Relations represent dependencies: a relation `A -> B` means B must
//!   wait for A
//!
//! An upstream builder populates the graph from a scene description;
//! evaluation scheduling consumes the canonical operation list and the
//! per-node valency counters. Neither lives in this crate; the model
//! here is the surface both sides share, and what the consistency
//! validator inspects.
//!
//! # Design Decisions
//!
//! 1. Nodes and relations live in arenas owned by the [`Graph`] and are
//!    referenced by `Copy` integer handles. Identity comparison is
//!    integer equality, and handles stay stable for the graph's lifetime.
//!
//! 2. Every relation is recorded on both endpoints (outlinks on the
//!    source, inlinks on the destination) to enable traversal in both
//!    directions. The two lists are ordered and may legitimately carry
//!    duplicate handles.
//!
//! 3. Outer nodes (entities and their components) are bookkeeping over
//!    the operations, not relation endpoints; stats and reporting walk
//!    them, evaluation does not.

mod node;
mod relation;
mod store;

pub use node::{ComponentId, ComponentNode, EntityId, EntityNode, Node, NodeId, NodeKind};
pub use relation::{Relation, RelationId};
pub use store::Graph;
