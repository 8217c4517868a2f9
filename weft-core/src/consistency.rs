//! Graph Consistency Validation
//!
//! Structural checks over a fully built dependency graph. The graph
//! builder records every relation on both of its endpoints, and
//! evaluation scheduling trusts two pieces of derived bookkeeping; this
//! module verifies both after the fact:
//!
//! 1. Link symmetry: every relation handle appears in its source node's
//!    outlinks and its destination node's inlinks with equal multiplicity.
//! 2. Valency: the `num_links_pending` counter cached on each operation
//!    node matches the number of incoming relations from other operation
//!    nodes.
//!
//! # Failure Reporting
//!
//! Each detected inconsistency is reported as a human-readable
//! `tracing::error!` line and returned as a [`ConsistencyError`]. These
//! are recoverable validation results: the caller decides whether a
//! failure aborts a build or is merely logged. A pending counter
//! exceeding its node's inlink count is different: that cannot be
//! produced by inconsistent bookkeeping alone and indicates a bug in
//! graph construction, so it is a `debug_assert!` rather than an error
//! value.
//!
//! # Scratch State
//!
//! [`Graph::validate_valency`] zeroes and rebuilds the per-node
//! `num_links_pending` and `visited` scratch fields across the whole
//! graph. Any valency state a live evaluation was using is destroyed, so
//! validation must only run between evaluations. The `&mut self` receiver
//! makes the exclusivity requirement explicit.

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::graph::{Graph, RelationId};

/// A structural inconsistency detected in the graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsistencyError {
    /// A relation is recorded with different multiplicity on its two
    /// endpoints.
    #[error(
        "relation '{label}' recorded {outgoing} time(s) in the outgoing list of '{from}' \
         but {incoming} time(s) in the incoming list of '{to}'"
    )]
    AsymmetricLink {
        label: String,
        from: String,
        to: String,
        outgoing: usize,
        incoming: usize,
    },

    /// The same node appears more than once in the canonical operation
    /// list.
    #[error("operation '{identifier}' is registered twice in the operation list")]
    DuplicateOperation { identifier: String },

    /// A node's cached valency disagrees with its recomputed in-degree.
    #[error(
        "valency mismatch on '{identifier}': cached {cached}, recomputed {recomputed} \
         ({inlinks} inlinks)"
    )]
    ValencyMismatch {
        identifier: String,
        cached: u32,
        recomputed: u32,
        inlinks: usize,
    },
}

/// Aggregate size figures for a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Number of nodes in the canonical operation list.
    pub operations: usize,

    /// Number of outer nodes: one per entity plus one per component.
    pub outer_nodes: usize,

    /// Number of relations, tallied over component operations plus the
    /// time source.
    pub relations: usize,
}

/// Occurrences of `rel` in an ordered link list.
fn count_links(links: &[RelationId], rel: RelationId) -> usize {
    links.iter().filter(|&&r| r == rel).count()
}

impl Graph {
    /// Verify that every relation is recorded on both of its endpoints
    /// with equal multiplicity.
    ///
    /// Scans every operation node's outlinks against the destination
    /// inlinks, then every inlink against the source outlinks. Both scan
    /// directions fail fast on the first mismatch found.
    pub fn validate_link_symmetry(&self) -> Result<(), ConsistencyError> {
        for &node_id in &self.operations {
            let node = self.node(node_id);
            for &rel_id in node.outlinks() {
                let rel = self.relation(rel_id);
                let outgoing = count_links(node.outlinks(), rel_id);
                let incoming = count_links(self.node(rel.to()).inlinks(), rel_id);
                if outgoing != incoming {
                    return Err(self.report_asymmetric_link(rel_id, outgoing, incoming));
                }
            }
        }

        for &node_id in &self.operations {
            let node = self.node(node_id);
            for &rel_id in node.inlinks() {
                let rel = self.relation(rel_id);
                let incoming = count_links(node.inlinks(), rel_id);
                let outgoing = count_links(self.node(rel.from()).outlinks(), rel_id);
                if outgoing != incoming {
                    return Err(self.report_asymmetric_link(rel_id, outgoing, incoming));
                }
            }
        }

        Ok(())
    }

    fn report_asymmetric_link(
        &self,
        rel_id: RelationId,
        outgoing: usize,
        incoming: usize,
    ) -> ConsistencyError {
        let rel = self.relation(rel_id);
        let err = ConsistencyError::AsymmetricLink {
            label: rel.label().to_owned(),
            from: self.node(rel.from()).identifier().to_owned(),
            to: self.node(rel.to()).identifier().to_owned(),
            outgoing,
            incoming,
        };
        error!(target: "weft::validate", "{}{}", self.log_prefix(), err);
        err
    }

    /// Verify that each operation node's cached valency matches its
    /// actual structural in-degree.
    ///
    /// Only operation-to-operation relations count towards valency; a
    /// relation from the time source does not make its destination wait.
    ///
    /// This resets `num_links_pending` and the visited marker on every
    /// node before recounting, destroying any in-flight evaluation state.
    /// Must not run while the graph is being evaluated.
    pub fn validate_valency(&mut self) -> Result<(), ConsistencyError> {
        for node in &mut self.nodes {
            node.num_links_pending = 0;
            node.visited = false;
        }

        // Pass 1: accumulate valency from the outgoing side, catching
        // nodes registered twice along the way.
        for i in 0..self.operations.len() {
            let node_id = self.operations[i];
            if self.node(node_id).visited {
                let err = ConsistencyError::DuplicateOperation {
                    identifier: self.node(node_id).identifier().to_owned(),
                };
                error!(target: "weft::validate", "{}{}", self.log_prefix(), err);
                return Err(err);
            }
            let outlinks = self.node(node_id).outlinks.clone();
            for rel_id in outlinks {
                let to = self.relation(rel_id).to();
                if self.node(to).is_operation() {
                    let dest = self.node_mut(to);
                    debug_assert!(
                        (dest.num_links_pending as usize) < dest.inlinks.len(),
                        "pending link count on '{}' exceeds its inlink count",
                        dest.identifier(),
                    );
                    dest.num_links_pending += 1;
                }
            }
            self.node_mut(node_id).visited = true;
        }

        // Pass 2: recompute the in-degree independently from the incoming
        // side and compare.
        for &node_id in &self.operations {
            let node = self.node(node_id);
            let recomputed = node
                .inlinks()
                .iter()
                .filter(|&&rel_id| self.node(self.relation(rel_id).from()).is_operation())
                .count() as u32;
            if node.num_links_pending() != recomputed {
                let err = ConsistencyError::ValencyMismatch {
                    identifier: node.identifier().to_owned(),
                    cached: node.num_links_pending(),
                    recomputed,
                    inlinks: node.inlinks().len(),
                };
                error!(target: "weft::validate", "{}{}", self.log_prefix(), err);
                return Err(err);
            }
        }

        Ok(())
    }

    /// Run the full consistency check: link symmetry, then valency.
    pub fn check_consistency(&mut self) -> Result<(), ConsistencyError> {
        self.validate_link_symmetry()?;
        self.validate_valency()
    }

    /// Collect aggregate size figures for the graph.
    ///
    /// Read-only; safe to call alongside other read-only traversal.
    pub fn collect_stats(&self) -> GraphStats {
        let mut outer_nodes = 0;
        let mut relations = 0;

        for entity in &self.entities {
            outer_nodes += 1;
            for &component_id in entity.components.values() {
                outer_nodes += 1;
                for &op_id in &self.component(component_id).operations {
                    relations += self.node(op_id).inlinks().len();
                }
            }
        }

        if let Some(time_source) = self.time_source {
            relations += self.node(time_source).inlinks().len();
        }

        GraphStats {
            operations: self.operations.len(),
            outer_nodes,
            relations,
        }
    }
}

/// Cheap comparison of two graphs by operation count alone.
///
/// This is deliberately shallow: a proper structural comparison amounts
/// to graph isomorphism, which is not worth the cost here. A `true`
/// result therefore only means "no gross size discrepancy"; the two
/// graphs may still differ completely in their relation structure.
pub fn quick_compare(a: &Graph, b: &Graph) -> bool {
    a.operations.len() == b.operations.len()
}
