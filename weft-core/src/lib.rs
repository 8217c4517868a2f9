//! Weft Core
//!
//! This crate provides the core dependency graph engine for the Weft
//! scene evaluation framework. It implements:
//!
//! - The dependency graph data model (operation nodes, relations,
//!   entity/component bookkeeping, the time source)
//! - Structural consistency validation over a built graph
//! - Per-graph debug configuration and evaluation tracing
//!
//! Graph construction from a scene description and the evaluation
//! scheduler itself live upstream and downstream of this crate; both
//! talk to the model defined here.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `graph`: arena-backed graph model and the population surface the
//!   builder fills in
//! - `consistency`: link-symmetry and valency validation, graph stats,
//!   quick comparison
//! - `debug`: named debug flags, graph naming, evaluation trace output
//!
//! # Example
//!
//! ```rust,ignore
//! use weft_core::graph::Graph;
//!
//! let mut graph = Graph::new();
//! let cube = graph.add_entity("Cube");
//! let transform = graph.add_component(cube, "transform");
//!
//! let local = graph.add_operation(transform, "Transform Local");
//! let world = graph.add_operation(transform, "Transform World");
//! graph.add_relation(local, world, "local -> world");
//!
//! // After building, the bookkeeping must hold up.
//! graph.check_consistency()?;
//! ```

pub mod consistency;
pub mod debug;
pub mod graph;
