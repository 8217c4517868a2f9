//! Debug Configuration
//!
//! Per-graph debug settings and evaluation trace output. Verbosity is
//! configured on each graph at construction as a set of named flags, so
//! two graphs in one process can be traced independently.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::Graph;

/// Named debug capabilities of a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugFlags {
    /// Log every relation added while the graph is built.
    pub log_build: bool,

    /// Log each operation evaluation as it is dispatched.
    pub log_eval: bool,

    /// Log evaluation timing.
    pub log_time: bool,
}

/// Debug configuration attached to a graph at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugSettings {
    /// Name rendered as a `[name]: ` prefix on this graph's debug
    /// output. Empty disables the prefix.
    pub name: String,

    /// Enabled debug capabilities.
    pub flags: DebugFlags,
}

impl DebugSettings {
    /// Settings with the given name and all flags off.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: DebugFlags::default(),
        }
    }
}

impl Graph {
    /// The graph's debug name.
    pub fn name(&self) -> &str {
        &self.debug.name
    }

    /// Set the graph's debug name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.debug.name = name.into();
    }

    /// The graph's debug flags.
    pub fn flags(&self) -> DebugFlags {
        self.debug.flags
    }

    /// Replace the graph's debug flags.
    pub fn set_flags(&mut self, flags: DebugFlags) {
        self.debug.flags = flags;
    }

    /// Prefix for this graph's log lines: `[name]: `, or nothing when
    /// the graph is unnamed.
    pub(crate) fn log_prefix(&self) -> String {
        if self.debug.name.is_empty() {
            String::new()
        } else {
            format!("[{}]: ", self.debug.name)
        }
    }

    /// Trace the evaluation of one operation. No-op unless `log_eval`
    /// is set.
    pub fn debug_print_eval(&self, function_name: &str, node_identifier: &str) {
        if !self.debug.flags.log_eval {
            return;
        }
        debug!(
            target: "weft::eval",
            "{}{} on {}",
            self.log_prefix(),
            function_name,
            node_identifier,
        );
    }

    /// Trace the evaluation of one operation at a specific scene time.
    /// No-op unless `log_time` is set.
    pub fn debug_print_eval_time(&self, function_name: &str, node_identifier: &str, time: f32) {
        if !self.debug.flags.log_time {
            return;
        }
        debug!(
            target: "weft::eval",
            "{}{} on {} at time {}",
            self.log_prefix(),
            function_name,
            node_identifier,
            time,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags_are_all_off() {
        let flags = DebugFlags::default();
        assert!(!flags.log_build);
        assert!(!flags.log_eval);
        assert!(!flags.log_time);
    }

    #[test]
    fn unnamed_graph_has_no_prefix() {
        let graph = Graph::new();
        assert_eq!(graph.log_prefix(), "");
    }

    #[test]
    fn named_graph_prefixes_its_output() {
        let graph = Graph::with_debug(DebugSettings::named("viewport"));
        assert_eq!(graph.name(), "viewport");
        assert_eq!(graph.log_prefix(), "[viewport]: ");
    }

    #[test]
    fn trace_helpers_are_inert_with_flags_off() {
        let mut graph = Graph::new();
        graph.debug_print_eval("evaluate_transform", "Cube/Transform");
        graph.debug_print_eval_time("evaluate_animation", "Cube/Animation", 12.0);

        graph.set_flags(DebugFlags {
            log_eval: true,
            log_time: true,
            log_build: false,
        });
        graph.debug_print_eval("evaluate_transform", "Cube/Transform");
        graph.debug_print_eval_time("evaluate_animation", "Cube/Animation", 12.0);
    }

    #[test]
    fn rename_updates_the_prefix() {
        let mut graph = Graph::new();
        graph.set_name("render");
        assert_eq!(graph.log_prefix(), "[render]: ");
        graph.set_name("");
        assert_eq!(graph.log_prefix(), "");
    }
}
