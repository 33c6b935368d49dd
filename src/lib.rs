pub mod config;
pub mod emitter;
pub mod error;
pub mod flow_parser;
pub mod graph;
pub mod graph_builder;
pub mod lexer;
pub mod presets;
pub mod reader;
pub mod renderer;
pub mod shapes;

pub use config::{Config, ConfigKey, OutputFormat};
pub use error::Error;
pub use graph::{DirectedGraph, Edge, Node};

use tracing::debug;

/// Parse a document into a graph with its resolved configuration.
///
/// Directives are resolved first because `auto_shapes` decides how nodes
/// are built.
pub fn compile(input: &str) -> Result<DirectedGraph, Error> {
    let lines = lexer::classify(input);
    let config = Config::resolve(&lines.directives)?;
    let (nodes, edges) = graph_builder::parse_flows(&lines.flows, config.auto_shapes)?;
    debug!(nodes = nodes.len(), edges = edges.len(), "compiled document");
    Ok(DirectedGraph {
        nodes,
        edges,
        config,
    })
}

pub fn compile_to_dot(input: &str) -> Result<String, Error> {
    compile(input).map(|graph| emitter::emit(&graph))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn compile_empty_document() {
        let graph = compile("").unwrap();
        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());
        assert_eq!(graph.config, Config::default());
    }

    #[test]
    fn compile_reads_directives_anywhere() {
        let graph = compile("A --> B\n% theme: dark\n").unwrap();
        assert_eq!(graph.config.graph_bgcolor, "black");
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn compile_fails_on_first_bad_directive() {
        let err = compile("% auto_shapes: maybe\nA --> B\n").unwrap_err();
        assert!(matches!(err, Error::InvalidValue { line: 1, .. }), "got {err:?}");
    }

    #[test]
    fn compile_to_dot_wraps_a_digraph() {
        let dot = compile_to_dot("A --> B\n").unwrap();
        assert!(dot.starts_with("// Flow\ndigraph {\n"));
        assert!(dot.contains("\tA -> B\n"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn graphs_can_cross_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DirectedGraph>();
    }
}
