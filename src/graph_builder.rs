use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::error::Error;
use crate::flow_parser::{FlowStep, tokenize_flow};
use crate::graph::{Edge, Node};
use crate::lexer::SourceLine;
use crate::shapes::classify_shape;

/// Accumulates nodes and edges from flow lines. Each distinct name gets a
/// single `Arc<Node>`; later references share it.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    auto_shapes: bool,
    index: HashMap<String, Arc<Node>>,
    nodes: Vec<Arc<Node>>,
    edges: Vec<Edge>,
}

impl GraphBuilder {
    pub fn new(auto_shapes: bool) -> Self {
        Self {
            auto_shapes,
            ..Self::default()
        }
    }

    /// Add every edge of one flow line. Lines too short for an edge are
    /// skipped; a malformed arrow fails the whole line.
    pub fn add_flow(&mut self, line: &SourceLine<'_>) -> Result<(), Error> {
        let steps = match tokenize_flow(line) {
            Ok(steps) => steps,
            Err(err @ Error::EmptyFlow { .. }) => {
                warn!("skipping flow line: {err}");
                return Ok(());
            }
            Err(err) => return Err(err),
        };
        for step in steps {
            self.add_step(step);
        }
        Ok(())
    }

    pub fn add_step(&mut self, step: FlowStep<'_>) {
        let src = self.node(step.src);
        let dst = self.node(step.dst);
        self.edges.push(Edge {
            src,
            dst,
            label: step.label,
        });
    }

    fn node(&mut self, name: &str) -> Arc<Node> {
        if let Some(node) = self.index.get(name) {
            return Arc::clone(node);
        }
        let shape = self.auto_shapes.then(|| classify_shape(name));
        let node = Arc::new(Node::new(name, shape));
        self.index.insert(name.to_string(), Arc::clone(&node));
        self.nodes.push(Arc::clone(&node));
        node
    }

    pub fn finish(self) -> (Vec<Arc<Node>>, Vec<Edge>) {
        (self.nodes, self.edges)
    }
}

/// Build nodes and edges from flow lines in one go.
pub fn parse_flows(
    lines: &[SourceLine<'_>],
    auto_shapes: bool,
) -> Result<(Vec<Arc<Node>>, Vec<Edge>), Error> {
    let mut builder = GraphBuilder::new(auto_shapes);
    for line in lines {
        builder.add_flow(line)?;
    }
    Ok(builder.finish())
}
