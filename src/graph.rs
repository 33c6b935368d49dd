use std::sync::Arc;

use crate::config::Config;
use crate::shapes::ShapeCategory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub label: String,
    pub shape: Option<ShapeCategory>,
}

impl Node {
    pub fn new(name: impl Into<String>, shape: Option<ShapeCategory>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            shape,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub src: Arc<Node>,
    pub dst: Arc<Node>,
    pub label: Option<String>,
}

/// Everything the emitter needs: nodes in first-seen order, edges in source
/// order, and the resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectedGraph {
    pub nodes: Vec<Arc<Node>>,
    pub edges: Vec<Edge>,
    pub config: Config,
}

impl DirectedGraph {
    pub fn node(&self, name: &str) -> Option<&Arc<Node>> {
        self.nodes.iter().find(|n| n.name == name)
    }
}
