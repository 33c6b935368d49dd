//! Graphviz DOT output.

use crate::config::{Config, ConfigKey, KeyGroup};
use crate::graph::{DirectedGraph, Edge, Node};

pub fn emit(graph: &DirectedGraph) -> String {
    let mut out = String::new();

    out.push_str(&format!("// {}\n", graph.config.comment));
    out.push_str("digraph {\n");

    for (statement, group) in [
        ("graph", KeyGroup::Graph),
        ("node", KeyGroup::Node),
        ("edge", KeyGroup::Edge),
    ] {
        let attrs = default_attributes(&graph.config, group);
        out.push_str(&format!("\t{statement} {}\n", attr_list(&attrs)));
    }

    for node in &graph.nodes {
        emit_node(&mut out, node);
    }
    for edge in &graph.edges {
        emit_edge(&mut out, edge);
    }

    out.push_str("}\n");
    out
}

fn default_attributes(config: &Config, group: KeyGroup) -> Vec<(&'static str, String)> {
    ConfigKey::in_group(group)
        .map(|key| (key.attribute(), config.value(key).into_owned()))
        .collect()
}

fn emit_node(out: &mut String, node: &Node) {
    let mut attrs = vec![("label", node.label.clone())];
    if let Some(shape) = node.shape.and_then(|s| s.dot_shape()) {
        attrs.push(("shape", shape.to_string()));
    }
    out.push_str(&format!(
        "\t{} {}\n",
        quote_id(&node.name),
        attr_list(&attrs)
    ));
}

fn emit_edge(out: &mut String, edge: &Edge) {
    out.push_str(&format!(
        "\t{} -> {}",
        quote_id(&edge.src.name),
        quote_id(&edge.dst.name)
    ));
    if let Some(label) = &edge.label {
        out.push(' ');
        out.push_str(&attr_list(&[("xlabel", label.clone())]));
    }
    out.push('\n');
}

fn attr_list(attrs: &[(&str, String)]) -> String {
    let body: Vec<String> = attrs
        .iter()
        .map(|(name, value)| format!("{name}={}", quote_id(value)))
        .collect();
    format!("[{}]", body.join(" "))
}

const KEYWORDS: [&str; 6] = ["node", "edge", "graph", "digraph", "subgraph", "strict"];

/// Leave DOT identifiers and numerals bare, double-quote everything else.
///
/// Backslashes are doubled before quotes are escaped, so a trailing `\`
/// cannot swallow the closing quote and `\N`-style sequences stay literal.
pub fn quote_id(id: &str) -> String {
    let keyword = KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(id));
    if !keyword && (is_identifier(id) || is_numeral(id)) {
        return id.to_string();
    }
    let escaped = id.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

fn is_identifier(id: &str) -> bool {
    let mut chars = id.chars();
    let word = |c: char| c == '_' || c.is_ascii_alphabetic() || !c.is_ascii();
    match chars.next() {
        Some(first) if word(first) => chars.all(|c| word(c) || c.is_ascii_digit()),
        _ => false,
    }
}

fn is_numeral(id: &str) -> bool {
    let digits = id.strip_prefix('-').unwrap_or(id);
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    match frac {
        None => !int.is_empty() && all_digits(int),
        Some(frac) => all_digits(int) && all_digits(frac) && !(int.is_empty() && frac.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn node(name: &str) -> Arc<Node> {
        Arc::new(Node::new(name, None))
    }

    #[test]
    fn quote_plain_identifiers() {
        assert_eq!(quote_id("Sun"), "Sun");
        assert_eq!(quote_id("_a1"), "_a1");
        assert_eq!(quote_id("Café"), "Café");
    }

    #[test]
    fn quote_numerals() {
        assert_eq!(quote_id("300"), "300");
        assert_eq!(quote_id("0.8"), "0.8");
        assert_eq!(quote_id(".5"), ".5");
        assert_eq!(quote_id("-1"), "-1");
        assert_eq!(quote_id("0.15,0.1"), "\"0.15,0.1\"");
        assert_eq!(quote_id("."), "\".\"");
    }

    #[test]
    fn quote_everything_else() {
        assert_eq!(quote_id("#00FF00"), "\"#00FF00\"");
        assert_eq!(quote_id("my-node"), "\"my-node\"");
        assert_eq!(quote_id("1abc"), "\"1abc\"");
        assert_eq!(quote_id(""), "\"\"");
        assert_eq!(quote_id("say\"hi\""), "\"say\\\"hi\\\"\"");
    }

    #[test]
    fn quote_backslashes() {
        assert_eq!(quote_id("C\\"), "\"C\\\\\"");
        assert_eq!(quote_id("a\\Nb"), "\"a\\\\Nb\"");
        assert_eq!(quote_id("q\\\""), "\"q\\\\\\\"\"");
    }

    #[test]
    fn quote_keywords() {
        assert_eq!(quote_id("node"), "\"node\"");
        assert_eq!(quote_id("Graph"), "\"Graph\"");
    }

    #[test]
    fn edge_without_label_has_no_attributes() {
        let mut out = String::new();
        let edge = Edge {
            src: node("A"),
            dst: node("B"),
            label: None,
        };
        emit_edge(&mut out, &edge);
        assert_eq!(out, "\tA -> B\n");
    }

    #[test]
    fn edge_label_is_an_xlabel() {
        let mut out = String::new();
        let edge = Edge {
            src: node("A"),
            dst: node("B"),
            label: Some("go on".to_string()),
        };
        emit_edge(&mut out, &edge);
        assert_eq!(out, "\tA -> B [xlabel=\"go on\"]\n");
    }

    #[test]
    fn node_shape_only_when_it_maps_to_dot() {
        use crate::shapes::ShapeCategory;

        let mut out = String::new();
        emit_node(&mut out, &Node::new("Ask?", Some(ShapeCategory::Decision)));
        emit_node(&mut out, &Node::new("Sun", Some(ShapeCategory::Default)));
        emit_node(&mut out, &Node::new("Rain", None));
        assert_eq!(
            out,
            "\t\"Ask?\" [label=\"Ask?\" shape=diamond]\n\tSun [label=Sun]\n\tRain [label=Rain]\n"
        );
    }

    #[test]
    fn default_attributes_follow_key_order() {
        let attrs = default_attributes(&Config::default(), KeyGroup::Edge);
        let names: Vec<&str> = attrs.iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            vec!["arrowhead", "penwidth", "fontname", "fontsize", "color", "fontcolor"]
        );
    }
}
