//! Named bundles of configuration values.
//!
//! A diagram type sets layout keys, a color scheme sets color keys. Both
//! tables are plain static data.

use std::fmt;

use crate::config::ConfigKey;
use crate::config::ConfigKey::*;

type Overrides = &'static [(ConfigKey, &'static str)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramType {
    Basic,
    Flow,
    Tree,
    Network,
    State,
}

static DIAGRAM_TYPES: &[(DiagramType, &str, Overrides)] = &[
    (
        DiagramType::Basic,
        "basic",
        &[
            (GraphRankdir, "TB"),
            (GraphSplines, "ortho"),
            (NodeShape, "box"),
            (NodeFontname, "Courier"),
            (EdgeFontname, "Courier"),
            (EdgeArrowhead, "normal"),
        ],
    ),
    (
        DiagramType::Flow,
        "flow",
        &[
            (GraphRankdir, "LR"),
            (GraphSplines, "ortho"),
            (NodeShape, "box"),
            (NodeFontname, "Helvetica"),
            (EdgeFontname, "Helvetica"),
            (EdgeArrowhead, "normal"),
        ],
    ),
    (
        DiagramType::Tree,
        "tree",
        &[
            (GraphRankdir, "TB"),
            (GraphSplines, "line"),
            (NodeShape, "ellipse"),
            (NodeFontname, "Helvetica"),
            (EdgeFontname, "Helvetica"),
            (EdgeArrowhead, "vee"),
        ],
    ),
    (
        DiagramType::Network,
        "network",
        &[
            (GraphRankdir, "LR"),
            (GraphSplines, "spline"),
            (NodeShape, "circle"),
            (NodeFontname, "Helvetica"),
            (EdgeFontname, "Helvetica"),
            (EdgeArrowhead, "dot"),
        ],
    ),
    (
        DiagramType::State,
        "state",
        &[
            (GraphRankdir, "LR"),
            (GraphSplines, "curved"),
            (NodeShape, "ellipse"),
            (NodeFontname, "Helvetica"),
            (EdgeFontname, "Helvetica"),
            (EdgeArrowhead, "vee"),
        ],
    ),
];

impl DiagramType {
    pub fn all() -> impl Iterator<Item = DiagramType> {
        DIAGRAM_TYPES.iter().map(|(t, _, _)| *t)
    }

    pub fn name(self) -> &'static str {
        entry(DIAGRAM_TYPES, self).1
    }

    pub fn from_name(name: &str) -> Option<Self> {
        lookup(DIAGRAM_TYPES, name)
    }

    pub fn overrides(self) -> Overrides {
        entry(DIAGRAM_TYPES, self).2
    }
}

impl fmt::Display for DiagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    Light,
    Dark,
    Matrix,
    Transparent,
}

static COLOR_SCHEMES: &[(ColorScheme, &str, Overrides)] = &[
    (
        ColorScheme::Light,
        "light",
        &[
            (GraphBgcolor, "white"),
            (NodeFillcolor, "white"),
            (NodeFontcolor, "black"),
            (NodeColor, "black"),
            (EdgeColor, "black"),
            (EdgeFontcolor, "black"),
        ],
    ),
    (
        ColorScheme::Dark,
        "dark",
        &[
            (GraphBgcolor, "black"),
            (NodeFillcolor, "black"),
            (NodeFontcolor, "white"),
            (NodeColor, "white"),
            (EdgeColor, "white"),
            (EdgeFontcolor, "white"),
        ],
    ),
    (
        ColorScheme::Matrix,
        "matrix",
        &[
            (GraphBgcolor, "black"),
            (NodeFillcolor, "#001100"),
            (NodeFontcolor, "#00FF00"),
            (NodeColor, "#00FF00"),
            (EdgeColor, "#00FF00"),
            (EdgeFontcolor, "#00FF00"),
        ],
    ),
    (
        ColorScheme::Transparent,
        "transparent",
        &[
            (GraphBgcolor, "transparent"),
            (NodeFillcolor, "transparent"),
            (NodeFontcolor, "white"),
            (NodeColor, "white"),
            (EdgeColor, "white"),
            (EdgeFontcolor, "white"),
        ],
    ),
];

impl ColorScheme {
    pub fn all() -> impl Iterator<Item = ColorScheme> {
        COLOR_SCHEMES.iter().map(|(s, _, _)| *s)
    }

    pub fn name(self) -> &'static str {
        entry(COLOR_SCHEMES, self).1
    }

    pub fn from_name(name: &str) -> Option<Self> {
        lookup(COLOR_SCHEMES, name)
    }

    pub fn overrides(self) -> Overrides {
        entry(COLOR_SCHEMES, self).2
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Every enum variant has a row, so the lookup cannot miss.
fn entry<T: PartialEq + Copy>(
    table: &'static [(T, &'static str, Overrides)],
    preset: T,
) -> &'static (T, &'static str, Overrides) {
    table
        .iter()
        .find(|(p, _, _)| *p == preset)
        .unwrap_or(&table[0])
}

fn lookup<T: Copy>(table: &[(T, &str, Overrides)], name: &str) -> Option<T> {
    table
        .iter()
        .find(|(_, n, _)| n.eq_ignore_ascii_case(name))
        .map(|(p, _, _)| *p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_diagram_type_round_trips_its_name() {
        for t in DiagramType::all() {
            assert_eq!(DiagramType::from_name(t.name()), Some(t));
        }
    }

    #[test]
    fn every_color_scheme_round_trips_its_name() {
        for s in ColorScheme::all() {
            assert_eq!(ColorScheme::from_name(s.name()), Some(s));
        }
    }

    #[test]
    fn preset_names_are_case_insensitive() {
        assert_eq!(ColorScheme::from_name("Dark"), Some(ColorScheme::Dark));
        assert_eq!(DiagramType::from_name("FLOW"), Some(DiagramType::Flow));
    }

    #[test]
    fn unknown_preset_names() {
        assert_eq!(ColorScheme::from_name("neon"), None);
        assert_eq!(DiagramType::from_name(""), None);
    }

    #[test]
    fn diagram_types_only_touch_layout_keys() {
        for t in DiagramType::all() {
            for (key, _) in t.overrides() {
                assert!(
                    !key.name().contains("color"),
                    "{t} overrides color key {}",
                    key.name()
                );
            }
        }
    }

    #[test]
    fn color_schemes_only_touch_color_keys() {
        for s in ColorScheme::all() {
            for (key, _) in s.overrides() {
                assert!(key.name().ends_with("color"), "{s} overrides {}", key.name());
            }
        }
    }

    #[test]
    fn matrix_scheme_values() {
        let overrides = ColorScheme::Matrix.overrides();
        assert!(overrides.contains(&(NodeFillcolor, "#001100")));
        assert!(overrides.contains(&(EdgeFontcolor, "#00FF00")));
    }
}
