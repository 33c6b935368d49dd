//! Resolve `% key: value` directives into one complete [`Config`].
//!
//! Layers, lowest first: baseline defaults, the diagram-type preset, the
//! color-scheme preset, then explicit keys in document order. A preset
//! directive never overrides an explicit key, wherever it appears.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use tracing::debug;
use winnow::ascii::space0;
use winnow::prelude::*;
use winnow::token::{rest, take_while};

use crate::error::{Error, PresetKind};
use crate::lexer::{SourceLine, directive_marker, number_lines};
use crate::presets::{ColorScheme, DiagramType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigKey {
    Comment,
    OutputFile,
    OutputFormat,
    Theme,
    Type,
    AutoShapes,

    GraphBgcolor,
    GraphDpi,
    GraphRankdir,
    GraphSplines,
    GraphPad,
    GraphNodesep,
    GraphRanksep,

    NodeShape,
    NodeStyle,
    NodeFontname,
    NodeFontsize,
    NodeFontcolor,
    NodeFillcolor,
    NodeColor,
    NodeMargin,

    EdgeArrowhead,
    EdgePenwidth,
    EdgeFontname,
    EdgeFontsize,
    EdgeColor,
    EdgeFontcolor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyGroup {
    Identity,
    Graph,
    Node,
    Edge,
}

impl ConfigKey {
    /// Declaration order, which is also emission order.
    pub const ALL: [ConfigKey; 27] = [
        ConfigKey::Comment,
        ConfigKey::OutputFile,
        ConfigKey::OutputFormat,
        ConfigKey::Theme,
        ConfigKey::Type,
        ConfigKey::AutoShapes,
        ConfigKey::GraphBgcolor,
        ConfigKey::GraphDpi,
        ConfigKey::GraphRankdir,
        ConfigKey::GraphSplines,
        ConfigKey::GraphPad,
        ConfigKey::GraphNodesep,
        ConfigKey::GraphRanksep,
        ConfigKey::NodeShape,
        ConfigKey::NodeStyle,
        ConfigKey::NodeFontname,
        ConfigKey::NodeFontsize,
        ConfigKey::NodeFontcolor,
        ConfigKey::NodeFillcolor,
        ConfigKey::NodeColor,
        ConfigKey::NodeMargin,
        ConfigKey::EdgeArrowhead,
        ConfigKey::EdgePenwidth,
        ConfigKey::EdgeFontname,
        ConfigKey::EdgeFontsize,
        ConfigKey::EdgeColor,
        ConfigKey::EdgeFontcolor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ConfigKey::Comment => "comment",
            ConfigKey::OutputFile => "output_file",
            ConfigKey::OutputFormat => "output_format",
            ConfigKey::Theme => "theme",
            ConfigKey::Type => "type",
            ConfigKey::AutoShapes => "auto_shapes",
            ConfigKey::GraphBgcolor => "graph_bgcolor",
            ConfigKey::GraphDpi => "graph_dpi",
            ConfigKey::GraphRankdir => "graph_rankdir",
            ConfigKey::GraphSplines => "graph_splines",
            ConfigKey::GraphPad => "graph_pad",
            ConfigKey::GraphNodesep => "graph_nodesep",
            ConfigKey::GraphRanksep => "graph_ranksep",
            ConfigKey::NodeShape => "node_shape",
            ConfigKey::NodeStyle => "node_style",
            ConfigKey::NodeFontname => "node_fontname",
            ConfigKey::NodeFontsize => "node_fontsize",
            ConfigKey::NodeFontcolor => "node_fontcolor",
            ConfigKey::NodeFillcolor => "node_fillcolor",
            ConfigKey::NodeColor => "node_color",
            ConfigKey::NodeMargin => "node_margin",
            ConfigKey::EdgeArrowhead => "edge_arrowhead",
            ConfigKey::EdgePenwidth => "edge_penwidth",
            ConfigKey::EdgeFontname => "edge_fontname",
            ConfigKey::EdgeFontsize => "edge_fontsize",
            ConfigKey::EdgeColor => "edge_color",
            ConfigKey::EdgeFontcolor => "edge_fontcolor",
        }
    }

    /// Exact, case-sensitive lookup. `colors` is an alias for `theme`.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "colors" {
            return Some(ConfigKey::Theme);
        }
        ConfigKey::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn group(self) -> KeyGroup {
        let name = self.name();
        if name.starts_with("graph_") {
            KeyGroup::Graph
        } else if name.starts_with("node_") {
            KeyGroup::Node
        } else if name.starts_with("edge_") {
            KeyGroup::Edge
        } else {
            KeyGroup::Identity
        }
    }

    /// Graphviz attribute name: the key without its group prefix.
    pub fn attribute(self) -> &'static str {
        let name = self.name();
        match name.split_once('_') {
            Some((_, attr)) if self.group() != KeyGroup::Identity => attr,
            _ => name,
        }
    }

    pub fn in_group(group: KeyGroup) -> impl Iterator<Item = ConfigKey> {
        ConfigKey::ALL.into_iter().filter(move |k| k.group() == group)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    #[default]
    Svg,
    Png,
    Pdf,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
            OutputFormat::Pdf => "pdf",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "png" => Ok(OutputFormat::Png),
            "pdf" => Ok(OutputFormat::Pdf),
            _ => Err(format!("unsupported output format: {s}")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub comment: String,
    pub output_file: String,
    pub output_format: OutputFormat,
    pub theme: ColorScheme,
    pub diagram_type: DiagramType,
    pub auto_shapes: bool,

    pub graph_bgcolor: String,
    pub graph_dpi: String,
    pub graph_rankdir: String,
    pub graph_splines: String,
    pub graph_pad: String,
    pub graph_nodesep: String,
    pub graph_ranksep: String,

    pub node_shape: String,
    pub node_style: String,
    pub node_fontname: String,
    pub node_fontsize: String,
    pub node_fontcolor: String,
    pub node_fillcolor: String,
    pub node_color: String,
    pub node_margin: String,

    pub edge_arrowhead: String,
    pub edge_penwidth: String,
    pub edge_fontname: String,
    pub edge_fontsize: String,
    pub edge_color: String,
    pub edge_fontcolor: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            comment: "Flow".into(),
            output_file: "flow".into(),
            output_format: OutputFormat::Svg,
            theme: ColorScheme::Light,
            diagram_type: DiagramType::Basic,
            auto_shapes: true,

            graph_bgcolor: "white".into(),
            graph_dpi: "300".into(),
            graph_rankdir: "TB".into(),
            graph_splines: "ortho".into(),
            graph_pad: "0.2".into(),
            graph_nodesep: "1".into(),
            graph_ranksep: "0.8".into(),

            node_shape: "box".into(),
            node_style: "filled".into(),
            node_fontname: "Courier".into(),
            node_fontsize: "12".into(),
            node_fontcolor: "black".into(),
            node_fillcolor: "white".into(),
            node_color: "black".into(),
            node_margin: "0.15,0.1".into(),

            edge_arrowhead: "normal".into(),
            edge_penwidth: "0.8".into(),
            edge_fontname: "Courier".into(),
            edge_fontsize: "12".into(),
            edge_color: "black".into(),
            edge_fontcolor: "black".into(),
        }
    }
}

/// One validated directive.
#[derive(Debug, Clone, PartialEq)]
enum Setting {
    Type(DiagramType),
    Theme(ColorScheme),
    AutoShapes(bool),
    OutputFormat(OutputFormat),
    Text(ConfigKey, String),
}

impl Config {
    pub fn resolve(directives: &[SourceLine<'_>]) -> Result<Config, Error> {
        let settings = directives
            .iter()
            .map(parse_directive)
            .collect::<Result<Vec<_>, _>>()?;

        let mut config = Config::default();

        let diagram_type = settings.iter().rev().find_map(|s| match s {
            Setting::Type(t) => Some(*t),
            _ => None,
        });
        if let Some(t) = diagram_type {
            config.apply_diagram_type(t);
        }

        let theme = settings.iter().rev().find_map(|s| match s {
            Setting::Theme(t) => Some(*t),
            _ => None,
        });
        if let Some(t) = theme {
            config.apply_color_scheme(t);
        }

        for setting in settings {
            match setting {
                Setting::Type(_) | Setting::Theme(_) => {}
                Setting::AutoShapes(on) => config.auto_shapes = on,
                Setting::OutputFormat(format) => config.output_format = format,
                Setting::Text(key, value) => {
                    if let Some(slot) = config.text_slot_mut(key) {
                        *slot = value;
                    }
                }
            }
        }

        debug!(
            directives = directives.len(),
            diagram_type = %config.diagram_type,
            theme = %config.theme,
            auto_shapes = config.auto_shapes,
            "resolved configuration"
        );
        Ok(config)
    }

    /// Resolve plain directive strings, numbering them from 1.
    pub fn from_lines(lines: &[&str]) -> Result<Config, Error> {
        Config::resolve(&number_lines(lines))
    }

    pub fn apply_diagram_type(&mut self, diagram_type: DiagramType) {
        self.diagram_type = diagram_type;
        self.overlay(diagram_type.overrides());
    }

    pub fn apply_color_scheme(&mut self, scheme: ColorScheme) {
        self.theme = scheme;
        self.overlay(scheme.overrides());
    }

    fn overlay(&mut self, overrides: &[(ConfigKey, &str)]) {
        for (key, value) in overrides {
            if let Some(slot) = self.text_slot_mut(*key) {
                *slot = (*value).to_string();
            }
        }
    }

    /// Current value of any key, rendered as text.
    pub fn value(&self, key: ConfigKey) -> Cow<'_, str> {
        match key {
            ConfigKey::OutputFormat => Cow::Borrowed(self.output_format.extension()),
            ConfigKey::Theme => Cow::Borrowed(self.theme.name()),
            ConfigKey::Type => Cow::Borrowed(self.diagram_type.name()),
            ConfigKey::AutoShapes => Cow::Owned(self.auto_shapes.to_string()),
            _ => Cow::Borrowed(self.text_slot(key).map(String::as_str).unwrap_or_default()),
        }
    }
}

/// Free-text keys and the field each one fills. Typed keys are absent.
macro_rules! text_slots {
    ($($key:ident => $field:ident),* $(,)?) => {
        impl Config {
            fn text_slot(&self, key: ConfigKey) -> Option<&String> {
                match key {
                    $(ConfigKey::$key => Some(&self.$field),)*
                    _ => None,
                }
            }

            fn text_slot_mut(&mut self, key: ConfigKey) -> Option<&mut String> {
                match key {
                    $(ConfigKey::$key => Some(&mut self.$field),)*
                    _ => None,
                }
            }
        }
    };
}

text_slots! {
    Comment => comment,
    OutputFile => output_file,
    GraphBgcolor => graph_bgcolor,
    GraphDpi => graph_dpi,
    GraphRankdir => graph_rankdir,
    GraphSplines => graph_splines,
    GraphPad => graph_pad,
    GraphNodesep => graph_nodesep,
    GraphRanksep => graph_ranksep,
    NodeShape => node_shape,
    NodeStyle => node_style,
    NodeFontname => node_fontname,
    NodeFontsize => node_fontsize,
    NodeFontcolor => node_fontcolor,
    NodeFillcolor => node_fillcolor,
    NodeColor => node_color,
    NodeMargin => node_margin,
    EdgeArrowhead => edge_arrowhead,
    EdgePenwidth => edge_penwidth,
    EdgeFontname => edge_fontname,
    EdgeFontsize => edge_fontsize,
    EdgeColor => edge_color,
    EdgeFontcolor => edge_fontcolor,
}

/// `% key: value`, split at the first colon.
fn directive<'s>(input: &mut &'s str) -> winnow::Result<(&'s str, &'s str)> {
    directive_marker.parse_next(input)?;
    space0.parse_next(input)?;
    let key = take_while(1.., |c: char| c.is_alphanumeric() || c == '_').parse_next(input)?;
    space0.parse_next(input)?;
    ':'.parse_next(input)?;
    space0.parse_next(input)?;
    let value = rest.parse_next(input)?;
    Ok((key, value.trim_end()))
}

fn parse_directive(line: &SourceLine<'_>) -> Result<Setting, Error> {
    let (key, value) = directive
        .parse(line.text)
        .map_err(|_| Error::MalformedDirective {
            line: line.number,
            text: line.text.to_string(),
        })?;

    let config_key = ConfigKey::from_name(key).ok_or_else(|| Error::UnknownConfigKey {
        line: line.number,
        key: key.to_string(),
    })?;

    let invalid = || Error::InvalidValue {
        line: line.number,
        key: key.to_string(),
        value: value.to_string(),
    };

    let setting = match config_key {
        ConfigKey::Type => Setting::Type(DiagramType::from_name(value).ok_or_else(|| {
            Error::UnknownPreset {
                line: line.number,
                kind: PresetKind::DiagramType,
                name: value.to_string(),
            }
        })?),
        ConfigKey::Theme => Setting::Theme(ColorScheme::from_name(value).ok_or_else(|| {
            Error::UnknownPreset {
                line: line.number,
                kind: PresetKind::ColorScheme,
                name: value.to_string(),
            }
        })?),
        ConfigKey::AutoShapes => Setting::AutoShapes(parse_bool(value).ok_or_else(invalid)?),
        ConfigKey::OutputFormat => {
            Setting::OutputFormat(value.parse().map_err(|_| invalid())?)
        }
        key => Setting::Text(key, value.to_string()),
    };
    Ok(setting)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
