//! Guess a node's shape from its name.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeCategory {
    Decision,
    Terminal,
    DataStore,
    InputOutput,
    Document,
    Process,
    Default,
}

impl ShapeCategory {
    /// The Graphviz shape for this category. `Default` has none, so the
    /// configured `node_shape` applies.
    pub fn dot_shape(self) -> Option<&'static str> {
        match self {
            ShapeCategory::Decision => Some("diamond"),
            ShapeCategory::Terminal => Some("ellipse"),
            ShapeCategory::DataStore => Some("cylinder"),
            ShapeCategory::InputOutput => Some("parallelogram"),
            ShapeCategory::Document => Some("note"),
            ShapeCategory::Process => Some("box"),
            ShapeCategory::Default => None,
        }
    }
}

const RULES: &[(ShapeCategory, &[&str])] = &[
    (
        ShapeCategory::Decision,
        &[
            "decision", "decide", "check", "choice", "choose", "if", "is", "valid", "validate",
            "approve", "approved", "verify",
        ],
    ),
    (
        ShapeCategory::Terminal,
        &["start", "end", "begin", "finish", "stop", "done", "exit"],
    ),
    (
        ShapeCategory::DataStore,
        &[
            "db", "database", "datastore", "store", "storage", "cache", "repository", "repo",
            "table", "bucket", "disk", "warehouse", "sql",
        ],
    ),
    (
        ShapeCategory::InputOutput,
        &[
            "input", "output", "read", "write", "print", "display", "upload", "download", "io",
        ],
    ),
    (
        ShapeCategory::Document,
        &["doc", "document", "report", "file", "log", "pdf"],
    ),
    (
        ShapeCategory::Process,
        &[
            "process", "run", "compute", "calculate", "transform", "handle", "build", "execute",
        ],
    ),
];

pub fn classify_shape(name: &str) -> ShapeCategory {
    if name.ends_with('?') {
        return ShapeCategory::Decision;
    }
    let words = split_words(name);
    RULES
        .iter()
        .find(|(_, keywords)| words.iter().any(|w| keywords.contains(&w.as_str())))
        .map(|(category, _)| *category)
        .unwrap_or(ShapeCategory::Default)
}

/// Lowercase words of a name, split on punctuation and camelCase humps.
/// `UserDB` -> ["user", "db"], `is_valid?` -> ["is", "valid"].
fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;
    let chars: Vec<char> = name.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            flush(&mut words, &mut current);
            prev = None;
            continue;
        }
        if let Some(p) = prev {
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let hump = c.is_uppercase()
                && (p.is_lowercase() || p.is_numeric() || (p.is_uppercase() && next_lower));
            if hump {
                flush(&mut words, &mut current);
            }
        }
        current.extend(c.to_lowercase());
        prev = Some(c);
    }
    flush(&mut words, &mut current);
    words
}

fn flush(words: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn split_camel_and_snake_case() {
        assert_eq!(split_words("UserDB"), vec!["user", "db"]);
        assert_eq!(split_words("is_valid?"), vec!["is", "valid"]);
        assert_eq!(split_words("HTTPServer"), vec!["http", "server"]);
        assert_eq!(split_words("load-config.v2"), vec!["load", "config", "v2"]);
    }

    #[test]
    fn question_mark_is_a_decision() {
        assert_eq!(classify_shape("Ready?"), ShapeCategory::Decision);
    }

    #[test]
    fn decision_keywords() {
        assert_eq!(classify_shape("CheckStock"), ShapeCategory::Decision);
        assert_eq!(classify_shape("isValid"), ShapeCategory::Decision);
    }

    #[test]
    fn terminal_keywords() {
        assert_eq!(classify_shape("Start"), ShapeCategory::Terminal);
        assert_eq!(classify_shape("END"), ShapeCategory::Terminal);
    }

    #[test]
    fn whole_words_only() {
        // "backend" contains "end", "feedback" contains "db"
        assert_eq!(classify_shape("Backend"), ShapeCategory::Default);
        assert_eq!(classify_shape("Feedback"), ShapeCategory::Default);
    }

    #[test]
    fn data_store_keywords() {
        assert_eq!(classify_shape("UserDB"), ShapeCategory::DataStore);
        assert_eq!(classify_shape("redis_cache"), ShapeCategory::DataStore);
    }

    #[test]
    fn io_document_and_process() {
        assert_eq!(classify_shape("ReadInput"), ShapeCategory::InputOutput);
        assert_eq!(classify_shape("MonthlyReport"), ShapeCategory::Document);
        assert_eq!(classify_shape("RunJob"), ShapeCategory::Process);
    }

    #[test]
    fn first_rule_wins() {
        // decision outranks data store
        assert_eq!(classify_shape("CheckCache"), ShapeCategory::Decision);
    }

    #[test]
    fn unmatched_names_fall_back_to_default() {
        assert_eq!(classify_shape("Sun"), ShapeCategory::Default);
        assert_eq!(classify_shape(""), ShapeCategory::Default);
        assert_eq!(ShapeCategory::Default.dot_shape(), None);
    }
}
