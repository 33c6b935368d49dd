//! Hand DOT source to an external Graphviz engine.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::config::OutputFormat;
use crate::error::Error;

pub trait Renderer {
    /// Render `source` to `<stem>.<format>` and return the written path.
    fn render(&self, source: &str, stem: &Path, format: OutputFormat) -> Result<PathBuf, Error>;
}

/// Runs the Graphviz `dot` binary (or a compatible one such as `neato`).
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    program: String,
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::new("dot")
    }
}

impl GraphvizRenderer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn failure(&self, message: impl Into<String>) -> Error {
        Error::RenderEngine {
            program: self.program.clone(),
            message: message.into(),
        }
    }
}

/// `flow` + `svg` -> `flow.svg`. The extension is always appended, so
/// `v1.2` becomes `v1.2.svg`.
pub fn output_path(stem: &Path, format: OutputFormat) -> PathBuf {
    let mut path = stem.as_os_str().to_owned();
    path.push(".");
    path.push(format.extension());
    PathBuf::from(path)
}

impl Renderer for GraphvizRenderer {
    fn render(&self, source: &str, stem: &Path, format: OutputFormat) -> Result<PathBuf, Error> {
        let target = output_path(stem, format);
        debug!(program = %self.program, target = %target.display(), "spawning render engine");

        let mut child = Command::new(&self.program)
            .arg(format!("-T{}", format.extension()))
            .arg("-o")
            .arg(&target)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => self.failure("not installed or not on PATH"),
                _ => self.failure(format!("failed to start: {e}")),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .map_err(|e| self.failure(format!("failed to write source: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| self.failure(format!("failed to wait: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => format!("exited with {}", output.status),
                msg => msg.to_string(),
            };
            return Err(self.failure(message));
        }

        info!(path = %target.display(), "rendered diagram");
        Ok(target)
    }
}
