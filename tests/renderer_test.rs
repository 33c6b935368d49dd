use std::cell::RefCell;
use std::io::Write;
use std::path::{Path, PathBuf};

use drawn::renderer::{Renderer, output_path};
use drawn::{Error, OutputFormat};
use pretty_assertions::assert_eq;

/// Records what it was asked to render instead of running Graphviz.
#[derive(Default)]
struct RecordingRenderer {
    calls: RefCell<Vec<(String, PathBuf, OutputFormat)>>,
}

impl Renderer for RecordingRenderer {
    fn render(&self, source: &str, stem: &Path, format: OutputFormat) -> Result<PathBuf, Error> {
        self.calls
            .borrow_mut()
            .push((source.to_string(), stem.to_path_buf(), format));
        Ok(output_path(stem, format))
    }
}

fn write_document(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("cycle.drawn");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(text.as_bytes()).unwrap();
    path
}

#[test]
fn document_file_to_renderer() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_document(
        dir.path(),
        "% output_file: cycle\n% output_format: pdf\nSun --> Rain\n",
    );

    let input = drawn::reader::read_document(&path).unwrap();
    let graph = drawn::compile(&input).unwrap();
    let source = drawn::emitter::emit(&graph);

    let renderer = RecordingRenderer::default();
    let stem = PathBuf::from(&graph.config.output_file);
    let written = renderer
        .render(&source, &stem, graph.config.output_format)
        .unwrap();

    assert_eq!(written, PathBuf::from("cycle.pdf"));
    let calls = renderer.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, source);
    assert_eq!(calls[0].2, OutputFormat::Pdf);
}

#[test]
fn missing_document() {
    let dir = tempfile::tempdir().unwrap();
    let err = drawn::reader::read_document(dir.path().join("absent.drawn")).unwrap_err();
    assert!(matches!(err, Error::DocumentNotFound { .. }));
    assert!(err.to_string().contains("absent.drawn"), "got: {err}");
}

#[test]
fn compile_errors_stop_before_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_document(dir.path(), "A --> B\nB => C\n");
    let input = drawn::reader::read_document(&path).unwrap();
    let err = drawn::compile(&input).unwrap_err();
    assert!(matches!(err, Error::MalformedArrow { line: 2, .. }));
}
