use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

use drawn::OutputFormat;
use drawn::renderer::{GraphvizRenderer, Renderer};

#[derive(Parser)]
#[command(
    name = "drawn",
    version,
    about = "Compile flow notation into Graphviz diagrams"
)]
struct Cli {
    /// Flow document to compile
    file: PathBuf,

    /// Output path without extension (overrides `% output_file`)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Output format (overrides `% output_format`)
    #[arg(long, short = 'f')]
    format: Option<OutputFormat>,

    /// Print DOT source to stdout instead of rendering
    #[arg(long)]
    dot: bool,

    /// Graphviz engine to run
    #[arg(long, default_value = "dot")]
    engine: String,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), drawn::Error> {
    let input = drawn::reader::read_document(&cli.file)?;
    let graph = drawn::compile(&input)?;
    let source = drawn::emitter::emit(&graph);

    if cli.dot {
        print!("{source}");
        return Ok(());
    }

    let stem = cli
        .output
        .unwrap_or_else(|| PathBuf::from(&graph.config.output_file));
    let format = cli.format.unwrap_or(graph.config.output_format);
    let path = GraphvizRenderer::new(cli.engine).render(&source, &stem, format)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
