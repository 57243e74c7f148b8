use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};
use simple_graphs::AdjacencyList;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simple-graphs")]
#[command(version, about = "A simple graph operations module", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print vertex count, edge count and the neighbours of vertex 0
    Info {
        /// graph6 files, one graph per line; stdin when empty
        files: Vec<PathBuf>,
    },
    /// Print each graph in DOT
    Dot { files: Vec<PathBuf> },
    /// Print each graph as JSON
    Json {
        files: Vec<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
    /// Read a stream of JSON graphs, compact or pretty, and print them as graph6
    Encode { files: Vec<PathBuf> },
}

fn open(files: &[PathBuf]) -> Result<Vec<(String, Box<dyn BufRead>)>> {
    if files.is_empty() {
        return Ok(vec![(
            "<stdin>".to_string(),
            Box::new(BufReader::new(io::stdin())) as Box<dyn BufRead>,
        )]);
    }
    files
        .iter()
        .map(|path| {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            Ok((
                path.display().to_string(),
                Box::new(BufReader::new(file)) as Box<dyn BufRead>,
            ))
        })
        .collect()
}

/// Applies `render` to every non-blank line. Returns the number of lines that failed.
fn for_each_line<F>(files: &[PathBuf], out: &mut impl Write, mut render: F) -> Result<usize>
where
    F: FnMut(&str) -> simple_graphs::Result<String>,
{
    let mut failures = 0;
    for (name, reader) in open(files)? {
        for (index, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("reading {name}"))?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match render(line) {
                Ok(text) => writeln!(out, "{text}")?,
                Err(e) => {
                    error!("{name}:{}: {e}", index + 1);
                    failures += 1;
                }
            }
        }
    }
    Ok(failures)
}

/// Re-encodes every JSON graph as graph6. Returns the number of values that failed.
fn encode_json(files: &[PathBuf], out: &mut impl Write) -> Result<usize> {
    let mut failures = 0;
    for (name, reader) in open(files)? {
        for (index, graph) in AdjacencyList::read_json(reader).enumerate() {
            match graph.and_then(|graph| graph.to_graph6()) {
                Ok(text) => writeln!(out, "{text}")?,
                Err(e) => {
                    error!("{name}: value {}: {e}", index + 1);
                    failures += 1;
                }
            }
        }
    }
    Ok(failures)
}

fn info_line(graph: &AdjacencyList) -> String {
    format!(
        "vertices={} edges={} alist={:?}",
        graph.number_of_vertices(),
        graph.number_of_edges(),
        graph.alist()
    )
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let failures = match &cli.command {
        Commands::Info { files } => for_each_line(files, &mut out, |line| {
            AdjacencyList::from_graph6(line).map(|graph| info_line(&graph))
        })?,
        Commands::Dot { files } => for_each_line(files, &mut out, |line| {
            AdjacencyList::from_graph6(line).map(|graph| graph.to_dot())
        })?,
        Commands::Json { files, pretty } => for_each_line(files, &mut out, |line| {
            let graph = AdjacencyList::from_graph6(line)?;
            if *pretty {
                serde_json::to_string_pretty(&graph)
                    .map_err(|e| simple_graphs::GraphError::Serialization(e.to_string()))
            } else {
                graph.serialize()
            }
        })?,
        Commands::Encode { files } => encode_json(files, &mut out)?,
    };
    out.flush()?;

    if failures > 0 {
        anyhow::bail!("{failures} line(s) could not be processed");
    }
    info!("done");
    Ok(())
}
