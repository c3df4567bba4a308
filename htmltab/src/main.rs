//! # htmltab
//!
//! A CLI tool for rendering JSON tabular data into a self-contained HTML
//! document.
//!
//! ## Overview
//!
//! htmltab is built on top of htmltablib. It reads a JSON table document
//! (columns, rows, optional title), renders it as an HTML table, and writes
//! the document to stdout or a file. Recoverable render problems (a row
//! missing a column's field) are logged to stderr; the document is still
//! produced.
//!
//! ## Usage
//!
//! ```bash
//! # Render a table document from a file
//! htmltab people.json
//!
//! # Read from stdin
//! cat people.json | htmltab
//!
//! # Swap axes: one output row per column
//! htmltab people.json --transposed
//!
//! # Set the document title and write to a file
//! htmltab people.json --title "People" --output people.html
//! ```
//!
//! ## Input format
//!
//! ```json
//! {
//!     "title": "People",
//!     "columns": [
//!         { "name": "Name" },
//!         { "name": "Bio", "field": "biography", "markup": true }
//!     ],
//!     "rows": [
//!         { "Name": "Ada", "biography": "<b>pioneer</b>" }
//!     ]
//! }
//! ```

use std::fs;
use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use htmltablib::{FieldFormatter, TableData, TableRenderer};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("htmltab")
        .version(env!("CARGO_PKG_VERSION"))
        .author("William Richmond")
        .about("Render JSON tabular data into a self-contained HTML document")
        .arg(
            Arg::new("input")
                .help("Path to a JSON table document, or '-' for stdin")
                .default_value("-"),
        )
        .arg(
            Arg::new("transposed")
                .short('t')
                .long("transposed")
                .action(ArgAction::SetTrue)
                .help("Swap axes: emit one output row per column"),
        )
        .arg(
            Arg::new("title")
                .long("title")
                .help("Document title (overrides the input's title)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Write the document to a file instead of stdout"),
        )
}

/// Read the table document text from a file or stdin
fn read_input(path: &str) -> Result<String, anyhow::Error> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read table data from stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path))
    }
}

fn run(matches: &ArgMatches) -> Result<(), anyhow::Error> {
    let input = matches
        .get_one::<String>("input")
        .map(|s| s.as_str())
        .unwrap_or("-");
    let text = read_input(input)?;
    let data: TableData =
        serde_json::from_str(&text).context("input is not a valid table document")?;

    let title = matches
        .get_one::<String>("title")
        .cloned()
        .or_else(|| data.title.clone())
        .unwrap_or_default();

    let renderer = TableRenderer::new()
        .transposed(matches.get_flag("transposed"))
        .with_title(title);
    let html = renderer.render_table(&data.columns, &data.rows, &FieldFormatter);

    match matches.get_one::<String>("output") {
        Some(path) => {
            fs::write(path, html).with_context(|| format!("failed to write '{}'", path))?
        }
        None => print!("{}", html),
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = build_command().get_matches();
    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
