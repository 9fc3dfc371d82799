// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Buildgen CLI - one-shot building envelope generation.
//!
//! Loads a project document (levels + catalog types), runs a single
//! generation pass, and optionally writes the resulting model back out:
//!
//! ```text
//! buildgen sample-project > project.json
//! buildgen sample-config  > envelope.json
//! buildgen generate --project project.json --config envelope.json --out model.json
//! ```

use anyhow::{Context, Result};
use buildgen_envelope::{generate_envelope, EnvelopeConfig};
use buildgen_model::{Category, Document, DocumentSnapshot};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "buildgen")]
#[command(about = "Rectangular single-story building envelope generator.")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one generation pass against a project document.
    Generate {
        /// Project snapshot supplying levels and catalog types.
        #[arg(long)]
        project: PathBuf,
        /// Envelope configuration; the built-in sample is used when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write the resulting model snapshot to this path.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the built-in sample envelope configuration.
    SampleConfig,
    /// Print a minimal project document to generate into.
    SampleProject,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate {
            project,
            config,
            out,
        } => generate(&project, config.as_deref(), out.as_deref()),
        Command::SampleConfig => {
            println!(
                "{}",
                serde_json::to_string_pretty(&EnvelopeConfig::sample())?
            );
            Ok(())
        }
        Command::SampleProject => {
            let snapshot = DocumentSnapshot::capture(&sample_project())?;
            println!("{}", snapshot.to_json()?);
            Ok(())
        }
    }
}

fn generate(project: &Path, config: Option<&Path>, out: Option<&Path>) -> Result<()> {
    let json = fs::read_to_string(project)
        .with_context(|| format!("reading project {}", project.display()))?;
    let mut doc = DocumentSnapshot::from_json(&json)?
        .restore()
        .context("restoring project document")?;

    let config = match config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => EnvelopeConfig::sample(),
    };

    let summary = generate_envelope(&mut doc, &config).context("generating envelope")?;
    tracing::info!(
        walls = summary.walls.len(),
        openings = summary.openings.len(),
        "envelope generated"
    );

    if let Some(out) = out {
        let snapshot = DocumentSnapshot::capture(&doc)?;
        fs::write(out, snapshot.to_json()?)
            .with_context(|| format!("writing model {}", out.display()))?;
        tracing::info!(path = %out.display(), "model snapshot written");
    }
    Ok(())
}

/// Two levels and the catalog types the sample configuration expects.
fn sample_project() -> Document {
    let mut doc = Document::new();
    doc.add_level("Level 1", 0.0);
    doc.add_level("Level 2", 4.0);
    doc.add_catalog_type(Category::Wall, "Generic - 200mm", "Basic Wall");
    doc.add_catalog_type(Category::Door, "0915 x 2134mm", "Single-Flush");
    doc.add_catalog_type(Category::Window, "0915 x 1220mm", "Fixed");
    doc.add_catalog_type(Category::Roof, "Generic - 400mm", "Basic Roof");
    doc
}
