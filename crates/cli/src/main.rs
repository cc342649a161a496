// ABOUTME: CLI for post-processing HTML files with the mojispace engine.
// ABOUTME: Parses each document, runs the passes, and prints or rewrites the result.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use mojispace_engine::{marker_template, postprocess, Html, Node};

/// Normalize whitespace and insert thin-space markers in HTML files.
#[derive(Parser, Debug)]
#[command(name = "mojispace")]
#[command(about = "Collapse HTML whitespace and mark wide/narrow text boundaries", long_about = None)]
struct Args {
    /// HTML file path(s). Use "-" to read one document from stdin.
    #[arg(required = true)]
    targets: Vec<String>,

    /// Marker element inserted at wide/narrow boundaries, as an HTML fragment.
    #[arg(long, default_value = r#"<span class="thin-space"></span>"#)]
    marker: String,

    /// Rewrite files in place instead of printing to stdout.
    #[arg(long, default_value_t = false)]
    in_place: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.in_place && args.targets.iter().any(|t| t == "-") {
        bail!("--in-place is not valid with stdin input");
    }

    let marker = marker_template(&args.marker).context("invalid --marker fragment")?;

    // One document failing must not stop the others; report at the end.
    let mut failed = 0usize;
    for target in &args.targets {
        if let Err(err) = process_target(target, &marker, args.in_place) {
            eprintln!("mojispace: {}: {:#}", target, err);
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{} of {} documents failed", failed, args.targets.len());
    }
    Ok(())
}

fn process_target(target: &str, marker: &Node, in_place: bool) -> Result<()> {
    let source = load_source(target)?;

    let mut doc = Html::parse_document(&source);
    postprocess(&mut doc, marker);
    let rendered = doc.html();

    if in_place {
        fs::write(Path::new(target), &rendered)
            .with_context(|| format!("writing {}", target))?;
    } else {
        println!("{}", rendered);
    }
    Ok(())
}

fn load_source(target: &str) -> Result<String> {
    if target == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(target).with_context(|| format!("reading {}", target))
}
