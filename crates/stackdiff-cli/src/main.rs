//! Command-line interface for the stackdiff engine.
//!
//! The binary reads two resource snapshots, renders their structural diff
//! as YAML-like lines, and exits with status 1 when the snapshots differ.
//! Everything beyond reading inputs and printing lines lives in
//! `stackdiff-core`; this driver stays deliberately thin.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use stackdiff_core::{diff_lines, ChangeNotes, RenderOptions, Value};

#[derive(Debug, Parser)]
#[command(
    name = "stackdiff",
    version,
    about = "Render a structural diff between two resource snapshots",
    override_usage = "stackdiff [OPTION]... BEFORE [AFTER]"
)]
struct Cli {
    /// Render diff output using ANSI colors.
    #[arg(long = "color", action = ArgAction::SetTrue)]
    color: bool,

    /// Keep unchanged properties in the output instead of pruning them.
    #[arg(long = "unchanged", action = ArgAction::SetTrue)]
    unchanged: bool,

    /// Read snapshots as YAML instead of JSON.
    #[arg(long = "yaml", action = ArgAction::SetTrue)]
    yaml: bool,

    /// JSON file mapping slash-joined paths to annotation strings.
    #[arg(long = "notes")]
    notes: Option<PathBuf>,

    /// Write output to FILE instead of STDOUT.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Snapshot inputs (BEFORE [AFTER]); AFTER is read from STDIN when omitted.
    #[arg()]
    inputs: Vec<PathBuf>,
}

fn main() {
    match try_main() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            let _ = writeln!(io::stderr(), "{err:#}");
            std::process::exit(2);
        }
    }
}

fn try_main() -> Result<i32> {
    let cli = Cli::parse();

    let (first, second) = match cli.inputs.len() {
        1 => (InputSource::File(cli.inputs[0].clone()), InputSource::Stdin),
        2 => (
            InputSource::File(cli.inputs[0].clone()),
            InputSource::File(cli.inputs[1].clone()),
        ),
        _ => bail!("expected BEFORE and AFTER snapshot paths"),
    };

    let before_text = read_input(&first)?;
    let after_text = read_input(&second)?;
    let before =
        parse_snapshot(&before_text, cli.yaml).context("failed to parse before snapshot")?;
    let after = parse_snapshot(&after_text, cli.yaml).context("failed to parse after snapshot")?;

    let notes = match &cli.notes {
        Some(path) => load_notes(path)?,
        None => ChangeNotes::new(),
    };

    let options = RenderOptions::new().with_color(cli.color).with_unchanged(cli.unchanged);
    let diff = before.diff(&after);
    let lines = diff_lines(&diff, &options, &notes);

    let mut rendered = lines.join("\n");
    if !rendered.is_empty() {
        rendered.push('\n');
    }

    if let Some(path) = &cli.output {
        fs::write(path, rendered.as_bytes())
            .with_context(|| format!("failed to write output to {}", path.display()))?;
    } else {
        print!("{rendered}");
        io::stdout().flush().ok();
    }

    Ok(if diff.has_changes() { 1 } else { 0 })
}

#[derive(Debug)]
enum InputSource {
    File(PathBuf),
    Stdin,
}

fn read_input(source: &InputSource) -> Result<String> {
    match source {
        InputSource::File(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn parse_snapshot(input: &str, yaml: bool) -> Result<Value> {
    let value = if yaml { Value::from_yaml_str(input) } else { Value::from_json_str(input) }?;
    Ok(value)
}

fn load_notes(path: &Path) -> Result<ChangeNotes> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read notes file {}", path.display()))?;
    let map: BTreeMap<String, String> = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse notes file {}", path.display()))?;
    Ok(map.into_iter().collect())
}
