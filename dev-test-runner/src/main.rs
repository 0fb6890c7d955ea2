//! Golden runner: render every `*.schema.json` under the fixtures directory and
//! compare each document against `expected/<identifier>`.
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;

use schema_mdgen::load::load_paths;
use schema_mdgen::select::{RenderedDocument, select};

#[derive(Parser, Debug)]
struct Settings {
    /// directory holding `*.schema.json` files and an `expected/` subdirectory
    #[arg(long, default_value = "fixtures")]
    fixtures: PathBuf,

    /// overwrite expectations with the current output
    #[arg(long)]
    bless: bool,
}

enum Outcome {
    Pass,
    Blessed,
    Fail(String),
}

fn main() -> ExitCode {
    let settings = Settings::parse();
    match run(&settings) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings) -> Result<bool> {
    let pattern = format!("{}/*.schema.json", settings.fixtures.display());
    let expected_dir = settings.fixtures.join("expected");
    let mut all_ok = true;
    let mut produced = HashSet::<String>::new();

    let schema_paths = glob::glob(&pattern)?.collect::<Result<Vec<_>, _>>()?;
    if schema_paths.is_empty() {
        bail!("no fixtures match {pattern}");
    }

    for schema_path in schema_paths {
        let registry = load_paths([&schema_path], None)
            .with_context(|| format!("loading {}", schema_path.display()))?;
        let documents = select(&registry)
            .with_context(|| format!("rendering {}", schema_path.display()))?;

        eprintln!("—— {} ——", schema_path.display());
        for doc in &documents {
            produced.insert(doc.identifier.clone());
            match check(&expected_dir, doc, settings.bless)? {
                Outcome::Pass => eprintln!("✅ {}", doc.identifier),
                Outcome::Blessed => eprintln!("{} {}", "blessed".yellow(), doc.identifier),
                Outcome::Fail(reason) => {
                    all_ok = false;
                    eprintln!("❌ {}: {reason}", doc.identifier.red());
                }
            }
        }
    }

    for orphan in orphaned_expectations(&expected_dir, &produced)? {
        if settings.bless {
            std::fs::remove_file(&orphan)?;
            eprintln!("{} {}", "removed".yellow(), orphan.display());
        } else {
            all_ok = false;
            eprintln!("❌ {}: no fixture renders this document", orphan.display().to_string().red());
        }
    }
    Ok(all_ok)
}

/// Files under `expected/` whose name no rendered document claimed.
fn orphaned_expectations(expected_dir: &Path, produced: &HashSet<String>) -> Result<Vec<PathBuf>> {
    if !expected_dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut orphans = Vec::new();
    for entry in std::fs::read_dir(expected_dir)? {
        let path = entry?.path();
        let claimed = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| produced.contains(name));
        if path.is_file() && !claimed {
            orphans.push(path);
        }
    }
    orphans.sort();
    Ok(orphans)
}

fn check(expected_dir: &Path, doc: &RenderedDocument, bless: bool) -> Result<Outcome> {
    let path = expected_dir.join(&doc.identifier);
    if bless {
        std::fs::create_dir_all(expected_dir)?;
        std::fs::write(&path, &doc.content)?;
        return Ok(Outcome::Blessed);
    }
    let expected = match std::fs::read_to_string(&path) {
        Ok(x) => x,
        Err(_) => return Ok(Outcome::Fail(format!("missing {}", path.display()))),
    };
    if expected == doc.content {
        return Ok(Outcome::Pass);
    }
    let first_diff = expected
        .lines()
        .zip(doc.content.lines())
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| expected.lines().count().min(doc.content.lines().count()));
    Ok(Outcome::Fail(format!("first difference at line {}", first_diff + 1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"{ "types": [{ "kind": "object", "name": "A", "directives": ["md"] }] }"#;

    fn settings(fixtures: &Path) -> Settings {
        Settings { fixtures: fixtures.to_path_buf(), bless: false }
    }

    #[test]
    fn empty_fixture_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(&settings(dir.path())).is_err());
    }

    #[test]
    fn matching_expectations_pass() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.schema.json"), SCHEMA).unwrap();
        std::fs::create_dir(dir.path().join("expected")).unwrap();
        std::fs::write(dir.path().join("expected/A.generated.md"), "\n").unwrap();
        assert!(run(&settings(dir.path())).unwrap());
    }

    #[test]
    fn orphaned_expectation_fails_the_run() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.schema.json"), SCHEMA).unwrap();
        std::fs::create_dir(dir.path().join("expected")).unwrap();
        std::fs::write(dir.path().join("expected/A.generated.md"), "\n").unwrap();
        std::fs::write(dir.path().join("expected/Gone.generated.md"), "\n").unwrap();

        let produced = HashSet::from(["A.generated.md".to_string()]);
        let orphans = orphaned_expectations(&dir.path().join("expected"), &produced).unwrap();
        assert_eq!(orphans, vec![dir.path().join("expected/Gone.generated.md")]);
        assert!(!run(&settings(dir.path())).unwrap());
    }
}
