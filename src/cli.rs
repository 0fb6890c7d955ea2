//! Minimal CLI: load → select → (files | stdout)
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use schema_mdgen::load::load_paths;
use schema_mdgen::render::{DEFAULT_MAX_DEPTH, RenderOptions, Renderer};
use schema_mdgen::schema::Registry;
use schema_mdgen::select::{DEFAULT_MARKER, DEFAULT_SUFFIX, RenderedDocument, SelectOptions, Selector};
use schema_mdgen::write::write_documents;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// render markdown field outlines for schema types marked with a documentation directive
#[derive(Parser, Debug)]
#[command(name = "schema-mdgen", version)]
pub struct CommandLineInterface {
    /// increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// render every marked object type
    Generate(GenerateOut),
    /// render a single named type, marker or not
    Render(RenderOut),
    /// print the identifiers that `generate` would produce
    List(ListOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select the schema node in each document (e.g. /data/schema)
    #[arg(long)]
    json_pointer: Option<String>,

    /// One or more schema documents. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct SelectSettings {
    /// directive that marks a type for documentation
    #[arg(long, env = "SCHEMA_MDGEN_MARKER", default_value = DEFAULT_MARKER)]
    marker: String,

    /// appended to the type name to form the output file name
    #[arg(long, default_value = DEFAULT_SUFFIX)]
    suffix: String,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    select_settings: SelectSettings,

    /// output directory (stdout if omitted)
    #[arg(short, long, env = "SCHEMA_MDGEN_OUT_DIR")]
    out: Option<PathBuf>,

    /// maximum nested object depth before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// render the remaining types when one fails (exit status is still non-zero)
    #[arg(long, default_value_t = false)]
    keep_going: bool,

    /// print documents to stdout as a JSON array; takes precedence over --out / SCHEMA_MDGEN_OUT_DIR
    #[arg(long, default_value_t = false)]
    json: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct RenderOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// type to render at level 0
    #[arg(long = "type", short = 't')]
    type_name: String,

    /// maximum nested object depth before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

#[derive(clap::Parser, Debug)]
struct ListOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    select_settings: SelectSettings,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_registry(&self) -> Result<Registry> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        let registry = load_paths(&source_paths, self.json_pointer.clone())?;
        tracing::info!(
            documents = source_paths.len(),
            types = registry.len(),
            "loaded schema"
        );
        Ok(registry)
    }
}

impl SelectSettings {
    fn options(&self, max_depth: usize) -> SelectOptions {
        SelectOptions {
            marker: self.marker.clone(),
            suffix: self.suffix.clone(),
            render: RenderOptions { max_depth },
        }
    }
}

impl GenerateOut {
    /// `None` when printing to stdout, including `--json` with an out dir from the environment.
    fn out_dir(&self) -> Option<&Path> {
        if self.json { None } else { self.out.as_deref() }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<ExitCode> {
        match &self.cmd {
            Command::Generate(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(ExitCode::SUCCESS);
                }

                let registry = target.input_settings.load_registry()?;
                let selector = Selector::with_options(
                    &registry,
                    target.select_settings.options(target.max_depth),
                );

                let (documents, failures) = if target.keep_going {
                    let mut documents = Vec::<RenderedDocument>::new();
                    let mut failures = 0usize;
                    for (type_name, result) in selector.select_each() {
                        match result {
                            Ok(doc) => documents.push(doc),
                            Err(error) => {
                                failures += 1;
                                tracing::error!(type_name = %type_name, %error, "failed to render type");
                                eprintln!("{} {type_name}: {error}", "failed".red().bold());
                            }
                        }
                    }
                    (documents, failures)
                } else {
                    (selector.select()?, 0)
                };

                if target.json {
                    println!("{}", serde_json::to_string_pretty(&documents)?);
                } else if let Some(out) = target.out_dir() {
                    for path in write_documents(out, &documents)? {
                        eprintln!("{} {}", "wrote".green().bold(), path.display());
                    }
                } else {
                    for doc in &documents {
                        println!("<!-- {} -->{}", doc.identifier, doc.content);
                    }
                }
                tracing::info!(written = documents.len(), failures, "generate finished");

                if failures > 0 {
                    Ok(ExitCode::FAILURE)
                } else {
                    Ok(ExitCode::SUCCESS)
                }
            }
            Command::Render(target) => {
                let registry = target.input_settings.load_registry()?;
                if !registry.contains(&target.type_name) {
                    bail!("type `{}` is not declared in the schema", target.type_name);
                }
                let renderer = Renderer::with_options(
                    &registry,
                    RenderOptions { max_depth: target.max_depth },
                );
                let content = renderer.render_named(&target.type_name, 0)?;
                println!("{content}");
                Ok(ExitCode::SUCCESS)
            }
            Command::List(target) => {
                let registry = target.input_settings.load_registry()?;
                let selector = Selector::with_options(
                    &registry,
                    target.select_settings.options(DEFAULT_MAX_DEPTH),
                );
                for candidate in selector.candidates() {
                    println!("{}", selector.identifier_for(&candidate.name));
                }
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched = glob::glob(pattern)?.collect::<Result<Vec<_>, _>>()?;
            if matched.is_empty() {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
            out.append(&mut matched);
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_paths_pass_through() {
        let paths = resolve_file_path_patterns(["a.json", "dir/b.json"]).unwrap();
        assert_eq!(paths, vec![PathBuf::from("a.json"), PathBuf::from("dir/b.json")]);
    }

    #[test]
    fn empty_glob_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/*.schema.json", dir.path().display());
        assert!(resolve_file_path_patterns([pattern]).is_err());
    }

    #[test]
    fn glob_expands_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.json", "a.json"] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }
        let pattern = format!("{}/*.json", dir.path().display());
        let paths = resolve_file_path_patterns([pattern]).unwrap();
        assert_eq!(paths, vec![dir.path().join("a.json"), dir.path().join("b.json")]);
    }

    #[test]
    fn parses_generate_flags() {
        let cli = CommandLineInterface::try_parse_from([
            "schema-mdgen", "-vv", "generate", "-i", "schema.json", "--marker", "docs", "--keep-going",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.cmd {
            Command::Generate(g) => {
                assert_eq!(g.select_settings.marker, "docs");
                assert_eq!(g.select_settings.suffix, DEFAULT_SUFFIX);
                assert!(g.keep_going);
                assert_eq!(g.max_depth, DEFAULT_MAX_DEPTH);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn json_takes_precedence_over_out_dir() {
        fn generate(args: &[&str]) -> GenerateOut {
            let mut argv = vec!["schema-mdgen", "generate", "-i", "s.json"];
            argv.extend_from_slice(args);
            match CommandLineInterface::try_parse_from(argv).unwrap().cmd {
                Command::Generate(g) => g,
                other => panic!("unexpected command {other:?}"),
            }
        }
        let g = generate(&["--json", "-o", "docs"]);
        assert!(g.json);
        assert_eq!(g.out_dir(), None);
        let g = generate(&["-o", "docs"]);
        assert_eq!(g.out_dir(), Some(Path::new("docs")));
    }
}
