use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use rfmail::document::{EmailDocument, DEFAULT_ROOT};
use rfmail::{schema, Error, RenderOptions, RenderTarget};

#[derive(Parser)]
#[command(name = "rfmail", version, about = "Render email-safe column layouts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a block document (or bare columns props) to HTML on stdout
    Render {
        file: PathBuf,
        /// Input is a single columns container props object
        #[arg(long)]
        columns: bool,
        /// Skip Outlook conditional markup
        #[arg(long)]
        standard: bool,
        /// Viewport width (px) below which columns stack
        #[arg(long, default_value_t = rfmail::config::DEFAULT_BREAKPOINT_PX)]
        breakpoint: u32,
        /// Fixed scope key for the responsive rule (stable output)
        #[arg(long)]
        scope: Option<String>,
        /// Root block id of the document
        #[arg(long, default_value = DEFAULT_ROOT)]
        root: String,
    },
    /// Validate input and list every problem found
    Validate {
        file: PathBuf,
        #[arg(long)]
        columns: bool,
    },
    /// Summarize the first columns container of a rendered HTML file as JSON
    #[cfg(feature = "inspect")]
    Inspect { file: PathBuf },
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Render {
            file,
            columns,
            standard,
            breakpoint,
            scope,
            root,
        } => {
            let options = RenderOptions {
                target: if standard {
                    RenderTarget::Standard
                } else {
                    RenderTarget::Universal
                },
                breakpoint_px: breakpoint,
                scope_key: scope,
            };
            let html = if columns {
                rfmail::render_props_json(&read(&file)?, &options)?
            } else {
                EmailDocument::from_path(&file)
                    .with_context(|| format!("loading {}", file.display()))?
                    .render_html(&root, &options)?
            };
            println!("{}", html);
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate { file, columns } => {
            let input = read(&file)?;
            let result = if columns {
                schema::parse_props(&input).map(|_| ())
            } else {
                EmailDocument::from_json(&input).and_then(|doc| doc.validate())
            };
            match result {
                Ok(()) => {
                    println!("{}: ok", file.display());
                    Ok(ExitCode::SUCCESS)
                }
                Err(Error::Validation(issues)) => {
                    for issue in &issues {
                        println!("{}: {}", file.display(), issue);
                    }
                    Ok(ExitCode::FAILURE)
                }
                Err(e) => Err(e.into()),
            }
        }
        #[cfg(feature = "inspect")]
        Command::Inspect { file } => {
            let summary = rfmail::inspect::summarize(&read(&file)?)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("rfmail: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
