use anyhow::Result;
use clap::Parser;
use colored::*;
use md2pdf::{BackendKind, ConvertError, Converter};
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "md2pdf")]
#[command(about = "CLI utility to turn a lightweight Markdown document into a styled PDF")]
#[command(version = "0.1.0")]
struct Args {
    /// Markdown file to convert
    input: PathBuf,

    /// Path of the PDF to write
    output: PathBuf,

    /// PDF renderer (defaults to textutil on macOS, chromium elsewhere)
    #[arg(short = 'b', long = "backend", env = "MD2PDF_BACKEND", value_enum)]
    backend: Option<BackendKind>,
}

async fn run(args: Args) -> Result<PathBuf, ConvertError> {
    let backend = args.backend.unwrap_or_else(BackendKind::platform_default);
    let converter = Converter::new(backend.build());
    debug!("Using the {} backend", converter.backend_name());
    converter.convert(&args.input, &args.output).await
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries only the final confirmation line
    let filter = EnvFilter::from_default_env()
        .add_directive("chromiumoxide::conn=off".parse()?)
        .add_directive("chromiumoxide::handler=off".parse()?)
        .add_directive("md2pdf=warn".parse()?);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(written) => {
            println!("Wrote {}", written.display().to_string().green());
            Ok(())
        }
        Err(e @ ConvertError::InputNotFound { .. }) => {
            eprintln!("{}", e.to_string().red());
            process::exit(1);
        }
        Err(e) => {
            debug!("{:?}", e);
            eprintln!("{}", format!("Error: {}", e).red());
            process::exit(1);
        }
    }
}
