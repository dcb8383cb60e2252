use std::path::PathBuf;
use std::process::ExitCode;

use chrono::FixedOffset;
use clap::{Parser, Subcommand};

use moteva_pdf::server::{AppState, serve};
use moteva_pdf::store::DirectoryStore;
use moteva_pdf::{RenderOptions, render_record_file};

#[derive(Parser)]
#[command(name = "moteva-pdf", version, about = "Render meeting records as PDF protocols")]
struct Cli {
    /// Offset used when printing creation timestamps, e.g. +02:00
    #[arg(long, global = true, env = "MOTEVA_UTC_OFFSET", default_value = "+00:00", value_parser = parse_offset)]
    utc_offset: FixedOffset,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a single record JSON file
    Render {
        input: PathBuf,
        /// Output path (defaults to the input path with a .pdf extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print every placed string per page after rendering
        #[arg(long)]
        dump_text: bool,
    },
    /// Serve GET /api/pdf?id=<id> from a directory of <id>.json records
    Serve {
        #[arg(long, env = "MOTEVA_ADDR", default_value = "0.0.0.0:3000")]
        addr: String,
        #[arg(long, env = "MOTEVA_STORE_DIR", default_value = "meetings")]
        store: PathBuf,
    },
}

fn parse_offset(s: &str) -> Result<FixedOffset, String> {
    s.parse::<FixedOffset>()
        .map_err(|e| format!("invalid UTC offset {s:?}: {e}"))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let options = RenderOptions {
        utc_offset: cli.utc_offset,
        ..RenderOptions::default()
    };

    match cli.command {
        Command::Render {
            input,
            output,
            dump_text,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension("pdf"));
            match render_record_file(&input, &output, &options) {
                Ok(pdf) => {
                    println!(
                        "Wrote {} ({} pages, {} bytes)",
                        output.display(),
                        pdf.page_count(),
                        pdf.bytes.len()
                    );
                    if dump_text {
                        for (i, page) in pdf.pages.iter().enumerate() {
                            println!("--- page {} ---", i + 1);
                            for t in &page.texts {
                                println!("{:>7.2} {:>7.2}  {}", t.x, t.y, t.text);
                            }
                        }
                    }
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Command::Serve { addr, store } => {
            let state = AppState::new(DirectoryStore::new(store), options);
            let result = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .and_then(|rt| rt.block_on(serve(&addr, state)));
            match result {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
