//! phantom CLI - Markdown to HTML converter

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use phantom::files::{self, BatchReport};
use phantom::{DocumentOptions, Options};

#[derive(Parser)]
#[command(name = "phantom")]
#[command(version, about = "Markdown to HTML converter", long_about = None)]
#[command(after_help = "EXAMPLES:
    phantom notes.md notes.html    Convert a single Markdown file to HTML
    phantom notes/                 Convert every .md file in a directory
    phantom - < notes.md           Convert stdin to stdout")]
struct Cli {
    /// Markdown file, directory of Markdown files, or `-` for stdin
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// HTML file to write (stdout when omitted and INPUT is a file)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Document title (defaults to the input path)
    #[arg(long)]
    title: Option<String>,

    /// Write only the body fragment, without the document shell
    #[arg(long)]
    fragment: bool,

    /// Omit the embedded stylesheet
    #[arg(long)]
    no_style: bool,

    /// Copy link URLs into href verbatim instead of escaping them
    #[arg(long)]
    raw_links: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,

    /// More log output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            escape_link_urls: !self.raw_links,
        }
    }

    fn document(&self) -> Option<DocumentOptions> {
        (!self.fragment).then(|| DocumentOptions {
            title: self.title.clone().unwrap_or_default(),
            stylesheet: !self.no_style,
            ..DocumentOptions::default()
        })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.output {
        Some(output) => convert_one(&cli, output),
        None if cli.input.is_dir() => convert_all(&cli),
        None => convert_to_stdout(&cli),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn convert_one(cli: &Cli, output: &Path) -> Result<(), String> {
    files::convert_file(&cli.input, output, &cli.options(), cli.document().as_ref())
        .map_err(|e| e.to_string())?;
    if !cli.quiet {
        println!("Converted {} to {}", cli.input.display(), output.display());
    }
    Ok(())
}

fn convert_all(cli: &Cli) -> Result<(), String> {
    let report = files::convert_dir(&cli.input, &cli.options(), cli.document().as_ref())
        .map_err(|e| e.to_string())?;
    log::info!(
        "{} converted, {} failed in {}",
        report.converted.len(),
        report.failed.len(),
        cli.input.display()
    );
    print_report(&report, cli.quiet);

    if report.is_success() {
        Ok(())
    } else {
        let total = report.converted.len() + report.failed.len();
        Err(format!("{} of {total} files failed", report.failed.len()))
    }
}

fn print_report(report: &BatchReport, quiet: bool) {
    if !quiet {
        for converted in &report.converted {
            println!(
                "Converted {} to {}",
                converted.input.display(),
                converted.output.display()
            );
        }
    }
    for (input, err) in &report.failed {
        eprintln!("Failed converting {}: {err}", input.display());
    }
}

fn convert_to_stdout(cli: &Cli) -> Result<(), String> {
    let from_stdin = cli.input.as_os_str() == "-";
    let mut document = cli.document();
    if let Some(document) = document.as_mut().filter(|d| d.title.is_empty()) {
        document.title = if from_stdin {
            "stdin".to_owned()
        } else {
            cli.input.display().to_string()
        };
    }

    let sink = BufWriter::new(io::stdout().lock());
    let result = if from_stdin {
        files::convert_document(io::stdin().lock(), sink, &cli.options(), document.as_ref())
    } else {
        File::open(&cli.input)
            .map_err(|source| phantom::Error::Open {
                path: cli.input.clone(),
                source,
            })
            .and_then(|source| {
                files::convert_document(
                    BufReader::new(source),
                    sink,
                    &cli.options(),
                    document.as_ref(),
                )
            })
    };
    result.map(drop).map_err(|e| e.to_string())
}
