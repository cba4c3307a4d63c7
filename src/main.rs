use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing::{error, info};

use docmark::{ConvertOptions, Converter};

#[derive(Parser)]
#[command(name = "docmark")]
#[command(about = "Convert DOC/DOCX files to Markdown with image extraction")]
#[command(version)]
struct Cli {
    /// Input .doc or .docx files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory, or a .md file when converting a single input
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// YAML file with conversion options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not insert a table of contents
    #[arg(long)]
    no_toc: bool,

    /// Prefix list items with indented "- " markers
    #[arg(long)]
    list_markers: bool,

    /// Do not write conversion_report.md
    #[arg(long)]
    no_report: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> docmark::Result<ConvertOptions> {
        let mut options = match &self.config {
            Some(path) => ConvertOptions::from_yaml_file(path)?,
            None => ConvertOptions::default(),
        };
        if self.no_toc {
            options.markdown.include_toc = false;
        }
        if self.list_markers {
            options.markdown.list_markers = true;
        }
        if self.no_report {
            options.write_report = false;
        }
        Ok(options)
    }

    fn default_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.default_log_level())),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = match cli.options() {
        Ok(options) => options,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        },
    };

    let converter = Converter::new(options);
    let results = match converter.convert_batch(&cli.inputs, &cli.output) {
        Ok(results) => results,
        Err(e) => {
            error!(error = %e, "cannot convert these inputs together");
            return ExitCode::FAILURE;
        },
    };

    let mut failed = 0usize;
    for (input, result) in cli.inputs.iter().zip(results) {
        match result {
            Ok(report) => {
                info!(
                    input = %input.display(),
                    markdown = %report.markdown_file.display(),
                    images = report.images.len(),
                    headings = report.headings.len(),
                    file_type = %report.format,
                    "converted"
                );
                println!("{}", report.markdown_file.display());
            },
            Err(e) => {
                failed += 1;
                error!(input = %input.display(), error = %e, "conversion failed");
            },
        }
    }

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
