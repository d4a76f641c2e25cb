use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use simulado_report::ordering::OrderMode;
use simulado_report::output::{self, OutputFormat};
use simulado_report::ErrorKind;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the PDF report (default if no subcommand)
    Run,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "simulado-report")]
#[command(about = "Score ENEM mock exams and render the results as a PDF", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/simulado-report/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Workbook with the answer and essay sheets
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to write the PDF
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Logo image (PNG, JPEG, GIF, ...) drawn above the title
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Report title
    #[arg(long)]
    title: Option<String>,

    /// Row order (omit to keep sheet order)
    #[arg(long, value_enum)]
    order: Option<OrderMode>,

    /// Summary printed to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    simulado_report::logging::init(cli.verbose);

    match &cli.command {
        Some(Commands::Init { force }) => {
            match simulado_report::config::write_default_config(cli.config.clone(), *force) {
                Ok(path) => println!("Config written to {}", path.display()),
                Err(e) => {
                    eprintln!("Error: {:#}", e);
                    std::process::exit(ErrorKind::InvalidConfig.exit_code());
                }
            }
        }
        Some(Commands::Run) | None => run_report(&cli),
    }

    std::process::exit(EXIT_SUCCESS);
}

fn run_report(cli: &Cli) {
    let start_time = Instant::now();

    let mut config = match simulado_report::config::load_config(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(e.kind().exit_code());
        }
    };

    // Command-line flags win over the config file
    if let Some(input) = &cli.input {
        config.input = input.clone();
    }
    if let Some(output) = &cli.output {
        config.output = output.clone();
    }
    if let Some(logo) = &cli.logo {
        config.logo = Some(logo.clone());
    }
    if let Some(title) = &cli.title {
        config.title = title.clone();
    }
    if let Some(order) = cli.order {
        config.order = Some(order);
    }

    let summary = match simulado_report::pipeline::run(&config) {
        Ok(summary) => summary,
        Err(e) => {
            if let simulado_report::ReportError::InvalidConfig { problems } = &e {
                eprintln!("Config errors:");
                for problem in problems {
                    eprintln!("  - {}", problem);
                }
            } else {
                eprintln!("Error: {}", e);
            }
            std::process::exit(e.kind().exit_code());
        }
    };

    match cli.format {
        OutputFormat::Table => {
            let use_colors = output::should_use_colors();
            println!("{}", output::format_results_table(&summary.results, use_colors));
        }
        OutputFormat::Tsv => println!("{}", output::format_tsv(&summary.results)),
        OutputFormat::Json => match output::format_json(&summary.results) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize results: {}", e);
                std::process::exit(EXIT_FAILURE);
            }
        },
    }

    if cli.verbose {
        eprintln!();
        eprintln!(
            "Total: {} students, {} pages in {:?}",
            summary.results.len(),
            summary.pages,
            start_time.elapsed()
        );
    }
    eprintln!("PDF written to {}", config.output.display());
}
