use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use iacrepair::config::Config;
use iacrepair::error::RepairError;
use iacrepair::ir::Tech;
use iacrepair::output::{self, OutputFormat};
use iacrepair::CompileOptions;

#[derive(Parser)]
#[command(
    name = "iacrepair",
    about = "Compile IaC resources into effect programs for automated repair",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a parsed unit block (JSON) into a DeltaP program
    Compile {
        /// Path to the unit block JSON produced by a parser front end
        path: PathBuf,

        /// Technology the script was written in (ansible, chef, puppet, terraform, docker)
        #[arg(long, short = 't')]
        tech: String,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format (console, json)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Classify syscall records (JSON array) into typed views
    Classify {
        /// Path to the syscall records
        path: PathBuf,

        /// Output format (console, json)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Generate a starter .iacrepair.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compile {
            path,
            tech,
            config,
            format,
            output,
        } => cmd_compile(path, tech, config, format, output),
        Commands::Classify {
            path,
            format,
            output,
        } => cmd_classify(path, format, output),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn parse_format(format_str: &str) -> OutputFormat {
    OutputFormat::from_str_lenient(format_str).unwrap_or_else(|| {
        tracing::warn!(format = format_str, "unknown format, using console");
        OutputFormat::Console
    })
}

fn emit(rendered: &str, output_path: Option<PathBuf>) -> Result<(), RepairError> {
    match output_path {
        Some(out) => std::fs::write(&out, rendered)?,
        None => print!("{}", rendered),
    }
    Ok(())
}

fn cmd_compile(
    path: PathBuf,
    tech_str: String,
    config: Option<PathBuf>,
    format_str: String,
    output_path: Option<PathBuf>,
) -> Result<i32, RepairError> {
    let format = parse_format(&format_str);
    let tech = Tech::from_str_lenient(&tech_str).ok_or_else(|| RepairError::Input {
        file: path.display().to_string(),
        message: format!("unknown technology '{}'", tech_str),
    })?;

    let options = CompileOptions {
        config_path: config,
    };

    let unit = iacrepair::compile_path(&path, tech, &options)?;
    let rendered = iacrepair::render_compiled(&unit, format)?;
    emit(&rendered, output_path)?;

    Ok(0)
}

fn cmd_classify(
    path: PathBuf,
    format_str: String,
    output_path: Option<PathBuf>,
) -> Result<i32, RepairError> {
    let format = parse_format(&format_str);

    let trace = iacrepair::load_trace(&path)?;
    let typed = iacrepair::classify_all(&trace)?;
    let rendered = output::render_trace(&typed, format)?;
    emit(&rendered, output_path)?;

    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, RepairError> {
    let path = PathBuf::from(".iacrepair.toml");

    if path.exists() && !force {
        eprintln!(".iacrepair.toml already exists. Use --force to overwrite.");
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created .iacrepair.toml");

    Ok(0)
}
