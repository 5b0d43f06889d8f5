//! iacrepair: repair-oriented compilation of Infrastructure-as-Code.
//!
//! Lowers declarative resources into DeltaP effect programs, labels every
//! attribute (sketching the ones a repair may need to add), and refines
//! traced syscalls into typed views a verifier can compare against.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use iacrepair::{compile_path, CompileOptions};
//! use iacrepair::ir::Tech;
//!
//! let options = CompileOptions::default();
//! let unit = compile_path(Path::new("site.pp.json"), Tech::Puppet, &options).unwrap();
//! println!("{}", unit.statement);
//! ```

pub mod compiler;
pub mod config;
pub mod delta_p;
pub mod error;
pub mod ir;
pub mod labeler;
pub mod names;
pub mod output;
pub mod tracer;

use std::path::{Path, PathBuf};

use compiler::DeltaPCompiler;
use config::Config;
use delta_p::Statement;
use error::{RepairError, Result};
use ir::{Tech, UnitBlock};
use labeler::LabeledUnitBlock;
use names::NamesDatabase;
use output::OutputFormat;
use tracer::Syscall;

pub use tracer::{classify, classify_all};

/// Options for a compile invocation.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Path to config file (defaults to `.iacrepair.toml` next to the input).
    pub config_path: Option<PathBuf>,
}

/// A unit block after compilation.
///
/// `labeled.script` includes the attributes sketched during compilation.
#[derive(Debug, Clone)]
pub struct CompiledUnit {
    pub labeled: LabeledUnitBlock,
    pub statement: Statement,
}

/// Label a script and compile it into one effect program.
pub fn compile_script(script: UnitBlock, tech: Tech, names: &dyn NamesDatabase) -> CompiledUnit {
    let mut labeled = labeler::label(script, tech, names);
    let statement = DeltaPCompiler::compile(&mut labeled, names);
    CompiledUnit { labeled, statement }
}

/// Compile a unit block serialized as JSON by a parser front end.
pub fn compile_path(path: &Path, tech: Tech, options: &CompileOptions) -> Result<CompiledUnit> {
    let config_path = options.config_path.clone().unwrap_or_else(|| {
        path.parent()
            .unwrap_or_else(|| Path::new("."))
            .join(".iacrepair.toml")
    });
    let config = Config::load(&config_path)?;
    let names = config.names_database();

    let script: UnitBlock = read_json(path)?;
    Ok(compile_script(script, tech, &names))
}

/// Load syscall records serialized as a JSON array.
pub fn load_trace(path: &Path) -> Result<Vec<Syscall>> {
    read_json(path)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| RepairError::Input {
        file: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Render a compiled unit in the specified format.
pub fn render_compiled(unit: &CompiledUnit, format: OutputFormat) -> Result<String> {
    output::render_compiled(unit, format)
}
