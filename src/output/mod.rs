pub mod console;
pub mod json;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tracer::TypedSyscall;
use crate::CompiledUnit;

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
}

impl OutputFormat {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "console" | "text" => Some(Self::Console),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Render a compiled unit into the specified format.
pub fn render_compiled(unit: &CompiledUnit, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Console => Ok(console::render_compiled(unit)),
        OutputFormat::Json => json::render_compiled(unit),
    }
}

/// Render a classified trace into the specified format.
pub fn render_trace(trace: &[TypedSyscall<'_>], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Console => console::render_trace(trace),
        OutputFormat::Json => json::render_trace(trace),
    }
}
