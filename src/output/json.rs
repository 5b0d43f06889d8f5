use crate::delta_p::Statement;
use crate::error::Result;
use crate::ir::Tech;
use crate::labeler::LabelEntry;
use crate::tracer::TypedSyscall;
use crate::CompiledUnit;

use serde::Serialize;

#[derive(Serialize)]
struct JsonUnit<'a> {
    script: Option<&'a str>,
    tech: Tech,
    program: &'a Statement,
    labels: &'a [LabelEntry],
}

/// Render a compiled unit as a JSON report.
pub fn render_compiled(unit: &CompiledUnit) -> Result<String> {
    let report = JsonUnit {
        script: unit.labeled.script.name.as_deref(),
        tech: unit.labeled.tech,
        program: &unit.statement,
        labels: unit.labeled.labels.entries(),
    };
    let json = serde_json::to_string_pretty(&report)?;
    Ok(json)
}

/// Render a classified trace as a JSON array.
pub fn render_trace(trace: &[TypedSyscall<'_>]) -> Result<String> {
    let values: Vec<serde_json::Value> = trace.iter().map(TypedSyscall::to_json).collect();
    let json = serde_json::to_string_pretty(&values)?;
    Ok(json)
}
