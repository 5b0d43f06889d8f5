use crate::error::Result;
use crate::tracer::TypedSyscall;
use crate::CompiledUnit;

/// Render the effect program followed by its label table.
pub fn render_compiled(unit: &CompiledUnit) -> String {
    let mut output = String::new();
    let name = unit.labeled.script.name.as_deref().unwrap_or("<unnamed>");

    output.push_str(&format!("\n  {} ({})\n\n", name, unit.labeled.tech));
    for line in unit.statement.to_string().lines() {
        output.push_str(&format!("    {}\n", line));
    }
    output.push('\n');

    if unit.labeled.labels.is_empty() {
        output.push_str("  No labeled attributes.\n\n");
        return output;
    }

    output.push_str(&format!(
        "  {:<7} {:<28} {:<10} {}\n",
        "LABEL", "VARIABLE", "POSITION", "ORIGIN"
    ));
    output.push_str(&format!("  {}\n", "-".repeat(60)));
    for entry in unit.labeled.labels.entries() {
        let origin = match entry.sketch_location {
            Some(index) if entry.sketched => {
                let resource = unit
                    .labeled
                    .script
                    .atomic_units
                    .get(index)
                    .map(|u| u.name.as_str())
                    .unwrap_or("-");
                format!("sketched on {}", resource)
            }
            _ => "source".to_string(),
        };
        output.push_str(&format!(
            "  {:<7} {:<28} {:<10} {}\n",
            entry.label,
            entry.var,
            entry.position.to_string(),
            origin
        ));
    }
    output.push('\n');

    output
}

/// Render one line per syscall, typed or passed through.
pub fn render_trace(trace: &[TypedSyscall<'_>]) -> Result<String> {
    let mut output = String::new();

    if trace.is_empty() {
        output.push_str("\n  Empty trace.\n\n");
        return Ok(output);
    }

    output.push('\n');
    for typed in trace {
        let syscall = typed.syscall();
        let kind = typed
            .kind()
            .map(|k| k.to_string())
            .unwrap_or_else(|| "-".into());
        let args = serde_json::to_string(&syscall.args)?;
        output.push_str(&format!(
            "  {:<10} {:<12} {} = {}\n",
            kind, syscall.cmd, args, syscall.exit_code
        ));
    }
    output.push('\n');

    Ok(output)
}
