//! Interactive field entry.

use std::io::{self, BufRead, Write};

use calc_core::relations::RelationId;
use calc_core::solver::SolveRequest;
use calc_core::{CalcResult, Settings};

/// Read one trimmed line; `None` on end of input or a broken terminal.
fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return None;
    }

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn confirm(prompt: &str) -> bool {
    matches!(prompt_line(prompt).as_deref(), Some("y") | Some("Y") | Some("yes"))
}

/// Prompt for every field of a relation, solve, and repeat on request.
pub fn run_interactive(id: RelationId, delta_vl: bool, settings: &Settings) -> CalcResult<()> {
    let relation = id.relation();
    let meta = id.metadata();

    println!("{} - leave the unknown field(s) blank", meta.name);
    println!("Formula: {}", meta.formula);

    loop {
        println!();
        let mut request = SolveRequest::new().with_delta_vl(delta_vl);
        for var in relation.variables {
            let symbol = var.unit.symbol();
            let label = if symbol.is_empty() {
                format!("  {} ({}): ", var.label, var.encoding.display_name())
            } else {
                format!("  {} [{}] ({}): ", var.label, symbol, var.encoding.display_name())
            };
            match prompt_line(&label) {
                Some(raw) if !raw.is_empty() => request.set(var.name, raw),
                Some(_) => {}
                None => return Ok(()),
            }
        }

        println!();
        crate::solve_and_print(id, request, settings)?;
        println!();

        if !confirm("Solve again? [y/N]: ") {
            return Ok(());
        }
    }
}
