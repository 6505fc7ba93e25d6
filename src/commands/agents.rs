//! Agent catalog listing
//!
//! Shows the coaching personas either as a table or as JSON.

use crate::agents::{catalog, AgentPersona};
use crate::error::{DhraviqError, Result};
use prettytable::{cell, row, Table};

/// List the coaching agents
///
/// # Arguments
///
/// * `json` - Print the catalog as pretty JSON instead of a table
///
/// # Examples
///
/// ```no_run
/// use dhraviq::commands::agents::list_agents;
///
/// list_agents(false).unwrap();
/// ```
pub fn list_agents(json: bool) -> Result<()> {
    let personas = catalog::all();
    if json {
        println!("{}", agents_json(&personas)?);
    } else {
        print_agents_table(&[]);
    }
    Ok(())
}

/// Serialize personas as pretty JSON
///
/// # Errors
///
/// Returns `DhraviqError::Serialization` if serialization fails
pub fn agents_json(personas: &[AgentPersona]) -> Result<String> {
    Ok(serde_json::to_string_pretty(personas).map_err(DhraviqError::Serialization)?)
}

/// Build the catalog table, marking the ids in `selected`
pub fn agents_table(selected: &[String]) -> Table {
    let mut table = Table::new();
    table.set_format(*prettytable::format::consts::FORMAT_BOX_CHARS);
    table.add_row(row!["", "Id", "Agent", "Role", "Specialty"]);

    for persona in catalog::all() {
        let mark = if selected.contains(&persona.id) { "✓" } else { "" };
        table.add_row(row![
            mark,
            persona.id,
            persona.color.paint(&persona.to_string()),
            persona.role,
            persona.specialty
        ]);
    }
    table
}

/// Print the catalog table
pub fn print_agents_table(selected: &[String]) {
    println!("\nCoaching agents (select up to two):\n");
    agents_table(selected).printstd();
    println!();
}
