// tally-core/src/infrastructure/render.rs

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

use crate::application::ports::renderer::{Framing, Section, TableRenderer};
use crate::domain::project::OutputFormat;
use crate::domain::table::{ResultTable, Value};
use crate::error::TallyError;
use crate::infrastructure::error::InfrastructureError;

pub fn renderer_for(format: OutputFormat) -> Box<dyn TableRenderer> {
    match format {
        OutputFormat::Table => Box::new(TextRenderer),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}

/// Box-drawn table for terminals.
pub struct TextRenderer;

impl TextRenderer {
    fn cell(value: &Value) -> Cell {
        let cell = Cell::new(value.to_string());
        match value {
            Value::Integer(_) | Value::Real(_) => cell.set_alignment(CellAlignment::Right),
            _ => cell,
        }
    }

    fn footer(section: &Section<'_>) -> String {
        let noun = if section.total_rows == 1 { "row" } else { "rows" };
        if section.is_truncated() {
            format!(
                "({} of {} {})",
                section.table.len(),
                section.total_rows,
                noun
            )
        } else {
            format!("({} {})", section.total_rows, noun)
        }
    }
}

impl TableRenderer for TextRenderer {
    fn render(&self, section: &Section<'_>) -> Result<String, TallyError> {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(
            section
                .table
                .columns()
                .iter()
                .map(|c| Cell::new(c).add_attribute(Attribute::Bold)),
        );
        for row in section.table.rows() {
            table.add_row(row.values().iter().map(Self::cell));
        }

        let title = match section.description {
            Some(desc) => format!("▶ {}: {}", section.name, desc),
            None => format!("▶ {}", section.name),
        };

        Ok(format!("{}\n{}\n{}\n", title, table, Self::footer(section)))
    }
}

/// Pretty JSON object per section; rows keep column order.
/// A report is one JSON array of those objects.
pub struct JsonRenderer;

#[derive(Serialize)]
struct JsonSection<'a> {
    name: &'a str,
    total_rows: usize,
    columns: &'a [String],
    rows: &'a ResultTable,
}

impl TableRenderer for JsonRenderer {
    fn render(&self, section: &Section<'_>) -> Result<String, TallyError> {
        let payload = JsonSection {
            name: section.name,
            total_rows: section.total_rows,
            columns: section.table.columns(),
            rows: section.table,
        };
        let mut out = serde_json::to_string_pretty(&payload).map_err(InfrastructureError::Json)?;
        out.push('\n');
        Ok(out)
    }

    fn framing(&self) -> Framing {
        Framing {
            open: "[\n",
            separator: ",\n",
            close: "\n]\n",
        }
    }
}
