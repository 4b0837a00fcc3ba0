//! Rendering of view outputs as JSON records or console tables.

use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::{AnyValue, DataFrame};

use natal_ingest::BalanceReport;
use natal_model::{Condition, Feature};
use natal_views::{CellValue, CrossTab, records};

use crate::cli::OutputFormatArg;

/// Renders a view frame in the requested format.
pub fn render_frame(df: &DataFrame, format: OutputFormatArg) -> Result<String> {
    match format {
        OutputFormatArg::Json => Ok(serde_json::to_string_pretty(&records(df)?)?),
        OutputFormatArg::Table => Ok(frame_table(df)?.to_string()),
    }
}

/// Renders a cross-tabulation; an empty selection yields JSON `null` or a
/// short notice.
pub fn render_crosstab(table: Option<&CrossTab>, format: OutputFormatArg) -> Result<String> {
    match (table, format) {
        (None, OutputFormatArg::Json) => Ok("null".to_string()),
        (None, OutputFormatArg::Table) => Ok("no condition fields selected".to_string()),
        (Some(table), OutputFormatArg::Json) => Ok(serde_json::to_string_pretty(table)?),
        (Some(table), OutputFormatArg::Table) => Ok(crosstab_table(table).to_string()),
    }
}

/// Lists permitted features followed by condition fields.
pub fn render_features(format: OutputFormatArg) -> Result<String> {
    match format {
        OutputFormatArg::Json => {
            let conditions: Vec<serde_json::Value> = Condition::ALL
                .iter()
                .map(|condition| {
                    serde_json::json!({ "label": condition.label(), "value": condition.name() })
                })
                .collect();
            let listing = serde_json::json!({
                "features": Feature::options(),
                "conditions": conditions,
            });
            Ok(serde_json::to_string_pretty(&listing)?)
        }
        OutputFormatArg::Table => {
            let mut table = Table::new();
            table.set_header(vec![
                header_cell("Name"),
                header_cell("Label"),
                header_cell("Kind"),
            ]);
            apply_table_style(&mut table);
            for feature in Feature::ALL {
                table.add_row(vec![
                    Cell::new(feature.name()).fg(Color::Blue),
                    Cell::new(feature.label()),
                    dim_cell("feature"),
                ]);
            }
            for condition in Condition::ALL {
                table.add_row(vec![
                    Cell::new(condition.name()).fg(Color::Blue),
                    Cell::new(condition.label()),
                    dim_cell("condition"),
                ]);
            }
            Ok(table.to_string())
        }
    }
}

/// Step-by-step row counts of a balancing run.
pub fn render_balance_report(report: &BalanceReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Step"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let steps = [
        ("Cases loaded", report.case_in),
        ("Control pool", report.control_pool),
        ("Eligible controls", report.eligible_controls),
        ("Sampled controls", report.sampled_controls),
        ("Cases kept", report.case_out),
        ("Controls kept", report.control_out),
    ];
    for (label, rows) in steps {
        table.add_row(vec![Cell::new(label), Cell::new(rows)]);
    }
    table
}

fn frame_table(df: &DataFrame) -> Result<Table> {
    let mut table = Table::new();
    table.set_header(
        df.get_column_names()
            .iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    let columns = df.get_columns();
    for idx in 0..df.height() {
        let mut row = Vec::with_capacity(columns.len());
        for column in columns {
            row.push(Cell::new(cell_text(column.get(idx)?)));
        }
        table.add_row(row);
    }
    Ok(table)
}

fn crosstab_table(crosstab: &CrossTab) -> Table {
    let mut table = Table::new();
    table.set_header(
        crosstab
            .columns
            .iter()
            .map(|descriptor| header_cell(&descriptor.name))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for row in &crosstab.rows {
        let cells: Vec<Cell> = crosstab
            .columns
            .iter()
            .map(|descriptor| match row.get(&descriptor.name) {
                Some(CellValue::Text(text)) => Cell::new(text),
                Some(CellValue::Count(0)) => dim_cell(0),
                Some(CellValue::Count(count)) => {
                    Cell::new(count).set_alignment(CellAlignment::Right)
                }
                None => dim_cell("-"),
            })
            .collect();
        table.add_row(cells);
    }
    table
}

fn cell_text(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => "-".to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Float64(v) => v.to_string(),
        other => other.to_string(),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
