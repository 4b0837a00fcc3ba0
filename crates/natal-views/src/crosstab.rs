//! Multi-key categorical cross-tabulation of birth conditions.
//!
//! Rows of both collections are grouped by the tuple of selected condition
//! values. Each group reports how many case rows (`Dead`) and control rows
//! (`Alive`) share that combination, with zero for an absent side.

use std::collections::BTreeMap;

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use serde::Serialize;
use tracing::debug;

use natal_model::{BalancedDataset, Condition, FieldKind, GroupLabel};

use crate::error::Result;

/// Display metadata for one output column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub id: String,
}

impl ColumnDescriptor {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            id: name.to_string(),
        }
    }
}

/// A single output cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Count(u64),
}

/// One output row, keyed by display column name.
pub type TableRow = BTreeMap<String, CellValue>;

/// Cross-tabulation result: rows plus ordered column descriptors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTab {
    pub rows: Vec<TableRow>,
    pub columns: Vec<ColumnDescriptor>,
}

impl CrossTab {
    /// Converts the table to a DataFrame in descriptor order.
    ///
    /// Condition columns are strings, count columns `UInt64`.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let mut columns = Vec::with_capacity(self.columns.len());
        for descriptor in &self.columns {
            let cells = self.rows.iter().map(|row| row.get(&descriptor.name));
            let column = if is_count_column(&descriptor.name) {
                let counts: Vec<u64> = cells
                    .map(|cell| match cell {
                        Some(CellValue::Count(count)) => *count,
                        _ => 0,
                    })
                    .collect();
                Series::new(descriptor.name.as_str().into(), counts).into_column()
            } else {
                let labels: Vec<Option<String>> = cells
                    .map(|cell| match cell {
                        Some(CellValue::Text(text)) => Some(text.clone()),
                        Some(CellValue::Count(count)) => Some(count.to_string()),
                        None => None,
                    })
                    .collect();
                Series::new(descriptor.name.as_str().into(), labels).into_column()
            };
            columns.push(column);
        }
        Ok(DataFrame::new(columns)?)
    }
}

fn is_count_column(name: &str) -> bool {
    GroupLabel::ORDERED
        .iter()
        .any(|group| group.outcome() == name)
}

/// Raw grouping key component. Integer codes sort numerically, letter
/// codes lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum KeyPart {
    Int(i64),
    Text(String),
}

impl KeyPart {
    fn raw(&self) -> String {
        match self {
            KeyPart::Int(value) => value.to_string(),
            KeyPart::Text(value) => value.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct GroupCounts {
    case: u64,
    control: u64,
}

impl GroupCounts {
    fn add(&mut self, group: GroupLabel) {
        match group {
            GroupLabel::Case => self.case += 1,
            GroupLabel::Control => self.control += 1,
        }
    }

    fn get(self, group: GroupLabel) -> u64 {
        match group {
            GroupLabel::Case => self.case,
            GroupLabel::Control => self.control,
        }
    }
}

/// Cross-tabulates the selected condition fields.
///
/// Returns `Ok(None)` for an empty selection. Repeated names are collapsed
/// to their first occurrence. Rows with a missing value in any selected
/// field do not belong to any group.
pub fn prepare_crosstab<S: AsRef<str>>(
    dataset: &BalancedDataset,
    selected: &[S],
) -> Result<Option<CrossTab>> {
    let conditions = parse_selection(selected)?;
    if conditions.is_empty() {
        return Ok(None);
    }

    let mut groups: BTreeMap<Vec<KeyPart>, GroupCounts> = BTreeMap::new();
    for (group, df) in dataset.groups() {
        let keys = key_columns(df, &conditions)?;
        for row in 0..df.height() {
            let key: Option<Vec<KeyPart>> =
                keys.iter().map(|column| column[row].clone()).collect();
            if let Some(key) = key {
                groups.entry(key).or_default().add(group);
            }
        }
    }

    let rows: Vec<TableRow> = groups
        .into_iter()
        .map(|(key, counts)| build_row(&conditions, &key, counts))
        .collect();

    let mut columns: Vec<ColumnDescriptor> = conditions
        .iter()
        .map(|condition| ColumnDescriptor::new(condition.label()))
        .collect();
    for group in GroupLabel::ORDERED {
        columns.push(ColumnDescriptor::new(group.outcome()));
    }

    debug!(
        fields = conditions.len(),
        groups = rows.len(),
        "prepared condition cross-tabulation"
    );
    Ok(Some(CrossTab { rows, columns }))
}

fn parse_selection<S: AsRef<str>>(selected: &[S]) -> Result<Vec<Condition>> {
    let mut conditions = Vec::with_capacity(selected.len());
    for name in selected {
        let condition: Condition = name.as_ref().parse()?;
        if !conditions.contains(&condition) {
            conditions.push(condition);
        }
    }
    Ok(conditions)
}

fn key_columns(
    df: &DataFrame,
    conditions: &[Condition],
) -> Result<Vec<Vec<Option<KeyPart>>>> {
    let mut keys = Vec::with_capacity(conditions.len());
    for condition in conditions {
        let column = df.column(condition.name())?;
        let values: Vec<Option<KeyPart>> = match condition.field().kind() {
            FieldKind::Integer => column
                .i64()?
                .into_iter()
                .map(|value| value.map(KeyPart::Int))
                .collect(),
            FieldKind::Text => column
                .str()?
                .into_iter()
                .map(|value| value.map(|text| KeyPart::Text(text.trim().to_string())))
                .collect(),
        };
        keys.push(values);
    }
    Ok(keys)
}

fn build_row(conditions: &[Condition], key: &[KeyPart], counts: GroupCounts) -> TableRow {
    let mut row = TableRow::new();
    for (condition, part) in conditions.iter().zip(key) {
        let raw = part.raw();
        let display = condition
            .translate(&raw)
            .map(str::to_string)
            .unwrap_or(raw);
        row.insert(condition.label().to_string(), CellValue::Text(display));
    }
    for group in GroupLabel::ORDERED {
        row.insert(
            group.outcome().to_string(),
            CellValue::Count(counts.get(group)),
        );
    }
    row
}
