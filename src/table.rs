use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::outline::GridRow;

/// Plain tabular model used by the non-outline editing surface. Cell
/// structure is explicit here and kept uniform by construction, so row and
/// cell operations are pure shape maintenance with no synchronization pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableData {
    pub row_sections: Vec<RowSection>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowSection {
    pub section_id: String,
    pub section_name: String,
    pub rows: Vec<TableRow>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub id: String,
    pub name: String,
    pub value: String,
    pub cells: Vec<TableCell>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    pub col_section_id: String,
    pub name: String,
    pub value: String,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl TableData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_section(&mut self, name: &str) -> String {
        let section = RowSection::new(name);
        let id = section.section_id.clone();
        self.row_sections.push(section);
        id
    }

    pub fn section(&self, section_id: &str) -> Option<&RowSection> {
        self.row_sections
            .iter()
            .find(|section| section.section_id == section_id)
    }

    pub fn section_mut(&mut self, section_id: &str) -> Option<&mut RowSection> {
        self.row_sections
            .iter_mut()
            .find(|section| section.section_id == section_id)
    }
}

impl RowSection {
    pub fn new(name: &str) -> Self {
        Self {
            section_id: new_id(),
            section_name: name.to_string(),
            rows: Vec::new(),
        }
    }

    /// Build a section from a grid snapshot of the outline. Columns get
    /// generated ids and empty names; rows shorter than the widest one are
    /// padded with empty cells.
    pub fn from_grid(name: &str, grid: &[GridRow]) -> Self {
        let columns = grid.iter().map(|row| row.cells.len()).max().unwrap_or(0);
        let column_ids: Vec<String> = (0..columns).map(|_| new_id()).collect();
        let rows = grid
            .iter()
            .map(|row| TableRow {
                id: new_id(),
                name: row.label.clone(),
                value: String::new(),
                cells: column_ids
                    .iter()
                    .enumerate()
                    .map(|(idx, column_id)| TableCell {
                        col_section_id: column_id.clone(),
                        name: String::new(),
                        value: row.cells.get(idx).cloned().unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect();
        Self {
            section_id: new_id(),
            section_name: name.to_string(),
            rows,
        }
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map(|row| row.cells.len()).unwrap_or(0)
    }

    /// Cells of the first row with their values cleared. New rows copy this
    /// so every row carries the same columns.
    fn column_template(&self) -> Vec<TableCell> {
        self.rows
            .first()
            .map(|row| {
                row.cells
                    .iter()
                    .map(|cell| TableCell {
                        col_section_id: cell.col_section_id.clone(),
                        name: cell.name.clone(),
                        value: String::new(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Append a row with a generated id, padded to the section's columns.
    /// Returns the new row's id.
    pub fn insert_row(&mut self, name: &str) -> String {
        let id = new_id();
        let cells = self.column_template();
        self.rows.push(TableRow {
            id: id.clone(),
            name: name.to_string(),
            value: String::new(),
            cells,
        });
        id
    }

    pub fn row(&self, row_id: &str) -> Option<&TableRow> {
        self.rows.iter().find(|row| row.id == row_id)
    }

    pub fn row_mut(&mut self, row_id: &str) -> Option<&mut TableRow> {
        self.rows.iter_mut().find(|row| row.id == row_id)
    }

    pub fn update_cell(&mut self, row_id: &str, col_section_id: &str, value: &str) -> bool {
        let Some(row) = self.row_mut(row_id) else {
            return false;
        };
        let Some(cell) = row
            .cells
            .iter_mut()
            .find(|cell| cell.col_section_id == col_section_id)
        else {
            return false;
        };
        cell.value = value.to_string();
        true
    }

    pub fn rename_row(&mut self, row_id: &str, name: &str) -> bool {
        let Some(row) = self.row_mut(row_id) else {
            return false;
        };
        row.name = name.to_string();
        true
    }

    pub fn delete_row(&mut self, row_id: &str) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != row_id);
        self.rows.len() != before
    }

    /// Add a column to every row of the section. Returns the generated
    /// column id.
    pub fn insert_column(&mut self, name: &str) -> String {
        let column_id = new_id();
        for row in &mut self.rows {
            row.cells.push(TableCell {
                col_section_id: column_id.clone(),
                name: name.to_string(),
                value: String::new(),
            });
        }
        column_id
    }

    pub fn remove_column(&mut self, col_section_id: &str) -> bool {
        let mut removed = false;
        for row in &mut self.rows {
            let before = row.cells.len();
            row.cells.retain(|cell| cell.col_section_id != col_section_id);
            removed |= row.cells.len() != before;
        }
        removed
    }
}
