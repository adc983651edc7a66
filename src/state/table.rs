use thiserror::Error;

use crate::state::numeric;
use crate::state::row::{NumericColumn, NumericField, Row, DEFAULT_ROW_COUNT};

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("row {0} is out of range")]
    RowOutOfRange(usize),
    #[error("{column}列需要有效数字，收到 '{input}'")]
    InvalidNumber { column: NumericColumn, input: String },
}

/// Drives a tri-state select-all control: checked when `all_selected`,
/// indeterminate when `some_selected` but not all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionSummary {
    pub all_selected: bool,
    pub some_selected: bool,
}

/// Confirmation token for a pending row removal. Obtained from
/// [`RowTable::begin_remove_selected`] and spent on
/// [`RowTable::commit_remove_selected`], so the core never blocks on a
/// confirmation dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemovalRequest {
    pub count: usize,
}

/// The active editing buffer: an ordered row set with contiguous 1-based
/// display indices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RowTable {
    rows: Vec<Row>,
}

impl RowTable {
    pub fn with_blank_rows(count: usize) -> Self {
        Self {
            rows: (1..=count as u32).map(Row::blank).collect(),
        }
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a blank row numbered after the current last row.
    pub fn add_row(&mut self) -> &Row {
        let index = self.rows.len() as u32 + 1;
        self.rows.push(Row::blank(index));
        self.rows.last().expect("row was just pushed")
    }

    /// Stores numeric input verbatim after validating it. Invalid text is
    /// rejected and the prior value stays in place.
    pub fn set_numeric(
        &mut self,
        row_index: usize,
        column: NumericColumn,
        input: &str,
    ) -> Result<(), EditError> {
        if !numeric::is_valid_number(input) {
            return Err(EditError::InvalidNumber {
                column,
                input: input.to_string(),
            });
        }
        let row = self.row_mut(row_index)?;
        row.set_numeric(column, NumericField::from_raw(input));
        Ok(())
    }

    pub fn set_date(&mut self, row_index: usize, date: &str) -> Result<(), EditError> {
        self.row_mut(row_index)?.date = date.to_string();
        Ok(())
    }

    pub fn set_unit(&mut self, row_index: usize, unit: &str) -> Result<(), EditError> {
        self.row_mut(row_index)?.unit = unit.to_string();
        Ok(())
    }

    pub fn set_selected(&mut self, row_index: usize, selected: bool) -> Result<(), EditError> {
        self.row_mut(row_index)?.selected = selected;
        Ok(())
    }

    pub fn toggle_select_all(&mut self, checked: bool) {
        for row in &mut self.rows {
            row.selected = checked;
        }
    }

    pub fn selection_summary(&self) -> SelectionSummary {
        let some_selected = self.rows.iter().any(|row| row.selected);
        SelectionSummary {
            all_selected: !self.rows.is_empty() && self.rows.iter().all(|row| row.selected),
            some_selected,
        }
    }

    /// First phase of removing selected rows. `None` means nothing is
    /// selected and there is nothing to do.
    pub fn begin_remove_selected(&self) -> Option<RemovalRequest> {
        let count = self.rows.iter().filter(|row| row.selected).count();
        (count > 0).then_some(RemovalRequest { count })
    }

    /// Second phase: removes whatever is selected now and renumbers the
    /// remainder to 1..N. Returns the number of rows removed.
    pub fn commit_remove_selected(&mut self, _request: RemovalRequest) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| !row.selected);
        self.renumber();
        before - self.rows.len()
    }

    /// Discards all rows in favor of a fresh blank set.
    pub fn reset(&mut self) {
        self.rows = (1..=DEFAULT_ROW_COUNT as u32).map(Row::blank).collect();
    }

    fn renumber(&mut self) {
        for (index, row) in self.rows.iter_mut().enumerate() {
            row.display_index = index as u32 + 1;
        }
    }

    fn row_mut(&mut self, row_index: usize) -> Result<&mut Row, EditError> {
        self.rows
            .get_mut(row_index)
            .ok_or(EditError::RowOutOfRange(row_index))
    }
}
