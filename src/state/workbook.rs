use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::state::row::{Row, DEFAULT_ROW_COUNT};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkbookError {
    #[error("workbook name must not be empty")]
    EmptyName,
    #[error("workbook {0} does not exist")]
    NotFound(Uuid),
    #[error("at least one workbook must remain")]
    LastWorkbook,
}

/// A named, independently persisted table of rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workbook {
    pub id: Uuid,
    pub name: String,
    pub rows: Vec<Row>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workbook {
    fn new(name: String, rows: Vec<Row>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            rows,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A list entry for the sidebar: id, name, and whether the workbook is the
/// active one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkbookEntry {
    pub id: Uuid,
    pub name: String,
    pub active: bool,
}

/// Owns the persisted workbook collection, in insertion order. After
/// bootstrap the collection is never empty; deleting the last workbook is
/// rejected.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkbookStore {
    workbooks: Vec<Workbook>,
}

impl WorkbookStore {
    pub fn from_workbooks(workbooks: Vec<Workbook>) -> Self {
        Self { workbooks }
    }

    pub fn workbooks(&self) -> &[Workbook] {
        &self.workbooks
    }

    pub fn len(&self) -> usize {
        self.workbooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workbooks.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Workbook> {
        self.workbooks.iter().find(|wb| wb.id == id)
    }

    pub fn first_id(&self) -> Option<Uuid> {
        self.workbooks.first().map(|wb| wb.id)
    }

    pub fn list(&self) -> Vec<(Uuid, String)> {
        self.workbooks
            .iter()
            .map(|wb| (wb.id, wb.name.clone()))
            .collect()
    }

    /// Creates a workbook with six blank rows. The trimmed name must be
    /// non-empty; callers are expected to validate before prompting-free
    /// paths, so there is no silent fallback name.
    pub fn create(&mut self, name: &str) -> Result<Uuid, WorkbookError> {
        let name = validated_name(name)?;
        Ok(self.push_blank(name))
    }

    /// Creates a workbook initialized with a deep copy of `rows` instead of
    /// a blank set.
    pub fn save_as(&mut self, name: &str, rows: &[Row]) -> Result<Uuid, WorkbookError> {
        let name = validated_name(name)?;
        let workbook = Workbook::new(name, rows.to_vec());
        let id = workbook.id;
        self.workbooks.push(workbook);
        Ok(id)
    }

    /// Replaces the stored rows of an existing workbook with a deep copy of
    /// `rows` and bumps its updated timestamp.
    pub fn save_rows(&mut self, id: Uuid, rows: &[Row]) -> Result<(), WorkbookError> {
        let workbook = self
            .workbooks
            .iter_mut()
            .find(|wb| wb.id == id)
            .ok_or(WorkbookError::NotFound(id))?;
        workbook.rows = rows.to_vec();
        workbook.updated_at = Utc::now();
        Ok(())
    }

    /// Deep copy of a workbook's rows for use as an editing buffer.
    pub fn rows(&self, id: Uuid) -> Result<Vec<Row>, WorkbookError> {
        self.get(id)
            .map(|wb| wb.rows.clone())
            .ok_or(WorkbookError::NotFound(id))
    }

    /// Removes a workbook. Fails without touching the collection when the
    /// id is unknown or when this is the last workbook.
    pub fn delete(&mut self, id: Uuid) -> Result<(), WorkbookError> {
        if self.get(id).is_none() {
            return Err(WorkbookError::NotFound(id));
        }
        if self.workbooks.len() == 1 {
            return Err(WorkbookError::LastWorkbook);
        }
        self.workbooks.retain(|wb| wb.id != id);
        Ok(())
    }

    pub(crate) fn push_blank(&mut self, name: String) -> Uuid {
        let rows = (1..=DEFAULT_ROW_COUNT as u32).map(Row::blank).collect();
        let workbook = Workbook::new(name, rows);
        let id = workbook.id;
        self.workbooks.push(workbook);
        id
    }
}

fn validated_name(name: &str) -> Result<String, WorkbookError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(WorkbookError::EmptyName);
    }
    Ok(trimmed.to_string())
}
