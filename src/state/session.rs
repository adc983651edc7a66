use chrono::Local;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::io::csv::{self, ExportError};
use crate::io::storage::{StorageBackend, StorageError};
use crate::io::workbook_io;
use crate::state::compute::{self, Aggregates};
use crate::state::row::{NumericColumn, Row};
use crate::state::table::{EditError, RemovalRequest, RowTable, SelectionSummary};
use crate::state::workbook::{WorkbookEntry, WorkbookError, WorkbookStore};

/// Name given to the workbook created when the store starts out empty.
pub const DEFAULT_WORKBOOK_NAME: &str = "默认工作簿";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Workbook(#[from] WorkbookError),
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("no workbook is open")]
    NoActiveWorkbook,
}

/// Confirmation token for a pending workbook deletion; `name` is for the
/// caller's confirmation prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteWorkbookRequest {
    pub id: Uuid,
    pub name: String,
}

/// A rendered export: suggested filename plus the document itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

/// One editing session: the storage backend, the owned workbook collection,
/// the active workbook id and its disposable editing buffer, plus the last
/// recalculation result. Every operation runs to completion before the next;
/// there is no shared global state.
pub struct Session<S: StorageBackend> {
    backend: S,
    store: WorkbookStore,
    current: Option<Uuid>,
    table: RowTable,
    aggregates: Aggregates,
}

impl<S: StorageBackend> Session<S> {
    /// Restores the persisted collection, falling back to a single default
    /// workbook when nothing is stored or the store is unusable. The session
    /// always comes up editable; persistence failures degrade to warnings
    /// here and surface per-write afterwards.
    pub fn bootstrap(backend: S) -> Self {
        let workbooks = match workbook_io::restore(&backend) {
            Ok(list) => list,
            Err(err) => {
                warn!(%err, "failed to restore workbooks; starting fresh");
                Vec::new()
            }
        };

        let mut session = Self {
            backend,
            store: WorkbookStore::from_workbooks(workbooks),
            current: None,
            table: RowTable::default(),
            aggregates: Aggregates::default(),
        };

        if session.store.is_empty() {
            session.store.push_blank(DEFAULT_WORKBOOK_NAME.to_string());
            if let Err(err) = session.persist() {
                warn!(%err, "could not persist the default workbook");
            }
        }

        if let Some(id) = session.store.first_id() {
            if let Err(err) = session.load_buffer(id) {
                warn!(%err, "could not load the first workbook");
            }
        }
        session
    }

    pub fn rows(&self) -> &[Row] {
        self.table.rows()
    }

    pub fn aggregates(&self) -> &Aggregates {
        &self.aggregates
    }

    pub fn active_workbook_id(&self) -> Option<Uuid> {
        self.current
    }

    pub fn active_workbook_name(&self) -> Option<&str> {
        self.current
            .and_then(|id| self.store.get(id))
            .map(|wb| wb.name.as_str())
    }

    pub fn storage_available(&self) -> bool {
        self.backend.is_available()
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Sidebar listing, insertion-ordered, with the active workbook marked.
    pub fn workbook_list(&self) -> Vec<WorkbookEntry> {
        self.store
            .list()
            .into_iter()
            .map(|(id, name)| WorkbookEntry {
                id,
                name,
                active: self.current == Some(id),
            })
            .collect()
    }

    /// Creates a blank workbook, makes it active and persists the
    /// collection.
    pub fn create_workbook(&mut self, name: &str) -> Result<Uuid, SessionError> {
        let id = self.store.create(name)?;
        self.load_buffer(id)?;
        self.persist()?;
        Ok(id)
    }

    /// Switches the editing buffer to another workbook (deep copy). Active
    /// state is untouched when the id is unknown. Unsaved edits in the
    /// current buffer are discarded by design.
    pub fn open_workbook(&mut self, id: Uuid) -> Result<(), SessionError> {
        self.load_buffer(id)?;
        Ok(())
    }

    /// Commits the editing buffer into the active workbook and persists.
    pub fn save(&mut self) -> Result<(), SessionError> {
        let id = self.current.ok_or(SessionError::NoActiveWorkbook)?;
        self.store.save_rows(id, self.table.rows())?;
        self.persist()?;
        Ok(())
    }

    /// Clones the editing buffer into a new workbook, which becomes active.
    pub fn save_as(&mut self, name: &str) -> Result<Uuid, SessionError> {
        let id = self.store.save_as(name, self.table.rows())?;
        self.load_buffer(id)?;
        self.persist()?;
        Ok(id)
    }

    /// First phase of deleting a workbook; fails up front on unknown ids and
    /// on the last remaining workbook, leaving everything unchanged.
    pub fn begin_delete_workbook(&self, id: Uuid) -> Result<DeleteWorkbookRequest, SessionError> {
        let workbook = self.store.get(id).ok_or(WorkbookError::NotFound(id))?;
        if self.store.len() == 1 {
            return Err(WorkbookError::LastWorkbook.into());
        }
        Ok(DeleteWorkbookRequest {
            id,
            name: workbook.name.clone(),
        })
    }

    /// Second phase: deletes the workbook. When the active workbook was
    /// deleted, the first remaining one becomes active and is loaded.
    pub fn confirm_delete_workbook(
        &mut self,
        request: DeleteWorkbookRequest,
    ) -> Result<(), SessionError> {
        self.store.delete(request.id)?;
        if self.current == Some(request.id) {
            if let Some(next) = self.store.first_id() {
                self.load_buffer(next)?;
            }
        }
        self.persist()?;
        Ok(())
    }

    pub fn add_row(&mut self) {
        self.table.add_row();
        self.recalculate();
    }

    pub fn set_numeric(
        &mut self,
        row_index: usize,
        column: NumericColumn,
        input: &str,
    ) -> Result<(), SessionError> {
        self.table.set_numeric(row_index, column, input)?;
        self.recalculate();
        Ok(())
    }

    pub fn set_date(&mut self, row_index: usize, date: &str) -> Result<(), SessionError> {
        self.table.set_date(row_index, date)?;
        Ok(())
    }

    pub fn set_unit(&mut self, row_index: usize, unit: &str) -> Result<(), SessionError> {
        self.table.set_unit(row_index, unit)?;
        Ok(())
    }

    pub fn set_selected(&mut self, row_index: usize, selected: bool) -> Result<(), SessionError> {
        self.table.set_selected(row_index, selected)?;
        Ok(())
    }

    pub fn toggle_select_all(&mut self, checked: bool) {
        self.table.toggle_select_all(checked);
    }

    pub fn selection_summary(&self) -> SelectionSummary {
        self.table.selection_summary()
    }

    /// `None` when no rows are selected ("nothing to do").
    pub fn begin_remove_rows(&self) -> Option<RemovalRequest> {
        self.table.begin_remove_selected()
    }

    pub fn confirm_remove_rows(&mut self, request: RemovalRequest) -> usize {
        let removed = self.table.commit_remove_selected(request);
        self.recalculate();
        removed
    }

    /// Resets the editing buffer to six blank rows. The stored workbook is
    /// untouched until the next save.
    pub fn reset(&mut self) {
        self.table.reset();
        self.recalculate();
    }

    pub fn export_csv(&self) -> Result<CsvExport, SessionError> {
        let content = csv::build_csv(self.table.rows(), &self.aggregates)?;
        Ok(CsvExport {
            filename: csv::export_filename(Local::now().date_naive()),
            content,
        })
    }

    fn load_buffer(&mut self, id: Uuid) -> Result<(), WorkbookError> {
        let rows = self.store.rows(id)?;
        self.table = RowTable::from_rows(rows);
        self.current = Some(id);
        self.recalculate();
        Ok(())
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        workbook_io::persist(&mut self.backend, self.store.workbooks())
    }

    fn recalculate(&mut self) {
        self.aggregates = compute::recalculate(self.table.rows());
    }
}
