use coalsheet::state::row::{NumericColumn, NumericField, Row};
use coalsheet::state::workbook::{WorkbookError, WorkbookStore};
use uuid::Uuid;

#[test]
fn test_create_starts_with_six_blank_rows() {
    let mut store = WorkbookStore::default();
    let id = store.create("三月").unwrap();

    let workbook = store.get(id).unwrap();
    assert_eq!(workbook.name, "三月");
    assert_eq!(workbook.rows.len(), 6);
    assert_eq!(workbook.rows[5].display_index, 6);
    assert_eq!(workbook.created_at, workbook.updated_at);
}

#[test]
fn test_create_rejects_empty_name() {
    let mut store = WorkbookStore::default();
    assert_eq!(store.create("").unwrap_err(), WorkbookError::EmptyName);
    assert_eq!(store.create("   ").unwrap_err(), WorkbookError::EmptyName);
    assert_eq!(store.len(), 0);
}

#[test]
fn test_create_trims_name() {
    let mut store = WorkbookStore::default();
    let id = store.create("  三月  ").unwrap();
    assert_eq!(store.get(id).unwrap().name, "三月");
}

#[test]
fn test_save_rows_deep_copies_and_bumps_updated_at() {
    let mut store = WorkbookStore::default();
    let id = store.create("wb").unwrap();
    let created_at = store.get(id).unwrap().created_at;

    let mut rows = vec![Row::blank(1)];
    rows[0].set_numeric(NumericColumn::Sulfur, NumericField::from_raw("1.5"));
    store.save_rows(id, &rows).unwrap();

    // Mutating the caller's rows afterwards must not alias the stored copy.
    rows[0].set_numeric(NumericColumn::Sulfur, NumericField::from_raw("9"));
    let stored = store.get(id).unwrap();
    assert_eq!(stored.rows[0].sulfur.raw(), "1.5");
    assert!(stored.updated_at >= created_at);
}

#[test]
fn test_save_rows_unknown_id() {
    let mut store = WorkbookStore::default();
    store.create("wb").unwrap();
    let missing = Uuid::new_v4();
    assert_eq!(
        store.save_rows(missing, &[]).unwrap_err(),
        WorkbookError::NotFound(missing)
    );
}

#[test]
fn test_save_as_clones_given_rows() {
    let mut store = WorkbookStore::default();
    let mut row = Row::blank(1);
    row.unit = "一号井".to_string();

    let id = store.save_as("副本", &[row]).unwrap();
    let workbook = store.get(id).unwrap();
    assert_eq!(workbook.rows.len(), 1);
    assert_eq!(workbook.rows[0].unit, "一号井");
}

#[test]
fn test_load_rows_is_a_deep_copy() {
    let mut store = WorkbookStore::default();
    let id = store.create("wb").unwrap();

    let mut rows = store.rows(id).unwrap();
    rows[0].set_numeric(NumericColumn::Gangue, NumericField::from_raw("7"));
    assert!(store.get(id).unwrap().rows[0].gangue.is_blank());
}

#[test]
fn test_load_unknown_id() {
    let store = WorkbookStore::default();
    let missing = Uuid::new_v4();
    assert_eq!(store.rows(missing).unwrap_err(), WorkbookError::NotFound(missing));
}

#[test]
fn test_delete_last_workbook_is_guarded() {
    let mut store = WorkbookStore::default();
    let id = store.create("only").unwrap();

    assert_eq!(store.delete(id).unwrap_err(), WorkbookError::LastWorkbook);
    assert_eq!(store.len(), 1);
    assert!(store.get(id).is_some());
}

#[test]
fn test_delete_removes_workbook() {
    let mut store = WorkbookStore::default();
    let first = store.create("first").unwrap();
    let second = store.create("second").unwrap();

    store.delete(first).unwrap();
    assert_eq!(store.len(), 1);
    assert!(store.get(second).is_some());
}

#[test]
fn test_delete_unknown_id_leaves_store_unchanged() {
    let mut store = WorkbookStore::default();
    store.create("wb").unwrap();
    store.create("other").unwrap();

    let missing = Uuid::new_v4();
    assert_eq!(store.delete(missing).unwrap_err(), WorkbookError::NotFound(missing));
    assert_eq!(store.len(), 2);
}

#[test]
fn test_list_preserves_insertion_order() {
    let mut store = WorkbookStore::default();
    let a = store.create("a").unwrap();
    let b = store.create("b").unwrap();
    let c = store.create("c").unwrap();

    let ids: Vec<_> = store.list().into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![a, b, c]);
    assert_eq!(store.first_id(), Some(a));
}

#[test]
fn test_workbook_ids_are_unique() {
    let mut store = WorkbookStore::default();
    let a = store.create("a").unwrap();
    let b = store.create("a").unwrap();
    assert_ne!(a, b);
}
