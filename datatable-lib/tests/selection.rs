use datatable_lib::TableEngine;
use datatable_lib::error::TableError;
use datatable_lib::model::{Column, Row, RowId};
use datatable_lib::selection::CheckState;

fn rows(n: i64) -> Vec<Row> {
    (1..=n)
        .map(|i| {
            let status = if i % 2 == 0 { "paid" } else { "pending" };
            Row::with_id(i).set("customer", format!("Customer {}", i)).set("status", status)
        })
        .collect()
}

fn columns() -> Vec<Column> {
    vec![
        Column::new("customer", "Customer").sortable().filterable(),
        Column::new("status", "Status").select_filter(["Paid", "Pending"]),
    ]
}

fn id(i: i64) -> RowId {
    RowId::from(i)
}

#[test]
fn test_select_all_on_page_adds_to_existing() {
    let mut table = TableEngine::new(columns(), rows(25)).unwrap();
    table.set_page(3);
    table.toggle_row(&id(21)).unwrap();
    table.set_page(1);

    assert_eq!(table.select_all_on_page(), 10);
    assert_eq!(table.selected_count(), 11);
    assert!(table.is_selected(&id(21)));
    assert!(table.is_selected(&id(10)));
    assert!(!table.is_selected(&id(11)));
}

#[test]
fn test_select_all_filtered_spans_pages() {
    let mut table = TableEngine::new(columns(), rows(25)).unwrap();
    table.set_column_filter("status", datatable_lib::query::ColumnFilter::exact("Paid")).unwrap();
    assert_eq!(table.total_filtered(), 12);

    assert_eq!(table.select_all_filtered(), 12);
    assert!(table.is_selected(&id(24)));
    assert!(!table.is_selected(&id(1)));
    // Page-scoped select on top adds nothing new
    assert_eq!(table.select_all_on_page(), 0);
}

#[test]
fn test_page_check_state() {
    let mut table = TableEngine::new(columns(), rows(12)).unwrap();
    assert_eq!(table.page_check_state(), CheckState::Unchecked);

    table.toggle_row(&id(1)).unwrap();
    assert_eq!(table.page_check_state(), CheckState::Indeterminate);

    table.select_all_on_page();
    assert_eq!(table.page_check_state(), CheckState::Checked);

    // Page 2 holds rows 11 and 12, neither selected
    table.next_page();
    assert_eq!(table.page_check_state(), CheckState::Unchecked);

    table.prev_page();
    assert_eq!(table.deselect_all_on_page(), 10);
    assert_eq!(table.page_check_state(), CheckState::Unchecked);
}

#[test]
fn test_selected_rows_in_collection_order() {
    let mut table = TableEngine::new(columns(), rows(5)).unwrap();
    table.set_sort("customer").unwrap();
    table.set_sort("customer").unwrap();
    table.toggle_row(&id(4)).unwrap();
    table.toggle_row(&id(2)).unwrap();

    let selected: Vec<String> = table
        .selected_rows()
        .iter()
        .map(|r| r.value("customer").to_string())
        .collect();
    assert_eq!(selected, vec!["Customer 2", "Customer 4"]);
}

#[test]
fn test_toggle_unknown_row() {
    let mut table = TableEngine::new(columns(), rows(3)).unwrap();
    assert_eq!(
        table.toggle_row(&id(99)),
        Err(TableError::UnknownRowId { id: "99".into() })
    );
}

#[test]
fn test_replace_rows_prunes_selection() {
    let mut table = TableEngine::new(columns(), rows(10)).unwrap();
    table.select_all_on_page();
    assert_eq!(table.selected_count(), 10);

    table.replace_rows(rows(4)).unwrap();
    assert_eq!(table.selected_count(), 4);
    assert!(table.is_selected(&id(4)));
    assert!(!table.is_selected(&id(5)));
}

#[test]
fn test_replace_rows_clamps_page() {
    let mut table = TableEngine::new(columns(), rows(40)).unwrap();
    table.set_page(4);
    table.replace_rows(rows(15)).unwrap();
    assert_eq!(table.current_page(), 2);
    assert_eq!(table.page_rows().len(), 5);
}

#[test]
fn test_replace_data_drops_stale_sort_and_filters() {
    let mut table = TableEngine::new(columns(), rows(10)).unwrap();
    table.set_sort("customer").unwrap();
    table.set_column_filter("status", datatable_lib::query::ColumnFilter::exact("paid")).unwrap();

    let new_columns = vec![Column::new("status", "Status").select_filter(["Paid", "Pending"])];
    table.replace_data(new_columns, rows(6)).unwrap();

    assert!(table.sort().is_none());
    assert!(table.column_filter("status").is_some());
    assert_eq!(table.total_filtered(), 3);
    assert!(table.column("customer").is_none());
}

#[test]
fn test_replace_data_rejects_and_keeps_state() {
    let mut table = TableEngine::new(columns(), rows(10)).unwrap();
    let bad = vec![Column::new("a", "A"), Column::new("a", "B")];
    assert!(table.replace_data(bad, rows(2)).is_err());
    assert_eq!(table.columns().len(), 2);
    assert_eq!(table.rows().len(), 10);
}
