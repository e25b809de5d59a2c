//! Sorting and row building tests.

mod common;

use common::{Part, columns, fruit_parts, init_tracing, live_grid, store};
use horizon_inspector::model::{Comparator, ListModel, build_rows, search_rows};
use horizon_inspector::{
    InspectorError, RecordSource, RecordTable, SortEngine, SortKey, SortOrder, SortSelection,
    SortType,
};

#[test]
fn test_search_then_sort_walkthrough() {
    init_tracing();
    let mut grid = live_grid(store(fruit_parts()));

    grid.set_search("apple");
    assert_eq!(grid.row_names(), vec!["Apple", "apple pie"]);

    grid.set_search("");
    grid.set_sort_selection(SortSelection::single(columns::MASS, SortOrder::Ascending))
        .unwrap();
    assert_eq!(grid.row_names(), vec!["Banana", "Apple", "apple pie"]);
}

#[test]
fn test_search_is_case_insensitive_and_natural_ordered() {
    let parts = ["Crate 10", "crate 1", "Barrel", "Crate 2"]
        .map(|name| Part::new(name, 1.0))
        .to_vec();
    let mut source = RecordTable::new(store(parts));
    source.cache().unwrap();
    let model = ListModel::new(source.generate_rows(), source.generation()).unwrap();

    let names = |rows: Vec<horizon_inspector::ListElement>| -> Vec<String> {
        rows.iter().map(|row| row.name().to_string()).collect()
    };
    assert_eq!(
        names(search_rows(&model, "CRATE").unwrap()),
        vec!["crate 1", "Crate 2", "Crate 10"]
    );
    assert_eq!(
        names(build_rows(&model, None)),
        vec!["Crate 10", "crate 1", "Barrel", "Crate 2"]
    );
    assert!(search_rows(&model, "").is_err());
    assert!(search_rows(&model, "zzz").unwrap().is_empty());
}

#[test]
fn test_descending_reverses_ascending() {
    let mut grid = live_grid(store(fruit_parts()));

    grid.toggle_sort(columns::MASS).unwrap();
    let ascending: Vec<String> = grid.row_names().into_iter().map(String::from).collect();
    grid.toggle_sort(columns::MASS).unwrap();
    let mut descending: Vec<String> = grid.row_names().into_iter().map(String::from).collect();
    descending.reverse();

    assert_eq!(ascending, descending);
    assert_eq!(grid.sort_selection().primary(), Some(SortKey::descending(columns::MASS)));
}

#[test]
fn test_sort_is_stable() {
    let parts = vec![
        Part::new("First", 1.0),
        Part::new("Second", 0.5),
        Part::new("Third", 1.0),
        Part::new("Fourth", 1.0),
    ];
    let mut grid = live_grid(store(parts));

    grid.toggle_sort(columns::MASS).unwrap();
    assert_eq!(grid.row_names(), vec!["Second", "First", "Third", "Fourth"]);

    grid.toggle_sort(columns::MASS).unwrap();
    assert_eq!(grid.row_names(), vec!["First", "Third", "Fourth", "Second"]);
}

#[test]
fn test_sort_by_each_column_type() {
    let parts = vec![
        Part::new("b", 3.0).count(7).enabled(true).grade(2).tag("zeta"),
        Part::new("a", 1.0).count(-2).enabled(false).grade(0).material("Wood").tag("alpha"),
        Part::new("c", 2.0).count(3).enabled(true).grade(1).material("Iron").tag("Mu"),
    ];
    let mut grid = live_grid(store(parts));
    let mut sorted_by = |column| {
        grid.set_sort_selection(SortSelection::single(column, SortOrder::Ascending))
            .unwrap();
        grid.row_names().into_iter().map(String::from).collect::<Vec<_>>()
    };

    assert_eq!(sorted_by(columns::NAME), vec!["a", "b", "c"]);
    assert_eq!(sorted_by(columns::MASS), vec!["a", "c", "b"]);
    assert_eq!(sorted_by(columns::COUNT), vec!["a", "c", "b"]);
    // false before true, ties keep enumeration order
    assert_eq!(sorted_by(columns::ENABLED), vec!["a", "b", "c"]);
    // labels: High, Low, Medium
    assert_eq!(sorted_by(columns::GRADE), vec!["b", "a", "c"]);
    // unassigned first
    assert_eq!(sorted_by(columns::MATERIAL), vec!["b", "c", "a"]);
    // ordinal: uppercase first
    assert_eq!(sorted_by(columns::TAG), vec!["c", "a", "b"]);
}

#[test]
fn test_multi_key_sort() {
    let parts = vec![
        Part::new("A", 1.0).grade(2),
        Part::new("B", 2.0).grade(0),
        Part::new("C", 0.5).grade(2),
        Part::new("D", 1.0).grade(0),
    ];
    let mut grid = live_grid(store(parts));

    grid.set_sort_selection(SortSelection::new(vec![
        SortKey::ascending(columns::GRADE),
        SortKey::descending(columns::MASS),
    ]))
    .unwrap();
    assert_eq!(grid.row_names(), vec!["A", "C", "B", "D"]);

    grid.toggle_sort(columns::GRADE).unwrap();
    grid.push_sort_key(columns::NAME).unwrap();
    assert_eq!(
        grid.sort_selection().keys(),
        &[SortKey::descending(columns::GRADE), SortKey::ascending(columns::NAME)]
    );
    assert_eq!(grid.row_names(), vec!["B", "D", "A", "C"]);
}

#[test]
fn test_invalid_column_sorts_by_name() {
    let parts = vec![Part::new("Item 10", 1.0), Part::new("item 9", 2.0)];
    let source = RecordTable::with_columns(store(parts), ["m_Mass", "m_Unknown"]);
    let mut grid = horizon_inspector::GridController::new(
        Box::new(source),
        horizon_inspector::InspectorConfig::default(),
    );
    grid.activate().unwrap();
    assert_eq!(grid.source().sort_type(2), SortType::Invalid);
    assert!(!grid.source().sort_type(2).is_valid());
    assert!(grid.source().sort_type(1).is_valid());

    grid.toggle_sort(2).unwrap();
    assert_eq!(grid.row_names(), vec!["item 9", "Item 10"]);
}

#[test]
fn test_unknown_sort_column_is_rejected() {
    let mut grid = live_grid(store(fruit_parts()));
    let before = grid.row_names().into_iter().map(String::from).collect::<Vec<_>>();

    assert!(matches!(
        grid.toggle_sort(42),
        Err(InspectorError::InvalidArgument(_))
    ));
    assert_eq!(grid.row_names(), before);
}

#[test]
fn test_stale_rows_are_rejected() {
    let mut source = RecordTable::new(store(fruit_parts()));
    source.cache().unwrap();
    let model = ListModel::new(source.generate_rows(), source.generation()).unwrap();
    let engine = SortEngine::new(&source);
    let mut rows = build_rows(&model, None);

    source.cache().unwrap();
    let result = engine.sort(
        &mut rows,
        &SortSelection::single(columns::MASS, SortOrder::Ascending),
        &source,
        model.generation(),
    );
    assert!(matches!(result, Err(InspectorError::StaleRowReference { .. })));
    assert_eq!(rows.len(), 3);
}

#[test]
fn test_sort_notifies_row_rebuild() {
    let mut grid = live_grid(store(fruit_parts()));
    let counts = std::sync::Arc::new(parking_lot::Mutex::new(Vec::new()));
    let counts_clone = counts.clone();
    grid.rows_rebuilt.connect(move |&count| counts_clone.lock().push(count));

    grid.toggle_sort(columns::MASS).unwrap();
    grid.set_search("apple");
    grid.set_search("apple");

    assert_eq!(*counts.lock(), vec![3, 2]);
}

#[test]
fn test_comparators_follow_columns() {
    let mut source = RecordTable::new(store(fruit_parts()));
    source.cache().unwrap();
    let engine = SortEngine::new(&source);
    let table = engine.comparators();

    assert_eq!(table.len(), source.column_count());
    assert_eq!(table.get(columns::NAME), Comparator::DisplayName);
    assert_eq!(table.get(columns::MASS), Comparator::Float);
    assert_eq!(table.get(columns::COUNT), Comparator::Integer);
    assert_eq!(table.get(columns::ENABLED), Comparator::Bool);
    assert_eq!(table.get(columns::GRADE), Comparator::EnumLabel);
    assert_eq!(table.get(columns::MATERIAL), Comparator::ObjectReference);
    assert_eq!(table.get(columns::TAG), Comparator::Text);
    assert_eq!(table.get(42), Comparator::DisplayName);
}
