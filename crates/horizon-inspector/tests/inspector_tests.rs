//! Table inspector and registry tests.

mod common;

use std::sync::Arc;

use common::{Part, ScriptedDelegate, columns, fruit_parts, store};
use horizon_inspector::{
    DelegateSet, FieldValue, GridState, Inspectable, InspectorConfig, InspectorFrame, MemoryStore,
    PLACEHOLDER_TEXT, Rect, SourceEntry, SourceRegistry, TableInspector, global_registry,
    register_source,
};

#[derive(Debug, Clone)]
struct Crate {
    name: String,
    slots: i64,
}

impl Inspectable for Crate {
    const KIND: &'static str = "Crate";

    fn name(&self) -> &str {
        &self.name
    }

    fn field_names(&self) -> Vec<String> {
        vec!["slots".to_string()]
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        (name == "slots").then_some(FieldValue::Integer(self.slots))
    }

    fn set_field(&mut self, _name: &str, _value: FieldValue) -> bool {
        false
    }
}

fn crates() -> Arc<MemoryStore<Crate>> {
    Arc::new(MemoryStore::with_records([("Crates/small.crate", 4), ("Crates/large.crate", 16)].map(
        |(key, slots)| {
            let name = if slots > 8 { "Large" } else { "Small" };
            (
                key,
                Crate {
                    name: name.to_string(),
                    slots,
                },
            )
        },
    )))
}

fn registry() -> SourceRegistry {
    let registry = SourceRegistry::new();
    registry.register(SourceEntry::for_store(store(fruit_parts()), Vec::<String>::new()));
    registry.register(SourceEntry::for_store(crates(), ["slots"]));
    registry
}

fn viewport() -> Rect {
    Rect::new(0.0, 0.0, 640.0, 480.0)
}

#[test]
fn test_chooser_lists_registered_kinds() {
    let registry = registry();
    let inspector = TableInspector::new(&registry, InspectorConfig::default());
    assert_eq!(inspector.source_names(), vec!["Part", "Crate"]);
    assert_eq!(inspector.selected_index(), None);
}

#[test]
fn test_placeholder_until_selected() {
    let registry = registry();
    let mut inspector = TableInspector::new(&registry, InspectorConfig::default());
    let frame = inspector.frame(viewport(), &DelegateSet::default());
    assert_eq!(frame, InspectorFrame::Placeholder(PLACEHOLDER_TEXT));
}

#[test]
fn test_round_trip_between_kinds() {
    let registry = registry();
    let mut inspector = TableInspector::new(&registry, InspectorConfig::default());
    let delegates = DelegateSet::default();

    inspector.select(0).unwrap();
    inspector.frame(viewport(), &delegates);
    inspector.grid_mut().unwrap().toggle_sort(columns::MASS).unwrap();
    assert_eq!(
        inspector.grid().unwrap().row_names(),
        vec!["Banana", "Apple", "apple pie"]
    );

    inspector.select(1).unwrap();
    let InspectorFrame::Grid(report) = inspector.frame(viewport(), &delegates) else {
        panic!("expected a grid frame");
    };
    assert_eq!(report.rows_drawn, 2);
    assert_eq!(inspector.grid().unwrap().row_names(), vec!["Small", "Large"]);

    inspector.select(0).unwrap();
    inspector.frame(viewport(), &delegates);
    let grid = inspector.grid().unwrap();
    assert_eq!(grid.state(), GridState::Live);
    assert!(grid.sort_selection().is_empty());
    assert_eq!(grid.row_names(), vec!["Apple", "Banana", "apple pie"]);
}

#[test]
fn test_late_registration_is_selectable() {
    let registry = SourceRegistry::new();
    registry.register(SourceEntry::for_store(store(fruit_parts()), Vec::<String>::new()));
    let mut inspector = TableInspector::new(&registry, InspectorConfig::default());
    assert!(inspector.select(1).is_err());

    let index = registry.register(SourceEntry::for_store(crates(), ["slots"]));
    assert_eq!(inspector.source_names(), vec!["Part", "Crate"]);

    inspector.select(index).unwrap();
    inspector.frame(viewport(), &DelegateSet::default());
    assert_eq!(inspector.grid().unwrap().row_names(), vec!["Small", "Large"]);
}

#[test]
fn test_rows_start_below_header() {
    let registry = registry();
    let mut inspector = TableInspector::new(&registry, InspectorConfig::default());
    inspector.select(0).unwrap();

    // header strip 24, row height 20: one row fits under the header
    let InspectorFrame::Grid(report) =
        inspector.frame(Rect::new(0.0, 0.0, 640.0, 44.0), &DelegateSet::default())
    else {
        panic!("expected a grid frame");
    };
    assert_eq!(report.rows_drawn, 1);

    let grid = inspector.grid().unwrap();
    let body = grid.body_rect(Rect::new(0.0, 0.0, 640.0, 44.0));
    assert!(grid.row_at(body, horizon_inspector::Point::new(5.0, 10.0)).is_none());
    assert_eq!(
        grid.row_at(body, horizon_inspector::Point::new(5.0, 30.0)).map(|row| row.name()),
        Some("Apple")
    );
}

#[test]
fn test_global_registration() {
    let index = register_source(SourceEntry::for_store(crates(), ["slots"]));
    let mut inspector = TableInspector::new(global_registry(), InspectorConfig::default());

    inspector.select(index).unwrap();
    inspector.frame(viewport(), &DelegateSet::default());
    assert_eq!(inspector.grid().unwrap().rows().len(), 2);
}

#[test]
fn test_declaration_error_is_reported_once() {
    let registry = SourceRegistry::new();
    registry.register(SourceEntry::for_store(crates(), ["slots", ""]));
    let mut inspector = TableInspector::new(&registry, InspectorConfig::default());

    inspector.select(0).unwrap();
    let frame = inspector.frame(viewport(), &DelegateSet::default());

    assert!(inspector.last_error().is_some());
    let InspectorFrame::Grid(report) = frame else {
        panic!("expected a grid frame");
    };
    assert_eq!(report.rows_drawn, 0);
}

#[test]
fn test_config_file_shapes_the_grid() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inspector.toml");
    std::fs::write(
        &path,
        "[grid]\nrow_height = 40.0\n\n[columns]\nidentity_label = \"Record\"\n",
    )
    .unwrap();
    let config = InspectorConfig::load(&path).unwrap();

    let registry = registry();
    let mut inspector = TableInspector::new(&registry, config);
    inspector.select(0).unwrap();
    let delegate = ScriptedDelegate::new();
    let InspectorFrame::Grid(report) =
        inspector.frame(Rect::new(0.0, 0.0, 640.0, 70.0), &DelegateSet::new(delegate.clone()))
    else {
        panic!("expected a grid frame");
    };

    assert_eq!(report.rows_drawn, 2);
    assert_eq!(inspector.grid().unwrap().header().unwrap().labels()[0], "Record");
    assert_eq!(*delegate.labels.lock(), vec!["Apple", "Banana"]);
}

#[test]
fn test_edits_through_inspector_reach_store() {
    let parts = store(vec![Part::new("Bolt", 0.1), Part::new("Nut", 0.05)]);
    let registry = SourceRegistry::new();
    registry.register(SourceEntry::for_store(parts.clone(), Vec::<String>::new()));
    let mut inspector = TableInspector::new(&registry, InspectorConfig::default());
    inspector.select(0).unwrap();

    let delegate = ScriptedDelegate::new();
    delegate.script(1, columns::COUNT, 250_i64);
    let InspectorFrame::Grid(report) = inspector.frame(viewport(), &DelegateSet::new(delegate))
    else {
        panic!("expected a grid frame");
    };

    assert_eq!(report.committed, vec![1]);
    assert_eq!(parts.get("Parts/Nut.part").unwrap().count, 250);
}
