//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use horizon_inspector::{
    CellDelegate, CellOption, EnumValue, FieldValue, GridController, Inspectable, InspectorConfig,
    MemoryStore, ObjectRef, RecordTable,
};
use parking_lot::Mutex;

static GRADES: LazyLock<Arc<[String]>> =
    LazyLock::new(|| ["Low", "Medium", "High"].map(String::from).into());

/// A part with one field of every sortable kind.
#[derive(Debug, Clone)]
pub struct Part {
    pub name: String,
    pub mass: f64,
    pub count: i64,
    pub enabled: bool,
    pub grade: usize,
    pub material: Option<String>,
    pub tag: String,
}

impl Part {
    pub fn new(name: &str, mass: f64) -> Self {
        Self {
            name: name.to_string(),
            mass,
            count: 0,
            enabled: true,
            grade: 0,
            material: None,
            tag: String::new(),
        }
    }

    pub fn count(mut self, count: i64) -> Self {
        self.count = count;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn grade(mut self, grade: usize) -> Self {
        self.grade = grade;
        self
    }

    pub fn material(mut self, material: &str) -> Self {
        self.material = Some(material.to_string());
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tag = tag.to_string();
        self
    }
}

impl Inspectable for Part {
    const KIND: &'static str = "Part";

    fn name(&self) -> &str {
        &self.name
    }

    fn field_names(&self) -> Vec<String> {
        ["m_Mass", "m_Count", "m_Enabled", "m_Grade", "m_Material", "m_Tag"]
            .map(String::from)
            .to_vec()
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "m_Mass" => FieldValue::Float(self.mass),
            "m_Count" => FieldValue::Integer(self.count),
            "m_Enabled" => FieldValue::Bool(self.enabled),
            "m_Grade" => FieldValue::Enum(EnumValue::new(self.grade, GRADES.clone())),
            "m_Material" => FieldValue::ObjectReference(self.material.as_deref().map(ObjectRef::new)),
            "m_Tag" => FieldValue::String(self.tag.clone()),
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
        match (name, value) {
            ("m_Mass", FieldValue::Float(mass)) => self.mass = mass,
            ("m_Count", FieldValue::Integer(count)) => self.count = count,
            ("m_Enabled", FieldValue::Bool(enabled)) => self.enabled = enabled,
            ("m_Grade", FieldValue::Enum(grade)) => self.grade = grade.index,
            ("m_Tag", FieldValue::String(tag)) => self.tag = tag,
            _ => return false,
        }
        true
    }
}

/// Column indices of the `Part` fields, in declaration order.
pub mod columns {
    pub const NAME: usize = 0;
    pub const MASS: usize = 1;
    pub const COUNT: usize = 2;
    pub const ENABLED: usize = 3;
    pub const GRADE: usize = 4;
    pub const MATERIAL: usize = 5;
    pub const TAG: usize = 6;
}

/// Route `tracing` output to the test harness. Honors `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn store(parts: Vec<Part>) -> Arc<MemoryStore<Part>> {
    Arc::new(MemoryStore::with_records(
        parts
            .into_iter()
            .map(|part| (format!("Parts/{}.part", part.name), part)),
    ))
}

/// The three parts of the search and sort walkthrough.
pub fn fruit_parts() -> Vec<Part> {
    vec![
        Part::new("Apple", 2.0),
        Part::new("Banana", 1.0),
        Part::new("apple pie", 3.0),
    ]
}

pub fn live_grid(store: Arc<MemoryStore<Part>>) -> GridController {
    let mut grid = GridController::new(Box::new(RecordTable::new(store)), InspectorConfig::default());
    grid.activate().expect("grid activates");
    grid
}

/// Records every callback and applies scripted edits once each.
#[derive(Default)]
pub struct ScriptedDelegate {
    edits: Mutex<HashMap<(usize, usize), FieldValue>>,
    pub drawn: Mutex<Vec<(usize, usize)>>,
    pub labels: Mutex<Vec<String>>,
    pub invalid: Mutex<Vec<(usize, usize, String)>>,
    pub selected_rows: Mutex<Vec<usize>>,
}

impl ScriptedDelegate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Edit `(record, column)` to `value` the next time it is drawn.
    pub fn script(&self, record: usize, column: usize, value: impl Into<FieldValue>) {
        self.edits.lock().insert((record, column), value.into());
    }

    pub fn clear(&self) {
        self.drawn.lock().clear();
        self.labels.lock().clear();
        self.invalid.lock().clear();
        self.selected_rows.lock().clear();
    }
}

impl CellDelegate for ScriptedDelegate {
    fn draw(&self, option: &CellOption, value: &mut FieldValue) -> bool {
        self.drawn.lock().push((option.record, option.column));
        if option.state.selected {
            self.selected_rows.lock().push(option.record);
        }
        match self.edits.lock().remove(&(option.record, option.column)) {
            Some(edit) => {
                *value = edit;
                true
            }
            None => false,
        }
    }

    fn draw_label(&self, _option: &CellOption, text: &str, _icon: Option<&str>) {
        self.labels.lock().push(text.to_string());
    }

    fn draw_invalid(&self, option: &CellOption, message: &str) {
        self.invalid
            .lock()
            .push((option.record, option.column, message.to_string()));
    }
}
