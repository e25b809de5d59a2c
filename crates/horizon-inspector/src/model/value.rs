//! Field values and their semantic sort types.

use std::fmt;
use std::sync::Arc;

/// The semantic type of a column, used to pick a comparator and a cell
/// delegate.
///
/// Sort types are sampled from the first record of a source when it is
/// cached and stay fixed for that activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortType {
    String,
    Float,
    Bool,
    Integer,
    Enum,
    ObjectReference,
    /// The field is absent on the first record or has no sortable value.
    /// Such columns sort by display name.
    Invalid,
}

impl SortType {
    /// The sort type a value belongs to.
    pub fn of(value: &FieldValue) -> Self {
        match value {
            FieldValue::String(_) => Self::String,
            FieldValue::Float(_) => Self::Float,
            FieldValue::Bool(_) => Self::Bool,
            FieldValue::Integer(_) => Self::Integer,
            FieldValue::Enum(_) => Self::Enum,
            FieldValue::ObjectReference(_) => Self::ObjectReference,
            FieldValue::Unsupported(_) => Self::Invalid,
        }
    }

    /// Lowercase name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Enum => "enum",
            Self::ObjectReference => "object reference",
            Self::Invalid => "invalid",
        }
    }

    /// Check if this column has a comparator of its own.
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::Invalid
    }
}

impl fmt::Display for SortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An enumeration value: the selected index into a shared list of labels.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub index: usize,
    pub labels: Arc<[String]>,
}

impl EnumValue {
    pub fn new(index: usize, labels: Arc<[String]>) -> Self {
        Self { index, labels }
    }

    /// Display label of the selected entry; empty when the index is out of range.
    pub fn label(&self) -> &str {
        self.labels.get(self.index).map(String::as_str).unwrap_or("")
    }

    /// The same enumeration with a different selection.
    pub fn with_index(&self, index: usize) -> Self {
        Self {
            index,
            labels: Arc::clone(&self.labels),
        }
    }
}

/// A reference to another record, by name and optional persistent key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub name: String,
    pub key: Option<String>,
}

impl ObjectRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

/// The value of one field of one record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Float(f64),
    Bool(bool),
    Integer(i64),
    Enum(EnumValue),
    /// `None` is an unassigned reference.
    ObjectReference(Option<ObjectRef>),
    /// A field the engine can draw but not compare, named by its type.
    Unsupported(String),
}

impl FieldValue {
    pub fn sort_type(&self) -> SortType {
        SortType::of(self)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// The referenced record's name, `Some(None)` for an unassigned reference.
    pub fn as_object_ref_name(&self) -> Option<Option<&str>> {
        match self {
            Self::ObjectReference(r) => Some(r.as_ref().map(|r| r.name.as_str())),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Float(v) => write!(f, "{}", v),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Enum(e) => f.write_str(e.label()),
            Self::ObjectReference(Some(r)) => f.write_str(&r.name),
            Self::ObjectReference(None) => f.write_str("None"),
            Self::Unsupported(type_name) => write!(f, "<{}>", type_name),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for FieldValue {
    fn from(v: f32) -> Self {
        Self::Float(v as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        Self::Integer(i as i64)
    }
}

impl From<EnumValue> for FieldValue {
    fn from(e: EnumValue) -> Self {
        Self::Enum(e)
    }
}

impl From<Option<ObjectRef>> for FieldValue {
    fn from(r: Option<ObjectRef>) -> Self {
        Self::ObjectReference(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_types() -> Arc<[String]> {
        vec!["Dynamic".to_string(), "Kinematic".to_string(), "Static".to_string()].into()
    }

    #[test]
    fn test_sort_type_of() {
        assert_eq!(SortType::of(&"a".into()), SortType::String);
        assert_eq!(SortType::of(&1.5f64.into()), SortType::Float);
        assert_eq!(SortType::of(&true.into()), SortType::Bool);
        assert_eq!(SortType::of(&3i64.into()), SortType::Integer);
        assert_eq!(
            SortType::of(&EnumValue::new(0, body_types()).into()),
            SortType::Enum
        );
        assert_eq!(
            SortType::of(&FieldValue::ObjectReference(None)),
            SortType::ObjectReference
        );
        assert_eq!(
            SortType::of(&FieldValue::Unsupported("Vector3".into())),
            SortType::Invalid
        );
        assert!(!SortType::Invalid.is_valid());
    }

    #[test]
    fn test_enum_label() {
        let value = EnumValue::new(2, body_types());
        assert_eq!(value.label(), "Static");
        assert_eq!(value.with_index(1).label(), "Kinematic");
        assert_eq!(value.with_index(9).label(), "");
    }

    #[test]
    fn test_accessors() {
        let value = FieldValue::ObjectReference(Some(ObjectRef::new("Ground").with_key("ground.mat")));
        assert_eq!(value.as_object_ref_name(), Some(Some("Ground")));
        assert_eq!(FieldValue::ObjectReference(None).as_object_ref_name(), Some(None));
        assert_eq!(value.as_float(), None);
        assert_eq!(FieldValue::Float(2.5).as_float(), Some(2.5));
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::Float(2.0).to_string(), "2");
        assert_eq!(FieldValue::ObjectReference(None).to_string(), "None");
        assert_eq!(FieldValue::Unsupported("Vector3".into()).to_string(), "<Vector3>");
    }
}
