//! Field values and the ordered field bag passed to one substitution pass.

use std::fmt;
use sustainly_core::TemplateError;

/// A value substituted into a template.
///
/// Rendering is locale-independent: numbers always use `.` as the decimal
/// point and never carry grouping separators.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Renders as the empty string.
    Null,
    Text(String),
    Integer(i64),
    Unsigned(u64),
    /// Shortest representation that round-trips.
    Float(f64),
    /// Fixed number of decimal places.
    Fixed { value: f64, decimals: usize },
    /// A percentage with two decimals, e.g. `42.50%`.
    Percent(f64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Unsigned(n) => write!(f, "{n}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Fixed { value, decimals } => write!(f, "{:.*}", *decimals, value),
            Self::Percent(v) => write!(f, "{v:.2}%"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        Self::Integer(n.into())
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        Self::Unsigned(n)
    }
}

impl From<usize> for FieldValue {
    fn from(n: usize) -> Self {
        Self::Unsigned(n as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// An ordered set of named values for one substitution pass.
///
/// Names are unique within a bag; [`FieldBag::insert`] rejects duplicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldBag {
    fields: Vec<(String, FieldValue)>,
}

impl FieldBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. Fails if a field with the same name is already present.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Result<(), TemplateError> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(TemplateError::DuplicateField(name));
        }
        self.fields.push((name, value.into()));
        Ok(())
    }

    /// Builder form of [`FieldBag::insert`].
    pub fn with(
        mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Result<Self, TemplateError> {
        self.insert(name, value)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Conversion of a typed field struct into a [`FieldBag`].
///
/// Implemented by the prompt layer's per-category field structs so field
/// names are listed once, next to the data they come from.
pub trait ToFields {
    fn to_fields(&self) -> Result<FieldBag, TemplateError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_field_is_rejected() {
        let mut bag = FieldBag::new();
        bag.insert("Topic", "energy").unwrap();
        let err = bag.insert("Topic", "waste").unwrap_err();
        assert_eq!(err, TemplateError::DuplicateField("Topic".into()));
        assert_eq!(bag.len(), 1);
        assert_eq!(bag.get("Topic"), Some(&FieldValue::Text("energy".into())));
    }

    #[test]
    fn names_preserve_insertion_order() {
        let bag = FieldBag::new()
            .with("B", 1i64)
            .unwrap()
            .with("A", 2i64)
            .unwrap()
            .with("C", 3i64)
            .unwrap();
        assert_eq!(bag.names().collect::<Vec<_>>(), vec!["B", "A", "C"]);
    }

    #[test]
    fn numeric_rendering_is_locale_independent() {
        assert_eq!(FieldValue::Float(1234.5).to_string(), "1234.5");
        assert_eq!(FieldValue::Integer(-1_000_000).to_string(), "-1000000");
        assert_eq!(
            FieldValue::Fixed {
                value: 2.0 / 3.0,
                decimals: 3
            }
            .to_string(),
            "0.667"
        );
        assert_eq!(FieldValue::Percent(42.5).to_string(), "42.50%");
        assert_eq!(FieldValue::Percent(7.257).to_string(), "7.26%");
    }

    #[test]
    fn absent_value_renders_empty() {
        let v: FieldValue = Option::<String>::None.into();
        assert_eq!(v, FieldValue::Null);
        assert_eq!(v.to_string(), "");
    }
}
