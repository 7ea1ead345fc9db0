use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    #[error("Identifier field '{0}' is not declared in the readout schema")]
    UnknownField(String),

    #[error("Identifier field '{0}' appears twice in the schema declaration")]
    DuplicateSchemaField(String),

    #[error("Identifier field '{0}' is already set on an ancestor placement")]
    DuplicateField(String),

    #[error("Identifier field '{field}' appended out of schema order (schema declares it before '{previous}')")]
    OutOfOrder { field: String, previous: String },
}

/// The ordered identifier field list of one detector class.
///
/// Declared once per detector (`readout = ["system", "layer", "slice"]` in
/// the spec file) and consumed by external bit-packing logic; the builders
/// only ever append fields in the schema's declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSchema {
    fields: Vec<String>,
}

impl IdSchema {
    pub fn new(fields: Vec<String>) -> Result<Self, IdError> {
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].contains(field) {
                return Err(IdError::DuplicateSchemaField(field.clone()));
            }
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    fn index_of(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }
}

/// A composite cell identifier: an ordered sequence of (field, value) pairs
/// accumulated as the element tree is walked top-down. A child's identifier
/// is its parent's identifier with the child's own fields appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellId {
    fields: Vec<(String, i64)>,
}

impl CellId {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a new identifier with `(field, value)` appended.
    ///
    /// Setting a field that is already present in the ancestor chain is a
    /// specification error, never a silent overwrite, and appends must follow
    /// the schema's declared field order.
    pub fn append(&self, schema: &IdSchema, field: &str, value: i64) -> Result<CellId, IdError> {
        let position = schema
            .index_of(field)
            .ok_or_else(|| IdError::UnknownField(field.to_string()))?;
        if self.get(field).is_some() {
            return Err(IdError::DuplicateField(field.to_string()));
        }
        if let Some((previous, _)) = self.fields.last() {
            // The last appended field always resolves: it was checked on entry.
            let last_position = schema.index_of(previous).unwrap_or(usize::MAX);
            if position < last_position {
                return Err(IdError::OutOfOrder {
                    field: field.to_string(),
                    previous: previous.clone(),
                });
            }
        }
        let mut fields = self.fields.clone();
        fields.push((field.to_string(), value));
        Ok(CellId { fields })
    }

    /// Looks a field up by name, independent of its position.
    pub fn get(&self, field: &str) -> Option<i64> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|&(_, value)| value)
    }

    /// The (field, value) pairs in physical encoding order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, i64)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{name}:{value}")?;
        }
        Ok(())
    }
}
