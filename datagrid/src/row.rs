//! TableRow trait and the stock row record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Trait for items that can be displayed as rows in a table.
///
/// Rows are supplied wholesale by the caller on every refresh. The engine only
/// reads them: selection and expansion live in id sets owned by the
/// controller, never on the row itself.
pub trait TableRow: Send + Sync + Clone + 'static {
    /// Unique identifier for this row.
    ///
    /// Used for stable selection across row mutations.
    fn id(&self) -> String;

    /// Value of a named field, or `None` if the row has no such field.
    fn field(&self, name: &str) -> Option<Value>;

    /// Initial selection flag, honored only by uncontrolled selection.
    fn preselected(&self) -> bool {
        false
    }
}

/// A generic row: an id plus arbitrary named JSON fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,
}

impl Row {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Add a field value.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Mark the row as initially selected.
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }
}

impl TableRow for Row {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }

    fn preselected(&self) -> bool {
        self.selected
    }
}
