//! Column definitions for table display.

use serde::{Deserialize, Serialize};

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Column configuration.
///
/// Columns define the structure of the table: the field they read from each
/// row, header text, width, and which interactions they accept. The `field`
/// must be unique within a table.
///
/// # Examples
///
/// ```
/// use datagrid::{Alignment, Column, SortDirection};
///
/// let columns = vec![
///     Column::new("id", "ID").disable_hiding(),
///     Column::new("name", "Name").sortable().sort_direction(SortDirection::Asc),
///     Column::new("status", "Status").align(Alignment::Center).width(15),
/// ];
/// assert!(columns[1].sortable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Row field this column displays. Unique per table.
    pub field: String,
    /// Column header text
    pub header_name: String,
    /// Whether clicking the header sorts by this column
    #[serde(default)]
    pub sortable: bool,
    /// Initial sort direction, used to seed the default sort
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
    /// Whether the column is currently hidden
    #[serde(default)]
    pub hidden: bool,
    /// Columns with this flag can never be hidden by the user
    #[serde(default)]
    pub disable_hiding: bool,
    /// Optional fixed width; layout is up to the view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u16>,
    /// Header-only column (no body cell), e.g. an actions column
    #[serde(default)]
    pub has_no_cell: bool,
    /// Horizontal alignment
    #[serde(default)]
    pub align: Alignment,
}

impl Column {
    /// Create a visible, non-sortable column.
    pub fn new(field: impl Into<String>, header_name: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            header_name: header_name.into(),
            sortable: false,
            sort_direction: None,
            hidden: false,
            disable_hiding: false,
            width: None,
            has_no_cell: false,
            align: Alignment::Left,
        }
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Seed the default sort with this column and direction.
    pub fn sort_direction(mut self, direction: SortDirection) -> Self {
        self.sort_direction = Some(direction);
        self
    }

    /// Start hidden.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Prevent the user from hiding the column.
    pub fn disable_hiding(mut self) -> Self {
        self.disable_hiding = true;
        self
    }

    /// Set the column width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Mark the column as header-only.
    pub fn without_cell(mut self) -> Self {
        self.has_no_cell = true;
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Whether this column counts toward the "one visible column" floor.
    pub(crate) fn counts_as_visible_content(&self) -> bool {
        !self.hidden && !self.has_no_cell && !self.disable_hiding
    }
}
