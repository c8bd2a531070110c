//! Table-level description of a persisted record.

use super::ColumnDescriptor;

/// A composite index over several columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDescriptor {
    /// Indexed columns in order.
    pub columns: Vec<String>,
    /// Whether the combined values must be unique.
    pub unique: bool,
}

impl IndexDescriptor {
    /// Creates a unique index over `columns`.
    pub fn unique<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            unique: true,
        }
    }

    /// Creates a non-unique index over `columns`.
    pub fn plain<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            unique: false,
            ..Self::unique(columns)
        }
    }
}

/// Columns, indexes and primary key of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    table: String,
    columns: Vec<ColumnDescriptor>,
    indexes: Vec<IndexDescriptor>,
}

impl RecordSchema {
    /// Creates a schema for `table` with no columns.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Appends a column.
    #[must_use]
    pub fn column(mut self, column: ColumnDescriptor) -> Self {
        self.columns.push(column);
        self
    }

    /// Appends an index.
    #[must_use]
    pub fn index(mut self, index: IndexDescriptor) -> Self {
        self.indexes.push(index);
        self
    }

    /// Returns the table name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Returns the declared indexes.
    #[must_use]
    pub fn indexes(&self) -> &[IndexDescriptor] {
        &self.indexes
    }

    /// Returns the unique indexes.
    pub fn unique_indexes(&self) -> impl Iterator<Item = &IndexDescriptor> {
        self.indexes.iter().filter(|index| index.unique)
    }

    /// Returns the primary key column.
    #[must_use]
    pub fn primary_key(&self) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|column| column.primary_key)
    }

    /// Returns the named column.
    #[must_use]
    pub fn find_column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|column| column.name == name)
    }
}
