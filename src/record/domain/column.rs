//! Column descriptors of a persisted record.

use crate::schema::domain::{FieldKind, Value};

/// Storage type of a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    /// `smallint`.
    SmallInt,
    /// `bigint`.
    BigInt,
    /// `int`.
    Int,
    /// `bool`.
    Bool,
    /// `date`.
    Date,
    /// `datetime`.
    DateTime,
    /// `decimal`.
    Decimal,
    /// `double`.
    Double,
    /// `float`.
    Float,
    /// `time`.
    Time,
    /// Any other declared type, stored in lowercase.
    Other(String),
}

impl ColumnType {
    /// Parses a declared type name, ignoring case.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let lowered = name.trim().to_lowercase();
        match lowered.as_str() {
            "smallint" => Self::SmallInt,
            "bigint" => Self::BigInt,
            "int" => Self::Int,
            "bool" => Self::Bool,
            "date" => Self::Date,
            "datetime" => Self::DateTime,
            "decimal" => Self::Decimal,
            "double" => Self::Double,
            "float" => Self::Float,
            "time" => Self::Time,
            _ => Self::Other(lowered),
        }
    }

    /// Returns the field kind used to coerce values of this column.
    ///
    /// Unrecognised types are treated as text.
    #[must_use]
    pub const fn field_kind(&self) -> FieldKind {
        match self {
            Self::SmallInt | Self::BigInt | Self::Int => FieldKind::Integer,
            Self::Bool => FieldKind::Boolean,
            Self::Date => FieldKind::Date,
            Self::DateTime => FieldKind::DateTime,
            Self::Decimal => FieldKind::Decimal,
            Self::Double | Self::Float => FieldKind::Float,
            Self::Time => FieldKind::Time,
            Self::Other(_) => FieldKind::String,
        }
    }
}

impl From<&str> for ColumnType {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

/// Cardinality of a reference column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// The column holds one key of the target table.
    ToOne,
    /// The column holds a list of keys of the target table.
    ToMany,
}

/// Target of a reference column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Referenced table.
    pub table: String,
    /// Column of the referenced table holding the key.
    pub column: String,
    /// Cardinality.
    pub kind: ReferenceKind,
}

/// Declaration of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    /// Column name, also the attribute and field name.
    pub name: String,
    /// Storage type.
    pub column_type: ColumnType,
    /// Whether null is allowed.
    pub nullable: bool,
    /// Maximum text length.
    pub max_length: Option<usize>,
    /// Whether values must be unique across the table.
    pub unique: bool,
    /// Whether this column is the primary key.
    pub primary_key: bool,
    /// Allowed values.
    pub choices: Vec<Value>,
    /// Default value.
    pub default: Option<Value>,
    /// Target of a reference column.
    pub reference: Option<Reference>,
}

impl ColumnDescriptor {
    /// Creates a nullable column with no constraints.
    pub fn new(name: impl Into<String>, column_type: impl Into<ColumnType>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            nullable: true,
            max_length: None,
            unique: false,
            primary_key: false,
            choices: Vec::new(),
            default: None,
            reference: None,
        }
    }

    /// Disallows null.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the maximum text length.
    #[must_use]
    pub const fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Requires values to be unique across the table.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Marks the column as the primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Restricts values to `choices`.
    #[must_use]
    pub fn choices<I, T>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Makes the column a reference to one row of `table`.
    #[must_use]
    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.reference = Some(Reference {
            table: table.into(),
            column: column.into(),
            kind: ReferenceKind::ToOne,
        });
        self
    }

    /// Makes the column a list of references to rows of `table`.
    #[must_use]
    pub fn references_many(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.reference = Some(Reference {
            table: table.into(),
            column: column.into(),
            kind: ReferenceKind::ToMany,
        });
        self
    }
}
