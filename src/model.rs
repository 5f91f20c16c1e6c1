//! In-memory model of one database catalog snapshot.
//!
//! A provider builds the snapshot once; everything downstream (layout,
//! rendering, site assembly) reads it without mutation.

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatabaseMetadata {
    pub database_name: String,
    pub server_name: String,
    pub tables: Vec<Table>,
    pub users: Vec<User>,
    pub jobs: Vec<Job>,
    pub procedures: Vec<Procedure>,
    pub functions: Vec<Function>,
    pub statistics: Option<DatabaseStatistics>,
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("foreign key {foreign_key} on {table} has no column mappings")]
    EmptyForeignKey { table: TableKey, foreign_key: String },
}

impl DatabaseMetadata {
    pub fn base_tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter().filter(|t| t.kind == TableKind::Base)
    }

    pub fn views(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter().filter(|t| t.kind == TableKind::View)
    }

    pub fn find_table(&self, key: &TableKey) -> Option<&Table> {
        self.tables
            .iter()
            .find(|t| t.schema == key.schema && t.name == key.name)
    }

    /// Construction-time invariant: every foreign key carries at least one
    /// column mapping. A violation is a provider bug, not a layout concern.
    pub fn validate(&self) -> Result<(), ModelError> {
        for table in &self.tables {
            for fk in &table.foreign_keys {
                if fk.column_mappings.is_empty() {
                    return Err(ModelError::EmptyForeignKey {
                        table: table.key(),
                        foreign_key: fk.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Structural identity of a table. Lookups and cross-references go through
/// this key, never through reference identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableKey {
    pub schema: String,
    pub name: String,
}

impl TableKey {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableKind {
    #[default]
    Base,
    View,
}

impl TableKind {
    pub fn label(self) -> &'static str {
        match self {
            TableKind::Base => "TABLE",
            TableKind::View => "VIEW",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub schema: String,
    pub name: String,
    pub kind: TableKind,
    /// Ordered: drives both display order and connector anchor rows.
    pub columns: Vec<Column>,
    pub foreign_keys: Vec<ForeignKey>,
    pub indexes: Vec<Index>,
    pub triggers: Vec<Trigger>,
    pub check_constraints: Vec<CheckConstraint>,
    pub row_count: i64,
    /// Source text, for views.
    pub definition: Option<String>,
}

impl Table {
    pub fn key(&self) -> TableKey {
        TableKey::new(self.schema.clone(), self.name.clone())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Whether `name` participates in any foreign key of this table.
    pub fn is_fk_column(&self, name: &str) -> bool {
        self.foreign_keys
            .iter()
            .any(|fk| fk.column_mappings.iter().any(|m| m.column == name))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Column {
    pub name: String,
    pub data_type: String,
    pub max_length: Option<i64>,
    pub precision: Option<i64>,
    pub scale: Option<i64>,
    pub nullable: bool,
    pub primary_key: bool,
    pub identity: bool,
    pub default_value: Option<String>,
}

impl Column {
    /// Compact type descriptor for diagram rows and column listings.
    pub fn short_type(&self) -> String {
        let base = self.data_type.to_lowercase();
        match (self.max_length, self.precision, self.scale) {
            (Some(-1), _, _) => format!("{}(max)", base),
            (Some(n), _, _) if n > 0 && n < 8000 => format!("{}({})", base, n),
            (_, Some(p), Some(s)) => format!("{}({},{})", base, p, s),
            _ => base,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnPair {
    pub column: String,
    pub referenced_column: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForeignKey {
    pub name: String,
    pub referenced_schema: String,
    pub referenced_table: String,
    /// Ordered, non-empty once the model has been validated.
    pub column_mappings: Vec<ColumnPair>,
    pub on_delete: String,
    pub on_update: String,
}

impl ForeignKey {
    pub fn referenced_key(&self) -> TableKey {
        TableKey::new(self.referenced_schema.clone(), self.referenced_table.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Index {
    pub name: String,
    pub unique: bool,
    pub primary_key: bool,
    pub columns: Vec<IndexColumn>,
    pub included_columns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexColumn {
    pub name: String,
    pub descending: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trigger {
    pub name: String,
    /// BEFORE, AFTER, INSTEAD OF.
    pub timing: String,
    /// INSERT, UPDATE, DELETE (comma separated when combined).
    pub events: String,
    pub definition: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckConstraint {
    pub name: String,
    pub definition: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub name: String,
    pub kind: String,
    pub roles: Vec<String>,
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Permission {
    pub object_name: String,
    pub permission: String,
    pub grant_type: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Job {
    pub name: String,
    pub enabled: bool,
    pub description: String,
    pub schedules: Vec<JobSchedule>,
    pub steps: Vec<JobStep>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobSchedule {
    pub name: String,
    pub enabled: bool,
    pub frequency: String,
    pub start_time: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobStep {
    pub step_id: i64,
    pub name: String,
    pub subsystem: String,
    pub command: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Procedure {
    pub schema: String,
    pub name: String,
    pub definition: String,
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Function {
    pub schema: String,
    pub name: String,
    /// SCALAR, TABLE_VALUED, and friends.
    pub kind: String,
    pub definition: String,
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub data_type: String,
    pub output: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatabaseStatistics {
    pub database_size_mb: f64,
    pub unallocated_mb: f64,
    pub total_tables: i64,
    pub total_views: i64,
    pub total_indexes: i64,
    pub total_triggers: i64,
    pub largest_tables: Vec<TableSize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSize {
    pub schema: String,
    pub name: String,
    pub row_count: i64,
}
