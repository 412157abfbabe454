//! Record schema definitions.
//!
//! ## Type Hierarchy
//!
//! - `ColumnDefinition` - Single column metadata (name, type, nullability)
//! - `RecordSchema` - Named, ordered collection of columns
//! - `SchemaCatalog` - Collection of record schemas loaded from YAML
//!
//! Record schemas are owned by the record framework; the translation engine
//! only reads them.

use crate::types::ColumnType;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Table not found in catalog
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Column not found in record schema
    #[error("Column '{column}' not found in table '{table}'")]
    ColumnNotFound { table: String, column: String },

    /// Two tables share a name
    #[error("Duplicate table: {0}")]
    DuplicateTable(String),

    /// Two columns of one table share a name
    #[error("Duplicate column '{column}' in table '{table}'")]
    DuplicateColumn { table: String, column: String },
}

// ============================================================================
// Columns and Record Schemas
// ============================================================================

fn default_nullable() -> bool {
    true
}

/// Column definition.
///
/// Columns are nullable unless declared otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnDefinition {
    /// Column name
    pub name: String,

    /// Column type
    #[serde(rename = "type")]
    pub column_type: ColumnType,

    /// Whether this column accepts null
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

impl ColumnDefinition {
    /// Create a new column definition.
    pub fn new(name: impl Into<String>, column_type: ColumnType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable,
        }
    }

    /// Create a nullable column definition.
    pub fn nullable(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self::new(name, column_type, true)
    }

    /// Create a non-nullable column definition.
    pub fn required(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self::new(name, column_type, false)
    }

    /// Type-kind name of this column.
    pub fn kind(&self) -> &str {
        self.column_type.kind()
    }

    /// Whether a value must be present: the negation of `nullable`.
    pub fn is_required(&self) -> bool {
        !self.nullable
    }
}

/// Record schema: a named, ordered collection of columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordSchema {
    /// Schema (table/entity) name
    pub name: String,

    /// Column definitions in declaration order
    pub columns: Vec<ColumnDefinition>,
}

impl RecordSchema {
    /// Create a new record schema.
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDefinition>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Get a column by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get a column by name or fail with `ColumnNotFound`.
    pub fn column(&self, name: &str) -> Result<&ColumnDefinition, SchemaError> {
        self.get_column(name)
            .ok_or_else(|| SchemaError::ColumnNotFound {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    /// Get the type of a column by name.
    pub fn get_column_type(&self, name: &str) -> Option<&ColumnType> {
        self.get_column(name).map(|c| &c.column_type)
    }

    /// All column names in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Reject schemas whose columns are not addressable by a unique name.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(SchemaError::DuplicateColumn {
                    table: self.name.clone(),
                    column: column.name.clone(),
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// Catalog
// ============================================================================

fn default_version() -> u32 {
    1
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default = "default_version")]
    version: u32,
    tables: Vec<RecordSchema>,
}

/// Collection of record schemas.
///
/// Loaded from a YAML file:
///
/// ```yaml
/// version: 1
/// tables:
///   - name: User
///     columns:
///       - name: id
///         type: big_integer
///         nullable: false
///       - name: email
///         type:
///           type: string
///           length: 255
/// ```
#[derive(Debug, Clone)]
pub struct SchemaCatalog {
    /// Schema version
    pub version: u32,

    tables: Vec<Arc<RecordSchema>>,

    table_map: HashMap<String, usize>,
}

impl SchemaCatalog {
    /// Create a catalog from record schemas.
    pub fn new(tables: Vec<RecordSchema>) -> Result<Self, SchemaError> {
        let mut catalog = Self {
            version: default_version(),
            tables: Vec::with_capacity(tables.len()),
            table_map: HashMap::new(),
        };
        for table in tables {
            catalog.add_table(table)?;
        }
        Ok(catalog)
    }

    /// Load catalog from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse catalog from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        let mut catalog = Self::new(file.tables)?;
        catalog.version = file.version;
        Ok(catalog)
    }

    /// Add a table to the catalog.
    pub fn add_table(&mut self, table: RecordSchema) -> Result<(), SchemaError> {
        table.validate()?;
        if self.table_map.contains_key(&table.name) {
            return Err(SchemaError::DuplicateTable(table.name));
        }
        self.table_map.insert(table.name.clone(), self.tables.len());
        self.tables.push(Arc::new(table));
        Ok(())
    }

    /// Get a record schema by name.
    pub fn get_table(&self, name: &str) -> Option<&Arc<RecordSchema>> {
        self.table_map
            .get(name)
            .and_then(|&idx| self.tables.get(idx))
    }

    /// Get a record schema by name or fail with `TableNotFound`.
    pub fn table(&self, name: &str) -> Result<Arc<RecordSchema>, SchemaError> {
        self.get_table(name)
            .cloned()
            .ok_or_else(|| SchemaError::TableNotFound(name.to_string()))
    }

    /// Get the type of a column in a specific table.
    pub fn get_column_type(&self, table: &str, column: &str) -> Result<&ColumnType, SchemaError> {
        let table_schema = self
            .get_table(table)
            .ok_or_else(|| SchemaError::TableNotFound(table.to_string()))?;

        table_schema.column(column).map(|c| &c.column_type)
    }

    /// All table names in declaration order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    /// Iterate over all record schemas.
    pub fn tables(&self) -> impl Iterator<Item = &Arc<RecordSchema>> {
        self.tables.iter()
    }
}
