//! Record instances.

use crate::schema::RecordSchema;
use crate::values::RecordValue;
use std::collections::HashMap;
use std::sync::Arc;

/// A record instance bound to its schema.
///
/// Unset columns read as absent; the translators treat absence like null.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: Arc<RecordSchema>,
    values: HashMap<String, RecordValue>,
}

impl Record {
    /// Create an empty record of the given schema.
    pub fn new(schema: Arc<RecordSchema>) -> Self {
        Self {
            schema,
            values: HashMap::new(),
        }
    }

    /// Create a record populated with the given values.
    pub fn with_values<I, K>(schema: Arc<RecordSchema>, values: I) -> Self
    where
        I: IntoIterator<Item = (K, RecordValue)>,
        K: Into<String>,
    {
        let mut record = Self::new(schema);
        record.populate(values);
        record
    }

    /// Schema this record belongs to.
    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    /// Get a column value by name.
    pub fn get(&self, name: &str) -> Option<&RecordValue> {
        self.values.get(name)
    }

    /// Set a column value by name.
    pub fn set(&mut self, name: impl Into<String>, value: RecordValue) {
        self.values.insert(name.into(), value);
    }

    /// Set many column values at once, leaving other columns untouched.
    pub fn populate<I, K>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, RecordValue)>,
        K: Into<String>,
    {
        for (name, value) in values {
            self.values.insert(name.into(), value);
        }
    }

    /// All set values.
    pub fn values(&self) -> &HashMap<String, RecordValue> {
        &self.values
    }

    /// Number of set values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no value has been set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnDefinition;
    use crate::types::ColumnType;

    fn user_schema() -> Arc<RecordSchema> {
        Arc::new(RecordSchema::new(
            "User",
            vec![
                ColumnDefinition::required("id", ColumnType::Integer),
                ColumnDefinition::nullable("name", ColumnType::Text),
                ColumnDefinition::nullable("active", ColumnType::Boolean),
            ],
        ))
    }

    #[test]
    fn test_get_set() {
        let mut record = Record::new(user_schema());
        assert!(record.is_empty());
        assert_eq!(record.get("id"), None);

        record.set("id", RecordValue::Integer(1));
        assert_eq!(record.get("id"), Some(&RecordValue::Integer(1)));
        assert_eq!(record.schema().name, "User");
    }

    #[test]
    fn test_populate_leaves_other_columns() {
        let mut record = Record::with_values(
            user_schema(),
            [
                ("id", RecordValue::Integer(1)),
                ("name", RecordValue::from("Ada")),
            ],
        );

        record.populate([("active", RecordValue::Boolean(true))]);

        assert_eq!(record.len(), 3);
        assert_eq!(record.get("name"), Some(&RecordValue::from("Ada")));
        assert_eq!(record.get("active"), Some(&RecordValue::Boolean(true)));
    }
}
