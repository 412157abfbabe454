//! Column storage types.
//!
//! This module defines `ColumnType`, the storage type universe of the record
//! framework. Each variant exposes a type-kind name via [`ColumnType::kind`];
//! the translation engine keys its converter registry on that name.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

/// Storage type of a record column.
///
/// # YAML Format
///
/// Simple types can be specified as strings:
/// ```yaml
/// type: text
/// type: big_integer
/// type: date
/// ```
///
/// Types with attributes use object format:
/// ```yaml
/// type:
///   type: string
///   length: 64
/// type:
///   type: numeric
///   precision: 10
///   scale: 2
/// type:
///   type: other
///   kind: Geometry
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnType {
    /// Bounded or unbounded character string
    String {
        /// Maximum length, if declared
        length: Option<u32>,
    },

    /// Unlimited text
    Text,

    /// Unicode string
    Unicode {
        /// Maximum length, if declared
        length: Option<u32>,
    },

    /// Unlimited unicode text
    UnicodeText,

    /// Enumeration stored by label
    Enum {
        /// Allowed labels
        values: Vec<String>,
    },

    /// Time interval
    Interval,

    /// Binary large object
    LargeBinary,

    /// Serialized object blob
    PickleType,

    /// Boolean value
    Boolean,

    /// Integer
    Integer,

    /// 64-bit integer
    BigInteger,

    /// 16-bit integer
    SmallInteger,

    /// Exact numeric
    Numeric {
        /// Total number of digits
        precision: Option<u8>,
        /// Number of digits after the decimal point
        scale: Option<u8>,
    },

    /// Floating point
    Float,

    /// Date and time
    DateTime,

    /// Calendar date
    Date,

    /// Time of day, optionally zoned
    Time,

    /// A storage type this crate does not model; carries its type-kind name
    Other {
        /// Type-kind name used for converter lookup
        kind: String,
    },
}

impl ColumnType {
    /// Type-kind name of this column type.
    ///
    /// This is the key the converter registry is consulted with.
    pub fn kind(&self) -> &str {
        match self {
            Self::String { .. } => "String",
            Self::Text => "Text",
            Self::Unicode { .. } => "Unicode",
            Self::UnicodeText => "UnicodeText",
            Self::Enum { .. } => "Enum",
            Self::Interval => "Interval",
            Self::LargeBinary => "LargeBinary",
            Self::PickleType => "PickleType",
            Self::Boolean => "Boolean",
            Self::Integer => "Integer",
            Self::BigInteger => "BigInteger",
            Self::SmallInteger => "SmallInteger",
            Self::Numeric { .. } => "Numeric",
            Self::Float => "Float",
            Self::DateTime => "DateTime",
            Self::Date => "Date",
            Self::Time => "Time",
            Self::Other { kind } => kind.as_str(),
        }
    }

    /// Create an unbounded String type.
    pub fn string() -> Self {
        Self::String { length: None }
    }

    /// Create a String type with a maximum length.
    pub fn varchar(length: u32) -> Self {
        Self::String {
            length: Some(length),
        }
    }

    /// Create a Numeric type with the given precision and scale.
    pub fn numeric(precision: u8, scale: u8) -> Self {
        Self::Numeric {
            precision: Some(precision),
            scale: Some(scale),
        }
    }

    /// Create an Enum type with the given labels.
    pub fn enumeration(values: Vec<String>) -> Self {
        Self::Enum { values }
    }

    /// Create a type this crate does not model.
    pub fn other(kind: impl Into<String>) -> Self {
        Self::Other { kind: kind.into() }
    }

    /// Check if this type stores character data.
    pub fn is_string(&self) -> bool {
        matches!(
            self,
            Self::String { .. }
                | Self::Text
                | Self::Unicode { .. }
                | Self::UnicodeText
                | Self::Enum { .. }
                | Self::Interval
        )
    }

    /// Check if this type stores binary data.
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::LargeBinary | Self::PickleType)
    }

    /// Check if this type stores integral numbers.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Integer | Self::BigInteger | Self::SmallInteger | Self::Numeric { .. }
        )
    }

    /// Check if this type represents a temporal type.
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::DateTime | Self::Date | Self::Time)
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String { length: Some(n) } => write!(f, "String({n})"),
            Self::Unicode { length: Some(n) } => write!(f, "Unicode({n})"),
            Self::Numeric {
                precision: Some(p),
                scale: Some(s),
            } => write!(f, "Numeric({p},{s})"),
            other => f.write_str(other.kind()),
        }
    }
}

// Custom serialization/deserialization for ColumnType
// Supports both simple string format ("text", "date") and object format
// ({"type": "string", "length": 64})

impl Serialize for ColumnType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        match self {
            Self::String { length: None } => serializer.serialize_str("string"),
            Self::Text => serializer.serialize_str("text"),
            Self::Unicode { length: None } => serializer.serialize_str("unicode"),
            Self::UnicodeText => serializer.serialize_str("unicode_text"),
            Self::Interval => serializer.serialize_str("interval"),
            Self::LargeBinary => serializer.serialize_str("large_binary"),
            Self::PickleType => serializer.serialize_str("pickle_type"),
            Self::Boolean => serializer.serialize_str("boolean"),
            Self::Integer => serializer.serialize_str("integer"),
            Self::BigInteger => serializer.serialize_str("big_integer"),
            Self::SmallInteger => serializer.serialize_str("small_integer"),
            Self::Numeric {
                precision: None,
                scale: None,
            } => serializer.serialize_str("numeric"),
            Self::Float => serializer.serialize_str("float"),
            Self::DateTime => serializer.serialize_str("date_time"),
            Self::Date => serializer.serialize_str("date"),
            Self::Time => serializer.serialize_str("time"),

            Self::String { length: Some(length) } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "string")?;
                map.serialize_entry("length", length)?;
                map.end()
            }
            Self::Unicode { length: Some(length) } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "unicode")?;
                map.serialize_entry("length", length)?;
                map.end()
            }
            Self::Numeric { precision, scale } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("type", "numeric")?;
                if let Some(precision) = precision {
                    map.serialize_entry("precision", precision)?;
                }
                if let Some(scale) = scale {
                    map.serialize_entry("scale", scale)?;
                }
                map.end()
            }
            Self::Enum { values } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "enum")?;
                map.serialize_entry("values", values)?;
                map.end()
            }
            Self::Other { kind } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "other")?;
                map.serialize_entry("kind", kind)?;
                map.end()
            }
        }
    }
}

/// Parse the simple (attribute-free) spellings shared by both formats.
fn simple_type(name: &str) -> Option<ColumnType> {
    let ty = match name {
        "string" | "varchar" => ColumnType::string(),
        "text" => ColumnType::Text,
        "unicode" => ColumnType::Unicode { length: None },
        "unicode_text" => ColumnType::UnicodeText,
        "enum" => ColumnType::Enum { values: Vec::new() },
        "interval" => ColumnType::Interval,
        "large_binary" | "blob" => ColumnType::LargeBinary,
        "pickle_type" | "pickle" => ColumnType::PickleType,
        "boolean" | "bool" => ColumnType::Boolean,
        "integer" | "int" => ColumnType::Integer,
        "big_integer" | "bigint" => ColumnType::BigInteger,
        "small_integer" | "smallint" => ColumnType::SmallInteger,
        "numeric" | "decimal" => ColumnType::Numeric {
            precision: None,
            scale: None,
        },
        "float" => ColumnType::Float,
        "date_time" | "datetime" | "timestamp" => ColumnType::DateTime,
        "date" => ColumnType::Date,
        "time" => ColumnType::Time,
        _ => return None,
    };
    Some(ty)
}

impl<'de> Deserialize<'de> for ColumnType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{Error, MapAccess, Visitor};

        struct ColumnTypeVisitor;

        impl<'de> Visitor<'de> for ColumnTypeVisitor {
            type Value = ColumnType;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a string or map representing a ColumnType")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                simple_type(value)
                    .ok_or_else(|| E::custom(format!("unknown column type: {value}")))
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut type_name: Option<String> = None;
                let mut fields: HashMap<String, serde_yaml::Value> = HashMap::new();

                while let Some(key) = map.next_key::<String>()? {
                    if key == "type" {
                        type_name = Some(map.next_value()?);
                    } else {
                        fields.insert(key, map.next_value()?);
                    }
                }

                let type_name = type_name.ok_or_else(|| M::Error::missing_field("type"))?;

                match type_name.as_str() {
                    "string" | "varchar" => Ok(ColumnType::String {
                        length: get_field(&fields, "length"),
                    }),
                    "unicode" => Ok(ColumnType::Unicode {
                        length: get_field(&fields, "length"),
                    }),
                    "numeric" | "decimal" => Ok(ColumnType::Numeric {
                        precision: get_field(&fields, "precision"),
                        scale: get_field(&fields, "scale"),
                    }),
                    "enum" => Ok(ColumnType::Enum {
                        values: get_field(&fields, "values").unwrap_or_default(),
                    }),
                    "other" => {
                        let kind: String = get_field_required(&fields, "kind")?;
                        Ok(ColumnType::Other { kind })
                    }
                    simple => simple_type(simple)
                        .ok_or_else(|| M::Error::custom(format!("unknown column type: {simple}"))),
                }
            }
        }

        deserializer.deserialize_any(ColumnTypeVisitor)
    }
}

fn get_field<T: for<'de> Deserialize<'de>>(
    fields: &HashMap<String, serde_yaml::Value>,
    key: &str,
) -> Option<T> {
    fields
        .get(key)
        .and_then(|v| serde_yaml::from_value(v.clone()).ok())
}

fn get_field_required<T: for<'de> Deserialize<'de>, E: serde::de::Error>(
    fields: &HashMap<String, serde_yaml::Value>,
    key: &'static str,
) -> Result<T, E> {
    let value = fields.get(key).ok_or_else(|| E::missing_field(key))?;
    serde_yaml::from_value(value.clone())
        .map_err(|e| E::custom(format!("invalid field '{key}': {e}")))
}
