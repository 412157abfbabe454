//! Type-kind to converter registry.
//!
//! The default table maps every column type-kind the record framework ships
//! with to a converter. Callers can replace entries per call with
//! [`ConverterOverrides`]; an entry may also map a kind to no converter, which
//! makes the translators and the synthesizer skip columns of that kind.

use crate::converter::{
    Converter, DateConverter, IdentityConverter, ScalarConverter, TimeConverter,
};
use crate::error::{BridgeError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Shared converter handle.
pub type ConverterRef = Arc<dyn Converter>;

/// Caller-supplied registry entries, merged over the defaults key by key.
#[derive(Debug, Clone, Default)]
pub struct ConverterOverrides {
    entries: HashMap<String, Option<ConverterRef>>,
}

impl ConverterOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `kind` to `converter`.
    pub fn with(mut self, kind: impl Into<String>, converter: ConverterRef) -> Self {
        self.insert(kind, Some(converter));
        self
    }

    /// Map `kind` to no converter.
    pub fn without(mut self, kind: impl Into<String>) -> Self {
        self.insert(kind, None);
        self
    }

    /// Set or replace the entry for `kind`.
    pub fn insert(&mut self, kind: impl Into<String>, converter: Option<ConverterRef>) {
        self.entries.insert(kind.into(), converter);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&ConverterRef>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }
}

/// Registry of converters keyed by column type-kind name.
#[derive(Debug, Clone)]
pub struct ConverterRegistry {
    converters: HashMap<String, Option<ConverterRef>>,
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        let string: ConverterRef = Arc::new(ScalarConverter::string());
        let bytes: ConverterRef = Arc::new(ScalarConverter::bytes());
        let integer: ConverterRef = Arc::new(ScalarConverter::integer());

        let mut converters: HashMap<String, Option<ConverterRef>> = HashMap::new();
        for kind in ["String", "Text", "Unicode", "UnicodeText", "Enum", "Interval"] {
            converters.insert(kind.to_string(), Some(string.clone()));
        }
        for kind in ["LargeBinary", "PickleType"] {
            converters.insert(kind.to_string(), Some(bytes.clone()));
        }
        for kind in ["Integer", "BigInteger", "SmallInteger", "Numeric"] {
            converters.insert(kind.to_string(), Some(integer.clone()));
        }
        converters.insert(
            "Boolean".to_string(),
            Some(Arc::new(ScalarConverter::boolean())),
        );
        converters.insert("Float".to_string(), Some(Arc::new(ScalarConverter::float())));
        converters.insert(
            "DateTime".to_string(),
            Some(Arc::new(ScalarConverter::timestamp())),
        );
        converters.insert("Date".to_string(), Some(Arc::new(DateConverter)));
        converters.insert("Time".to_string(), Some(Arc::new(TimeConverter)));

        Self { converters }
    }
}

impl ConverterRegistry {
    /// Copy of this registry with `overrides` applied; overridden keys are
    /// replaced, other keys keep their entries.
    pub fn with_overrides(&self, overrides: &ConverterOverrides) -> Self {
        let mut merged = self.clone();
        for (kind, converter) in overrides.iter() {
            merged.converters.insert(kind.to_string(), converter.cloned());
        }
        merged
    }

    /// Converter for `kind` as the translators see it.
    ///
    /// Returns `Ok(None)` when the kind is mapped to no converter and
    /// `UnsupportedTypeKind` when the kind is not mapped at all.
    pub fn resolve(&self, kind: &str, field: &str) -> Result<Option<&dyn Converter>> {
        match self.converters.get(kind) {
            Some(entry) => Ok(entry.as_deref()),
            None => Err(BridgeError::UnsupportedTypeKind {
                kind: kind.to_string(),
                field: field.to_string(),
            }),
        }
    }

    /// Converter for `kind`, treating unmapped kinds like kinds mapped to no
    /// converter.
    pub fn lookup(&self, kind: &str) -> Option<&dyn Converter> {
        self.converters.get(kind).and_then(|entry| entry.as_deref())
    }

    /// Whether `kind` has an entry, even one mapped to no converter.
    pub fn is_mapped(&self, kind: &str) -> bool {
        self.converters.contains_key(kind)
    }

    /// All mapped kinds, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.converters.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

/// Names accepted by [`converter_by_name`].
pub const CONVERTER_NAMES: &[&str] = &[
    "string",
    "bytes",
    "boolean",
    "integer",
    "float",
    "timestamp",
    "date",
    "time",
    "identity",
];

/// Built-in converter by its registry name.
pub fn converter_by_name(name: &str) -> Option<ConverterRef> {
    let converter: ConverterRef = match name {
        "string" => Arc::new(ScalarConverter::string()),
        "bytes" => Arc::new(ScalarConverter::bytes()),
        "boolean" => Arc::new(ScalarConverter::boolean()),
        "integer" => Arc::new(ScalarConverter::integer()),
        "float" => Arc::new(ScalarConverter::float()),
        "timestamp" => Arc::new(ScalarConverter::timestamp()),
        "date" => Arc::new(DateConverter),
        "time" => Arc::new(TimeConverter),
        "identity" => Arc::new(IdentityConverter),
        _ => return None,
    };
    Some(converter)
}
