//! Command-line configuration helpers.

mod converter_rule;

pub use converter_rule::{overrides_from_rules, parse_converter_rule, ConverterRule, NO_CONVERTER};

use anyhow::Context;
use record_core::SchemaCatalog;
use std::path::Path;

/// Load the YAML schema catalog at `path`.
pub fn load_catalog(path: &Path) -> anyhow::Result<SchemaCatalog> {
    SchemaCatalog::from_file(path)
        .with_context(|| format!("Failed to load schema catalog from {}", path.display()))
}
