//! `KIND=VARIANT` converter override rules.

use crate::registry::{converter_by_name, ConverterOverrides, ConverterRef, CONVERTER_NAMES};
use anyhow::Context;

/// Variant name that maps a kind to no converter.
pub const NO_CONVERTER: &str = "none";

/// One registry override given on the command line.
#[derive(Debug, Clone)]
pub struct ConverterRule {
    /// Column type-kind, e.g. `Text` or `Geometry`
    pub kind: String,
    /// Replacement converter, or `None` to skip the kind
    pub converter: Option<ConverterRef>,
}

/// Parse a rule like `Text=bytes` or `Float=none`.
///
/// Kind names are case-sensitive; variant names are not.
pub fn parse_converter_rule(s: &str) -> anyhow::Result<ConverterRule> {
    let (kind, variant) = s
        .split_once('=')
        .with_context(|| format!("Invalid converter rule '{s}', expected KIND=VARIANT"))?;

    let kind = kind.trim();
    if kind.is_empty() {
        anyhow::bail!("Empty type kind in converter rule '{s}'");
    }

    let variant = variant.trim().to_ascii_lowercase();
    let converter = if variant == NO_CONVERTER {
        None
    } else {
        let converter = converter_by_name(&variant).with_context(|| {
            format!(
                "Unknown converter '{variant}' in rule '{s}' (expected one of: {}, {NO_CONVERTER})",
                CONVERTER_NAMES.join(", ")
            )
        })?;
        Some(converter)
    };

    Ok(ConverterRule {
        kind: kind.to_string(),
        converter,
    })
}

/// Fold rules into registry overrides; a later rule for the same kind wins.
pub fn overrides_from_rules(rules: &[ConverterRule]) -> ConverterOverrides {
    let mut overrides = ConverterOverrides::new();
    for rule in rules {
        overrides.insert(rule.kind.clone(), rule.converter.clone());
    }
    overrides
}
