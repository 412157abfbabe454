//! Per-call translation options.

use crate::registry::{ConverterOverrides, ConverterRegistry};

/// Field filters and converter overrides for one translation or synthesis.
///
/// An empty `only` or `exclude` list means the filter is not applied.
#[derive(Debug, Clone, Default)]
pub struct ConversionOptions {
    /// Restrict to these field names
    pub only: Vec<String>,
    /// Drop these field names
    pub exclude: Vec<String>,
    /// Replacements for default registry entries
    pub converters: ConverterOverrides,
}

impl ConversionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn converters(mut self, overrides: ConverterOverrides) -> Self {
        self.converters = overrides;
        self
    }

    /// Default registry with this call's overrides merged in.
    pub fn registry(&self) -> ConverterRegistry {
        let defaults = ConverterRegistry::default();
        if self.converters.is_empty() {
            defaults
        } else {
            defaults.with_overrides(&self.converters)
        }
    }
}
