//! Converter configuration, optionally loaded from a YAML file

use crate::core::{DEFAULT_REFERENCE_FX_ROW, DEFAULT_SHARED_CURRENCY};
use crate::error::{GdpError, GdpResult};
use crate::excel::{ExtractOptions, SheetSelector};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// FX row used by shared-currency countries
    pub reference_fx_row: String,
    pub gdp_sheet: SheetSelector,
    pub fx_sheet: SheetSelector,
    pub extract: ExtractOptions,
    /// Preset offered when the user does not pick a group
    pub shared_currency: Vec<String>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            reference_fx_row: DEFAULT_REFERENCE_FX_ROW.to_string(),
            gdp_sheet: SheetSelector::Index(0),
            fx_sheet: SheetSelector::Index(1),
            extract: ExtractOptions::default(),
            shared_currency: DEFAULT_SHARED_CURRENCY
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ConverterConfig {
    pub fn from_yaml_str(yaml: &str) -> GdpResult<Self> {
        let config: ConverterConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> GdpResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Defaults unless a config file was given.
    pub fn load(path: Option<&Path>) -> GdpResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> GdpResult<()> {
        if self.reference_fx_row.trim().is_empty() {
            return Err(GdpError::Config(
                "reference_fx_row must not be empty".to_string(),
            ));
        }
        if self.extract.key_column.trim().is_empty() {
            return Err(GdpError::Config(
                "extract.key_column must not be empty".to_string(),
            ));
        }
        if self.gdp_sheet == self.fx_sheet {
            return Err(GdpError::Config(
                "gdp_sheet and fx_sheet must differ".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConverterConfig::default();
        assert_eq!(config.reference_fx_row, "Euro Area");
        assert_eq!(config.gdp_sheet, SheetSelector::Index(0));
        assert_eq!(config.fx_sheet, SheetSelector::Index(1));
        assert_eq!(config.extract.skip_rows, 6);
        assert_eq!(config.shared_currency.len(), 12);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
reference_fx_row: "Eurozone"
fx_sheet: "FX Rates"
extract:
  skip_rows: 2
"#;
        let config = ConverterConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.reference_fx_row, "Eurozone");
        assert_eq!(config.fx_sheet, SheetSelector::Name("FX Rates".to_string()));
        assert_eq!(config.gdp_sheet, SheetSelector::Index(0));
        assert_eq!(config.extract.skip_rows, 2);
        assert_eq!(config.extract.key_column, "Country");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = ConverterConfig::from_yaml_str("reference_row: x\n");
        assert!(matches!(result, Err(GdpError::Yaml(_))));
    }

    #[test]
    fn test_same_sheet_rejected() {
        let result = ConverterConfig::from_yaml_str("gdp_sheet: 1\nfx_sheet: 1\n");
        assert!(matches!(result, Err(GdpError::Config(_))));
    }

    #[test]
    fn test_load_without_path_is_default() {
        assert_eq!(ConverterConfig::load(None).unwrap(), ConverterConfig::default());
    }
}
