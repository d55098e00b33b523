//! # Settings Module
//!
//! ## Purpose
//! Constants and output options shared by every calculator task: molar volume of a gas
//! at normal conditions, the Avogadro constant used in school problems and the way
//! highlighted parts of an answer are marked up.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "molar_volume": 22.4,
//!   "avogadro": 6.02e23,
//!   "markup": "Html"
//! }
//! ```
//! Missing fields take their default values, a missing file means default settings.
//!
//! ## Usage
//! ```rust
//! use ChemSchool::settings::{ChemContext, Markup, Settings};
//!
//! let settings = Settings { markup: Markup::Plain, ..Settings::default() };
//! let ctx = ChemContext::new(settings);
//! assert_eq!(ctx.settings.molar_volume, 22.4);
//! ```
use crate::Chemistry::element_table::ElementTable;
use crate::errors::{ChemError, ChemResult};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// How the key number of an answer is highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Markup {
    /// `<b>18</b>`, for web front ends
    #[default]
    Html,
    /// no highlighting, for terminal output
    Plain,
}

impl Markup {
    pub fn bold(&self, text: &str) -> String {
        match self {
            Markup::Html => format!("<b>{}</b>", text),
            Markup::Plain => text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// л/моль
    pub molar_volume: f64,
    /// моль⁻¹
    pub avogadro: f64,
    pub markup: Markup,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            molar_volume: 22.4,
            avogadro: 6.02e23,
            markup: Markup::Html,
        }
    }
}

impl Settings {
    pub fn from_json_str(json: &str) -> ChemResult<Self> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| ChemError::Settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads settings from a JSON file. A file that does not exist gives the defaults,
    /// a file that exists but cannot be read or parsed is an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> ChemResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(
                "settings file {} not found, using default settings",
                path.display()
            );
            return Ok(Settings::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| ChemError::Settings(format!("{}: {}", path.display(), e)))?;
        let settings = Self::from_json_str(&content)?;
        info!("settings loaded from {}", path.display());
        Ok(settings)
    }

    fn validate(&self) -> ChemResult<()> {
        if !(self.molar_volume.is_finite() && self.molar_volume > 0.0) {
            return Err(ChemError::Settings(format!(
                "molar volume must be positive, got {}",
                self.molar_volume
            )));
        }
        if !(self.avogadro.is_finite() && self.avogadro > 0.0) {
            return Err(ChemError::Settings(format!(
                "Avogadro constant must be positive, got {}",
                self.avogadro
            )));
        }
        Ok(())
    }
}

/// Everything a calculator task needs: the reference tables and the settings.
#[derive(Debug, Clone)]
pub struct ChemContext {
    pub table: Arc<ElementTable>,
    pub settings: Settings,
}

impl ChemContext {
    pub fn new(settings: Settings) -> Self {
        Self {
            table: ElementTable::shared(),
            settings,
        }
    }
}

impl Default for ChemContext {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_markup() {
        assert_eq!(Markup::Html.bold("18"), "<b>18</b>");
        assert_eq!(Markup::Plain.bold("18"), "18");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json_str(r#"{"markup": "Plain"}"#).unwrap();
        assert_eq!(settings.markup, Markup::Plain);
        assert_relative_eq!(settings.molar_volume, 22.4);
        assert_relative_eq!(settings.avogadro, 6.02e23);
    }

    #[test]
    fn test_invalid_settings() {
        assert!(matches!(
            Settings::from_json_str("{not json"),
            Err(ChemError::Settings(_))
        ));
        assert!(matches!(
            Settings::from_json_str(r#"{"molar_volume": -1.0}"#),
            Err(ChemError::Settings(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"molar_volume": 22.414, "markup": "Html"}}"#).unwrap();
        let settings = Settings::load_or_default(file.path()).unwrap();
        assert_relative_eq!(settings.molar_volume, 22.414);
        assert_eq!(settings.markup, Markup::Html);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_or_default(dir.path().join("chem_settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
