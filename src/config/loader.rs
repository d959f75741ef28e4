//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! reference tables and catalogs from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::calculation::CIVIL_TERM_YEARS;
use crate::error::{EngineError, EngineResult};

use super::types::{CivilTerm, CivilTermsConfig, Crime, CrimesConfig, EngineConfig, TaxTables};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/br_2024/
/// ├── tables.yaml       # INSS bands and IRRF brackets
/// ├── crimes.yaml       # Crime catalog with statutory ranges
/// └── civil_terms.yaml  # Civil limitation categories
/// ```
///
/// # Example
///
/// ```no_run
/// use legal_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/br_2024").unwrap();
///
/// let theft = loader.get_crime("3").unwrap();
/// println!("{}: {} to {} years", theft.name, theft.penalty_min, theft.penalty_max);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any file is missing, contains invalid YAML, or
    /// holds values the engines cannot work with (unordered bands, inverted
    /// penalty ranges, civil terms outside the legal set).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let tables_path = path.join("tables.yaml");
        let tables = Self::load_yaml::<TaxTables>(&tables_path)?;
        Self::validate_tables(&tables, &tables_path)?;

        let crimes_path = path.join("crimes.yaml");
        let crimes = Self::load_yaml::<CrimesConfig>(&crimes_path)?.crimes;
        Self::validate_crimes(&crimes, &crimes_path)?;

        let civil_path = path.join("civil_terms.yaml");
        let civil_terms = Self::load_yaml::<CivilTermsConfig>(&civil_path)?.civil_terms;
        Self::validate_civil_terms(&civil_terms, &civil_path)?;

        Ok(Self {
            config: EngineConfig::new(tables, crimes, civil_terms),
        })
    }

    /// Builds a loader around the in-code 2024 tables with empty catalogs.
    pub fn with_reference_tables() -> Self {
        Self {
            config: EngineConfig::new(TaxTables::reference_2024(), Vec::new(), Vec::new()),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn parse_error(path: &Path, message: impl Into<String>) -> EngineError {
        EngineError::ConfigParseError {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    fn validate_tables(tables: &TaxTables, path: &Path) -> EngineResult<()> {
        if tables.inss.is_empty() {
            return Err(Self::parse_error(path, "inss must contain at least one band"));
        }
        if tables.inss[0].up_to <= Decimal::ZERO
            || tables.inss.windows(2).any(|w| w[0].up_to >= w[1].up_to)
        {
            return Err(Self::parse_error(path, "inss bands must be strictly ascending"));
        }

        let brackets = &tables.irrf.brackets;
        let Some((top, lower)) = brackets.split_last() else {
            return Err(Self::parse_error(path, "irrf must contain at least one bracket"));
        };
        if top.up_to.is_some() {
            return Err(Self::parse_error(path, "the last irrf bracket must be open"));
        }
        let mut previous: Option<Decimal> = None;
        for bracket in lower {
            let Some(up_to) = bracket.up_to else {
                return Err(Self::parse_error(path, "only the last irrf bracket may be open"));
            };
            if previous.is_some_and(|p| p >= up_to) {
                return Err(Self::parse_error(path, "irrf brackets must be strictly ascending"));
            }
            previous = Some(up_to);
        }

        if tables.irrf.dependent_deduction < Decimal::ZERO {
            return Err(Self::parse_error(path, "dependent_deduction cannot be negative"));
        }

        Ok(())
    }

    fn validate_crimes(crimes: &[Crime], path: &Path) -> EngineResult<()> {
        for (i, crime) in crimes.iter().enumerate() {
            if crime.penalty_min < Decimal::ZERO || crime.penalty_min > crime.penalty_max {
                return Err(Self::parse_error(
                    path,
                    format!("crime '{}' has an invalid penalty range", crime.id),
                ));
            }
            if crimes[..i].iter().any(|c| c.id == crime.id) {
                return Err(Self::parse_error(
                    path,
                    format!("duplicate crime id '{}'", crime.id),
                ));
            }
        }
        Ok(())
    }

    fn validate_civil_terms(terms: &[CivilTerm], path: &Path) -> EngineResult<()> {
        match terms.iter().find(|t| !CIVIL_TERM_YEARS.contains(&t.years)) {
            Some(term) => Err(Self::parse_error(
                path,
                format!("civil term '{}' has unsupported years {}", term.code, term.years),
            )),
            None => Ok(()),
        }
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the payroll tables.
    pub fn tables(&self) -> &TaxTables {
        self.config.tables()
    }

    /// Gets a crime by its catalog id.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use legal_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/br_2024")?;
    /// let crime = loader.get_crime("5")?;
    /// println!("Crime: {}", crime.name);
    /// # Ok::<(), legal_engine::error::EngineError>(())
    /// ```
    pub fn get_crime(&self, id: &str) -> EngineResult<&Crime> {
        self.config
            .crimes()
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| EngineError::CrimeNotFound { id: id.to_string() })
    }

    /// Returns the crimes whose name or article contains `term`.
    pub fn search_crimes(&self, term: &str) -> Vec<&Crime> {
        self.config
            .crimes()
            .iter()
            .filter(|c| c.matches(term))
            .collect()
    }

    /// Returns the civil limitation catalog.
    pub fn civil_terms(&self) -> &[CivilTerm] {
        self.config.civil_terms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use tempfile::tempdir;

    fn config_path() -> &'static str {
        "./config/br_2024"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn write_config(dir: &Path, tables: &str, crimes: &str, civil: &str) {
        fs::write(dir.join("tables.yaml"), tables).unwrap();
        fs::write(dir.join("crimes.yaml"), crimes).unwrap();
        fs::write(dir.join("civil_terms.yaml"), civil).unwrap();
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.tables().metadata.version, "2024");
        assert_eq!(loader.config().crimes().len(), 11);
        assert_eq!(loader.civil_terms().len(), 9);
    }

    #[test]
    fn test_shipped_tables_match_reference_constant() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.tables(), &TaxTables::reference_2024());
    }

    #[test]
    fn test_get_crime() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let crime = loader.get_crime("3").unwrap();
        assert_eq!(crime.name, "Furto");
        assert_eq!(crime.penalty_min, dec("1"));
        assert_eq!(crime.penalty_max, dec("4"));
    }

    #[test]
    fn test_get_crime_fractional_minimum() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let crime = loader.get_crime("8").unwrap();
        assert_eq!(crime.penalty_min, dec("0.25"));
    }

    #[test]
    fn test_get_crime_unknown_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.get_crime("unknown") {
            Err(EngineError::CrimeNotFound { id }) => assert_eq!(id, "unknown"),
            other => panic!("Expected CrimeNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_search_crimes_by_name_and_article() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let by_name = loader.search_crimes("homicídio");
        assert_eq!(by_name.len(), 2);

        let by_article = loader.search_crimes("art. 155");
        assert_eq!(by_article.len(), 2);

        assert_eq!(loader.search_crimes("").len(), 11);
        assert!(loader.search_crimes("nonexistent").is_empty());
    }

    #[test]
    fn test_civil_terms_use_allowed_years() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let general = loader
            .civil_terms()
            .iter()
            .find(|t| t.code == "general_rule")
            .unwrap();
        assert_eq!(general.years, 10);
        assert!(loader
            .civil_terms()
            .iter()
            .all(|t| CIVIL_TERM_YEARS.contains(&t.years)));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        match ConfigLoader::load("/nonexistent/path") {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("tables.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_with_reference_tables_has_empty_catalogs() {
        let loader = ConfigLoader::with_reference_tables();
        assert_eq!(loader.tables(), &TaxTables::reference_2024());
        assert!(loader.config().crimes().is_empty());
    }

    #[test]
    fn test_rejects_descending_inss_bands() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
metadata: { name: "bad", version: "x", source_url: "" }
inss:
  - { up_to: "2000.00", rate: "0.075" }
  - { up_to: "1000.00", rate: "0.09" }
irrf:
  dependent_deduction: "0"
  brackets:
    - { rate: "0", deduction: "0" }
"#,
            "crimes: []\n",
            "civil_terms: []\n",
        );

        match ConfigLoader::load(dir.path()) {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("ascending"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_inverted_crime_range() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            &fs::read_to_string("./config/br_2024/tables.yaml").unwrap(),
            r#"
crimes:
  - { id: "x", article: "Art. 1", name: "X", penalty_min: "5", penalty_max: "2", legislation: "CP" }
"#,
            "civil_terms: []\n",
        );

        assert!(matches!(
            ConfigLoader::load(dir.path()),
            Err(EngineError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_rejects_unsupported_civil_years() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            &fs::read_to_string("./config/br_2024/tables.yaml").unwrap(),
            "crimes: []\n",
            r#"
civil_terms:
  - { code: "odd", description: "Odd", article: "Art. 0", years: 7 }
"#,
        );

        match ConfigLoader::load(dir.path()) {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("odd"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }
}
