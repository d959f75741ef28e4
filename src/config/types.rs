//! Configuration types for the legal computation engines.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files: the payroll tax tables,
//! the crime catalog and the civil limitation catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::CrimeRecord;

/// Metadata about a set of reference tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablesMetadata {
    /// Human-readable name of the table set.
    pub name: String,
    /// The version or effective year of the tables.
    pub version: String,
    /// URL to the official publication.
    pub source_url: String,
}

/// One band of a cumulative contribution table.
///
/// The band starts where the previous band ends (or at zero for the first
/// band) and its rate applies only to the slice of the base inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionBand {
    /// Inclusive upper bound of the band.
    pub up_to: Decimal,
    /// Marginal rate applied inside the band (e.g. 0.075).
    pub rate: Decimal,
}

/// One bracket of a withholding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingBracket {
    /// Inclusive upper bound; `None` for the open top bracket.
    #[serde(default)]
    pub up_to: Option<Decimal>,
    /// Rate applied to the whole base.
    pub rate: Decimal,
    /// Fixed amount deducted after applying the rate.
    pub deduction: Decimal,
}

/// Withholding brackets plus the per-dependent base deduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingTable {
    /// Brackets in ascending order of `up_to`.
    pub brackets: Vec<WithholdingBracket>,
    /// Amount subtracted from the base for each dependent.
    pub dependent_deduction: Decimal,
}

/// The payroll tables used by the termination calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTables {
    /// Table metadata.
    pub metadata: TablesMetadata,
    /// Social-security (INSS) cumulative bands, ascending.
    pub inss: Vec<ContributionBand>,
    /// Income-tax (IRRF) withholding table.
    pub irrf: WithholdingTable,
}

impl TaxTables {
    /// The 2024 INSS and IRRF tables.
    ///
    /// This is the same data shipped in `config/br_2024/tables.yaml`.
    pub fn reference_2024() -> Self {
        let band = |up_to: i64, rate: i64| ContributionBand {
            up_to: Decimal::new(up_to, 2),
            rate: Decimal::new(rate, 3),
        };
        let bracket = |up_to: Option<i64>, rate: i64, deduction: i64| WithholdingBracket {
            up_to: up_to.map(|v| Decimal::new(v, 2)),
            rate: Decimal::new(rate, 3),
            deduction: Decimal::new(deduction, 2),
        };

        Self {
            metadata: TablesMetadata {
                name: "Tabelas INSS/IRRF 2024".to_string(),
                version: "2024".to_string(),
                source_url: "https://www.gov.br/inss/pt-br/direitos-e-deveres/inscricao-e-contribuicao/tabela-de-contribuicao-mensal".to_string(),
            },
            inss: vec![
                band(141200, 75),
                band(266668, 90),
                band(400003, 120),
                band(778602, 140),
            ],
            irrf: WithholdingTable {
                brackets: vec![
                    bracket(Some(225920), 0, 0),
                    bracket(Some(282665), 75, 16944),
                    bracket(Some(375105), 150, 38144),
                    bracket(Some(466468), 225, 66277),
                    bracket(None, 275, 89600),
                ],
                dependent_deduction: Decimal::new(18959, 2),
            },
        }
    }
}

/// An entry of the crime catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crime {
    /// Catalog identifier.
    pub id: String,
    /// Article of law (e.g. "Art. 155, caput").
    pub article: String,
    /// Name of the offence.
    pub name: String,
    /// Statutory minimum penalty in years.
    pub penalty_min: Decimal,
    /// Statutory maximum penalty in years.
    pub penalty_max: Decimal,
    /// Statute the article belongs to.
    pub legislation: String,
}

impl Crime {
    /// Returns the statutory range of this crime.
    pub fn record(&self) -> CrimeRecord {
        CrimeRecord {
            penalty_min: self.penalty_min,
            penalty_max: self.penalty_max,
        }
    }

    /// Case-insensitive substring match over name and article.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.name.to_lowercase().contains(&term)
            || self.article.to_lowercase().contains(&term)
    }
}

/// Crimes configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct CrimesConfig {
    /// Catalog entries.
    pub crimes: Vec<Crime>,
}

/// A civil limitation category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivilTerm {
    /// Stable code (e.g. "general_rule").
    pub code: String,
    /// Human-readable description.
    pub description: String,
    /// Article of the Civil Code.
    pub article: String,
    /// Term in years.
    pub years: u32,
}

/// Civil terms configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct CivilTermsConfig {
    /// Catalog entries.
    pub civil_terms: Vec<CivilTerm>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    tables: TaxTables,
    crimes: Vec<Crime>,
    civil_terms: Vec<CivilTerm>,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(tables: TaxTables, crimes: Vec<Crime>, civil_terms: Vec<CivilTerm>) -> Self {
        Self {
            tables,
            crimes,
            civil_terms,
        }
    }

    /// Returns the payroll tables.
    pub fn tables(&self) -> &TaxTables {
        &self.tables
    }

    /// Returns the crime catalog in file order.
    pub fn crimes(&self) -> &[Crime] {
        &self.crimes
    }

    /// Returns the civil limitation catalog in file order.
    pub fn civil_terms(&self) -> &[CivilTerm] {
        &self.civil_terms
    }
}
