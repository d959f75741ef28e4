//! Configuration loading and management for the legal computation engines.
//!
//! This module loads the reference data the engines depend on from YAML
//! files: the INSS/IRRF tables, the crime catalog and the civil limitation
//! catalog.
//!
//! # Example
//!
//! ```no_run
//! use legal_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/br_2024").unwrap();
//! println!("Loaded tables: {}", config.tables().metadata.name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CivilTerm, CivilTermsConfig, ContributionBand, Crime, CrimesConfig, EngineConfig,
    TablesMetadata, TaxTables, WithholdingBracket, WithholdingTable,
};
