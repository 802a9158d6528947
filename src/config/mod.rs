//! Configuration loading and management for the pay engine.
//!
//! This module provides functionality to load wage configurations from YAML files,
//! including tax bands, National Insurance, student loan terms, pay period factors
//! and regional multipliers, plus the environment-driven service settings.
//!
//! # Example
//!
//! ```no_run
//! use tradepay_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/uk").unwrap();
//! println!("Loaded tax year: {}", config.config().tax().tax_year);
//! ```

mod loader;
mod service;
mod types;

pub use loader::ConfigLoader;
pub use service::ServiceConfig;
pub use types::{
    IncomeTaxBands, NationalInsuranceBand, OvertimeAssumption, PayConfig, StudentLoanTerms,
    TaxConfig, WageConfig,
};
