//! Core business logic abstractions

pub mod config;
pub mod convert;
pub mod currency;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use convert::{Conversion, ConversionRequest};
pub use currency::{Currency, CurrencyCatalog};
pub use rates::{RateProvider, RateTable};
