//! # Country Data
//!
//! The data collaborator for the search screen: a [`CountrySource`] trait,
//! its REST Countries implementation, and the [`CountryRecord`] the UI renders.

pub mod rest_countries;
pub mod source;
pub mod types;

pub use rest_countries::RestCountriesClient;
pub use source::{CountrySource, FetchError};
pub use types::CountryRecord;
