//! The model: study parameters plus the country profiles they are evaluated against.
use crate::country::{CountryMap, CountryProfile};
use std::path::PathBuf;

pub mod parameters;
pub use parameters::{ModelParameters, StudyParameters};

/// Model definition
#[derive(Debug, PartialEq)]
pub struct Model {
    /// Path to the model directory
    pub model_path: PathBuf,
    /// Parameters from the model file
    pub parameters: StudyParameters,
    /// Country profiles, in the order they were defined
    pub countries: CountryMap,
}

impl Model {
    /// Parameters of the analytical coverage and TTFI model
    pub fn graph(&self) -> &ModelParameters {
        &self.parameters.graph
    }

    /// Iterate over the country profiles in the order they were defined
    pub fn iter_countries(&self) -> impl Iterator<Item = &CountryProfile> {
        self.countries.values()
    }
}
