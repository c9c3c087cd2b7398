//! Fixtures for tests

use crate::country::CountryProfile;
use crate::model::ModelParameters;
use rstest::fixture;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

#[fixture]
pub fn model_parameters() -> ModelParameters {
    ModelParameters::default()
}

#[fixture]
pub fn uk_profile() -> CountryProfile {
    CountryProfile {
        id: "UK".into(),
        name: "UK (.co.uk)".into(),
        population: 8_400_000,
        seed_counts: vec![5000, 10_000, 20_000, 50_000],
    }
}

#[fixture]
pub fn se_profile() -> CountryProfile {
    CountryProfile {
        id: "SE".into(),
        name: "SE (.se)".into(),
        population: 1_500_000,
        seed_counts: vec![500, 1000, 2000, 5000],
    }
}
