//! Country profiles: a national domain population and the seed counts to evaluate for it.
use crate::id::define_id_type;
use indexmap::IndexMap;

define_id_type! {CountryID}

/// A map of [`CountryProfile`]s, keyed by country ID, in the order they were defined
pub type CountryMap = IndexMap<CountryID, CountryProfile>;

/// A national web-domain population
#[derive(PartialEq, Debug, Clone)]
pub struct CountryProfile {
    /// Short identifier for the country (e.g. "UK")
    pub id: CountryID,
    /// Label used in tables (e.g. "UK (.co.uk)")
    pub name: String,
    /// Total number of addressable domains
    pub population: u64,
    /// Seed counts to evaluate, in the order they should be reported
    pub seed_counts: Vec<u64>,
}
