//! Code for reading country profiles from CSV files.
use super::*;
use crate::country::{CountryID, CountryMap, CountryProfile};
use crate::id::{check_id_known, insert_unique_id};
use indexmap::IndexSet;
use serde::Deserialize;
use std::path::Path;

const COUNTRIES_FILE_NAME: &str = "countries.csv";
const COUNTRY_SEEDS_FILE_NAME: &str = "country_seeds.csv";

/// A country as it appears in `countries.csv`
#[derive(Deserialize, PartialEq, Debug)]
struct CountryRaw {
    id: CountryID,
    name: String,
    population: u64,
}

/// A row of `country_seeds.csv`
#[derive(Deserialize, PartialEq, Debug)]
struct CountrySeedsRaw {
    country_id: String,
    seeds: u64,
}

/// Read country profiles from `countries.csv` and `country_seeds.csv`.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model configuration files
///
/// # Returns
///
/// A [`CountryMap`] in the order the countries were listed, or an error
pub fn read_countries(model_dir: &Path) -> Result<CountryMap> {
    let file_path = model_dir.join(COUNTRIES_FILE_NAME);
    let countries_raw: Vec<CountryRaw> = read_csv(&file_path)?;
    let mut countries =
        read_countries_from_iter(countries_raw).with_context(|| input_err_msg(&file_path))?;

    let file_path = model_dir.join(COUNTRY_SEEDS_FILE_NAME);
    let seeds_raw: Vec<CountrySeedsRaw> = read_csv(&file_path)?;
    read_country_seeds_from_iter(seeds_raw, &mut countries)
        .with_context(|| input_err_msg(&file_path))?;

    Ok(countries)
}

fn read_countries_from_iter<I>(iter: I) -> Result<CountryMap>
where
    I: IntoIterator<Item = CountryRaw>,
{
    let mut ids = IndexSet::new();
    let mut countries = CountryMap::new();
    for raw in iter {
        insert_unique_id(&mut ids, raw.id.clone())?;
        ensure!(
            raw.population > 0,
            "Population for country {} must be greater than zero",
            raw.id
        );

        // Fall back on the ID if no label was given
        let name = if raw.name.trim().is_empty() {
            raw.id.to_string()
        } else {
            raw.name
        };

        countries.insert(
            raw.id.clone(),
            CountryProfile {
                id: raw.id,
                name,
                population: raw.population,
                seed_counts: Vec::new(),
            },
        );
    }

    Ok(countries)
}

fn read_country_seeds_from_iter<I>(iter: I, countries: &mut CountryMap) -> Result<()>
where
    I: IntoIterator<Item = CountrySeedsRaw>,
{
    let ids: IndexSet<CountryID> = countries.keys().cloned().collect();
    for raw in iter {
        let id = check_id_known(&ids, &raw.country_id)?;
        let country = &mut countries[id];

        ensure!(
            raw.seeds > 0,
            "Seed counts must be greater than zero (country {id})"
        );
        ensure!(
            !country.seed_counts.contains(&raw.seeds),
            "Seed count {} given more than once for country {id}",
            raw.seeds
        );

        country.seed_counts.push(raw.seeds);
    }

    for country in countries.values() {
        ensure!(
            !country.seed_counts.is_empty(),
            "No seed counts given for country {}",
            country.id
        );
    }

    Ok(())
}
