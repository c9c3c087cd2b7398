//! Code for handling IDs
use anyhow::{Context, Result};
use indexmap::IndexSet;

macro_rules! define_id_type {
    ($name:ident) => {
        #[derive(
            Clone, std::hash::Hash, PartialEq, Eq, serde::Deserialize, Debug, serde::Serialize,
        )]
        /// An ID type (e.g. `CountryID`)
        pub struct $name(pub std::rc::Rc<str>);

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(std::rc::Rc::from(s))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(std::rc::Rc::from(s))
            }
        }

        impl $name {
            /// Create a new ID from a string slice
            pub fn new(id: &str) -> Self {
                $name(std::rc::Rc::from(id))
            }
        }
    };
}
pub(crate) use define_id_type;

/// Check that an ID is non-empty and not already in `ids`, then add it
pub fn insert_unique_id<T>(ids: &mut IndexSet<T>, id: T) -> Result<()>
where
    T: std::hash::Hash + Eq + std::borrow::Borrow<str> + std::fmt::Display,
{
    anyhow::ensure!(!id.borrow().trim().is_empty(), "IDs cannot be empty");
    let description = id.to_string();
    anyhow::ensure!(ids.insert(id), "Duplicate ID found: {description}");

    Ok(())
}

/// Look up an ID in `ids`, returning an error if it is unknown
pub fn check_id_known<'a, T>(ids: &'a IndexSet<T>, id: &str) -> Result<&'a T>
where
    T: std::hash::Hash + Eq + std::borrow::Borrow<str>,
{
    ids.get(id).with_context(|| format!("Unknown ID {id} found"))
}
