//! Data models for the report client.
//!
//! These models match the backend JSON payloads (snake_case fields, camelCase page envelope).

mod admin;
mod credentials;
mod engagement;
mod page;
mod report;

pub use admin::*;
pub use credentials::*;
pub use engagement::*;
pub use page::*;
pub use report::*;

use serde::{Deserialize, Deserializer};

/// Deserialize `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
