//! Electricity Maps adapter.
//!
//! Refer to <https://docs.electricitymaps.com/> for the upstream API.

mod provider;
mod wire;

pub use provider::{ELECTRICITY_MAPS_BASE_URL, Endpoint, Provider};
