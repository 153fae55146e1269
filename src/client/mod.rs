//! Retrieval collaborator and per-service adapters
//!
//! ## Architecture
//!
//! - [`source`] - [`RdbSource`] trait and the `reqwest`-backed [`HttpSource`]
//! - [`params`] - [`SiteQuery`] request parameters
//! - [`nwis`] - [`NwisClient`] adapters for iv, dv, stat, gwlevels, site,
//!   measurements and peak

pub mod nwis;
pub mod params;
pub mod source;

#[cfg(test)]
mod tests;

pub use nwis::{NwisClient, Service};
pub use params::SiteQuery;
pub use source::{HttpSource, RdbSource};
