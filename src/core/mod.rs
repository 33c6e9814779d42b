pub mod aggregator;
pub mod bounded_fetch;
pub mod fan_out;

pub use crate::domain::model::{EntityDetailBundle, ListingEntry, ListingPage, PageWindow};
pub use crate::domain::ports::{Catalog, ConfigProvider, Upstream};
pub use crate::utils::error::Result;
