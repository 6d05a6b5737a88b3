pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod samples;
pub mod service;
pub mod state;
pub mod store;
pub mod transform;

pub use error::{ListingError, Result};
pub use models::{ListingType, Property, PropertyDraft, PropertyType, SearchFilters};
pub use service::PropertyService;
