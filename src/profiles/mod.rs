//! Profile store actions: name availability and search

pub mod availability;
pub mod search;

pub use availability::{check_name_availability_and_price, is_subdomain, AvailabilityAction};
pub use search::{search_identities, update_query, update_results, SearchAction};
