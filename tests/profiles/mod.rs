//! Profile flow integration tests

pub mod availability_test;
pub mod search_test;
