//! Account flow integration tests

pub mod bootstrap_test;
pub mod notifications_test;
