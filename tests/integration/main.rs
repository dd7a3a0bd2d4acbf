//! Integration test harness

mod convert_test;
mod helpers;
mod registry_test;
