//! Integration tests against a mock backend

mod catalogue_test;
mod listing_test;
mod swap_flow_test;
