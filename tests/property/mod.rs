//! Property-based tests for local form rules

mod listing_proptest;
