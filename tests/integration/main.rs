//! Integration tests for ycrawler
//!
//! These tests use wiremock to stand in for the aggregator site and the
//! pages it links to.

mod crawl_tests;
mod fetch_tests;
