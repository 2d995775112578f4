//! Integration tests for the anneal parser

mod error_tests;
mod scenario_tests;
mod serialization_tests;
