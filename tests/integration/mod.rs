//! Integration tests for the content-generation registry

mod config_integration;
mod generation_flow;
mod logging_default;
mod test_utils;
