//! Integration test suite modules

mod accounting;
mod config_file;
mod scenarios;
mod strategies;
