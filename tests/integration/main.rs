//! Integration tests for seapay.

mod helpers;

mod cli_test;
mod engine_test;
mod reference_test;
