//! Test suite for the reviewrank CLI.

mod pipeline;
mod unit;
