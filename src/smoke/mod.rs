// ABOUTME: Smoke harness - checks that the merge queue tools are registered,
// ABOUTME: then exercises a few representative calls and records structured outcomes.

mod harness;
mod report;

pub use harness::*;
pub use report::*;

#[cfg(test)]
mod harness_test;
