//! Shared utilities: test bootstrap helpers

pub mod testing;
