//! Integration test modules.

mod sync_test;
