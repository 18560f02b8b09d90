//! Shared test helpers for `kinvey-core` integration tests.

pub mod repositories;
