//! Integration tests for the worker module
//!
//! These tests run the worker pool against a local mock HTTP server and a
//! temporary directory, covering outcome isolation, idempotent re-runs and
//! the concurrency bound.
