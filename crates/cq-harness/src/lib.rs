//! Shared test fixtures and `proptest` strategy generators, used by
//! multiple crates' test suites and by the end-to-end integration
//! tests. This crate ships no production code of its own.

pub mod fixtures;
pub mod strategies;

pub use fixtures::{five_layer_identity_model, synthetic_weights};
pub use strategies::{layer_spec_strategy, tensor_with_one_observation_strategy};
