//! Contract repository wire contracts.
//!
//! This crate owns the Rust wire messages for the `wirepact.contracts` and
//! `wirepact.pki` packages. It intentionally separates wire types from the
//! domain models the views and the page host work with.

pub mod domain;
pub mod wire;

pub use domain::{Contract, ConversionError, CreateContract, Participant, Pki};
