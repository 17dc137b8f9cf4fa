//! Shared test utilities for the envedit workspace.
//!
//! Dev-dependency only, never published.
//!
//! - [`fixture`]: [`EnvFixture`](fixture::EnvFixture), a temp directory
//!   holding an env file and a backup directory

pub mod fixture;

pub use fixture::{EnvFixture, SAMPLE_ENV};
