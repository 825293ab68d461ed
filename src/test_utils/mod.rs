//! Test utilities for use-case and HTTP-level testing.
//!
//! This module provides:
//! - Test data factories for users and token services
//! - An in-memory `UserRepo` standing in for Postgres
//! - `TestAppStateBuilder` for constructing an `AppState` around those mocks

mod app_state_builder;
mod auth_mocks;
mod factories;

pub use app_state_builder::*;
pub use auth_mocks::*;
pub use factories::*;
