//! Router Module Index
//!
//! Splits the routing table by concern. Each module returns a
//! `Router<AppState>` that still needs its state; `create_router` merges
//! them and applies it once.

/// Liveness endpoint for monitoring and load balancer checks.
pub mod public;

/// The motorcycle inventory CRUD and lookup endpoints under `/api/motorcycles`.
pub mod motorcycles;
