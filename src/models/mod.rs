//! Data models for sessions, scenarios, and simulation results.
//!
//! This module contains all data structures held in session state or
//! exchanged with API clients.

/// Strategy cycle model
pub mod cycle;
/// Scenario identity and global parameters
pub mod scenario;
/// Comparison session model
pub mod session;
/// Simulation result types
pub mod simulation;
