//! Task lifecycle management.
//!
//! Creating or editing a task validates its fields and settles its due date
//! against today. Completing a task either deletes it (no repeat rule) or
//! advances its due date with the recurrence engine. The module follows
//! hexagonal architecture:
//!
//! - Domain types and the recurrence engine in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
