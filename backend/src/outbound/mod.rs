//! Outbound adapters implementing the domain ports.
//!
//! [`persistence`] talks to PostgreSQL; [`memory`] keeps everything in the
//! process and backs tests and database-less runs.

pub mod memory;
pub mod persistence;
