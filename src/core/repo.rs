//! Repository traits describing the remote store the workflows talk to.
//! The store owns the authoritative records; workflows only mirror what they
//! fetch from here.

pub mod file;
pub mod master;
pub mod movement;
