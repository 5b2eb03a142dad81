//! Defines application business models.

pub mod file;
pub mod master;
pub mod movement;
