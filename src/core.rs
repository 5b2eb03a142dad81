//! The core module defines the business logic of filetrail.
//! It provides the traits and models upstream adapters need to implement.

pub mod model;
pub mod repo;
pub mod service;
