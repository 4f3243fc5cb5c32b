//! Business logic and repository trait definitions for Folksonomy.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements, the services built on them, and the admin console
//! configuration. It depends only on `folksonomy-types` -- never on
//! `folksonomy-infra` or any database/IO crate.

pub mod admin;
pub mod repository;
pub mod service;

#[cfg(test)]
mod testing;
