//! # dx-core
//!
//! Core types and the diagnostic engine for Diagnos.
//!
//! This crate provides the foundational pieces shared across the workspace:
//! - Entity structs for the catalog domain (symptoms, diseases, rules)
//! - The read-only catalog snapshot consumed by the engine
//! - The pure `diagnose` scoring function
//! - ID prefix constants
//! - Input validation and cross-cutting error types
//! - The `AdminIdentity` capability passed into catalog mutations
//!
//! The engine here performs no I/O. Fetching a snapshot is the job of `dx-db`;
//! scoring it is the job of [`engine::diagnose`].

pub mod engine;
pub mod entities;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod validate;
