//! Core type definitions used across the SecureDocs workspace.

pub mod id;

pub use id::*;
