//! Per-user document permissions.

pub mod model;

pub use model::{DocumentAction, Permission};
