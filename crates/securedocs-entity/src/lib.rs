//! # securedocs-entity
//!
//! Domain entity models for the SecureDocs client. Every struct in this
//! crate mirrors a record exchanged with the document API or the identity
//! provider. Records are owned by the server; the client only reads them
//! and sends explicit update requests.

pub mod document;
pub mod folder;
pub mod permission;
pub mod share;
pub mod user;
