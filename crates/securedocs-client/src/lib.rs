//! # securedocs-client
//!
//! Typed access to the document and folder API. The [`DocumentApi`] trait
//! is the seam the navigation and document services are written against;
//! [`ApiClient`] is its HTTP implementation, attaching a bearer token from
//! the injected session to every request.

pub mod api;
pub mod client;
pub mod error;

pub use api::{ByteStream, DocumentApi, UploadFile};
pub use client::{ApiClient, ApiClientBuilder};
