#![deny(missing_docs)]

//! Core library for the policy question-answering server.

/// HTTP routing and REST handlers.
pub mod api;
/// Account registration, login, and bearer-token verification.
pub mod auth;
/// Environment-driven configuration management.
pub mod config;
/// Document retrieval and text extraction collaborators.
pub mod document;
/// Generative text backend abstraction and adapters.
pub mod generation;
/// Structured logging and tracing setup.
pub mod logging;
/// Request metrics helpers.
pub mod metrics;
/// Question-answering pipeline: filtering, chunking, invocation, aggregation.
pub mod pipeline;
