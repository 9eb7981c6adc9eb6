//! # Itemdeck Backend
//!
//! A small item list application: a REST API over a single `Item` resource,
//! backed by a relational database through the repository pattern, plus the
//! static browser client it serves.
//!
//! ## Features
//!
//! - **Item CRUD**: list (with title search), create, update, delete
//! - **Storage backends**: PostgreSQL via Diesel, or in-memory for tests
//!   and local development
//! - **HTTP API**: axum-based REST endpoints plus static asset serving
//!
//! ## Architecture
//!
//! The crate is organized into a few logical modules:
//!
//! - [`api`]: Domain types shared across layers
//! - [`db`]: Repository pattern, service layer, and persistence backends
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;

pub mod db;

#[cfg(feature = "http-server")]
pub mod http;
