//! Build-time generator of route registrations for [axum](https://crates.io/crates/axum)
//! applications.
//!
//! Handler types are plain impl blocks marked with a `#[group]` attribute, while their methods
//! are mapped to requests with `#[get]`, `#[post]`, `#[delete]` or `#[put]`. Instead of
//! discovering handlers at runtime, the package sources are scanned from a build script and a
//! registration function is generated, which mounts every handler directly on an
//! `axum::Router`. No reflection, registries or dynamic dispatch is involved at runtime.
//!
//! ### Simple usage example
//!
//! ```ignore
//! // build.rs
//! fn main() -> Result<(), aot_routes::error::GeneratorError> {
//!     aot_routes::build::compile()
//! }
//! ```
//!
//! ```ignore
//! // src/main.rs
//! use aot_routes::group;
//! use axum::extract::Path;
//!
//! include!(concat!(env!("OUT_DIR"), "/attributes.rs"));
//! include!(concat!(env!("OUT_DIR"), "/web_application_extensions.rs"));
//!
//! #[derive(Default)]
//! struct TodoService;
//!
//! // all routes end up nested under "/todo"
//! #[group("todo")]
//! impl TodoService {
//!     #[get("/")]
//!     fn get_all(&self) -> String {
//!         "all".to_string()
//!     }
//!
//!     #[get("/{id}")]
//!     async fn get_by_id(&self, id: Path<i32>) -> String {
//!         id.to_string()
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     // set_map() is generated by the build script
//!     let app = set_map(axum::Router::new());
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```
//!
//! Handler types must implement [Default], since a fresh instance is created for every request
//! handled by a method taking `self`.
//!
//! The registration function lives in the crate root, so handler types, the modules containing
//! them and their route methods must be visible from there, e.g. `pub` or `pub(crate)`. Private
//! items end up as privacy errors in the generated code.
//!
//! ### Features
//!
//! * `derive` - automatically import route attribute macros

pub mod annotation;
pub mod build;
pub mod config;
pub mod emit;
pub mod error;
pub mod extract;
pub mod generator;
pub mod model;
pub mod plan;
pub mod sink;
pub mod source;

#[cfg(feature = "derive")]
pub use aot_routes_derive::*;
