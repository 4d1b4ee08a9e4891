//! HTTP service for the blog content pipeline.
//!
//! [`client::ContentClient`] is the only component doing I/O. Everything in
//! [`pages`], [`render`] and [`sitemap`] is composed over the
//! [`client::ContentSource`] trait and runs fresh on every request.

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod pages;
pub mod render;
pub mod request_context;
pub mod routes;
pub mod sitemap;
pub mod state;

pub use client::{ContentClient, ContentSource};
pub use config::AppConfig;
pub use error::ContentError;
pub use state::AppState;
