//! Command-line tooling for the blog pipeline: sitemap generation and
//! inspection of what the content API currently serves.

pub mod cli;
pub mod commands;
