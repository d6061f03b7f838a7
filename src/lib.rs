//! `emlinks` — list the links in `.eml` files, unwrapping Outlook Safe Links.
//!
//! This crate provides the core library for loading message files, scanning
//! their bodies for URLs, resolving redirector wrappers, and reporting the
//! results.

pub mod config;
pub mod error;
pub mod links;
pub mod model;
pub mod parser;
pub mod report;
pub mod scan;
