//! Shortest reporting paths through an organisation.
//!
//! [`parser`] reads an org chart file into [`models::Employee`] records,
//! [`hierarchy`] rebuilds the management tree from them, and [`path`] finds
//! the route between two employees through their lowest common manager.
//! [`query`] ties these together for lookups by name.

pub mod config;
pub mod hierarchy;
pub mod models;
pub mod parser;
pub mod path;
pub mod query;
pub mod render;
