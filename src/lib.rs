//! HTML page templates to structured page documents and back, with a content
//! repository and a static-site publisher on top.

pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod parser;
pub mod publish;
pub mod schema;
pub mod sitemap;
pub mod store;
