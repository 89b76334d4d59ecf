//! Personal recipe database.
//!
//! Recipes are parsed out of photo text ([`parser`], [`assembler`],
//! [`ingest`]), kept as one JSON file each ([`store`]), and used to draw up
//! random dinner plans ([`planner`]) and the grocery lists that go with them
//! ([`grocery`]).

pub mod assembler;
pub mod config;
pub mod grocery;
pub mod ingest;
pub mod models;
pub mod ocr;
pub mod parser;
pub mod planner;
pub mod render;
pub mod store;
