//! vidfolio - portfolio backend for freelance video editors.
//!
//! Resolves pasted YouTube and Google Drive links into normalized video
//! references, stores the project gallery and site copy as JSON documents
//! in a blob store, and serves them over an HTTP API with a small admin
//! surface and an AI-assisted creative brief generator.

pub mod cli;
pub mod config;
pub mod llm;
pub mod models;
pub mod repository;
pub mod server;
pub mod services;
pub mod storage;
pub mod video;
