//! Text processing and analysis module

pub mod document;
pub mod skills;
pub mod text_processor;
pub mod embeddings;
pub mod embedding_manager;
pub mod ats_matcher;
pub mod metrics;
pub mod analyzer;
