//! Reading resumes and job descriptions from PDF, text and Markdown files

pub mod file_detector;
pub mod manager;
pub mod text_extractor;
