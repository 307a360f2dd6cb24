//! Core pipeline and domain logic for timelinegen.
//!
//! This crate ties together table reading, timeline rendering, and document
//! splicing into the end-to-end [`pipeline::generate`] workflow.

pub mod pipeline;
pub mod reader;
pub mod renderer;
pub mod splicer;
