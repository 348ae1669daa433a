//! Library side of the yutool CLI: logging setup and the export pipeline.

pub mod logging;
pub mod pipeline;
pub mod types;
