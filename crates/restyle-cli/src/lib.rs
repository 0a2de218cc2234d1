//! Library surface of the restyle CLI: the logging bootstrap and the
//! programmatic pipeline entrypoint.

pub mod logging;
pub mod pipeline;

pub use pipeline::{PipelineOutcome, PipelineRequest, run_pipeline};
