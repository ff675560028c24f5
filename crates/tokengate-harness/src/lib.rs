//! Test harness for the Tokengate filter.
//!
//! Deterministic frame construction, a deliberately naive reference model of
//! the filter, and proptest strategies that generate frames exercising every
//! gate of the pipeline. Model-based tests run the same frames through the
//! real pipeline and the model and require identical decisions.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod builder;
pub mod model;
pub mod strategies;

pub use builder::{FrameBuilder, http_request};
pub use model::ModelFilter;
pub use strategies::{arb_frame, arb_token};
