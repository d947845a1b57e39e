//! Export of one Atlas project as a manifest stream

mod object;
mod pipeline;

pub use object::*;
pub use pipeline::*;
