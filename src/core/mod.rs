mod engine;
mod error;
mod frequency;
mod types;

pub use engine::{check_frequency_pair, project};
pub use error::ProjectionError;
pub use frequency::{Frequency, resolve};
pub use types::{Projection, ProjectionInput, ProjectionResult, ProjectionSample};
