pub mod decisions;
pub mod errors;
pub mod inference;
pub mod models;
pub mod providers;
pub mod repair;
pub mod schema;

pub use errors::{InferenceError, InferenceResult};
pub use inference::{Inference, InferenceConfig};
pub use schema::Schema;
