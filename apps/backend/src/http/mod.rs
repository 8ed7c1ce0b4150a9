pub mod envelope;

pub use envelope::{ok, ApiResponse};
