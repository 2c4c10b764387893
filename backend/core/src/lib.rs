pub mod error;
pub mod traits;

pub use error::LinedropError;
pub use traits::{ContentFetcher, ImageStore};
