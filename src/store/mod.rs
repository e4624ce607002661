pub mod completion;
pub mod error;

pub use completion::{CompletionState, CompletionStore};
pub use error::StoreError;
