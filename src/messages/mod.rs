pub mod storage;
pub mod types;

pub use storage::{MessageStorage, MessageStore};
pub use types::{Role, Turn};
