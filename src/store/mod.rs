pub mod log;
pub mod models;

pub use log::{MessageStore, SharedMessageStore};
pub use models::Message;
