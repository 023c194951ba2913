mod buffer;
mod chat;
mod geocode;
mod health;
mod tools;

pub use buffer::handle_buffer;
pub use chat::handle_chat;
pub use geocode::handle_geocode;
pub use health::health_check;
pub use tools::handle_tool;
