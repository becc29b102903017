pub mod log_source;
pub mod message_transport;
