pub mod message_renderer;
pub mod notification_gate;
pub mod record_parser;
