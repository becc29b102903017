pub mod log_record;
pub mod notification_state;
