pub mod log_changed;
