pub mod application;
pub mod command;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use shared::utils::{init_tracing, read_file};
