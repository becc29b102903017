pub mod change_watcher;
pub mod notifier;
pub mod orchestrator;
