mod action_queue;
mod actions;
mod event_loop;
mod keys;

pub use event_loop::{run_app, run_error_panel};
