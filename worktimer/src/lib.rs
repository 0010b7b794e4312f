//! Per-day work time tracking.
//!
//! The crate keeps every tracked day in a single [`AppData`] blob, persisted as
//! a whole through a [`StorageBackend`]. A [`Controller`] owns the blob, turns
//! user [`Action`]s into mutations and pushes [`DisplayModel`]s into whatever
//! [`ViewContainer`] the front end provides.

pub mod clock;
pub mod controller;
pub mod day_store;
pub mod domain;
mod error;
pub mod export;
pub mod storage;
pub mod time_format;
pub mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use controller::{Action, Controller, Effect, Field};
pub use day_store::DayStore;
pub use domain::{AppData, Day, Entry};
pub use error::*;
pub use export::ExportFile;
pub use storage::{FileStorage, MemoryStorage, StorageBackend, StorageChoice};
pub use view::{
    DisplayModel, EntryView, LiveTotals, RecordedView, TemplateRenderer, ViewContainer,
};
