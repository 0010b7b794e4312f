//! Turns user actions into changes of the tracked days.
//!
//! Each day is either idle (no `current_timer`) or running. Every mutation is
//! applied in memory first, then shown, then the whole blob is saved once.

use std::sync::Arc;

use time::Date;

use crate::clock::Clock;
use crate::day_store::DayStore;
use crate::domain::Entry;
use crate::export::ExportFile;
use crate::storage::StorageBackend;
use crate::time_format::instant_on;
use crate::view::{live_totals, DisplayModel, ViewContainer};
use crate::WorktimerError;

mod action;

pub use action::{Action, Effect, Field};

pub struct Controller {
    store: DayStore,
    storage: Arc<dyn StorageBackend>,
    clock: Arc<dyn Clock>,
}

impl Controller {
    /// Loads saved data (starting empty when there is none), selects today
    /// and renders it.
    ///
    /// Unreadable or malformed data is an error; it is never replaced by an
    /// empty blob.
    pub async fn initialize<V: ViewContainer + ?Sized>(
        storage: Arc<dyn StorageBackend>,
        clock: Arc<dyn Clock>,
        view: &mut V,
    ) -> Result<Self, WorktimerError> {
        let data = storage.load().await?.unwrap_or_default();
        tracing::info!(
            backend = storage.name(),
            days = data.len(),
            "Loaded tracked days"
        );

        let mut controller = Self {
            store: DayStore::new(data, clock.today()),
            storage,
            clock,
        };
        controller.render(view);

        Ok(controller)
    }

    pub fn store(&self) -> &DayStore {
        &self.store
    }

    pub fn selected_date(&self) -> Date {
        self.store.selected_date()
    }

    pub fn date_key(&self) -> String {
        self.store.date_key()
    }

    pub fn storage_name(&self) -> &'static str {
        self.storage.name()
    }

    pub fn display_model(&mut self) -> DisplayModel {
        let now = self.clock.now();
        let key = self.store.date_key();

        DisplayModel::build(key, self.store.current_day(), now, self.clock.as_ref())
    }

    /// Full re-render of the selected day.
    pub fn render<V: ViewContainer + ?Sized>(&mut self, view: &mut V) {
        tracing::debug!(date = %self.store.date_key(), "Rendering day");
        view.replace(self.display_model());
    }

    /// Periodic update of the elapsed-time figures. Does nothing while idle.
    pub fn refresh<V: ViewContainer + ?Sized>(&mut self, view: &mut V) {
        let now = self.clock.now();
        if let Some(totals) = live_totals(self.store.current_day(), now) {
            view.update_totals(&totals);
        }
    }

    pub async fn dispatch<V: ViewContainer + ?Sized>(
        &mut self,
        action: Action,
        view: &mut V,
    ) -> Result<Effect, WorktimerError> {
        tracing::info!(?action, date = %self.store.date_key(), "Handling action");

        match action {
            Action::Start => {
                self.start()?;
                self.render(view);
                self.persist().await?;
            }
            Action::Stop => {
                self.stop()?;
                self.render(view);
                self.persist().await?;
            }
            Action::Delete { index } => {
                self.delete(index)?;
                self.render(view);
                self.persist().await?;
            }
            Action::Commit {
                index,
                field,
                value,
            } => {
                self.commit(index, field, value)?;
                if field.is_time() {
                    self.render(view);
                }
                self.persist().await?;
            }
            Action::NextDay => self.navigate(view, |store| store.add_days(1)),
            Action::PreviousDay => self.navigate(view, |store| store.add_days(-1)),
            Action::Today => {
                let today = self.clock.today();
                self.navigate(view, |store| store.set_date(today));
            }
            Action::SetDate(date) => self.navigate(view, |store| store.set_date(date)),
            Action::Export => {
                let key = self.store.date_key();
                let file = ExportFile::for_day(Some(&key), self.store.current_day())?;
                return Ok(Effect::Download(file));
            }
            Action::Popout => return Ok(Effect::Popout),
        }

        Ok(Effect::None)
    }

    fn navigate<V, F>(&mut self, view: &mut V, change: F)
    where
        V: ViewContainer + ?Sized,
        F: FnOnce(&mut DayStore),
    {
        change(&mut self.store);
        self.render(view);
    }

    fn start(&mut self) -> Result<(), WorktimerError> {
        let now = self.clock.now();
        let started = self
            .clock
            .assume_local(self.store.selected_date().with_time(now.time()));

        let day = self.store.current_day();
        if day.is_running() {
            return Err(WorktimerError::TimerAlreadyRunning);
        }
        day.current_timer = Some(started);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), WorktimerError> {
        let now = self.clock.now();
        let day = self.store.current_day();

        let begin = day
            .current_timer
            .take()
            .ok_or(WorktimerError::NoTimerRunning)?;
        let desc = std::mem::take(&mut day.current_desc);
        day.entries.push(Entry::new(desc, begin, now));
        Ok(())
    }

    fn delete(&mut self, index: Option<usize>) -> Result<(), WorktimerError> {
        let Some(index) = index else {
            tracing::error!("Trying to remove entry without index");
            return Err(WorktimerError::MissingEntryIndex);
        };

        let day = self.store.current_day();
        if index >= day.entries.len() {
            return Err(WorktimerError::EntryNotFound(index));
        }
        day.entries.remove(index);
        Ok(())
    }

    fn commit(
        &mut self,
        index: Option<usize>,
        field: Field,
        value: String,
    ) -> Result<(), WorktimerError> {
        let instant = if field.is_time() {
            let parsed = instant_on(self.store.selected_date(), &value, self.clock.as_ref());
            if parsed.is_none() {
                tracing::debug!(%field, value = %value, "Time input not understood");
            }
            parsed
        } else {
            None
        };

        let day = self.store.current_day();
        match (index, field) {
            (None, Field::CurrentTimer) => day.current_timer = instant,
            (None, Field::CurrentDesc) => day.current_desc = value,
            (None, field) => {
                return Err(WorktimerError::FieldNotOnTarget {
                    field,
                    target: "the day",
                });
            }
            (Some(index), field) => {
                let entry = day
                    .entries
                    .get_mut(index)
                    .ok_or(WorktimerError::EntryNotFound(index))?;
                match field {
                    Field::Begin => entry.begin = instant,
                    Field::End => entry.end = instant,
                    Field::Desc => entry.desc = value,
                    field => {
                        return Err(WorktimerError::FieldNotOnTarget {
                            field,
                            target: "an entry",
                        });
                    }
                }
            }
        }
        Ok(())
    }

    async fn persist(&self) -> Result<(), WorktimerError> {
        self.storage.save(self.store.data()).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to save data");
            WorktimerError::from(e)
        })
    }
}
