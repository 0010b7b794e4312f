//! Projection of a [`crate::Day`] into what the user sees.

mod model;
mod template;

pub use model::*;
pub use template::TemplateRenderer;

/// Something a [`DisplayModel`] can be shown in.
pub trait ViewContainer {
    /// Replace everything currently displayed.
    fn replace(&mut self, model: DisplayModel);

    /// Update only the running and combined totals, leaving the rest of the
    /// view (including fields being edited) untouched.
    fn update_totals(&mut self, totals: &LiveTotals);
}

/// A container that only remembers the last model it was given.
#[derive(Debug, Clone, Default)]
pub struct RecordedView {
    pub model: Option<DisplayModel>,
    pub full_renders: usize,
    pub total_updates: usize,
}

impl ViewContainer for RecordedView {
    fn replace(&mut self, model: DisplayModel) {
        self.model = Some(model);
        self.full_renders += 1;
    }

    fn update_totals(&mut self, totals: &LiveTotals) {
        if let Some(model) = self.model.as_mut() {
            model.apply_totals(totals);
        }
        self.total_updates += 1;
    }
}
