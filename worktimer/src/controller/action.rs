use std::fmt;

use time::Date;

use crate::export::ExportFile;

/// Everything a user can ask the controller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
    /// Remove the entry at `index`. `None` when the request carried no
    /// position, which is rejected.
    Delete { index: Option<usize> },
    Export,
    NextDay,
    PreviousDay,
    Today,
    SetDate(Date),
    Popout,
    /// A field lost focus with `value`. Without `index` the field belongs to
    /// the day itself, otherwise to the entry at that position.
    Commit {
        index: Option<usize>,
        field: Field,
        value: String,
    },
}

/// An editable attribute of a day or of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    CurrentTimer,
    CurrentDesc,
    Begin,
    End,
    Desc,
}

impl Field {
    /// Time-valued fields take `HH:MM` input and affect totals.
    pub fn is_time(self) -> bool {
        matches!(self, Self::CurrentTimer | Self::Begin | Self::End)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CurrentTimer => "currentTimer",
            Self::CurrentDesc => "currentDesc",
            Self::Begin => "begin",
            Self::End => "end",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Work left to the front end after an action was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Offer the file to the user.
    Download(ExportFile),
    /// Open the UI again in a separate window.
    Popout,
}
