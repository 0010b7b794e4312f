use worktimer::Field;

/// Which row of the day view has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedRow {
    Date,
    Timer,
    Entry(usize),
}

/// What a field edit writes back to when it is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Date,
    Field { index: Option<usize>, field: Field },
}

const TIMER_FIELDS: [Field; 2] = [Field::CurrentTimer, Field::CurrentDesc];
const ENTRY_FIELDS: [Field; 3] = [Field::Begin, Field::End, Field::Desc];

impl FocusedRow {
    /// Number of editable fields on the row.
    pub fn field_count(self) -> usize {
        match self {
            Self::Date => 1,
            Self::Timer => TIMER_FIELDS.len(),
            Self::Entry(_) => ENTRY_FIELDS.len(),
        }
    }

    /// The entry position this row carries, if any.
    pub fn entry_index(self) -> Option<usize> {
        match self {
            Self::Entry(index) => Some(index),
            _ => None,
        }
    }

    pub fn target(self, column: usize) -> EditTarget {
        let column = column.min(self.field_count() - 1);
        match self {
            Self::Date => EditTarget::Date,
            Self::Timer => EditTarget::Field {
                index: None,
                field: TIMER_FIELDS[column],
            },
            Self::Entry(index) => EditTarget::Field {
                index: Some(index),
                field: ENTRY_FIELDS[column],
            },
        }
    }
}

/// A field currently being typed into.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEdit {
    pub target: EditTarget,
    pub input: TextInput,
}

/// Text typed into a field. `cursor` counts characters, not bytes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn from_str(s: &str) -> Self {
        Self {
            value: s.to_string(),
            cursor: s.chars().count(),
        }
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    /// Byte offset of the character at `position`.
    fn byte_offset(&self, position: usize) -> usize {
        self.value
            .char_indices()
            .nth(position)
            .map_or(self.value.len(), |(offset, _)| offset)
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Removes the character left of the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.len();
    }

    /// Text before and after the cursor.
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.value.split_at(self.byte_offset(self.cursor))
    }
}
