use crate::domain::Day;

const DEFAULT_EXPORT_NAME: &str = "export";

/// A file the front end should hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub name: String,
    pub contents: String,
}

impl ExportFile {
    pub fn for_day(date_key: Option<&str>, day: &Day) -> Result<Self, serde_json::Error> {
        Ok(Self {
            name: export_file_name(date_key),
            contents: day_to_json(day)?,
        })
    }
}

/// `<date-key>.json`, or `export.json` without a key.
pub fn export_file_name(date_key: Option<&str>) -> String {
    let stem = date_key
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .unwrap_or(DEFAULT_EXPORT_NAME);
    format!("{stem}.json")
}

/// Pretty-printed JSON with two-space indentation.
pub fn day_to_json(day: &Day) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(day)
}

pub fn day_from_json(raw: &str) -> Result<Day, serde_json::Error> {
    serde_json::from_str(raw)
}
