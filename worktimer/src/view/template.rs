use std::path::Path;

use minijinja::Environment;

use super::DisplayModel;
use crate::ViewError;

const DEFAULT_TEMPLATE: &str = include_str!("../../templates/day.txt.j2");

/// Renders a [`DisplayModel`] to text through a logic-less template.
#[derive(Debug)]
pub struct TemplateRenderer {
    env: Environment<'static>,
    source: String,
}

impl TemplateRenderer {
    /// Uses the bundled day template.
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
            source: DEFAULT_TEMPLATE.to_string(),
        }
    }

    /// Uses a custom template, rejecting it up front if it does not parse.
    pub fn from_source(source: impl Into<String>) -> Result<Self, ViewError> {
        let source = source.into();
        Environment::new().template_from_str(&source)?;

        Ok(Self {
            env: Environment::new(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ViewError> {
        let source = std::fs::read_to_string(path).map_err(|source| ViewError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_source(source)
    }

    pub fn render(&self, model: &DisplayModel) -> Result<String, ViewError> {
        Ok(self.env.render_str(&self.source, model)?)
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::EntryView;

    fn model() -> DisplayModel {
        DisplayModel {
            date_key: "2023-05-15".to_string(),
            current_desc: "coding".to_string(),
            current_timer: Some("11:00".to_string()),
            current_total: Some("00:20".to_string()),
            running: true,
            entries: vec![
                EntryView {
                    index: 0,
                    desc: "standup".to_string(),
                    begin: Some("09:00".to_string()),
                    end: Some("09:30".to_string()),
                    total: Some("00:30".to_string()),
                },
                EntryView {
                    index: 1,
                    desc: "broken".to_string(),
                    begin: None,
                    end: Some("10:00".to_string()),
                    total: None,
                },
            ],
            combined_total: "00:50".to_string(),
        }
    }

    #[test]
    fn renders_default_template() {
        let out = TemplateRenderer::new().render(&model()).unwrap();

        assert!(out.starts_with("2023-05-15\n"));
        assert!(out.contains("[0] 09:00 - 09:30  00:30  standup"));
        assert!(out.contains("[1] --:-- - 10:00  --:--  broken"));
        assert!(out.contains("[*] 11:00 - now    00:20  coding"));
        assert!(out.contains("total 00:50"));
    }

    #[test]
    fn renders_empty_day() {
        let mut model = model();
        model.entries.clear();
        model.running = false;

        let out = TemplateRenderer::new().render(&model).unwrap();
        assert!(out.contains("no entries"));
        assert!(!out.contains("[*]"));
    }

    #[test]
    fn custom_template() {
        let renderer = TemplateRenderer::from_source("{{ date_key }}: {{ combined_total }}").unwrap();
        assert_eq!(renderer.render(&model()).unwrap(), "2023-05-15: 00:50");
    }

    #[test]
    fn broken_template_is_rejected() {
        let err = TemplateRenderer::from_source("{% for x in %}").unwrap_err();
        assert!(matches!(err, ViewError::Template(_)));
    }
}
