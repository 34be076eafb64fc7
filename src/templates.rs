//! Template loading and rendering using Tera.
//!
//! Templates ship embedded in the binary; an on-disk `templates/` directory,
//! when present, takes precedence so the markup can be edited without a
//! rebuild.

use crate::error::{Error, Result};
use crate::model::TodoGroup;
use std::path::Path;
use tera::{Context, Tera};

/// Default templates directory relative to the working directory.
pub const TEMPLATES_DIR: &str = "templates";

/// The full-page template.
const INDEX_TEMPLATE: &str = "index.html.tera";

/// The task-list fragment, re-rendered after every write.
const LIST_TEMPLATE: &str = "todo_list.html.tera";

/// Embedded default templates for fallback when files don't exist.
const EMBEDDED_TEMPLATES: &[(&str, &str)] = &[
    (INDEX_TEMPLATE, include_str!("../templates/index.html.tera")),
    (LIST_TEMPLATE, include_str!("../templates/todo_list.html.tera")),
];

/// A loaded template engine. Built once at startup and owned by the server
/// context; rendering takes `&self`.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Load templates from the given directory (or `./templates` when
    /// `None`), filling gaps from the embedded defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but contains invalid
    /// templates, or if an embedded template fails to parse.
    pub fn load(templates_dir: Option<&Path>) -> Result<Self> {
        let dir = templates_dir.map_or_else(
            || std::env::current_dir().unwrap_or_default().join(TEMPLATES_DIR),
            Path::to_path_buf,
        );

        let mut tera = Tera::default();

        if dir.exists() {
            let glob_pattern = format!("{}/**/*.tera", dir.display());
            tera = Tera::new(&glob_pattern).map_err(|e| {
                Error::Template(format!("Failed to load templates from {}: {e}", dir.display()))
            })?;
        }

        for (name, content) in EMBEDDED_TEMPLATES {
            if tera.get_template(name).is_err() {
                tera.add_raw_template(name, content).map_err(|e| {
                    Error::Template(format!("Embedded template {name} is invalid: {e}"))
                })?;
            }
        }

        // Tera only autoescapes .html/.xml suffixes by default; these are
        // HTML templates despite the .tera suffix.
        tera.autoescape_on(vec![".tera"]);

        Ok(Self { tera })
    }

    /// Render the whole page.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn render_page(&self, groups: &[TodoGroup]) -> Result<String> {
        self.render(INDEX_TEMPLATE, groups)
    }

    /// Render only the task-list fragment, for partial updates after writes.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn render_list(&self, groups: &[TodoGroup]) -> Result<String> {
        self.render(LIST_TEMPLATE, groups)
    }

    fn render(&self, name: &str, groups: &[TodoGroup]) -> Result<String> {
        let mut context = Context::new();
        context.insert("groups", groups);
        self.tera
            .render(name, &context)
            .map_err(|e| Error::Template(format!("Failed to render template {name}: {e}")))
    }
}
