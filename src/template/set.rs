//! Template set
//!
//! Owns a minijinja environment with the templates of one generation run.
//! Template names are the paths relative to the templates directory, with
//! `/` separators and the template extension kept (e.g. `include/Intrinsics.h.mako`).

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use glob::{glob, Pattern};
use log::debug;
use minijinja::{AutoEscape, Environment, Template, UndefinedBehavior};

use crate::errors::{
    file_operation_error, glob_pattern_error, render_error, template_not_found_error, Result,
};
use crate::utils::is_template_file;

pub struct TemplateSet {
    env: Environment<'static>,
    names: Vec<String>,
    root: Option<PathBuf>,
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateSet {
    /// Creates an empty template set
    ///
    /// The final newline of a template is kept, so a generated file ends the
    /// way its template does. Referencing a value missing from the context is
    /// a render error. Output is never escaped, whatever the file type.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        TemplateSet {
            env,
            names: Vec::new(),
            root: None,
        }
    }

    /// Loads every template file found below `dir`
    ///
    /// # Errors
    /// * Returns an error if the directory cannot be walked or a file cannot be read
    /// * Returns `Error::Render` if a template has invalid syntax
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let mut set = TemplateSet::new();
        set.root = Some(dir.to_path_buf());

        let pattern = format!("{}/**/*", Pattern::escape(&dir.to_string_lossy()));
        debug!("Scanning for templates with pattern: {pattern}");

        let entries = glob(&pattern).map_err(|e| glob_pattern_error(e, &pattern))?;
        for entry in entries {
            let path = entry.map_err(|e| {
                let path = e.path().to_path_buf();
                file_operation_error(e.into_error(), path, "access")
            })?;
            if !path.is_file() || !is_template_file(&path) {
                continue;
            }

            let name = template_name(dir, &path);
            let source = read_to_string(&path)
                .map_err(|e| file_operation_error(e, path.clone(), "read"))?;
            set.add_template(&name, source)?;
        }

        debug!("Loaded {} templates from {}", set.len(), dir.display());
        Ok(set)
    }

    /// Registers a template under `name`, replacing any previous one
    pub fn add_template(&mut self, name: &str, source: String) -> Result<()> {
        self.env
            .add_template_owned(name.to_string(), source)
            .map_err(|e| render_error(e, name))?;
        if let Err(index) = self.names.binary_search_by(|probe| probe.as_str().cmp(name)) {
            self.names.insert(index, name.to_string());
        }
        Ok(())
    }

    /// Looks up a template handle by name
    pub fn get_template(&self, name: &str) -> Result<Template<'_, '_>> {
        self.env
            .get_template(name)
            .map_err(|_| template_not_found_error(name))
    }

    /// Names of all registered templates, sorted
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Directory the set was loaded from, if any
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }
}

fn template_name(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
