//! Places templates are looked up from.
//!
//! A [`TemplateGenerator`](crate::TemplateGenerator) probes its sources in
//! order and uses the first one that knows the requested identifier.

use std::{
    borrow::Cow,
    collections::BTreeMap,
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use kubegen_base::consts::template::DEFAULT_TEMPLATE;

/// Templates compiled into the binary, keyed by identifier.
pub const BUILTIN_TEMPLATES: &[(&str, &str)] =
    &[(DEFAULT_TEMPLATE, include_str!("../templates/default.json.j2"))];

/// Resolves a template identifier to its content.
pub trait TemplateSource {
    /// Human readable name used in log events and error messages.
    fn name(&self) -> Cow<'_, str>;

    /// Opens the template called `identifier`.
    ///
    /// Returns `Ok(None)` when this source does not know the template.
    ///
    /// # Errors
    ///
    /// Returns an error when the template exists but cannot be opened.
    fn lookup(&self, identifier: &str) -> io::Result<Option<Box<dyn Read + '_>>>;
}

/// Looks templates up relative to a directory on disk.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    /// A source rooted at the process working directory.
    #[must_use]
    pub fn current_dir() -> Self { Self::new(".") }

    #[must_use]
    pub fn root(&self) -> &Path { &self.root }
}

impl TemplateSource for DirectorySource {
    fn name(&self) -> Cow<'_, str> { Cow::Owned(format!("directory {}", self.root.display())) }

    fn lookup(&self, identifier: &str) -> io::Result<Option<Box<dyn Read + '_>>> {
        let path = self.root.join(identifier);
        match File::open(&path) {
            Ok(file) if path.is_file() => Ok(Some(Box::new(file))),
            Ok(_) => Ok(None),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}

/// Serves the templates shipped with kubegen, see [`BUILTIN_TEMPLATES`].
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbeddedSource;

impl EmbeddedSource {
    /// Identifiers of all built-in templates.
    pub fn identifiers() -> impl Iterator<Item = &'static str> {
        BUILTIN_TEMPLATES.iter().map(|(identifier, _)| *identifier)
    }
}

impl TemplateSource for EmbeddedSource {
    fn name(&self) -> Cow<'_, str> { Cow::Borrowed("built-in templates") }

    fn lookup(&self, identifier: &str) -> io::Result<Option<Box<dyn Read + '_>>> {
        Ok(BUILTIN_TEMPLATES
            .iter()
            .find(|(id, _)| *id == identifier)
            .map(|(_, content)| -> Box<dyn Read> { Box::new(content.as_bytes()) }))
    }
}

/// Keeps templates in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    templates: BTreeMap<String, String>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_template(
        mut self,
        identifier: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let _previous = self.templates.insert(identifier.into(), content.into());
        self
    }
}

impl TemplateSource for MemorySource {
    fn name(&self) -> Cow<'_, str> { Cow::Borrowed("in-memory templates") }

    fn lookup(&self, identifier: &str) -> io::Result<Option<Box<dyn Read + '_>>> {
        Ok(self
            .templates
            .get(identifier)
            .map(|content| -> Box<dyn Read + '_> { Box::new(content.as_bytes()) }))
    }
}

/// The sources used when the caller provides none: the working directory,
/// then the built-in templates.
#[must_use]
pub fn default_sources() -> Vec<Box<dyn TemplateSource>> {
    vec![Box::new(DirectorySource::current_dir()), Box::new(EmbeddedSource)]
}
