#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::{
    fs,
    io::{Read, Write},
    path::Path,
};

use snafu::{ResultExt, ensure};

use crate::{
    config::{GenerationConfig, ResolvedConfig},
    engine::{MiniJinjaEngine, TemplateEngine},
    error::{self, Error},
    source::{self, TemplateSource},
    validation::{Dns1123Validator, IdentifierValidator},
    variables::{self, VariableMap},
};

/// Generates a Kubernetes manifest from a [`GenerationConfig`].
///
/// The template is looked up through an ordered list of
/// [`TemplateSource`]s, expanded by a [`TemplateEngine`] and written to a
/// destination file. A generator holds no state between calls.
pub struct TemplateGenerator {
    config: GenerationConfig,
    sources: Vec<Box<dyn TemplateSource>>,
    validator: Box<dyn IdentifierValidator>,
    engine: Box<dyn TemplateEngine>,
}

impl TemplateGenerator {
    /// Creates a generator that reads templates from the working directory
    /// and the built-in templates.
    #[must_use]
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config,
            sources: source::default_sources(),
            validator: Box::new(Dns1123Validator),
            engine: Box::new(MiniJinjaEngine),
        }
    }

    /// Replaces the template sources. Sources are probed in order and the
    /// first one that knows the template wins.
    #[must_use]
    pub fn with_sources(mut self, sources: Vec<Box<dyn TemplateSource>>) -> Self {
        self.sources = sources;
        self
    }

    #[must_use]
    pub fn with_validator(mut self, validator: impl IdentifierValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    #[must_use]
    pub fn with_engine(mut self, engine: impl TemplateEngine + 'static) -> Self {
        self.engine = Box::new(engine);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &GenerationConfig { &self.config }

    /// Generates the manifest and writes it to `destination`, replacing any
    /// existing file.
    ///
    /// The content is written to a temporary file next to `destination` and
    /// moved into place once complete, so a failure never leaves a partial
    /// manifest behind.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the template cannot be found, no
    /// docker image is set, or a name is invalid. Returns an I/O error when
    /// the template cannot be read or expanded, or `destination` cannot be
    /// written.
    pub fn generate(&self, destination: impl AsRef<Path>) -> Result<(), Error> {
        let destination = destination.as_ref();
        let manifest = self.render()?;
        write_atomically(destination, &manifest)?;
        tracing::info!(
            "Generated Kubernetes manifest {} ({} bytes)",
            destination.display(),
            manifest.len()
        );
        Ok(())
    }

    /// Generates the manifest and returns it instead of writing a file.
    ///
    /// # Errors
    ///
    /// Same as [`TemplateGenerator::generate`], minus the write failures.
    pub fn render(&self) -> Result<String, Error> {
        let config = self.config.resolve();
        let template = self.load_template(&config.template)?;
        let variables = variables::build(&config, &*self.validator)?;
        self.engine.render(&config.template, &template, &variables)
    }

    /// Builds the variable map the template would be expanded with.
    ///
    /// # Errors
    ///
    /// Fails for the same configuration problems as
    /// [`TemplateGenerator::generate`]; the template is not loaded.
    pub fn variables(&self) -> Result<VariableMap, Error> {
        let config: ResolvedConfig = self.config.resolve();
        variables::build(&config, &*self.validator)
    }

    fn load_template(&self, identifier: &str) -> Result<String, Error> {
        // `resolve` substitutes the default for a blank template; this guards
        // identifiers that reach here by other routes.
        ensure!(!identifier.trim().is_empty(), error::NoTemplateSpecifiedSnafu);

        for source in &self.sources {
            let source_name = source.name();
            let reader = source.lookup(identifier).with_context(|_| error::ReadTemplateSnafu {
                template: identifier,
                source_name: &*source_name,
            })?;
            let Some(mut reader) = reader else {
                tracing::debug!("Template {identifier} not found in {source_name}");
                continue;
            };

            let mut content = String::new();
            let _len = reader.read_to_string(&mut content).with_context(|_| {
                error::ReadTemplateSnafu { template: identifier, source_name: &*source_name }
            })?;
            tracing::debug!("Loaded template {identifier} from {source_name}");
            return Ok(content);
        }

        let sources = self.sources.iter().map(|source| source.name()).collect::<Vec<_>>();
        error::TemplateNotFoundSnafu { template: identifier, sources: sources.join(", ") }.fail()
    }
}

fn write_atomically(destination: &Path, content: &str) -> Result<(), Error> {
    let directory = destination
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    // 0666 before the umask, as for any newly created file.
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    let _builder = builder.permissions(fs::Permissions::from_mode(0o666));
    let mut file = builder
        .tempfile_in(directory)
        .with_context(|_| error::CreateOutputSnafu { path: destination })?;

    file.write_all(content.as_bytes())
        .and_then(|()| match fs::metadata(destination) {
            Ok(metadata) => file.as_file().set_permissions(metadata.permissions()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        })
        .and_then(|()| file.as_file().sync_all())
        .with_context(|_| error::WriteOutputSnafu { path: destination })?;
    let _file = file
        .persist(destination)
        .map_err(|err| err.error)
        .with_context(|_| error::PersistOutputSnafu { path: destination })?;
    Ok(())
}
