use std::path::PathBuf;

use snafu::Snafu;

/// Errors raised while turning a [`GenerationConfig`](crate::GenerationConfig)
/// into a manifest.
///
/// Every variant belongs to one of the two [`ErrorKind`]s: configuration
/// problems the caller has to fix, and storage or expansion failures that
/// carry their underlying cause.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("No template is specified, cannot generate the Kubernetes manifest"))]
    NoTemplateSpecified,

    #[snafu(display(
        "Could not find template {template} in any template source ({sources}) while generating \
         the Kubernetes manifest"
    ))]
    TemplateNotFound { template: String, sources: String },

    #[snafu(display(
        "No docker image is specified, set `dockerImage` or the `{variable}` template variable"
    ))]
    NoDockerImage { variable: &'static str },

    #[snafu(display("Invalid {field} value '{value}': {reason}"))]
    InvalidIdentifier { field: String, value: String, reason: String },

    #[snafu(display("replicationControllerName and serviceName are the same! ({name})"))]
    NameCollision { name: String },

    #[snafu(display("Failed to convert {key} into a template variable, error: {source}"))]
    SerializeVariable { key: &'static str, source: serde_json::Error },

    #[snafu(display("Failed to read template {template} from {source_name}, error: {source}"))]
    ReadTemplate { template: String, source_name: String, source: std::io::Error },

    #[snafu(display("Failed to compile template {template}, error: {source}"))]
    CompileTemplate {
        template: String,
        #[snafu(source(from(minijinja::Error, Box::new)))]
        source: Box<minijinja::Error>,
    },

    #[snafu(display("Failed to expand template {template}, error: {source}"))]
    RenderTemplate {
        template: String,
        #[snafu(source(from(minijinja::Error, Box::new)))]
        source: Box<minijinja::Error>,
    },

    #[snafu(display("Failed to create a temporary file next to {}, error: {source}", path.display()))]
    CreateOutput { path: PathBuf, source: std::io::Error },

    #[snafu(display("Failed to write {}, error: {source}", path.display()))]
    WriteOutput { path: PathBuf, source: std::io::Error },

    #[snafu(display("Failed to replace {}, error: {source}", path.display()))]
    PersistOutput { path: PathBuf, source: std::io::Error },
}

/// Coarse classification of an [`Error`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The generation parameters are incomplete or invalid. Retrying without
    /// changing them fails the same way.
    Configuration,
    /// Loading, expanding or writing failed at the storage layer.
    Io,
}

impl Error {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoTemplateSpecified
            | Self::TemplateNotFound { .. }
            | Self::NoDockerImage { .. }
            | Self::InvalidIdentifier { .. }
            | Self::NameCollision { .. }
            | Self::SerializeVariable { .. } => ErrorKind::Configuration,
            Self::ReadTemplate { .. }
            | Self::CompileTemplate { .. }
            | Self::RenderTemplate { .. }
            | Self::CreateOutput { .. }
            | Self::WriteOutput { .. }
            | Self::PersistOutput { .. } => ErrorKind::Io,
        }
    }
}
