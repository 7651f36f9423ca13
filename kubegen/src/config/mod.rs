mod error;
mod image_pull_policy;
mod key_value;
mod port_spec;

use std::path::{Path, PathBuf};

use kubegen_base::consts::template::DEFAULT_OUTPUT_FILE;
use kubegen_cli::config::LogConfig;
use kubegen_template::{DirectorySource, EmbeddedSource, GenerationConfig, TemplateSource};
use resolve_path::PathResolveExt;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

pub use self::{
    error::Error, image_pull_policy::ImagePullPolicy, key_value::KeyValue, port_spec::PortSpec,
};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directories searched for templates, in order, before the built-in
    /// templates. The working directory is used when empty.
    #[serde(default = "Vec::new")]
    pub template_directories: Vec<PathBuf>,

    /// Where `generate` writes the manifest when no output is given.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Generation parameters applied underneath the command-line flags.
    #[serde(default)]
    pub defaults: GenerationConfig,

    #[serde(default = "LogConfig::default")]
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_directories: Vec::new(),
            output: default_output(),
            defaults: GenerationConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Returns the first existing configuration file, if any.
    pub fn search_config_file_path() -> Option<PathBuf> {
        std::iter::once(Self::default_path())
            .chain(kubegen_base::fallback_project_config_directories().into_iter().map(
                |mut path| {
                    path.push(kubegen_base::CLI_CONFIG_NAME);
                    path
                },
            ))
            .find(|path| path.try_exists().unwrap_or(false))
    }

    #[inline]
    pub fn default_path() -> PathBuf {
        kubegen_base::PROJECT_CONFIG_DIR.join(kubegen_base::CLI_CONFIG_NAME)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut config: Self = {
            let path = resolve(path.as_ref())?;
            let data =
                std::fs::read(&path).context(error::OpenConfigSnafu { filename: path.clone() })?;
            serde_yaml::from_slice(&data).context(error::ParseConfigSnafu { filename: path })?
        };

        config.log.file_path = config.log.file_path.as_deref().map(resolve).transpose()?;
        config.template_directories = config
            .template_directories
            .iter()
            .map(|dir| resolve(dir))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(config)
    }

    /// The default configuration rendered as YAML.
    pub fn template_basic() -> Result<String, Error> {
        serde_yaml::to_string(&Self::default()).context(error::SerializeConfigSnafu)
    }

    /// Template sources in lookup order: the configured directories (or the
    /// working directory), then the built-in templates.
    pub fn template_sources(&self) -> Vec<Box<dyn TemplateSource>> {
        let mut sources: Vec<Box<dyn TemplateSource>> = if self.template_directories.is_empty() {
            vec![Box::new(DirectorySource::current_dir())]
        } else {
            self.template_directories
                .iter()
                .map(|dir| -> Box<dyn TemplateSource> { Box::new(DirectorySource::new(dir)) })
                .collect()
        };
        sources.push(Box::new(EmbeddedSource));
        sources
    }
}

fn resolve(path: &Path) -> Result<PathBuf, Error> {
    path.try_resolve()
        .map(|resolved| resolved.to_path_buf())
        .with_context(|_| error::ResolveFilePathSnafu { file_path: path.to_path_buf() })
}

fn default_output() -> PathBuf { PathBuf::from(DEFAULT_OUTPUT_FILE) }
