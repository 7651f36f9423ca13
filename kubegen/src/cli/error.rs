use std::path::PathBuf;

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{source}"))]
    Configuration { source: crate::config::Error },

    #[snafu(display("{source}"))]
    Template {
        #[snafu(source(from(kubegen_template::Error, Box::new)))]
        source: Box<kubegen_template::Error>,
    },

    #[snafu(display("Failed to read generation parameters from {}, error: {source}", path.display()))]
    ReadParameters { path: PathBuf, source: std::io::Error },

    #[snafu(display("Failed to parse generation parameters from {}, error: {source}", path.display()))]
    ParseParameters { path: PathBuf, source: serde_yaml::Error },

    #[snafu(display("Failed to write to stdout, error: {source}"))]
    WriteStdout { source: std::io::Error },
}

impl From<crate::config::Error> for Error {
    fn from(source: crate::config::Error) -> Self { Self::Configuration { source } }
}

impl From<kubegen_template::Error> for Error {
    fn from(source: kubegen_template::Error) -> Self { Self::Template { source: Box::new(source) } }
}
