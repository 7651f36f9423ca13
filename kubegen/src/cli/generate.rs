use std::{io::Write, path::PathBuf};

use clap::Args;
use kubegen_template::TemplateGenerator;
use snafu::ResultExt;

use crate::{
    cli::{Error, error, internal::GenerationArgs},
    config::Config,
};

#[derive(Args, Clone)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub parameters: GenerationArgs,

    #[arg(
        short = 'o',
        long = "output",
        help = "File that receives the generated manifest, `-` for standard output. Defaults \
                to the `output` entry of the configuration file (kubernetes.json)."
    )]
    pub output: Option<PathBuf>,
}

impl GenerateCommand {
    pub fn run(self, config: &Config) -> Result<(), Error> {
        let Self { parameters, output } = self;
        let output = output.unwrap_or_else(|| config.output.clone());

        let generator = TemplateGenerator::new(parameters.into_generation_config(config)?)
            .with_sources(config.template_sources());

        if output.as_os_str() == "-" {
            let manifest = generator.render()?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(manifest.as_bytes()).context(error::WriteStdoutSnafu)?;
            if !manifest.ends_with('\n') {
                stdout.write_all(b"\n").context(error::WriteStdoutSnafu)?;
            }
            return stdout.flush().context(error::WriteStdoutSnafu);
        }

        generator.generate(&output).map_err(Error::from)
    }
}
