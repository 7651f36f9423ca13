use std::io::Write;

use clap::Args;
use kubegen_template::TemplateGenerator;
use snafu::ResultExt;

use crate::{
    cli::{Error, error, internal::GenerationArgs},
    config::Config,
    ui::table::VariableMapExt,
};

/// Shows the variables a template would be expanded with, without looking up
/// or expanding the template.
#[derive(Args, Clone)]
pub struct VariablesCommand {
    #[command(flatten)]
    pub parameters: GenerationArgs,
}

impl VariablesCommand {
    pub fn run(self, config: &Config) -> Result<(), Error> {
        let variables =
            TemplateGenerator::new(self.parameters.into_generation_config(config)?).variables()?;

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(variables.render_table().as_bytes()).context(error::WriteStdoutSnafu)?;
        stdout.write_all(b"\n").context(error::WriteStdoutSnafu)
    }
}
