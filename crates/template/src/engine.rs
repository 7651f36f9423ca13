use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};
use snafu::ResultExt;

use crate::{
    error::{self, Error},
    variables::VariableMap,
};

/// Expands a template's text against a variable map.
pub trait TemplateEngine {
    /// Renders `source`, the text of the template called `identifier`.
    ///
    /// # Errors
    ///
    /// Returns an error when the template does not compile or fails to
    /// render.
    fn render(
        &self,
        identifier: &str,
        source: &str,
        variables: &VariableMap,
    ) -> Result<String, Error>;
}

/// Jinja2 style templates rendered with `minijinja`.
///
/// Referencing a variable that is not in the map is an error, and output is
/// never escaped: use the `tojson` filter to emit JSON literals.
#[derive(Clone, Copy, Debug, Default)]
pub struct MiniJinjaEngine;

impl TemplateEngine for MiniJinjaEngine {
    fn render(
        &self,
        identifier: &str,
        source: &str,
        variables: &VariableMap,
    ) -> Result<String, Error> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        let template = env
            .template_from_named_str(identifier, source)
            .context(error::CompileTemplateSnafu { template: identifier })?;
        template
            .render(Value::from_serialize(variables))
            .context(error::RenderTemplateSnafu { template: identifier })
    }
}
