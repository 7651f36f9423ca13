//! Table renderings of template variables and template sources.

mod source_list_ext;
mod variable_map_ext;

pub use self::{source_list_ext::SourceListExt, variable_map_ext::VariableMapExt};
