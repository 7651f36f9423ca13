//! Generation of Kubernetes manifests from templates.
//!
//! A [`GenerationConfig`] collects the parameters of a manifest (image,
//! names, labels, ports, ...). A [`TemplateGenerator`] resolves their
//! defaults, validates object names, turns them into a [`VariableMap`] and
//! expands a template against it.
//!
//! ```no_run
//! use kubegen_template::{GenerationConfig, TemplateGenerator};
//!
//! let config = GenerationConfig::new().with_name("cheese").with_docker_image("fabric8/cheese");
//! TemplateGenerator::new(config).generate("kubernetes.json")?;
//! # Ok::<(), kubegen_template::Error>(())
//! ```

mod config;
mod engine;
mod error;
mod generator;
mod naming;
pub mod source;
mod validation;
mod variables;

pub use self::{
    config::{GenerationConfig, ResolvedConfig},
    engine::{MiniJinjaEngine, TemplateEngine},
    error::{Error, ErrorKind},
    generator::TemplateGenerator,
    naming::{container_name_from, split_camel_case},
    source::{DirectorySource, EmbeddedSource, MemorySource, TemplateSource},
    validation::{Dns1123Validator, IdentifierValidator},
    variables::{VariableMap, keys},
};
