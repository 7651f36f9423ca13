use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{ContainerPort, EnvVar};
use kubegen_base::consts::template::{
    DEFAULT_NAMESPACE, DEFAULT_REPLICA_COUNT, DEFAULT_TEMPLATE,
};
use serde::{Deserialize, Serialize};

use crate::naming;

/// Parameters of a single manifest generation.
///
/// Optional fields fall back to computed defaults through the `effective_*`
/// accessors. Those are pure functions of the record, so repeated reads
/// always observe the same value; [`GenerationConfig::resolve`] materializes
/// all of them at once.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub name: Option<String>,

    pub namespace: Option<String>,

    pub docker_image: Option<String>,

    pub image_pull_policy: Option<String>,

    pub container_name: Option<String>,

    pub template: Option<String>,

    #[serde(default)]
    pub labels: BTreeMap<String, String>,

    #[serde(default)]
    pub environment_variables: Vec<EnvVar>,

    #[serde(default)]
    pub ports: Vec<ContainerPort>,

    #[serde(default)]
    pub template_variables: BTreeMap<String, serde_json::Value>,

    pub replica_count: Option<i32>,

    pub service_name: Option<String>,

    pub replication_controller_name: Option<String>,

    pub service_port: Option<i32>,

    pub service_container_port: Option<i32>,
}

impl GenerationConfig {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[must_use]
    pub fn with_docker_image(mut self, docker_image: impl Into<String>) -> Self {
        self.docker_image = Some(docker_image.into());
        self
    }

    #[must_use]
    pub fn with_image_pull_policy(mut self, image_pull_policy: impl Into<String>) -> Self {
        self.image_pull_policy = Some(image_pull_policy.into());
        self
    }

    #[must_use]
    pub fn with_container_name(mut self, container_name: impl Into<String>) -> Self {
        self.container_name = Some(container_name.into());
        self
    }

    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let _previous = self.labels.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_environment_variable(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.environment_variables.push(EnvVar {
            name: name.into(),
            value: Some(value.into()),
            ..EnvVar::default()
        });
        self
    }

    #[must_use]
    pub fn with_port(mut self, port: ContainerPort) -> Self {
        self.ports.push(port);
        self
    }

    #[must_use]
    pub fn with_template_variable(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        let _previous = self.template_variables.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub const fn with_replica_count(mut self, replica_count: i32) -> Self {
        self.replica_count = Some(replica_count);
        self
    }

    #[must_use]
    pub fn with_service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = Some(service_name.into());
        self
    }

    #[must_use]
    pub fn with_replication_controller_name(mut self, name: impl Into<String>) -> Self {
        self.replication_controller_name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn with_service_port(mut self, port: i32) -> Self {
        self.service_port = Some(port);
        self
    }

    #[must_use]
    pub const fn with_service_container_port(mut self, port: i32) -> Self {
        self.service_container_port = Some(port);
        self
    }

    /// The template identifier, or the built-in default when unset or blank.
    #[must_use]
    pub fn effective_template(&self) -> &str {
        self.template.as_deref().filter(|t| !t.trim().is_empty()).unwrap_or(DEFAULT_TEMPLATE)
    }

    /// The namespace, or `"default"` when unset.
    #[must_use]
    pub fn effective_namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE)
    }

    /// The container name; derived from `name` when unset or blank.
    #[must_use]
    pub fn effective_container_name(&self) -> Option<String> {
        match (self.container_name.as_deref(), non_blank(self.name.as_deref())) {
            (Some(container_name), _) if !container_name.trim().is_empty() => {
                Some(container_name.to_string())
            }
            (_, Some(name)) => Some(naming::container_name_from(name)),
            (container_name, None) => container_name.map(ToString::to_string),
        }
    }

    #[must_use]
    pub fn effective_replica_count(&self) -> i32 {
        self.replica_count.unwrap_or(DEFAULT_REPLICA_COUNT)
    }

    /// Copies every field that is set in `overrides` onto `self`.
    ///
    /// Collections are merged key by key (labels, template variables) or
    /// replaced when non-empty (environment variables, ports).
    pub fn merge(&mut self, overrides: Self) {
        let Self {
            name,
            namespace,
            docker_image,
            image_pull_policy,
            container_name,
            template,
            labels,
            environment_variables,
            ports,
            template_variables,
            replica_count,
            service_name,
            replication_controller_name,
            service_port,
            service_container_port,
        } = overrides;

        merge_option(&mut self.name, name);
        merge_option(&mut self.namespace, namespace);
        merge_option(&mut self.docker_image, docker_image);
        merge_option(&mut self.image_pull_policy, image_pull_policy);
        merge_option(&mut self.container_name, container_name);
        merge_option(&mut self.template, template);
        merge_option(&mut self.replica_count, replica_count);
        merge_option(&mut self.service_name, service_name);
        merge_option(&mut self.replication_controller_name, replication_controller_name);
        merge_option(&mut self.service_port, service_port);
        merge_option(&mut self.service_container_port, service_container_port);

        self.labels.extend(labels);
        self.template_variables.extend(template_variables);
        if !environment_variables.is_empty() {
            self.environment_variables = environment_variables;
        }
        if !ports.is_empty() {
            self.ports = ports;
        }
    }

    /// Resolves every default once.
    #[must_use]
    pub fn resolve(&self) -> ResolvedConfig {
        ResolvedConfig {
            name: self.name.clone(),
            namespace: self.effective_namespace().to_string(),
            docker_image: self.docker_image.clone(),
            image_pull_policy: self.image_pull_policy.clone(),
            container_name: self.effective_container_name(),
            template: self.effective_template().to_string(),
            labels: self.labels.clone(),
            environment_variables: self.environment_variables.clone(),
            ports: self.ports.clone(),
            template_variables: self.template_variables.clone(),
            replica_count: self.effective_replica_count(),
            service_name: self.service_name.clone(),
            replication_controller_name: self.replication_controller_name.clone(),
            service_port: self.service_port,
            service_container_port: self.service_container_port,
        }
    }
}

/// A [`GenerationConfig`] with every default applied.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    pub name: Option<String>,
    pub namespace: String,
    pub docker_image: Option<String>,
    pub image_pull_policy: Option<String>,
    pub container_name: Option<String>,
    pub template: String,
    pub labels: BTreeMap<String, String>,
    pub environment_variables: Vec<EnvVar>,
    pub ports: Vec<ContainerPort>,
    pub template_variables: BTreeMap<String, serde_json::Value>,
    pub replica_count: i32,
    pub service_name: Option<String>,
    pub replication_controller_name: Option<String>,
    pub service_port: Option<i32>,
    pub service_container_port: Option<i32>,
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn merge_option<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}
