use std::path::{Path, PathBuf};

use clap::{ArgAction, Args};
use k8s_openapi::api::core::v1::{ContainerPort, EnvVar};
use kubegen_template::GenerationConfig;
use snafu::ResultExt;

use crate::{
    cli::{Error, error},
    config::{Config, ImagePullPolicy, KeyValue, PortSpec},
};

/// Generation parameters shared by the commands that build a manifest.
///
/// Values are layered: the `defaults` section of the configuration file,
/// then the parameter file given with `--from-file`, then these flags.
#[derive(Args, Clone, Debug, Default)]
pub struct GenerationArgs {
    #[arg(
        short = 'f',
        long = "from-file",
        help = "YAML file with generation parameters (camelCase keys such as dockerImage, \
                replicaCount, templateVariables). Flags override its values."
    )]
    pub from_file: Option<PathBuf>,

    #[arg(long = "name", help = "Name of the application the manifest describes.")]
    pub name: Option<String>,

    #[arg(
        short = 'n',
        long = "namespace",
        help = "Kubernetes namespace of the generated objects. Defaults to `default`."
    )]
    pub namespace: Option<String>,

    #[arg(
        short = 'i',
        long = "image",
        help = "Docker image of the container (e.g., `fabric8/cheese:1.0`)."
    )]
    pub docker_image: Option<String>,

    #[arg(
        long = "image-pull-policy",
        help = "Policy for pulling the container image (`Always`, `IfNotPresent`, `Never`)."
    )]
    pub image_pull_policy: Option<ImagePullPolicy>,

    #[arg(
        long = "container-name",
        help = "Name of the container. Derived from --name when omitted (`MyApp` becomes \
                `my-app`)."
    )]
    pub container_name: Option<String>,

    #[arg(
        short = 't',
        long = "template",
        help = "Identifier of the template, looked up in the template directories and then \
                the built-in templates."
    )]
    pub template: Option<String>,

    #[arg(
        short = 'l',
        long = "label",
        action = ArgAction::Append,
        help = "Label applied to the generated objects, as KEY=VALUE. Can be specified multiple times."
    )]
    pub labels: Vec<KeyValue>,

    #[arg(
        short = 'e',
        long = "env",
        action = ArgAction::Append,
        help = "Environment variable of the container, as NAME=VALUE. Can be specified multiple times."
    )]
    pub environment_variables: Vec<KeyValue>,

    #[arg(
        short = 'p',
        long = "port",
        action = ArgAction::Append,
        help = "Container port, as [NAME:]PORT[/PROTOCOL] (e.g., `8080`, `http:8080/TCP`). Can be specified multiple times."
    )]
    pub ports: Vec<PortSpec>,

    #[arg(
        long = "var",
        action = ArgAction::Append,
        help = "Extra template variable, as KEY=VALUE. The value is parsed as JSON when possible. Can be specified multiple times."
    )]
    pub template_variables: Vec<KeyValue>,

    #[arg(short = 'r', long = "replicas", help = "Number of replicas. Defaults to 1.")]
    pub replica_count: Option<i32>,

    #[arg(long = "service-name", help = "Name of the service exposing the container.")]
    pub service_name: Option<String>,

    #[arg(
        long = "replication-controller-name",
        help = "Name of the replication controller. Must differ from --service-name."
    )]
    pub replication_controller_name: Option<String>,

    #[arg(long = "service-port", help = "Port the service listens on.")]
    pub service_port: Option<i32>,

    #[arg(
        long = "service-container-port",
        help = "Container port the service forwards to. Defaults to --service-port in the \
                built-in template."
    )]
    pub service_container_port: Option<i32>,
}

impl GenerationArgs {
    /// Layers the configuration defaults, the parameter file and the flags
    /// into a single [`GenerationConfig`].
    pub fn into_generation_config(self, config: &Config) -> Result<GenerationConfig, Error> {
        let mut generation = config.defaults.clone();
        if let Some(path) = &self.from_file {
            generation.merge(read_parameter_file(path)?);
        }
        generation.merge(self.into());
        Ok(generation)
    }
}

impl From<GenerationArgs> for GenerationConfig {
    fn from(args: GenerationArgs) -> Self {
        let GenerationArgs {
            from_file: _,
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
        } = args;

        Self {
            name,
            namespace,
            docker_image,
            image_pull_policy: image_pull_policy.map(|policy| policy.to_string()),
            container_name,
            template,
            labels: labels.into_iter().map(|KeyValue { key, value }| (key, value)).collect(),
            environment_variables: environment_variables
                .into_iter()
                .map(|KeyValue { key, value }| EnvVar {
                    name: key,
                    value: Some(value),
                    ..EnvVar::default()
                })
                .collect(),
            ports: ports.into_iter().map(ContainerPort::from).collect(),
            template_variables: template_variables
                .iter()
                .map(|kv| (kv.key.clone(), kv.json_value()))
                .collect(),
            replica_count,
            service_name,
            replication_controller_name,
            service_port,
            service_container_port,
        }
    }
}

fn read_parameter_file(path: &Path) -> Result<GenerationConfig, Error> {
    let data = std::fs::read(path).context(error::ReadParametersSnafu { path })?;
    serde_yaml::from_slice(&data).context(error::ParseParametersSnafu { path })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_flags_convert_into_generation_config() {
        let args = GenerationArgs {
            name: Some("MyApp".to_string()),
            docker_image: Some("example/my-app".to_string()),
            image_pull_policy: Some(ImagePullPolicy::Always),
            labels: vec!["app=my-app".parse().unwrap()],
            environment_variables: vec!["MODE=prod".parse().unwrap()],
            ports: vec!["http:8080".parse().unwrap()],
            template_variables: vec!["limits={\"cpu\":1}".parse().unwrap()],
            replica_count: Some(2),
            ..GenerationArgs::default()
        };
        let config = GenerationConfig::from(args);

        assert_eq!(config.image_pull_policy.as_deref(), Some("Always"));
        assert_eq!(config.labels["app"], "my-app");
        assert_eq!(config.environment_variables[0].name, "MODE");
        assert_eq!(config.environment_variables[0].value.as_deref(), Some("prod"));
        assert_eq!(config.ports[0].container_port, 8080);
        assert_eq!(config.template_variables["limits"], json!({"cpu": 1}));
        assert_eq!(config.effective_replica_count(), 2);
    }

    #[test]
    fn test_layering_prefers_flags_over_file_over_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.yaml");
        std::fs::write(&path, "dockerImage: file/image\nnamespace: from-file\nreplicaCount: 4\n")
            .unwrap();

        let mut config = Config::default();
        config.defaults = GenerationConfig::new()
            .with_namespace("from-config")
            .with_service_name("from-config");

        let args = GenerationArgs {
            from_file: Some(path),
            docker_image: Some("flag/image".to_string()),
            ..GenerationArgs::default()
        };
        let generation = args.into_generation_config(&config).unwrap();

        assert_eq!(generation.docker_image.as_deref(), Some("flag/image"));
        assert_eq!(generation.namespace.as_deref(), Some("from-file"));
        assert_eq!(generation.service_name.as_deref(), Some("from-config"));
        assert_eq!(generation.effective_replica_count(), 4);
    }

    #[test]
    fn test_missing_parameter_file() {
        let args = GenerationArgs {
            from_file: Some(PathBuf::from("/nonexistent/params.yaml")),
            ..GenerationArgs::default()
        };
        let err = args.into_generation_config(&Config::default()).unwrap_err();
        assert!(matches!(err, Error::ReadParameters { .. }));
    }
}
