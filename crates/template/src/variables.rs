use std::collections::BTreeMap;

use serde::Serialize;
use snafu::{OptionExt, ResultExt, ensure};

use crate::{
    config::{ResolvedConfig, non_blank},
    error::{self, Error},
    validation::IdentifierValidator,
};

/// The complete substitution context handed to the template engine.
pub type VariableMap = BTreeMap<String, serde_json::Value>;

pub mod keys {
    pub const DOCKER_IMAGE: &str = "docker_image";
    pub const NAME: &str = "name";
    pub const NAMESPACE: &str = "namespace";
    pub const CONTAINER_NAME: &str = "containerName";
    pub const LABELS: &str = "labels";
    pub const PORTS: &str = "ports";
    pub const ENVIRONMENT_VARIABLES: &str = "environmentVariables";
    pub const IMAGE_PULL_POLICY: &str = "imagePullPolicy";
    pub const REPLICA_COUNT: &str = "replicaCount";
    pub const REPLICATION_CONTROLLER_NAME: &str = "replicationControllerName";
    pub const SERVICE_NAME: &str = "serviceName";
    pub const SERVICE_PORT: &str = "servicePort";
    pub const SERVICE_CONTAINER_PORT: &str = "serviceContainerPort";
}

/// Builds the variable map for `config`.
///
/// User supplied template variables take precedence for `docker_image`,
/// `name`, `namespace` and `containerName` only. Every other generated key
/// replaces a template variable of the same name.
///
/// # Errors
///
/// Fails when no docker image is available, when a name is rejected by
/// `validator`, or when the service and replication controller share a name.
pub fn build(
    config: &ResolvedConfig,
    validator: &dyn IdentifierValidator,
) -> Result<VariableMap, Error> {
    let mut variables = config.template_variables.clone();

    if let Some(docker_image) = non_blank(config.docker_image.as_deref()) {
        insert_if_absent(&mut variables, keys::DOCKER_IMAGE, docker_image);
    }
    let _docker_image = variables
        .get(keys::DOCKER_IMAGE)
        .filter(|image| !image.is_null())
        .context(error::NoDockerImageSnafu { variable: keys::DOCKER_IMAGE })?;

    insert_if_absent(&mut variables, keys::NAME, config.name.as_deref());
    insert_if_absent(&mut variables, keys::NAMESPACE, config.namespace.as_str());
    insert_if_absent(&mut variables, keys::CONTAINER_NAME, config.container_name.as_deref());

    set(&mut variables, keys::LABELS, &config.labels)?;
    set(&mut variables, keys::PORTS, &config.ports)?;
    set(&mut variables, keys::ENVIRONMENT_VARIABLES, &config.environment_variables)?;
    set(&mut variables, keys::IMAGE_PULL_POLICY, &config.image_pull_policy)?;
    set(&mut variables, keys::REPLICA_COUNT, &config.replica_count)?;

    let replication_controller_name = validator.validate(
        keys::REPLICATION_CONTROLLER_NAME,
        config.replication_controller_name.as_deref(),
    )?;
    set(&mut variables, keys::REPLICATION_CONTROLLER_NAME, &replication_controller_name)?;

    let service_name = match non_blank(config.service_name.as_deref()) {
        Some(service_name) => validator.validate(keys::SERVICE_NAME, Some(service_name))?,
        None => None,
    };
    if let (Some(service_name), Some(replication_controller_name)) =
        (&service_name, &replication_controller_name)
    {
        ensure!(
            service_name != replication_controller_name,
            error::NameCollisionSnafu { name: service_name }
        );
    }
    set(&mut variables, keys::SERVICE_NAME, &service_name)?;
    set(&mut variables, keys::SERVICE_PORT, &config.service_port)?;
    set(&mut variables, keys::SERVICE_CONTAINER_PORT, &config.service_container_port)?;

    Ok(variables)
}

fn insert_if_absent(
    variables: &mut VariableMap,
    key: &str,
    value: impl Into<serde_json::Value>,
) {
    if variables.contains_key(key) {
        tracing::debug!("Keeping user supplied template variable `{key}`");
    } else {
        let _previous = variables.insert(key.to_string(), value.into());
    }
}

fn set<T>(variables: &mut VariableMap, key: &'static str, value: &T) -> Result<(), Error>
where
    T: Serialize + ?Sized,
{
    let value = serde_json::to_value(value).context(error::SerializeVariableSnafu { key })?;
    if let Some(previous) = variables.insert(key.to_string(), value) {
        tracing::warn!("Template variable `{key}` is generated, ignoring supplied value {previous}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use k8s_openapi::api::core::v1::ContainerPort;
    use serde_json::json;

    use super::*;
    use crate::{GenerationConfig, validation::Dns1123Validator};

    fn build_for(config: &GenerationConfig) -> Result<VariableMap, Error> {
        build(&config.resolve(), &Dns1123Validator)
    }

    #[test]
    fn test_cheese_defaults() {
        let config = GenerationConfig::new().with_name("cheese").with_docker_image("fabric8/cheese");
        let variables = build_for(&config).unwrap();

        assert_eq!(variables[keys::DOCKER_IMAGE], json!("fabric8/cheese"));
        assert_eq!(variables[keys::NAME], json!("cheese"));
        assert_eq!(variables[keys::NAMESPACE], json!("default"));
        assert_eq!(variables[keys::CONTAINER_NAME], json!("cheese"));
        assert_eq!(variables[keys::REPLICA_COUNT], json!(1));
        assert_eq!(variables[keys::LABELS], json!({}));
        assert_eq!(variables[keys::PORTS], json!([]));
        assert_eq!(variables[keys::ENVIRONMENT_VARIABLES], json!([]));
        assert_eq!(variables[keys::IMAGE_PULL_POLICY], json!(null));
        assert_eq!(variables[keys::SERVICE_NAME], json!(null));
        assert_eq!(variables[keys::REPLICATION_CONTROLLER_NAME], json!(null));
    }

    #[test]
    fn test_missing_docker_image() {
        let config = GenerationConfig::new().with_name("cheese").with_docker_image("  ");
        let err = build_for(&config).unwrap_err();
        assert!(matches!(err, Error::NoDockerImage { .. }));
    }

    #[test]
    fn test_docker_image_from_template_variables() {
        let config = GenerationConfig::new()
            .with_docker_image("fabric8/cheese")
            .with_template_variable(keys::DOCKER_IMAGE, "custom/image:2");
        let variables = build_for(&config).unwrap();
        assert_eq!(variables[keys::DOCKER_IMAGE], json!("custom/image:2"));

        let config =
            GenerationConfig::new().with_template_variable(keys::DOCKER_IMAGE, "custom/image:3");
        assert!(build_for(&config).is_ok());
    }

    #[test]
    fn test_user_variables_win_for_identity_keys_only() {
        let config = GenerationConfig::new()
            .with_name("cheese")
            .with_namespace("prod")
            .with_docker_image("fabric8/cheese")
            .with_replica_count(3)
            .with_template_variable(keys::NAME, "custom-name")
            .with_template_variable(keys::NAMESPACE, "custom-ns")
            .with_template_variable(keys::CONTAINER_NAME, "custom-container")
            .with_template_variable(keys::REPLICA_COUNT, 7)
            .with_template_variable(keys::LABELS, json!({"a": "b"}))
            .with_template_variable("extra", json!({"nested": [1, 2]}));
        let variables = build_for(&config).unwrap();

        assert_eq!(variables[keys::NAME], json!("custom-name"));
        assert_eq!(variables[keys::NAMESPACE], json!("custom-ns"));
        assert_eq!(variables[keys::CONTAINER_NAME], json!("custom-container"));
        assert_eq!(variables[keys::REPLICA_COUNT], json!(3));
        assert_eq!(variables[keys::LABELS], json!({}));
        assert_eq!(variables["extra"], json!({"nested": [1, 2]}));
    }

    #[test]
    fn test_ports_and_environment_are_structured() {
        let config = GenerationConfig::new()
            .with_docker_image("fabric8/cheese")
            .with_port(ContainerPort {
                name: Some("http".to_string()),
                container_port: 8080,
                ..ContainerPort::default()
            })
            .with_environment_variable("MODE", "prod")
            .with_label("app", "cheese");
        let variables = build_for(&config).unwrap();

        assert_eq!(variables[keys::PORTS], json!([{"name": "http", "containerPort": 8080}]));
        assert_eq!(
            variables[keys::ENVIRONMENT_VARIABLES],
            json!([{"name": "MODE", "value": "prod"}])
        );
        assert_eq!(variables[keys::LABELS], json!({"app": "cheese"}));
    }

    #[test]
    fn test_name_collision() {
        let config = GenerationConfig::new()
            .with_docker_image("fabric8/cheese")
            .with_service_name("foo")
            .with_replication_controller_name("foo");
        let err = build_for(&config).unwrap_err();
        assert!(matches!(err, Error::NameCollision { ref name } if name == "foo"));
    }

    #[test]
    fn test_distinct_names_are_kept() {
        let config = GenerationConfig::new()
            .with_docker_image("fabric8/cheese")
            .with_service_name("cheese-service")
            .with_replication_controller_name("cheese-controller")
            .with_service_port(80)
            .with_service_container_port(8080);
        let variables = build_for(&config).unwrap();

        assert_eq!(variables[keys::SERVICE_NAME], json!("cheese-service"));
        assert_eq!(variables[keys::REPLICATION_CONTROLLER_NAME], json!("cheese-controller"));
        assert_eq!(variables[keys::SERVICE_PORT], json!(80));
        assert_eq!(variables[keys::SERVICE_CONTAINER_PORT], json!(8080));
    }

    #[test]
    fn test_invalid_names_are_rejected() {
        let config = GenerationConfig::new()
            .with_docker_image("fabric8/cheese")
            .with_replication_controller_name("Cheese");
        let err = build_for(&config).unwrap_err();
        assert!(err.to_string().contains(keys::REPLICATION_CONTROLLER_NAME));

        let config = GenerationConfig::new()
            .with_docker_image("fabric8/cheese")
            .with_service_name("cheese_service");
        let err = build_for(&config).unwrap_err();
        assert!(err.to_string().contains(keys::SERVICE_NAME));
    }

    #[test]
    fn test_blank_service_name_is_not_validated() {
        let config = GenerationConfig::new()
            .with_docker_image("fabric8/cheese")
            .with_service_name(" ")
            .with_replication_controller_name("cheese");
        let variables = build_for(&config).unwrap();
        assert_eq!(variables[keys::SERVICE_NAME], json!(null));
    }
}
