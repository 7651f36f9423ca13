pub mod k8s {
    /// Longest name accepted for a DNS-1123 label.
    pub const MAX_NAME_LENGTH: usize = 63;
}

pub mod template {
    /// Identifier of the template used when none is configured.
    pub const DEFAULT_TEMPLATE: &str = "kubegen/templates/default.json.j2";

    pub const DEFAULT_NAMESPACE: &str = "default";

    pub const DEFAULT_REPLICA_COUNT: i32 = 1;

    pub const DEFAULT_OUTPUT_FILE: &str = "kubernetes.json";
}
