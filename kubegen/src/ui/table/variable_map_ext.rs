use comfy_table::{Cell, ContentArrangement};
use kubegen_template::VariableMap;

/// Renders a resolved variable map, one variable per row.
pub trait VariableMapExt {
    /// Values are shown as compact JSON so that `null`, numbers and strings
    /// stay distinguishable.
    fn render_table(&self) -> String;
}

impl VariableMapExt for VariableMap {
    fn render_table(&self) -> String {
        let rows = self
            .iter()
            .map(|(key, value)| [Cell::new(key), Cell::new(value.to_string())])
            .collect::<Vec<_>>();

        comfy_table::Table::new()
            .load_preset(comfy_table::presets::NOTHING)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["VARIABLE", "VALUE"])
            .add_rows(rows)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_render_table() {
        let variables = VariableMap::from([
            ("name".to_string(), json!("cheese")),
            ("replicaCount".to_string(), json!(1)),
            ("serviceName".to_string(), json!(null)),
        ]);
        let table = variables.render_table();

        assert!(table.contains("VARIABLE"));
        assert!(table.contains("\"cheese\""));
        assert!(table.contains("replicaCount"));
        assert!(table.contains("null"));
    }
}
