use comfy_table::{Cell, ContentArrangement};
use kubegen_template::{EmbeddedSource, TemplateSource};

/// Renders template sources in lookup order.
pub trait SourceListExt {
    fn render_table(&self) -> String;
}

impl SourceListExt for [Box<dyn TemplateSource>] {
    fn render_table(&self) -> String {
        let builtin = EmbeddedSource.name();
        let rows = self
            .iter()
            .enumerate()
            .map(|(index, source)| {
                let name = source.name();
                let templates = if name == builtin {
                    EmbeddedSource::identifiers().collect::<Vec<_>>().join("\n")
                } else {
                    "*".to_string()
                };
                [Cell::new(index + 1), Cell::new(name), Cell::new(templates)]
            })
            .collect::<Vec<_>>();

        comfy_table::Table::new()
            .load_preset(comfy_table::presets::NOTHING)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["ORDER", "SOURCE", "TEMPLATES"])
            .add_rows(rows)
            .to_string()
    }
}
