//! HTML generation utilities for testing.

use scraper::Html;

/// Builder for Envoy-like pages: a single table of label/value rows followed
/// by status marker elements.
#[derive(Debug, Default)]
pub struct EnvoyPageBuilder {
    rows: Vec<(String, String)>,
    statuses: Vec<(String, String)>,
}

impl EnvoyPageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `<tr><td>label</td><td>value</td></tr>` row.
    pub fn add_row(mut self, label: &str, value: &str) -> Self {
        self.rows.push((label.to_string(), value.to_string()));
        self
    }

    /// Adds a `<div class="{class}">` marker with the given text.
    pub fn add_status(mut self, class: &str, text: &str) -> Self {
        self.statuses.push((class.to_string(), text.to_string()));
        self
    }

    pub fn build(self) -> String {
        let mut html = String::from("<html><body>");

        if !self.rows.is_empty() {
            html.push_str("<table>");
            for (label, value) in &self.rows {
                html.push_str(&format!("<tr><td>{}</td><td>{}</td></tr>", label, value));
            }
            html.push_str("</table>");
        }

        for (class, text) in &self.statuses {
            html.push_str(&format!(r#"<div class="{}">{}</div>"#, class, text));
        }

        html.push_str("</body></html>");
        html
    }
}

/// Creates a standard HTML document wrapper for test content.
pub fn create_html_document(content: &str) -> Html {
    Html::parse_document(&format!(r#"<html><body>{}</body></html>"#, content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_renders_rows_then_statuses() {
        let html = EnvoyPageBuilder::new()
            .add_row("Today", "5 kWh")
            .add_status("good", "Web")
            .build();

        assert!(html.contains("<tr><td>Today</td><td>5 kWh</td></tr>"));
        assert!(html.contains(r#"<div class="good">Web</div>"#));
        assert!(html.find("<table>") < html.find(r#"class="good""#));
    }

    #[test]
    fn test_builder_without_rows_has_no_table() {
        let html = EnvoyPageBuilder::new().add_status("bad", "Web").build();
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_create_html_document() {
        let html = create_html_document("<div>Test</div>");
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Test"));
    }
}
