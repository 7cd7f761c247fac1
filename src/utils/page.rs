/// Minimal HTML document builder for the dashboard page
pub struct Page {
    title: String,
    styles: Vec<String>,
    sections: Vec<String>,
}

impl Page {
    /// Create a new page with the given document title
    pub fn new(title: &str) -> Self {
        Page {
            title: title.to_string(),
            styles: Vec::new(),
            sections: Vec::new(),
        }
    }

    /// Add a CSS rule block to the document head
    pub fn style(mut self, css: &str) -> Self {
        self.styles.push(css.to_string());
        self
    }

    /// Append already rendered markup to the body
    pub fn section(mut self, html: String) -> Self {
        self.sections.push(html);
        self
    }

    /// Render the full document
    pub fn render(&self) -> String {
        let mut output = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        output.push_str("<meta charset=\"utf-8\">\n");
        output.push_str(&format!("<title>{}</title>\n", escape_html(&self.title)));

        if !self.styles.is_empty() {
            output.push_str("<style>\n");
            for css in &self.styles {
                output.push_str(css);
                output.push('\n');
            }
            output.push_str("</style>\n");
        }

        output.push_str("</head>\n<body>\n");
        for section in &self.sections {
            output.push_str(section);
            output.push('\n');
        }
        output.push_str("</body>\n</html>\n");
        output
    }
}

/// Escape text for use in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_page() {
        let page = Page::new("Prices <2022>")
            .style("body { margin: 0; }")
            .section("<h1>Header</h1>".to_string())
            .section("<p>Body</p>".to_string());

        let rendered = page.render();
        assert!(rendered.contains("<title>Prices &lt;2022&gt;</title>"));
        assert!(rendered.contains("body { margin: 0; }"));
        assert!(rendered.find("<h1>").unwrap() < rendered.find("<p>").unwrap());
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a&b \"c\" <d>"), "a&amp;b &quot;c&quot; &lt;d&gt;");
    }
}
