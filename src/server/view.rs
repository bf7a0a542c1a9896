//! HTML rendering for `GET /ui`.
//!
//! Works on the untyped JSON value so placeholders, failure envelopes and
//! documents written by older versions all render.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde_json::Value;

const STYLE: &str = r#"
body { font-family: Arial, sans-serif; line-height: 1.6; margin: 0; padding: 20px; color: #333; }
h1 { color: #2c3e50; border-bottom: 2px solid #eee; padding-bottom: 10px; }
.container { max-width: 1200px; margin: 0 auto; }
.info-box { background-color: #f8f9fa; border-left: 4px solid #17a2b8; padding: 15px; margin-bottom: 20px; border-radius: 0 4px 4px 0; }
.error-box { background-color: #fff3f3; border-left: 4px solid #dc3545; padding: 15px; margin-bottom: 20px; border-radius: 0 4px 4px 0; }
pre { background: #f8f9fa; padding: 15px; border-radius: 4px; overflow-x: auto; }
code { font-family: 'Courier New', Courier, monospace; }
.btn { background: #3498db; color: white; padding: 10px 15px; border-radius: 4px; text-decoration: none; display: inline-block; margin-top: 20px; }
.btn:hover { background: #2980b9; }
"#;

/// Text of a JSON value for display; strings unquoted, null as empty.
fn text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn non_empty<'a>(value: Option<&'a Value>) -> Option<&'a Value> {
    value.filter(|v| match v {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    })
}

fn field(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(
        out,
        "<p><strong>{}:</strong> {}</p>",
        label,
        encode_text(value)
    );
}

fn render_placeholder(out: &mut String, artifact: &Value) {
    out.push_str("<div class=\"error-box\">\n");
    let _ = writeln!(
        out,
        "<h3>Error: {}</h3>",
        encode_text(&text(artifact.get("error")))
    );
    let _ = writeln!(out, "<p>{}</p>", encode_text(&text(artifact.get("message"))));
    field(out, "Timestamp", &text(artifact.get("timestamp")));
    out.push_str("</div>\n");
}

fn render_failure(out: &mut String, artifact: &Value, error: &Value) {
    out.push_str("<div class=\"error-box\">\n");
    let _ = writeln!(
        out,
        "<h3>Error: {}</h3>",
        encode_text(&text(error.get("message")))
    );
    field(out, "Source URL", &text(artifact.get("source_url")));
    field(out, "Scraped at", &text(artifact.get("scraped_at")));
    if let Some(stack) = non_empty(error.get("stack")) {
        let _ = writeln!(out, "<pre><code>{}</code></pre>", encode_text(&text(Some(stack))));
    }
    out.push_str("</div>\n");
}

fn render_document(out: &mut String, artifact: &Value) {
    out.push_str("<div class=\"info-box\">\n");
    field(out, "Source URL", &text(artifact.get("source_url")));
    field(out, "Scraped at", &text(artifact.get("scraped_at")));
    out.push_str("</div>\n");

    let Some(data) = artifact.get("data").filter(|d| d.is_object()) else {
        return;
    };

    out.push_str("<h2>Page Information</h2>\n");
    field(out, "Title", &text(data.get("title")));
    field(out, "URL", &text(data.get("url")));

    if let Some(heading) = non_empty(data.get("heading")) {
        field(out, "Main Heading", &text(Some(heading)));
    }
    if let Some(description) = non_empty(data.get("metaDescription")) {
        field(out, "Meta Description", &text(Some(description)));
    }

    if let Some(Value::Array(paragraphs)) = non_empty(data.get("paragraphs")) {
        out.push_str("<h2>Paragraphs</h2>\n<ul>\n");
        for paragraph in paragraphs {
            let _ = writeln!(out, "<li>{}</li>", encode_text(&text(Some(paragraph))));
        }
        out.push_str("</ul>\n");
    }

    if let Some(Value::Array(links)) = non_empty(data.get("links")) {
        out.push_str("<h2>Links</h2>\n<ul>\n");
        for link in links {
            let href = text(link.get("href"));
            let label = match text(link.get("text")) {
                t if t.is_empty() => href.clone(),
                t => t,
            };
            let _ = writeln!(
                out,
                "<li><a href=\"{}\" target=\"_blank\">{}</a></li>",
                encode_double_quoted_attribute(&href),
                encode_text(&label)
            );
        }
        out.push_str("</ul>\n");
    }
}

/// Render the viewer page for whatever `GET /` would return.
pub fn render_page(artifact: &Value) -> String {
    let mut out = String::with_capacity(4096);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"UTF-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    out.push_str("<title>Scraped Data Viewer</title>\n");
    let _ = writeln!(out, "<style>{}</style>", STYLE);
    out.push_str("</head>\n<body>\n<div class=\"container\">\n");
    out.push_str("<h1>Scraped Data Viewer</h1>\n");

    match artifact.get("error") {
        Some(error @ Value::Object(_)) => render_failure(&mut out, artifact, error),
        Some(error) if !error.is_null() => render_placeholder(&mut out, artifact),
        _ => render_document(&mut out, artifact),
    }

    let raw = serde_json::to_string_pretty(artifact).unwrap_or_default();
    out.push_str("<h2>Raw JSON Data</h2>\n");
    let _ = writeln!(out, "<pre><code>{}</code></pre>", encode_text(&raw));
    out.push_str("<a href=\"/\" class=\"btn\">View Raw JSON</a>\n");
    out.push_str("</div>\n</body>\n</html>\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn success() -> Value {
        json!({
            "source_url": "https://example.com",
            "scraped_at": "2026-01-05T10:00:01Z",
            "data": {
                "title": "Example Domain",
                "url": "https://example.com/",
                "heading": "Example Domain",
                "metaDescription": null,
                "links": [
                    {"text": "More information...", "href": "https://www.iana.org/domains/example"},
                    {"text": "", "href": "https://example.com/bare"}
                ],
                "paragraphs": ["This domain is for use in illustrative examples."],
                "timestamp": "2026-01-05T10:00:00Z"
            }
        })
    }

    #[test]
    fn test_renders_document_sections() {
        let html = render_page(&success());

        assert!(html.contains("class=\"info-box\""));
        assert!(!html.contains("class=\"error-box\""));
        assert!(html.contains("<strong>Main Heading:</strong> Example Domain"));
        assert!(!html.contains("Meta Description"));
        assert!(html.contains("<li>This domain is for use in illustrative examples.</li>"));
        assert!(html.contains(">More information...</a>"));
        assert!(html.contains("<a href=\"/\" class=\"btn\">"));
    }

    #[test]
    fn test_link_without_text_shows_href() {
        let html = render_page(&success());
        assert!(html.contains(">https://example.com/bare</a>"));
    }

    #[test]
    fn test_failure_envelope_renders_error_box() {
        let artifact = json!({
            "source_url": "https://unreachable.invalid",
            "scraped_at": "2026-01-05T10:00:00Z",
            "error": {
                "message": "Navigation to https://unreachable.invalid failed: net::ERR_NAME_NOT_RESOLVED",
                "stack": "NavigationError: ..."
            }
        });
        let html = render_page(&artifact);

        assert!(html.contains("class=\"error-box\""));
        assert!(html.contains("net::ERR_NAME_NOT_RESOLVED"));
        assert!(html.contains("https://unreachable.invalid"));
        assert!(!html.contains("Page Information"));
    }

    #[test]
    fn test_placeholder_renders_error_box() {
        let artifact = json!({
            "error": "No scraped data available",
            "message": "Run the scraper first",
            "timestamp": "2026-01-05T10:00:00Z"
        });
        let html = render_page(&artifact);

        assert!(html.contains("<h3>Error: No scraped data available</h3>"));
        assert!(html.contains("<p>Run the scraper first</p>"));
    }

    #[test]
    fn test_values_are_escaped() {
        let mut artifact = success();
        artifact["data"]["title"] = json!("<script>alert(1)</script>");
        artifact["data"]["links"] = json!([{"text": "x", "href": "\"><img src=x>"}]);
        let html = render_page(&artifact);

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("\"><img src=x>"));
    }
}
