//! Standalone HTML page for a result.

use tera::{Context, Tera};

use super::ResultView;
use crate::error::{TopicLensError, TopicLensResult};

const RESULT_TEMPLATE: &str = include_str!("../templates/result.html");

/// Render all four views of a result into one HTML page.
pub fn render_html(view: &ResultView) -> TopicLensResult<String> {
    let context =
        Context::from_serialize(view).map_err(|e| TopicLensError::Template(e.to_string()))?;
    Tera::one_off(RESULT_TEMPLATE, &context, true)
        .map_err(|e| TopicLensError::Template(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::StoredResult;
    use serde_json::json;

    #[test]
    fn test_render_html_contains_all_views() {
        let stored = StoredResult::from_response(
            json!({
                "answer": "KEY IDEA\nUse **energy** <conservation>, ***always***.\n\n1. Draw it",
                "visualization": "https://example.com/v.png",
                "topic": "Physics",
                "units": ["Mechanics", "Energy", "Optics"]
            }),
            "How?",
        )
        .unwrap();
        let html = render_html(&ResultView::with_comprehension(&stored, 75)).unwrap();

        for id in ["answer", "visualization", "key-points", "insights"] {
            assert!(html.contains(&format!("id=\"{}\"", id)));
        }
        assert!(html.contains("<h3>KEY IDEA</h3>"));
        assert!(html.contains("<strong>energy</strong>"));
        assert!(html.contains("<strong><em>always</em></strong>"));
        assert!(html.contains("&lt;conservation&gt;"));
        assert!(html.contains("<li>Optics</li>"));
        assert!(html.contains("width: 75%"));
    }
}
