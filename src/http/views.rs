//! Server-rendered views for the restaurant form entry point.
//!
//! Two views only: the query form and the results table, plus an error page
//! sharing their layout. Rendered as inline HTML; no templating engine is
//! involved.

use crate::db::Restaurant;

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page_layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n\
         <body>\n<h1>{}</h1>\n{}\n</body>\n</html>\n",
        escape(title),
        escape(title),
        body
    )
}

/// The query form: page, perPage, and an optional borough filter.
pub fn render_form() -> String {
    page_layout(
        "Search Restaurants",
        "<form method=\"post\" action=\"/api/restaurantForm\">\n\
         <label>Page: <input type=\"text\" name=\"page\" value=\"1\"></label><br>\n\
         <label>Per page: <input type=\"text\" name=\"perPage\" value=\"10\"></label><br>\n\
         <label>Borough (optional): <input type=\"text\" name=\"borough\"></label><br>\n\
         <button type=\"submit\">Search</button>\n\
         </form>",
    )
}

/// The results table for one page of records.
pub fn render_results(
    page: u64,
    per_page: u64,
    borough: Option<&str>,
    restaurants: &[Restaurant],
) -> String {
    let mut body = format!(
        "<p>Page {} ({} per page){}</p>\n<table border=\"1\">\n\
         <tr><th>Name</th><th>Borough</th><th>Cuisine</th><th>Id</th></tr>\n",
        page,
        per_page,
        match borough {
            Some(b) => format!(", borough: {}", escape(b)),
            None => String::new(),
        }
    );
    for r in restaurants {
        let cuisine = r
            .extra
            .get("cuisine")
            .and_then(|v| v.as_str())
            .unwrap_or("");
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(r.name.as_deref().unwrap_or("")),
            escape(r.borough.as_deref().unwrap_or("")),
            escape(cuisine),
            r.id.map(|id| id.to_hex()).unwrap_or_default(),
        ));
    }
    body.push_str("</table>\n<p><a href=\"/api/restaurantForm\">New search</a></p>");
    page_layout("Restaurants", &body)
}

/// Error page with an optional detail line.
pub fn render_error(message: &str, details: &[String]) -> String {
    let mut body = format!("<p>{}</p>\n", escape(message));
    if !details.is_empty() {
        body.push_str("<ul>\n");
        for d in details {
            body.push_str(&format!("<li>{}</li>\n", escape(d)));
        }
        body.push_str("</ul>\n");
    }
    body.push_str("<p><a href=\"/api/restaurantForm\">Back to search</a></p>");
    page_layout("Error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn form_posts_back_to_itself() {
        let html = render_form();
        assert!(html.contains("action=\"/api/restaurantForm\""));
        assert!(html.contains("name=\"perPage\""));
    }

    #[test]
    fn results_escape_record_fields() {
        let mut fields = serde_json::Map::new();
        fields.insert("name".to_string(), json!("<script>alert(1)</script>"));
        let r = Restaurant::from_fields(fields);
        let html = render_results(1, 10, Some("Queens"), &[r]);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Queens"));
    }

    #[test]
    fn error_page_lists_details() {
        let html = render_error("Validation error", &["Page must be a number".to_string()]);
        assert!(html.contains("Validation error"));
        assert!(html.contains("<li>Page must be a number</li>"));
    }
}
