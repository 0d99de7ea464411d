//! HTML for the upload form.

use photoshoot_core::ALLOWED_EXTENSIONS;

/// Render the upload page, with `error` shown above the form when present.
pub fn render_index(error: Option<&str>) -> String {
    let accept = ALLOWED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(",");

    let message = error
        .filter(|msg| !msg.is_empty())
        .map(|msg| format!(r#"<p class="error">{}</p>"#, escape_html(msg)))
        .unwrap_or_default();

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Photoshoot Organizer</title>
<style>
body {{ font-family: sans-serif; max-width: 40rem; margin: 3rem auto; }}
.error {{ color: #b00020; }}
</style>
</head>
<body>
<h1>Photoshoot Organizer</h1>
<p>Upload a schedule with Day, Group and Student columns to download an empty PHOTOSHOOT folder tree.</p>
{message}
<form action="/upload" method="post" enctype="multipart/form-data">
<input type="file" name="file" accept="{accept}">
<button type="submit">Create folders</button>
</form>
</body>
</html>
"#
    )
}

fn escape_html(text: &str) -> String {
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
    fn test_render_without_error() {
        let page = render_index(None);
        assert!(page.contains(r#"accept=".xlsx,.xls,.csv""#));
        assert!(!page.contains(r#"class="error""#));
    }

    #[test]
    fn test_render_escapes_error() {
        let page = render_index(Some(r#"Found: ["<b>Day</b>"]"#));
        assert!(page.contains("Found: [&quot;&lt;b&gt;Day&lt;/b&gt;&quot;]"));
    }
}
