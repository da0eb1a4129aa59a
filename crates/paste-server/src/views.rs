//! HTML pages. Paste content is always escaped before it lands in markup.

use paste_types::Address;

const STYLE: &str = "body { font-family: Arial, sans-serif; max-width: 800px; margin: 50px auto; padding: 20px; }
        textarea { width: 100%; height: 300px; font-family: monospace; }
        button { background: #007bff; color: white; padding: 10px 20px; border: none; cursor: pointer; }
        button:hover { background: #0056b3; }
        a { color: #007bff; text-decoration: none; }
        a:hover { text-decoration: underline; }
        .url-info { margin: 10px 0; }
        .paste-content { background: #f8f9fa; border: 1px solid #dee2e6; padding: 15px; white-space: pre-wrap; font-family: monospace; overflow-x: auto; }";

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>{title}</title>
    <style>
        {STYLE}
    </style>
</head>
<body>
{body}
</body>
</html>
"#
    )
}

pub fn home() -> String {
    page(
        "Pastebin Lite",
        r#"    <h1>Pastebin Lite</h1>
    <form action="/paste" method="POST">
        <textarea name="content" placeholder="Paste your content here..." required></textarea><br><br>
        <button type="submit">Create Paste</button>
    </form>"#,
    )
}

pub fn created(addr: &Address) -> String {
    let (id, short) = (addr.id, addr.short_id);
    page(
        "Paste Created",
        &format!(
            r#"    <div class="url-info">Full URL: <a href="/paste/{id}">{id}</a></div>
    <div class="url-info">Short URL: <a href="/s/{short}">{short}</a></div>"#
        ),
    )
}

pub fn paste(addr: &Address, content: &str) -> String {
    let id = addr.id;
    page(
        &format!("Paste {id}"),
        &format!(
            r#"    <h1>Paste {id}</h1>
    <div class="paste-content">{}</div>
    <p><a href="/raw/{id}">Raw</a> · <a href="/">← Create new paste</a></p>"#,
            escape_html(content)
        ),
    )
}

pub fn not_found() -> String {
    page(
        "Paste Not Found",
        r#"    <h1>Paste Not Found</h1>
    <p>The paste you're looking for doesn't exist.</p>
    <p><a href="/">← Go back home</a></p>"#,
    )
}
