//! Server-rendered HTML pages.
//!
//! Every value interpolated into markup goes through [`escape_html`], post content
//! included: content is stored as submitted and is never trusted as markup.

use std::collections::HashMap;
use std::fmt::Write;

use folio_core::domain::{Category, Page, Post};

use crate::handlers::mapping::image_url;

/// Escape text for use in HTML element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
</head>
<body>
    <div class="container">
{body}
    </div>
</body>
</html>
"#,
        title = escape_html(title),
        body = body,
    )
}

/// The post index: a table of posts, newest first, with pagination links.
pub fn render_post_index(page: &Page<Post>, categories: &[Category]) -> String {
    let names: HashMap<i64, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    let mut body = String::from("        <h3>Explore My Posts</h3>\n");

    if page.items.is_empty() {
        body.push_str("        <div class=\"alert\" role=\"alert\">There are no posts yet!</div>\n");
    } else {
        body.push_str(
            "        <table>\n            <thead><tr><th>Image</th><th>Title</th><th>Content</th><th>Category</th><th>Actions</th></tr></thead>\n            <tbody>\n",
        );
        for post in &page.items {
            let category = post
                .category_id
                .and_then(|id| names.get(&id).copied())
                .unwrap_or("");
            let _ = writeln!(
                body,
                "                <tr><td><img src=\"{src}\" alt=\"{title}\" style=\"width: 100px\"></td><td>{title}</td><td>{content}</td><td>{category}</td><td><form method=\"post\" action=\"/posts/{id}/delete\" onsubmit=\"return confirm('Are you sure you want to delete this post ?');\"><a href=\"/posts/{id}\">SHOW</a> <a href=\"/posts/{id}/edit\">EDIT</a> <button type=\"submit\">DELETE</button></form></td></tr>",
                src = escape_html(&image_url(&post.image)),
                title = escape_html(&post.title),
                content = escape_html(&post.content),
                category = escape_html(category),
                id = post.id,
            );
        }
        body.push_str("            </tbody>\n        </table>\n");
    }

    if page.total_pages() > 1 {
        body.push_str("        <nav>");
        if page.has_previous() {
            let _ = write!(body, "<a href=\"/posts?page={}\">&laquo; Previous</a> ", page.page - 1);
        }
        let _ = write!(body, "Page {} of {}", page.page, page.total_pages());
        if page.has_next() {
            let _ = write!(body, " <a href=\"/posts?page={}\">Next &raquo;</a>", page.page + 1);
        }
        body.push_str("</nav>\n");
    }

    layout("Data Post", &body)
}

/// The detail page for one post.
pub fn render_post_detail(post: &Post, category: Option<&Category>) -> String {
    let body = format!(
        "        <img src=\"{src}\" alt=\"{title}\" style=\"width: 100%\">\n        <h4>{title}</h4>\n        <p class=\"category\">{category}</p>\n        <div class=\"content\">{content}</div>\n        <a href=\"/posts\">Back</a>\n",
        src = escape_html(&image_url(&post.image)),
        title = escape_html(&post.title),
        category = escape_html(category.map(|c| c.name.as_str()).unwrap_or("")),
        content = escape_html(&post.content),
    );
    layout(&post.title, &body)
}

/// The edit form for one post. `error` is shown above the form after a rejected submit.
pub fn render_post_edit(post: &Post, categories: &[Category], error: Option<&str>) -> String {
    let mut body = String::from("        <h3>Edit Post</h3>\n");

    if let Some(error) = error {
        let _ = writeln!(
            body,
            "        <div class=\"alert\" role=\"alert\">{}</div>",
            escape_html(error)
        );
    }

    let _ = writeln!(
        body,
        "        <img src=\"{src}\" alt=\"{title}\" style=\"width: 200px\">\n        <form method=\"post\" action=\"/posts/{id}\">\n            <label>Title <input type=\"text\" name=\"title\" value=\"{title}\"></label>\n            <label>Content <textarea name=\"content\" rows=\"5\">{content}</textarea></label>\n            <label>Category <select name=\"category_id\">\n                <option value=\"\">-</option>",
        src = escape_html(&image_url(&post.image)),
        title = escape_html(&post.title),
        content = escape_html(&post.content),
        id = post.id,
    );
    for category in categories {
        let selected = if post.category_id == Some(category.id) {
            " selected"
        } else {
            ""
        };
        let _ = writeln!(
            body,
            "                <option value=\"{}\"{}>{}</option>",
            category.id,
            selected,
            escape_html(&category.name)
        );
    }
    body.push_str(
        "            </select></label>\n            <button type=\"submit\">UPDATE</button>\n        </form>\n        <a href=\"/posts\">Back</a>\n",
    );

    layout("Edit Post", &body)
}
