//! Catalog page renderer
//!
//! Produces the single HTML page served at `/`: a table of stored books, a
//! title search box whose results can be added to the catalog, and delete
//! buttons. The page talks to `/search`, `/books/add` and `/books/delete`
//! with `fetch`.

use crate::db::Book;
use std::fmt::Write;

const STYLE: &str = r#"
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background-color: #1a1a1a;
            color: #e0e0e0;
            line-height: 1.6;
            padding: 20px;
        }
        h1 { color: #4a9eff; font-size: 26px; }
        table { border-collapse: collapse; width: 100%; margin-bottom: 30px; }
        th, td { border-bottom: 1px solid #3a3a3a; padding: 6px 10px; text-align: left; }
        th { background-color: #2a2a2a; }
        button { background-color: #4a9eff; color: #fff; border: none; padding: 4px 10px; cursor: pointer; }
        input { padding: 4px; width: 320px; }
        .subtitle { color: #888; }
"#;

const SCRIPT: &str = r#"
        async function post(url, params) {
            const response = await fetch(url, {
                method: 'POST',
                headers: { 'Content-Type': 'application/x-www-form-urlencoded' },
                body: new URLSearchParams(params),
            });
            if (!response.ok) {
                const body = await response.json().catch(() => null);
                throw new Error(body && body.error ? body.error.message : response.statusText);
            }
            return response;
        }

        function cell(row, text) {
            const td = document.createElement('td');
            td.textContent = text;
            row.appendChild(td);
            return td;
        }

        function deleteButton(pk) {
            const button = document.createElement('button');
            button.textContent = 'Delete';
            button.onclick = async () => {
                try {
                    await post('/books/delete', { pk });
                    document.getElementById('book-' + pk).remove();
                } catch (err) {
                    alert(err.message);
                }
            };
            return button;
        }

        function appendBook(book) {
            const row = document.createElement('tr');
            row.id = 'book-' + book.pk;
            cell(row, book.title);
            cell(row, book.author);
            cell(row, book.classification);
            cell(row, '').appendChild(deleteButton(book.pk));
            document.getElementById('books').appendChild(row);
        }

        async function addBook(id) {
            try {
                const response = await post('/books/add', { id });
                appendBook(await response.json());
            } catch (err) {
                alert(err.message);
            }
        }

        async function search(event) {
            event.preventDefault();
            const query = document.getElementById('search').value;
            const results = document.getElementById('results');
            results.replaceChildren();
            try {
                const response = await post('/search', { search: query });
                for (const work of await response.json()) {
                    const row = document.createElement('tr');
                    cell(row, work.title);
                    cell(row, work.author);
                    cell(row, work.year);
                    const add = document.createElement('button');
                    add.textContent = 'Add';
                    add.onclick = () => addBook(work.id);
                    cell(row, '').appendChild(add);
                    results.appendChild(row);
                }
            } catch (err) {
                alert(err.message);
            }
        }

        document.querySelectorAll('button[data-pk]').forEach((button) => {
            button.replaceWith(deleteButton(button.dataset.pk));
        });
"#;

/// Escape text for use in HTML element content and quoted attributes
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

/// Render the catalog page
///
/// `name` is an optional greeting shown under the heading.
pub fn render_catalog(books: &[Book], name: Option<&str>) -> Result<String, std::fmt::Error> {
    let mut html = String::new();

    write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Classify Catalog</title>
    <style>{STYLE}</style>
</head>
<body>
    <h1>Classify Catalog</h1>
"#
    )?;

    if let Some(name) = name.filter(|n| !n.is_empty()) {
        writeln!(html, r#"    <p class="subtitle">Hello, {}!</p>"#, escape_html(name))?;
    }

    html.push_str(
        r#"    <table>
        <thead><tr><th>Title</th><th>Author</th><th>Classification</th><th></th></tr></thead>
        <tbody id="books">
"#,
    );

    for book in books {
        writeln!(
            html,
            r#"            <tr id="book-{pk}"><td>{title}</td><td>{author}</td><td>{classification}</td><td><button data-pk="{pk}">Delete</button></td></tr>"#,
            pk = book.pk,
            title = escape_html(&book.title),
            author = escape_html(&book.author),
            classification = escape_html(&book.classification),
        )?;
    }

    write!(
        html,
        r#"        </tbody>
    </table>

    <form onsubmit="search(event)">
        <input id="search" name="search" placeholder="Search titles">
        <button type="submit">Search</button>
    </form>
    <table>
        <thead><tr><th>Title</th><th>Author</th><th>Year</th><th></th></tr></thead>
        <tbody id="results"></tbody>
    </table>

    <script>{SCRIPT}</script>
</body>
</html>
"#
    )?;

    Ok(html)
}
