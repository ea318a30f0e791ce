//! HTML rendering for the search page.

use axum::http::StatusCode;

use crate::models::MovieCard;

const BOOTSTRAP_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";

/// Everything the search page shows
#[derive(Debug, Default)]
pub struct PageContext<'a> {
    pub query: &'a str,
    pub message: Option<&'a str>,
    pub movies: &'a [MovieCard],
}

/// Escapes text for use in element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <link rel="stylesheet" href="{css}">
</head>
<body class="bg-dark text-light">
<main class="container py-5">
{body}
</main>
</body>
</html>
"#,
        title = escape_html(title),
        css = BOOTSTRAP_CSS,
        body = body,
    )
}

fn movie_card(movie: &MovieCard) -> String {
    let title = escape_html(&movie.title);
    format!(
        r#"    <div class="col">
      <div class="card h-100 bg-secondary text-light border-0">
        <img src="{poster}" class="card-img-top" alt="{title}">
        <div class="card-body">
          <h5 class="card-title">{title}</h5>
        </div>
      </div>
    </div>
"#,
        poster = escape_html(&movie.poster_url),
        title = title,
    )
}

/// Renders the search form, the optional message and the results grid
pub fn index_page(ctx: &PageContext<'_>) -> String {
    let mut body = format!(
        r#"<h1 class="mb-4">Movie Matcher</h1>
<form method="post" action="/" class="mb-4">
  <div class="input-group">
    <input type="text" name="query" class="form-control" placeholder="Describe a movie you feel like watching" value="{query}">
    <button type="submit" class="btn btn-primary">Search</button>
  </div>
</form>
"#,
        query = escape_html(ctx.query),
    );

    if let Some(message) = ctx.message {
        body.push_str(&format!(
            "<div class=\"alert alert-warning\" role=\"alert\">{}</div>\n",
            escape_html(message)
        ));
    }

    if !ctx.movies.is_empty() {
        body.push_str("<div class=\"row row-cols-2 row-cols-md-5 g-4\">\n");
        for movie in ctx.movies {
            body.push_str(&movie_card(movie));
        }
        body.push_str("</div>\n");
    }

    layout("Movie Matcher", &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<h1 class=\"mb-3\">{}</h1>\n<p>{}</p>\n<a href=\"/\" class=\"btn btn-primary\">Back to search</a>\n",
        escape_html(&status.to_string()),
        escape_html(message)
    );
    layout("Error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#x27;y&#x27;&lt;/script&gt;"
        );
        assert_eq!(escape_html("Lion's Heart"), "Lion&#x27;s Heart");
    }

    #[test]
    fn test_index_page_empty() {
        let page = index_page(&PageContext::default());
        assert!(page.contains("<form method=\"post\""));
        assert!(page.contains("value=\"\""));
        assert!(!page.contains("alert-warning"));
        assert!(!page.contains("card-img-top"));
    }

    #[test]
    fn test_index_page_with_results() {
        let movies = vec![
            MovieCard::new("The Matrix", "https://img.example/matrix.jpg"),
            MovieCard::new("Thomas & Friends", "/static/content/default.png"),
        ];
        let page = index_page(&PageContext {
            query: "robots \"in\" space",
            message: Some("heads up"),
            movies: &movies,
        });

        assert!(page.contains("value=\"robots &quot;in&quot; space\""));
        assert!(page.contains("heads up"));
        assert!(page.contains("src=\"https://img.example/matrix.jpg\""));
        assert!(page.contains("Thomas &amp; Friends"));
        assert_eq!(page.matches("card-img-top").count(), 2);
    }

    #[test]
    fn test_error_page() {
        let page = error_page(StatusCode::NOT_FOUND, "No page at /<x>");
        assert!(page.contains("404 Not Found"));
        assert!(page.contains("No page at /&lt;x&gt;"));
    }
}
