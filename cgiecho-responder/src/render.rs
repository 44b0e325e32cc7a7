use std::fmt::Write;

use anyhow::Result;

use crate::{
    config::PageConfig,
    helpers::{body_text, html_escape},
    request::RequestContext,
};

/// CGI header section: the content type followed by the terminating blank line.
pub const HEADERS: &str = "Content-Type: text/html\n\n";

/// Builds the echo document. The body section only appears for a non-empty
/// body and the environment section only when `variables` is given.
///
/// # Errors
///
/// Only fails if formatting into the output string fails.
pub fn render_page(
    page: &PageConfig,
    ctx: &RequestContext,
    body: &[u8],
    variables: Option<&[(String, String)]>,
) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(
        out,
        "<html><head><title>{}</title></head>",
        html_escape(&page.title)
    )?;
    writeln!(out, "<body>")?;
    writeln!(out, "<h1>{}</h1>", html_escape(&page.heading))?;
    writeln!(out, "<p>REQUEST_METHOD = {}</p>", html_escape(&ctx.method))?;

    if !body.is_empty() {
        writeln!(out, "<h3>Body</h3>")?;
        writeln!(out, "<pre>{}</pre>", html_escape(&body_text(body)))?;
    }

    if let Some(variables) = variables {
        writeln!(out, "<h3>Environment</h3>")?;
        writeln!(out, "<ul>")?;
        for (key, value) in variables {
            writeln!(out, "<li>{} = {}</li>", html_escape(key), html_escape(value))?;
        }
        writeln!(out, "</ul>")?;
    }

    writeln!(out, "</body></html>")?;
    Ok(out)
}
