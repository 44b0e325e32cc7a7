use crate::{
    config::PageConfig,
    render::{HEADERS, render_page},
    request::RequestContext,
};
use anyhow::Result;
use std::io::{Read, Write};
use tracing::info;

/// Reads the request body from `input` and writes the full CGI response to `output`.
///
/// # Errors
///
/// Returns I/O errors from reading `input` or writing `output`. Nothing is
/// written when the body read fails.
pub fn respond<R: Read, W: Write>(
    page: &PageConfig,
    ctx: &RequestContext,
    variables: Option<&[(String, String)]>,
    input: R,
    mut output: W,
) -> Result<()> {
    info!(
        method = %ctx.method,
        content_length = ctx.content_length,
        "echoing CGI request"
    );
    let body = ctx.read_body(input)?;
    let document = render_page(page, ctx, &body, variables)?;

    output.write_all(HEADERS.as_bytes())?;
    output.write_all(document.as_bytes())?;
    output.flush()?;
    Ok(())
}
