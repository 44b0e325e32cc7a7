use std::env;
use std::io::Read;

use anyhow::Result;
use tracing::debug;

/// RFC 3875 meta-variables shown when the environment listing is enabled.
pub const CGI_VARIABLES: &[&str] = &[
    "AUTH_TYPE",
    "CONTENT_LENGTH",
    "CONTENT_TYPE",
    "GATEWAY_INTERFACE",
    "PATH_INFO",
    "PATH_TRANSLATED",
    "QUERY_STRING",
    "REMOTE_ADDR",
    "REMOTE_HOST",
    "REMOTE_IDENT",
    "REMOTE_USER",
    "REQUEST_METHOD",
    "SCRIPT_NAME",
    "SERVER_NAME",
    "SERVER_PORT",
    "SERVER_PROTOCOL",
    "SERVER_SOFTWARE",
];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestContext {
    pub method: String,
    pub content_length: u64,
}

impl RequestContext {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Absent or unparseable values fall back to an empty method and a zero length.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let method = lookup("REQUEST_METHOD").unwrap_or_default();
        let content_length = lookup("CONTENT_LENGTH").map_or(0, |raw| {
            raw.trim().parse::<u64>().unwrap_or_else(|_| {
                debug!(value = %raw, "ignoring unparseable CONTENT_LENGTH");
                0
            })
        });
        Self {
            method,
            content_length,
        }
    }

    #[must_use]
    pub fn has_body(&self) -> bool {
        self.method == "POST" || self.method == "PUT"
    }

    /// Reads up to `content_length` bytes. A stream that ends early is not an error.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by `input`.
    pub fn read_body<R: Read>(&self, input: R) -> Result<Vec<u8>> {
        let mut body = Vec::new();
        if !self.has_body() {
            return Ok(body);
        }
        input.take(self.content_length).read_to_end(&mut body)?;
        if (body.len() as u64) < self.content_length {
            debug!(
                declared = self.content_length,
                received = body.len(),
                "request body shorter than CONTENT_LENGTH"
            );
        } else {
            debug!(bytes = body.len(), "read request body");
        }
        Ok(body)
    }

    /// Standard meta-variables that are set, followed by every `HTTP_*` header variable.
    #[must_use]
    pub fn cgi_variables<F, I>(lookup: F, all_keys: I) -> Vec<(String, String)>
    where
        F: Fn(&str) -> Option<String>,
        I: IntoIterator<Item = String>,
    {
        let mut vars: Vec<(String, String)> = CGI_VARIABLES
            .iter()
            .filter_map(|key| lookup(key).map(|value| ((*key).to_string(), value)))
            .collect();
        let mut headers: Vec<(String, String)> = all_keys
            .into_iter()
            .filter(|key| key.starts_with("HTTP_"))
            .filter_map(|key| lookup(&key).map(|value| (key, value)))
            .collect();
        headers.sort();
        vars.extend(headers);
        vars
    }

    #[must_use]
    pub fn cgi_variables_from_env() -> Vec<(String, String)> {
        Self::cgi_variables(
            |key| env::var(key).ok(),
            env::vars_os().filter_map(|(k, _)| k.into_string().ok()),
        )
    }
}
