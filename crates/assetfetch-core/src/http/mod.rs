//! Single-stream HTTP GET.
//!
//! One blocking libcurl easy handle per request. The body is streamed into
//! any `io::Write` sink; nothing is buffered in memory beyond curl's own
//! receive buffer. Call from a blocking worker when used from async code.

mod error;

pub use error::HttpError;

use std::io::Write;
use std::str;
use std::time::Duration;

/// Browser-like identifier; some asset hosts reject default client strings.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/103.0.0.0 Safari/537.36";

/// Per-request transfer settings.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub user_agent: String,
    pub connect_timeout: Duration,
    /// Upper bound on the whole transfer, body included.
    pub timeout: Duration,
    /// Abort if throughput stays below `low_speed_limit` bytes/s for `low_speed_time`.
    pub low_speed_limit: u32,
    pub low_speed_time: Duration,
    pub max_redirections: u32,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout: Duration::from_secs(30),
            timeout: Duration::from_secs(600),
            low_speed_limit: 1024,
            low_speed_time: Duration::from_secs(60),
            max_redirections: 10,
        }
    }
}

/// GETs `url` and writes the body to `sink`. Returns the number of body bytes written.
///
/// Follows redirects. Any status outside 2xx is an error and no body bytes
/// are written for it.
pub fn download_to<W: Write>(url: &str, opts: &HttpOptions, sink: &mut W) -> Result<u64, HttpError> {
    let mut written: u64 = 0;
    let mut write_err: Option<std::io::Error> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.useragent(&opts.user_agent)?;
    easy.follow_location(true)?;
    easy.max_redirections(opts.max_redirections)?;
    easy.fail_on_error(true)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;
    easy.low_speed_limit(opts.low_speed_limit)?;
    easy.low_speed_time(opts.low_speed_time)?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(line) = str::from_utf8(data) {
                let line = line.trim_end();
                if line.starts_with("HTTP/") {
                    tracing::trace!(url, status_line = line, "response");
                }
            }
            true
        })?;
        transfer.write_function(|data| match sink.write_all(data) {
            Ok(()) => {
                written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                write_err = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };

    if let Some(e) = write_err {
        return Err(HttpError::Write(e));
    }
    if let Err(e) = performed {
        if e.is_http_returned_error() {
            let code = easy.response_code()?;
            return Err(HttpError::Status(code));
        }
        return Err(HttpError::Curl(e));
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(HttpError::Status(code));
    }
    sink.flush().map_err(HttpError::Write)?;
    Ok(written)
}
