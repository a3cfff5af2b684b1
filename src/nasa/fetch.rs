//! One-shot key failover for NASA open-data requests.

use ureq::{Error, Response};

/// Build a URL with the primary key and issue the request once. A
/// success response is returned unconditionally — the body is not
/// inspected here. On a non-success status the URL is rebuilt with the
/// backup key and issued exactly once more, and that second response is
/// returned whatever its status; callers inspect it themselves. A
/// transport-level failure on the first attempt propagates without a
/// retry. Two attempts maximum, no backoff.
///
/// Generic over the send function so tests can count calls and record
/// the URLs that were built.
pub fn fetch_with_key_failover<F>(
    mut send: F,
    build_url: impl Fn(&str) -> String,
    primary_key: &str,
    backup_key: &str,
) -> Result<Response, Error>
where
    F: FnMut(&str) -> Result<Response, Error>,
{
    match send(&build_url(primary_key)) {
        Ok(response) => Ok(response),
        Err(Error::Status(_, _)) => match send(&build_url(backup_key)) {
            Err(Error::Status(_, response)) => Ok(response),
            other => other,
        },
        Err(transport) => Err(transport),
    }
}

/// The live transport used outside of tests.
pub fn send_http(url: &str) -> Result<Response, Error> {
    ureq::get(url).call()
}
