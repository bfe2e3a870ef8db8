//! Job target resolution.
//!
//! Turns a job title (`host` or `host:port`) into the pair of URLs the
//! probe sequence hits: the plain-HTTP target (declared port or 80) and
//! the HTTPS target (declared port or 443).

use url::Url;

use crate::error_handling::JobError;

/// The resolved probe targets for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobTarget {
    host: String,
    insecure: Url,
    secure: Url,
}

impl JobTarget {
    /// Parses a job title into probe targets.
    ///
    /// Accepts a bare hostname, `host:port`, and bracketed IPv6 literals.
    /// Anything else — an empty title, an embedded scheme, a path, userinfo
    /// — is a contract violation and fails with [`JobError`]; this is the
    /// only failure a probe job can surface.
    pub fn parse(title: &str) -> Result<Self, JobError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(JobError::EmptyTitle);
        }
        if trimmed.contains("://") || trimmed.contains('/') || trimmed.contains(char::is_whitespace)
        {
            return Err(JobError::InvalidTitle(title.to_string()));
        }

        // A declared port must survive scheme-default normalization: the
        // URL parser elides ":80" from an http URL, but "host:80" still
        // means the HTTPS probe goes to port 80, not 443.
        let declared_port = declared_port(trimmed);

        // Lean on the URL parser for host syntax, including IPv6 brackets.
        let mut insecure = Url::parse(&format!("http://{trimmed}/"))
            .map_err(|_| JobError::InvalidTitle(title.to_string()))?;

        let host = match insecure.host_str() {
            Some(host) => host.to_string(),
            None => return Err(JobError::InvalidTitle(title.to_string())),
        };
        if insecure.path() != "/"
            || insecure.query().is_some()
            || insecure.fragment().is_some()
            || !insecure.username().is_empty()
        {
            return Err(JobError::InvalidTitle(title.to_string()));
        }

        let mut secure = insecure.clone();
        if secure.set_scheme("https").is_err() {
            return Err(JobError::InvalidTitle(title.to_string()));
        }
        if let Some(port) = declared_port {
            if insecure.set_port(Some(port)).is_err() || secure.set_port(Some(port)).is_err() {
                return Err(JobError::InvalidTitle(title.to_string()));
            }
        }

        Ok(JobTarget {
            host,
            insecure,
            secure,
        })
    }

    /// The bare hostname, without port.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The plain-HTTP probe URL (declared port, or 80 when unspecified).
    pub fn insecure_url(&self) -> Url {
        self.insecure.clone()
    }

    /// The HTTPS probe URL (declared port, or 443 when unspecified).
    pub fn secure_url(&self) -> Url {
        self.secure.clone()
    }
}

/// Extracts an explicitly declared port from a `host[:port]` title.
///
/// Returns `None` for bare hosts and bracketed IPv6 literals without a
/// port. Out-of-range digit runs return `None` here and are rejected by
/// the URL parse in [`JobTarget::parse`].
fn declared_port(title: &str) -> Option<u16> {
    let (head, tail) = title.rsplit_once(':')?;
    if head.is_empty() || tail.is_empty() || !tail.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    tail.parse().ok()
}
