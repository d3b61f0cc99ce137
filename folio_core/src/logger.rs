//! Console logging policy.
//!
//! Informational output (initialization, submissions) is only wanted while
//! developing; on a deployed host the console stays quiet except for
//! warnings and errors. The host crate turns a [`LogPolicy`] into a
//! `tracing` subscriber.

use tracing::Level;

/// Which events reach the developer console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogPolicy {
    pub max_level: Level,
}

impl LogPolicy {
    /// Policy for a page served from `hostname`.
    ///
    /// ```rust
    /// use folio_core::logger::LogPolicy;
    /// use tracing::Level;
    ///
    /// let hosts = vec!["localhost".to_string()];
    /// assert_eq!(LogPolicy::for_host("localhost", &hosts).max_level, Level::INFO);
    /// assert_eq!(LogPolicy::for_host("ana.design", &hosts).max_level, Level::WARN);
    /// ```
    pub fn for_host(hostname: &str, development_hosts: &[String]) -> Self {
        let max_level = if is_development_host(hostname, development_hosts) {
            Level::INFO
        } else {
            Level::WARN
        };
        LogPolicy { max_level }
    }

    pub fn allows(&self, level: Level) -> bool {
        level <= self.max_level
    }
}

/// Local machines: any configured host, plus `*.local` mDNS names.
pub fn is_development_host(hostname: &str, development_hosts: &[String]) -> bool {
    let host = hostname.trim().trim_start_matches('[').trim_end_matches(']');
    development_hosts.iter().any(|h| h.eq_ignore_ascii_case(host)) || host.ends_with(".local")
}
