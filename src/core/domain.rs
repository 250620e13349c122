//! Normalization and validation of user-entered site strings.
//!
//! Raw input like `HTTPS://WWW.Example.COM/page` is reduced to the bare
//! domain `example.com` before it is allowed anywhere near the blocklist.
//! Rules are later compiled per domain, so only syntactically valid domains
//! (or `localhost`) may be stored.

use crate::config;

/// Reduce a raw user-entered site string to a normalized domain.
///
/// Lowercases, strips the scheme, any path, and a leading `www.`, then
/// validates the remainder. Returns `None` when no valid domain is left.
pub fn normalize_domain(raw: &str) -> Option<String> {
    let mut host = raw.trim().to_ascii_lowercase();
    if host.is_empty() {
        return None;
    }

    if let Some(idx) = host.find("://") {
        host.drain(..idx + 3);
    } else if host.starts_with("//") {
        host.drain(..2);
    }

    if let Some(idx) = host.find('/') {
        host.truncate(idx);
    }

    if let Some(stripped) = host.strip_prefix("www.") {
        host = stripped.to_string();
    }

    if is_valid_domain(&host) {
        Some(host)
    } else {
        None
    }
}

/// Whether `host` is a syntactically valid domain.
///
/// Valid means dot-separated labels of 1-63 alphanumeric/hyphen characters
/// (hyphen not first or last), with an alphabetic final label of at least
/// two characters, or the literal `localhost`.
pub fn is_valid_domain(host: &str) -> bool {
    if host == "localhost" {
        return true;
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    if !labels.iter().all(|label| is_valid_label(label)) {
        return false;
    }

    let tld = labels[labels.len() - 1];
    tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > config::MAX_DOMAIN_LABEL_LEN {
        return false;
    }
    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }
    label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
