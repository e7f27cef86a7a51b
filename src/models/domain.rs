//! Custom domain and SSL certificate records mirrored from the hosting API.
//!
//! These types carry no invariants beyond what the backend returns; they
//! exist so the client and CLI can work with typed values.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Certificates expiring within this many days are due for renewal.
pub const RENEWAL_WINDOW_DAYS: i64 = 30;

/// Verification state of a custom domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainStatus {
    /// Added, DNS not yet checked
    Pending,
    /// DNS check in progress
    Verifying,
    /// Verified and serving traffic
    Active,
    /// Verification failed
    Failed,
}

/// Lifecycle state of an SSL certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SslStatus {
    /// Requested, not yet issued
    Pending,
    /// Issued but not yet deployed
    Issued,
    /// Deployed and serving
    Active,
    /// Past its expiry date
    Expired,
    /// Issuance failed
    Failed,
}

/// An SSL certificate attached to a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SslCertificate {
    /// Certificate identifier
    pub id: String,
    /// Domain the certificate covers
    pub domain: String,
    /// Current state
    pub status: SslStatus,
    /// Issuing authority (e.g., "Let's Encrypt")
    #[serde(default)]
    pub issuer: String,
    /// Issue timestamp
    #[serde(default)]
    pub issued_at: Option<DateTime<Utc>>,
    /// Expiry timestamp
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether the backend renews automatically
    #[serde(default)]
    pub auto_renew: bool,
}

impl SslCertificate {
    /// Whole days until expiry; negative once expired, `None` if unknown.
    #[must_use]
    pub fn days_until_expiry(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expires_at.map(|expires| (expires - now).num_days())
    }

    /// True when the certificate expires within [`RENEWAL_WINDOW_DAYS`] or already has.
    #[must_use]
    pub fn needs_renewal(&self, now: DateTime<Utc>) -> bool {
        if self.status == SslStatus::Expired {
            return true;
        }
        self.expires_at
            .is_some_and(|expires| expires - now <= Duration::days(RENEWAL_WINDOW_DAYS))
    }
}

/// A custom domain connected to a website.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainConfiguration {
    /// Domain identifier
    pub id: String,
    /// Owning website
    pub website_id: String,
    /// Fully qualified hostname
    pub domain: String,
    /// Verification state
    pub status: DomainStatus,
    /// Whether this is the website's primary domain
    #[serde(default)]
    pub is_primary: bool,
    /// Verification timestamp
    #[serde(default)]
    pub verified_at: Option<DateTime<Utc>>,
    /// Attached certificate, if any
    #[serde(default)]
    pub ssl: Option<SslCertificate>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A DNS record the user must create at their registrar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Record type (A, CNAME, TXT)
    #[serde(rename = "type")]
    pub record_type: String,
    /// Host name
    pub name: String,
    /// Record value
    pub value: String,
    /// Time to live in seconds
    #[serde(default)]
    pub ttl: Option<u32>,
}

/// Registrar instructions for pointing a domain at the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsInstructions {
    /// Domain the instructions apply to
    pub domain: String,
    /// Records to create
    pub records: Vec<DnsRecord>,
    /// Free-form guidance from the backend
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of `POST /api/websites/{id}/domains`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDomainRequest {
    /// Hostname to connect
    pub domain: String,
    /// Make it the primary domain
    pub is_primary: bool,
}

/// Validates hostname syntax before it is sent to the backend.
///
/// Requires at least two labels, each 1-63 characters of ASCII letters,
/// digits or hyphens, not starting or ending with a hyphen, and a
/// non-numeric top-level label.
///
/// # Examples
///
/// ```
/// use sitecraft::models::validate_domain_name;
///
/// assert!(validate_domain_name("shop.example.com").is_ok());
/// assert!(validate_domain_name("localhost").is_err());
/// ```
pub fn validate_domain_name(domain: &str) -> Result<()> {
    let domain = domain.trim().trim_end_matches('.');

    if domain.is_empty() {
        anyhow::bail!("Domain cannot be empty");
    }

    if domain.len() > 253 {
        anyhow::bail!("Domain '{domain}' exceeds 253 characters");
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        anyhow::bail!("Domain '{domain}' must include a top-level domain (e.g., example.com)");
    }

    for label in &labels {
        if label.is_empty() || label.len() > 63 {
            anyhow::bail!("Domain '{domain}' has a label that is empty or longer than 63 characters");
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            anyhow::bail!("Domain '{domain}' contains invalid characters in '{label}'");
        }
        if label.starts_with('-') || label.ends_with('-') {
            anyhow::bail!("Domain label '{label}' cannot start or end with a hyphen");
        }
    }

    if labels
        .last()
        .is_some_and(|tld| tld.chars().all(|c| c.is_ascii_digit()))
    {
        anyhow::bail!("Domain '{domain}' has a numeric top-level domain");
    }

    Ok(())
}
