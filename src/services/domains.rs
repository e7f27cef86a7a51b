//! Client for the external domain and SSL management API.
//!
//! The backend owns DNS verification and certificate issuance; this module
//! only shapes requests and decodes responses. Failed calls are returned to
//! the caller as errors and never retried.

use crate::models::AddDomainRequest;

/// HTTP method of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read
    Get,
    /// Create or trigger
    Post,
}

impl Method {
    /// Uppercase method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Every backend call this client makes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainEndpoint {
    /// `GET /api/websites/{website}/domains`
    ListDomains {
        /// Website id
        website_id: String,
    },
    /// `POST /api/websites/{website}/domains`
    AddDomain {
        /// Website id
        website_id: String,
    },
    /// `POST /api/websites/{website}/domains/{domain}/verify`
    VerifyDomain {
        /// Website id
        website_id: String,
        /// Domain record id
        domain_id: String,
    },
    /// `POST /api/websites/{website}/domains/{domain}/ssl`
    EnableSsl {
        /// Website id
        website_id: String,
        /// Domain record id
        domain_id: String,
    },
    /// `POST /api/websites/{website}/domains/{domain}/ssl/renew`
    RenewSsl {
        /// Website id
        website_id: String,
        /// Domain record id
        domain_id: String,
    },
    /// `GET /api/websites/{website}/domains/{domain}/dns-instructions`
    DnsInstructions {
        /// Website id
        website_id: String,
        /// Domain record id
        domain_id: String,
    },
    /// `GET /api/websites/{website}/ssl`
    SslCertificates {
        /// Website id
        website_id: String,
    },
}

impl DomainEndpoint {
    /// HTTP method for this endpoint.
    #[must_use]
    pub const fn method(&self) -> Method {
        match self {
            Self::ListDomains { .. } | Self::DnsInstructions { .. } | Self::SslCertificates { .. } => {
                Method::Get
            }
            Self::AddDomain { .. }
            | Self::VerifyDomain { .. }
            | Self::EnableSsl { .. }
            | Self::RenewSsl { .. } => Method::Post,
        }
    }

    /// Unencoded path segments below the API base URL.
    #[must_use]
    pub fn segments(&self) -> Vec<&str> {
        let mut segments = vec!["api", "websites"];
        match self {
            Self::ListDomains { website_id } | Self::AddDomain { website_id } => {
                segments.extend([website_id.as_str(), "domains"]);
            }
            Self::VerifyDomain {
                website_id,
                domain_id,
            } => segments.extend([website_id.as_str(), "domains", domain_id.as_str(), "verify"]),
            Self::EnableSsl {
                website_id,
                domain_id,
            } => segments.extend([website_id.as_str(), "domains", domain_id.as_str(), "ssl"]),
            Self::RenewSsl {
                website_id,
                domain_id,
            } => segments.extend([website_id.as_str(), "domains", domain_id.as_str(), "ssl", "renew"]),
            Self::DnsInstructions {
                website_id,
                domain_id,
            } => segments.extend([
                website_id.as_str(),
                "domains",
                domain_id.as_str(),
                "dns-instructions",
            ]),
            Self::SslCertificates { website_id } => {
                segments.extend([website_id.as_str(), "ssl"]);
            }
        }
        segments
    }

    /// Path with a leading slash, for logs and messages.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/{}", self.segments().join("/"))
    }
}

#[cfg(feature = "remote")]
pub use client::DomainClient;

#[cfg(feature = "remote")]
mod client {
    use anyhow::{bail, Context, Result};
    use reqwest::blocking::{Client, RequestBuilder};
    use reqwest::Url;
    use serde::de::DeserializeOwned;
    use std::time::Duration;
    use tracing::{debug, info};

    use super::{AddDomainRequest, DomainEndpoint, Method};
    use crate::models::{
        validate_domain_name, DnsInstructions, DomainConfiguration, SslCertificate,
    };

    const HTTP_TIMEOUT_SECS: u64 = 15;

    /// Blocking, bearer-authenticated client for the domain API.
    pub struct DomainClient {
        client: Client,
        base_url: Url,
        token: String,
    }

    impl DomainClient {
        /// Creates a client for the API rooted at `base_url`.
        pub fn new(base_url: &str, token: &str) -> Result<Self> {
            let base_url = Url::parse(base_url)
                .with_context(|| format!("Invalid API base URL '{base_url}'"))?;
            if !matches!(base_url.scheme(), "http" | "https") {
                bail!("API base URL must use http or https: {}", base_url);
            }
            if base_url.cannot_be_a_base() {
                bail!("API base URL cannot carry a path: {}", base_url);
            }
            if token.trim().is_empty() {
                bail!("API token is empty");
            }

            let client = Client::builder()
                .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
                .user_agent(concat!("sitecraft/", env!("CARGO_PKG_VERSION")))
                .build()
                .context("Failed to build HTTP client")?;

            Ok(Self {
                client,
                base_url,
                token: token.trim().to_string(),
            })
        }

        /// Full URL for an endpoint, with each segment percent-encoded.
        pub fn url(&self, endpoint: &DomainEndpoint) -> Result<Url> {
            let mut url = self.base_url.clone();
            url.path_segments_mut()
                .map_err(|()| anyhow::anyhow!("API base URL cannot carry a path"))?
                .pop_if_empty()
                .extend(endpoint.segments());
            Ok(url)
        }

        fn request(&self, endpoint: &DomainEndpoint) -> Result<RequestBuilder> {
            let url = self.url(endpoint)?;
            let builder = match endpoint.method() {
                Method::Get => self.client.get(url),
                Method::Post => self.client.post(url),
            };
            Ok(builder
                .bearer_auth(&self.token)
                .header("Accept", "application/json"))
        }

        fn send<T: DeserializeOwned>(
            &self,
            endpoint: &DomainEndpoint,
            builder: RequestBuilder,
        ) -> Result<T> {
            debug!("{} {}", endpoint.method().as_str(), endpoint.path());
            let response = builder
                .send()
                .with_context(|| format!("Request to {} failed", endpoint.path()))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().unwrap_or_default();
                bail!(
                    "Domain API returned {} for {} {}: {}",
                    status,
                    endpoint.method().as_str(),
                    endpoint.path(),
                    body.trim()
                );
            }

            response
                .json::<T>()
                .with_context(|| format!("Invalid response body from {}", endpoint.path()))
        }

        fn call<T: DeserializeOwned>(&self, endpoint: DomainEndpoint) -> Result<T> {
            let builder = self.request(&endpoint)?;
            self.send(&endpoint, builder)
        }

        /// Domains attached to a website.
        pub fn list_domains(&self, website_id: &str) -> Result<Vec<DomainConfiguration>> {
            self.call(DomainEndpoint::ListDomains {
                website_id: website_id.to_string(),
            })
        }

        /// Attaches a domain to a website.
        pub fn add_domain(
            &self,
            website_id: &str,
            request: &AddDomainRequest,
        ) -> Result<DomainConfiguration> {
            validate_domain_name(&request.domain)?;
            let endpoint = DomainEndpoint::AddDomain {
                website_id: website_id.to_string(),
            };
            let builder = self.request(&endpoint)?.json(request);
            let domain: DomainConfiguration = self.send(&endpoint, builder)?;
            info!("Added domain {} to website {}", domain.domain, website_id);
            Ok(domain)
        }

        /// Asks the backend to re-check the domain's DNS records.
        pub fn verify_domain(&self, website_id: &str, domain_id: &str) -> Result<DomainConfiguration> {
            self.call(DomainEndpoint::VerifyDomain {
                website_id: website_id.to_string(),
                domain_id: domain_id.to_string(),
            })
        }

        /// Requests certificate issuance for a verified domain.
        pub fn enable_ssl(&self, website_id: &str, domain_id: &str) -> Result<SslCertificate> {
            self.call(DomainEndpoint::EnableSsl {
                website_id: website_id.to_string(),
                domain_id: domain_id.to_string(),
            })
        }

        /// Requests early certificate renewal.
        pub fn renew_ssl(&self, website_id: &str, domain_id: &str) -> Result<SslCertificate> {
            self.call(DomainEndpoint::RenewSsl {
                website_id: website_id.to_string(),
                domain_id: domain_id.to_string(),
            })
        }

        /// DNS records the user has to create at their registrar.
        pub fn dns_instructions(&self, website_id: &str, domain_id: &str) -> Result<DnsInstructions> {
            self.call(DomainEndpoint::DnsInstructions {
                website_id: website_id.to_string(),
                domain_id: domain_id.to_string(),
            })
        }

        /// Certificates for every domain of a website.
        pub fn ssl_certificates(&self, website_id: &str) -> Result<Vec<SslCertificate>> {
            self.call(DomainEndpoint::SslCertificates {
                website_id: website_id.to_string(),
            })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_new_validates_inputs() {
            assert!(DomainClient::new("https://api.example.com", "tok").is_ok());
            assert!(DomainClient::new("ftp://api.example.com", "tok").is_err());
            assert!(DomainClient::new("not a url", "tok").is_err());
            assert!(DomainClient::new("https://api.example.com", "  ").is_err());
        }

        #[test]
        fn test_url_joins_and_encodes_segments() {
            let client = DomainClient::new("https://api.example.com/v1/", "tok").unwrap();
            let url = client
                .url(&DomainEndpoint::RenewSsl {
                    website_id: "site 1".into(),
                    domain_id: "dom-9".into(),
                })
                .unwrap();
            assert_eq!(
                url.as_str(),
                "https://api.example.com/v1/api/websites/site%201/domains/dom-9/ssl/renew"
            );
        }

        #[test]
        fn test_add_domain_rejects_invalid_name_before_sending() {
            let client = DomainClient::new("http://127.0.0.1:9", "tok").unwrap();
            let request = AddDomainRequest {
                domain: "not a domain".into(),
                is_primary: false,
            };
            let err = client.add_domain("site", &request).unwrap_err();
            assert!(err.to_string().to_lowercase().contains("domain"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        let site = || "site-1".to_string();
        let dom = || "dom-2".to_string();

        let cases = [
            (
                DomainEndpoint::ListDomains { website_id: site() },
                Method::Get,
                "/api/websites/site-1/domains",
            ),
            (
                DomainEndpoint::AddDomain { website_id: site() },
                Method::Post,
                "/api/websites/site-1/domains",
            ),
            (
                DomainEndpoint::VerifyDomain {
                    website_id: site(),
                    domain_id: dom(),
                },
                Method::Post,
                "/api/websites/site-1/domains/dom-2/verify",
            ),
            (
                DomainEndpoint::EnableSsl {
                    website_id: site(),
                    domain_id: dom(),
                },
                Method::Post,
                "/api/websites/site-1/domains/dom-2/ssl",
            ),
            (
                DomainEndpoint::RenewSsl {
                    website_id: site(),
                    domain_id: dom(),
                },
                Method::Post,
                "/api/websites/site-1/domains/dom-2/ssl/renew",
            ),
            (
                DomainEndpoint::DnsInstructions {
                    website_id: site(),
                    domain_id: dom(),
                },
                Method::Get,
                "/api/websites/site-1/domains/dom-2/dns-instructions",
            ),
            (
                DomainEndpoint::SslCertificates { website_id: site() },
                Method::Get,
                "/api/websites/site-1/ssl",
            ),
        ];

        for (endpoint, method, path) in cases {
            assert_eq!(endpoint.method(), method, "{path}");
            assert_eq!(endpoint.path(), path);
        }
    }
}
