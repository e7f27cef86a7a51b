//! Custom domain and SSL commands against the hosting backend.

use crate::cli::common::{load_config, print_json, CliError, CliResult};
use crate::config::ApiConfig;
use crate::constants::API_TOKEN_ENV;
use crate::models::{AddDomainRequest, DomainConfiguration, SslCertificate};
use crate::services::DomainClient;
use chrono::Utc;
use clap::{Args, Subcommand};

/// Manage custom domains and certificates
#[derive(Debug, Clone, Args)]
pub struct DomainArgs {
    /// Override the configured API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Domain subcommand
    #[command(subcommand)]
    pub command: DomainCommand,
}

/// Domain subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum DomainCommand {
    /// List a website's domains
    List(WebsiteArgs),
    /// Attach a domain to a website
    Add(AddArgs),
    /// Re-check DNS for a domain
    Verify(DomainIdArgs),
    /// Request a certificate
    EnableSsl(DomainIdArgs),
    /// Renew a certificate
    RenewSsl(DomainIdArgs),
    /// Show the DNS records to create
    Dns(DomainIdArgs),
    /// List a website's certificates
    Certs(WebsiteArgs),
}

/// Commands addressing a website
#[derive(Debug, Clone, Args)]
pub struct WebsiteArgs {
    /// Website id
    #[arg(value_name = "WEBSITE_ID")]
    pub website_id: String,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Commands addressing one domain of a website
#[derive(Debug, Clone, Args)]
pub struct DomainIdArgs {
    /// Website id
    #[arg(value_name = "WEBSITE_ID")]
    pub website_id: String,

    /// Domain record id
    #[arg(value_name = "DOMAIN_ID")]
    pub domain_id: String,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Attach a domain
#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Website id
    #[arg(value_name = "WEBSITE_ID")]
    pub website_id: String,

    /// Domain name, e.g. shop.example.com
    #[arg(value_name = "DOMAIN")]
    pub domain: String,

    /// Make this the primary domain
    #[arg(long)]
    pub primary: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

impl DomainArgs {
    fn client(&self) -> CliResult<DomainClient> {
        let base_url = self
            .api_url
            .clone()
            .or_else(|| load_config().api.base_url)
            .ok_or_else(|| {
                CliError::validation(
                    "No API base URL configured; use --api-url or `sitecraft config set --api-url`",
                )
            })?;
        let token = ApiConfig::token()
            .ok_or_else(|| CliError::validation(format!("{API_TOKEN_ENV} is not set")))?;

        DomainClient::new(&base_url, &token).map_err(|e| CliError::validation(format!("{e:#}")))
    }

    /// Execute the domain command
    pub fn execute(&self) -> CliResult<()> {
        // Validate locally before building a client so bad input never needs the network
        if let DomainCommand::Add(args) = &self.command {
            crate::models::validate_domain_name(&args.domain)
                .map_err(|e| CliError::validation(format!("{e:#}")))?;
        }

        let client = self.client()?;
        let network = |e: anyhow::Error| CliError::network(format!("{e:#}"));

        match &self.command {
            DomainCommand::List(args) => {
                let domains = client.list_domains(&args.website_id).map_err(network)?;
                print_domains(&domains, args.json)
            }
            DomainCommand::Add(args) => {
                let request = AddDomainRequest {
                    domain: args.domain.trim().to_lowercase(),
                    is_primary: args.primary,
                };
                let domain = client
                    .add_domain(&args.website_id, &request)
                    .map_err(network)?;
                print_domains(std::slice::from_ref(&domain), args.json)
            }
            DomainCommand::Verify(args) => {
                let domain = client
                    .verify_domain(&args.website_id, &args.domain_id)
                    .map_err(network)?;
                print_domains(std::slice::from_ref(&domain), args.json)
            }
            DomainCommand::EnableSsl(args) => {
                let cert = client
                    .enable_ssl(&args.website_id, &args.domain_id)
                    .map_err(network)?;
                print_certificates(std::slice::from_ref(&cert), args.json)
            }
            DomainCommand::RenewSsl(args) => {
                let cert = client
                    .renew_ssl(&args.website_id, &args.domain_id)
                    .map_err(network)?;
                print_certificates(std::slice::from_ref(&cert), args.json)
            }
            DomainCommand::Dns(args) => {
                let instructions = client
                    .dns_instructions(&args.website_id, &args.domain_id)
                    .map_err(network)?;
                if args.json {
                    return print_json(&instructions);
                }
                println!("DNS records for {}:\n", instructions.domain);
                for record in &instructions.records {
                    println!("  {:<6} {:<30} {}", record.record_type, record.name, record.value);
                }
                if let Some(notes) = &instructions.notes {
                    println!("\n{notes}");
                }
                Ok(())
            }
            DomainCommand::Certs(args) => {
                let certs = client.ssl_certificates(&args.website_id).map_err(network)?;
                print_certificates(&certs, args.json)
            }
        }
    }
}

fn print_domains(domains: &[DomainConfiguration], json: bool) -> CliResult<()> {
    if json {
        return print_json(domains);
    }
    if domains.is_empty() {
        println!("No domains.");
    }
    for domain in domains {
        println!(
            "  {}{} ({}) - {:?}",
            domain.domain,
            if domain.is_primary { " [primary]" } else { "" },
            domain.id,
            domain.status
        );
    }
    Ok(())
}

fn print_certificates(certs: &[SslCertificate], json: bool) -> CliResult<()> {
    if json {
        return print_json(certs);
    }
    if certs.is_empty() {
        println!("No certificates.");
    }
    let now = Utc::now();
    for cert in certs {
        let expiry = cert
            .days_until_expiry(now)
            .map_or_else(|| "no expiry date".to_string(), |d| format!("expires in {d} days"));
        let renew = if cert.needs_renewal(now) {
            " - renewal due"
        } else {
            ""
        };
        println!(
            "  {} ({}) - {:?}, {}{}",
            cert.domain, cert.issuer, cert.status, expiry, renew
        );
    }
    Ok(())
}
