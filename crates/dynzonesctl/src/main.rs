// # dynzonesctl - Dynamic Zones command line
//
// Thin front end over dynzones-core and dynzones-client. Offline commands
// (check, normalize, strip, nsupdate with an explicit server) need no
// configuration; the rest talk to the API configured below.
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// - `DYNZONES_API_BASE_URL`: Base URL of the Dynamic Zones API
// - `DYNZONES_SELF_SERVICE_BASE_URL`: Base URL of the policy API (optional)
// - `DYNZONES_OIDC_ISSUER_URL`: OpenID Connect issuer (optional)
// - `DYNZONES_OIDC_CLIENT_ID`: OpenID Connect client ID (optional)
// - `DYNZONES_ACCESS_TOKEN`: Bearer token for API calls (optional)
// - `DYNZONES_LOG_LEVEL`: trace, debug, info, warn or error (default: warn)
//
// ## Example
//
// ```bash
// dynzonesctl check zone-pattern '%u.users.example.com'
// dynzonesctl normalize www. --zone example.com
//
// export DYNZONES_API_BASE_URL=https://dns.example.com/
// export DYNZONES_ACCESS_TOKEN=your_token
// dynzonesctl records --zone alice.users.example.com --key-name alice --secret c2VjcmV0
// ```

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use dynzones_client::{HttpDynDnsApi, HttpPolicyApi};
use dynzones_core::commands::{self, HELM_REPO_ADD_COMMAND, TOKEN_PLACEHOLDER};
use dynzones_core::models::{DnsRecord, ServerConfig, TsigKey, filter_rules, preferred_token};
use dynzones_core::validation::{check_dns_name, check_user_filter, check_zone_pattern};
use dynzones_core::{
    AppConfig, DynDnsApi, NameError, OidcConfig, PolicyService, RecordService, Session,
    SessionUser, normalize_record_name, strip_zone,
};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, debug, error};
use tracing_subscriber::FmtSubscriber;
use url::Url;

/// Exit codes
///
/// - 0: Success (or the checked value is valid)
/// - 1: Configuration error or the checked value is invalid
/// - 2: Runtime error (API or I/O failure)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CtlExitCode {
    Success = 0,
    Failure = 1,
    RuntimeError = 2,
}

impl From<CtlExitCode> for ExitCode {
    fn from(code: CtlExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Parser)]
#[command(
    name = "dynzonesctl",
    version,
    about = "Validate names, generate update commands and inspect Dynamic Zones"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check the syntax of a zone pattern, DNS name or user filter
    Check {
        #[command(subcommand)]
        target: CheckTarget,
    },
    /// Convert a record name to the form sent to the API
    Normalize {
        name: String,
        #[arg(long)]
        zone: String,
    },
    /// Convert a fully qualified record name to its zone-relative form
    Strip {
        name: String,
        #[arg(long)]
        zone: String,
    },
    /// Print an nsupdate script replacing one record
    Nsupdate(NsupdateArgs),
    /// Print the commands installing external-dns for a zone
    ExternalDns {
        #[arg(long)]
        zone: String,
        /// API token to embed; the preferred token of the account otherwise
        #[arg(long, env = "DYNZONES_EXTERNAL_DNS_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
    /// Print a curl command listing the zones of a token
    Curl {
        #[arg(long)]
        token: Option<String>,
    },
    /// List zones and their status
    Zones,
    /// List the records of a zone
    Records {
        #[arg(long)]
        zone: String,
        #[command(flatten)]
        key: KeyArgs,
    },
    /// List API tokens (without their values)
    Tokens,
    /// List policy rules
    Rules {
        /// Case-insensitive filter over pattern, SOA, user filter and description
        #[arg(long, default_value = "")]
        search: String,
    },
}

#[derive(Subcommand)]
enum CheckTarget {
    /// Zone pattern, may contain the %u placeholder
    ZonePattern { value: String },
    /// Plain DNS name such as a zone SOA
    DnsName { value: String },
    /// User filter (`*@domain` or `user@domain`)
    UserFilter { value: String },
}

#[derive(Args)]
struct KeyArgs {
    /// TSIG key name
    #[arg(long)]
    key_name: String,
    /// TSIG algorithm
    #[arg(long, default_value = "hmac-sha256")]
    algorithm: String,
    /// TSIG secret (base64)
    #[arg(long, env = "DYNZONES_TSIG_SECRET", hide_env_values = true)]
    secret: String,
}

impl KeyArgs {
    fn tsig_key(&self) -> TsigKey {
        TsigKey {
            keyname: self.key_name.clone(),
            algorithm: self.algorithm.clone(),
            key: self.secret.clone(),
        }
    }
}

#[derive(Args)]
struct NsupdateArgs {
    #[arg(long)]
    zone: String,
    /// Record name relative to the zone
    #[arg(long)]
    name: String,
    #[arg(long = "type", default_value = "A")]
    record_type: String,
    #[arg(long, default_value_t = 60)]
    ttl: u32,
    #[arg(long)]
    value: String,
    #[command(flatten)]
    key: KeyArgs,
    /// Name server address; taken from the API's config.json when omitted
    #[arg(long)]
    server: Option<String>,
    /// Name server port, used with --server
    #[arg(long, default_value_t = 53)]
    port: u16,
    /// Read the name server settings from a config.json file
    #[arg(long, conflicts_with = "server")]
    server_config: Option<PathBuf>,
}

/// Environment configuration
struct Config {
    api_base_url: Option<String>,
    self_service_base_url: Option<String>,
    oidc_issuer_url: Option<String>,
    oidc_client_id: Option<String>,
    access_token: Option<String>,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Self {
        let var = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());

        Self {
            api_base_url: var("DYNZONES_API_BASE_URL"),
            self_service_base_url: var("DYNZONES_SELF_SERVICE_BASE_URL"),
            oidc_issuer_url: var("DYNZONES_OIDC_ISSUER_URL"),
            oidc_client_id: var("DYNZONES_OIDC_CLIENT_ID"),
            access_token: var("DYNZONES_ACCESS_TOKEN"),
            log_level: var("DYNZONES_LOG_LEVEL").unwrap_or_else(|| "warn".to_string()),
        }
    }

    /// Validate everything that is set; the API URL itself is only required
    /// by commands that call the API.
    fn validate(&self) -> Result<()> {
        self.log_level()?;

        if self.self_service_base_url.is_some() && self.api_base_url.is_none() {
            anyhow::bail!(
                "DYNZONES_SELF_SERVICE_BASE_URL is set but DYNZONES_API_BASE_URL is not. \
                Set it via: export DYNZONES_API_BASE_URL=https://dns.example.com/"
            );
        }

        if self.oidc_issuer_url.is_some() != self.oidc_client_id.is_some() {
            anyhow::bail!(
                "DYNZONES_OIDC_ISSUER_URL and DYNZONES_OIDC_CLIENT_ID must be set together"
            );
        }

        if self.api_base_url.is_some() {
            self.app_config()?;
        }

        Ok(())
    }

    fn log_level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!(
                "DYNZONES_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }
    }

    /// Build the client configuration
    fn app_config(&self) -> Result<AppConfig> {
        let Some(ref api_base_url) = self.api_base_url else {
            anyhow::bail!(
                "DYNZONES_API_BASE_URL is required for this command. \
                Set it via: export DYNZONES_API_BASE_URL=https://dns.example.com/"
            );
        };

        let mut config = AppConfig::new(parse_base_url("DYNZONES_API_BASE_URL", api_base_url)?);

        if let Some(ref url) = self.self_service_base_url {
            config = config
                .with_self_service_base_url(parse_base_url("DYNZONES_SELF_SERVICE_BASE_URL", url)?);
        }

        if let (Some(issuer_url), Some(client_id)) = (&self.oidc_issuer_url, &self.oidc_client_id) {
            config = config.with_oidc(OidcConfig {
                issuer_url: issuer_url.clone(),
                client_id: client_id.clone(),
            });
        }

        config.validate()?;
        Ok(config)
    }

    /// Session seeded with the configured access token, anonymous otherwise
    fn session(&self) -> Session {
        match self.access_token {
            Some(ref token) => Session::with_user(SessionUser::new(token.clone())),
            None => Session::new(),
        }
    }
}

/// Parse a base URL, adding the trailing slash relative joins rely on
fn parse_base_url(var: &str, value: &str) -> Result<Url> {
    let value = value.trim();
    let value = if value.ends_with('/') {
        value.to_string()
    } else {
        format!("{value}/")
    };

    Url::parse(&value).map_err(|e| anyhow::anyhow!("{var} is not a valid URL ({e}). Got: {value}"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = Config::from_env();

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {e}");
        return CtlExitCode::Failure.into();
    }

    let log_level = config.log_level().unwrap_or(Level::WARN);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
        return CtlExitCode::Failure.into();
    }

    match cli.command {
        Command::Check { target } => run_check(&target).into(),
        Command::Normalize { name, zone } => {
            println!("{}", normalize_record_name(&name, &zone));
            CtlExitCode::Success.into()
        }
        Command::Strip { name, zone } => {
            println!("{}", strip_zone(&name, &zone));
            CtlExitCode::Success.into()
        }
        command => {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    error!("Failed to create tokio runtime: {}", e);
                    return CtlExitCode::RuntimeError.into();
                }
            };

            rt.block_on(run_api_command(command, &config)).into()
        }
    }
}

/// Run a syntax check, printing the verdict
fn run_check(target: &CheckTarget) -> CtlExitCode {
    let (value, result): (&str, Result<(), NameError>) = match target {
        CheckTarget::ZonePattern { value } => (value.as_str(), check_zone_pattern(value)),
        CheckTarget::DnsName { value } => (value.as_str(), check_dns_name(value)),
        CheckTarget::UserFilter { value } => (value.as_str(), check_user_filter(value)),
    };

    match result {
        Ok(()) => {
            println!("valid: {value}");
            CtlExitCode::Success
        }
        Err(e) => {
            println!("invalid: {value}: {e}");
            CtlExitCode::Failure
        }
    }
}

/// Run a command that may need the API, mapping errors to exit codes
async fn run_api_command(command: Command, config: &Config) -> CtlExitCode {
    match execute(command, config).await {
        Ok(()) => CtlExitCode::Success,
        Err(e) if e.downcast_ref::<dynzones_core::Error>().is_some() => {
            debug!(error = ?e, "API command failed");
            eprintln!("Error: {e:#}");
            CtlExitCode::RuntimeError
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            CtlExitCode::Failure
        }
    }
}

async fn execute(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Nsupdate(args) => nsupdate(args, config).await,
        Command::ExternalDns { zone, token } => external_dns(&zone, token, config).await,
        Command::Curl { token } => curl(token, config).await,
        Command::Zones => zones(config).await,
        Command::Records { zone, key } => records(&zone, &key.tsig_key(), config).await,
        Command::Tokens => tokens(config).await,
        Command::Rules { search } => rules(&search, config).await,
        Command::Check { .. } | Command::Normalize { .. } | Command::Strip { .. } => {
            anyhow::bail!("offline command routed to the API runner")
        }
    }
}

fn dyndns_api(config: &Config) -> Result<HttpDynDnsApi> {
    let app_config = config.app_config()?;
    Ok(HttpDynDnsApi::from_config(&app_config, config.session())?)
}

async fn nsupdate(args: NsupdateArgs, config: &Config) -> Result<()> {
    let record = DnsRecord::new(args.name, args.record_type, args.ttl, args.value);
    let key = args.key.tsig_key();

    let script = if let Some(address) = args.server {
        let server = ServerConfig {
            dns_server_address: address,
            dns_server_port: args.port,
        };
        commands::generate_nsupdate(&record, &args.zone, &key, &server)
    } else if let Some(path) = args.server_config {
        let server = ServerConfig::from_file(&path)?;
        commands::generate_nsupdate(&record, &args.zone, &key, &server)
    } else {
        debug!("Fetching name server settings from the API");
        RecordService::new(Box::new(dyndns_api(config)?))
            .nsupdate(&args.zone, &key, &record)
            .await?
    };

    println!("{script}");
    Ok(())
}

/// Explicit token, else the account's preferred token when logged in, else
/// the placeholder
async fn resolve_token(
    api: &HttpDynDnsApi,
    explicit: Option<String>,
    config: &Config,
) -> Result<String> {
    if let Some(token) = explicit {
        return Ok(token);
    }

    if config.access_token.is_none() {
        return Ok(TOKEN_PLACEHOLDER.to_string());
    }

    let tokens = api.list_tokens().await?;
    Ok(preferred_token(&tokens)
        .map(|t| t.token_string.clone())
        .unwrap_or_else(|| TOKEN_PLACEHOLDER.to_string()))
}

async fn external_dns(zone: &str, token: Option<String>, config: &Config) -> Result<()> {
    let api = dyndns_api(config)?;
    let token = resolve_token(&api, token, config).await?;

    println!("{HELM_REPO_ADD_COMMAND}");
    println!(
        "{}",
        commands::external_dns_helm_command(api.base_url(), zone, Some(&token))?
    );
    Ok(())
}

async fn curl(token: Option<String>, config: &Config) -> Result<()> {
    let api = dyndns_api(config)?;
    let token = resolve_token(&api, token, config).await?;
    let endpoint = commands::zones_endpoint(api.base_url())?;

    println!("{}", commands::curl_command(&endpoint, &token));
    Ok(())
}

async fn zones(config: &Config) -> Result<()> {
    let response = dyndns_api(config)?.list_zones().await?;

    for zone in &response.zones {
        println!("{}\t{:?}", zone.name, zone.status());
    }
    Ok(())
}

async fn records(zone: &str, key: &TsigKey, config: &Config) -> Result<()> {
    let service = RecordService::new(Box::new(dyndns_api(config)?));

    for record in service.list(zone, key).await? {
        let marker = if record.is_editable() { "" } else { "\t(read-only)" };
        println!(
            "{}\t{}\t{}\t{}{marker}",
            record.name, record.ttl, record.record_type, record.value
        );
    }
    Ok(())
}

async fn tokens(config: &Config) -> Result<()> {
    let tokens = dyndns_api(config)?.list_tokens().await?;

    for token in &tokens {
        let access = if token.read_only { "read-only" } else { "read-write" };
        let expires = token.expires_at.as_deref().unwrap_or("never");
        println!("{}\t{access}\texpires: {expires}", token.id);
    }
    Ok(())
}

async fn rules(search: &str, config: &Config) -> Result<()> {
    let app_config = config.app_config()?;
    let service = PolicyService::new(Box::new(HttpPolicyApi::from_config(
        &app_config,
        config.session(),
    )?));

    let response = service.list().await?;
    for rule in filter_rules(&response.rules, search) {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            rule.id,
            rule.zone_pattern,
            rule.zone_soa,
            rule.target_user_filter,
            rule.description.as_deref().unwrap_or("")
        );
    }
    if !response.edit_allowed {
        debug!("Caller may not edit policy rules");
    }
    Ok(())
}
