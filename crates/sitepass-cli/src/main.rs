//! sitepass: deterministic site password generator
//!
//! Commands:
//!   generate  - derive a password for (site, username, secret) [default]
//!   versions  - list the registered derivation versions
//!
//! Anything not supplied as a flag is prompted for interactively; the
//! master secret is always read without echo when a terminal is
//! attached. The derived password is only ever handed to the clipboard
//! and/or stdout, never logged or persisted.

use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use directories::ProjectDirs;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use sitepass_core::config::SitepassConfig;
use sitepass_core::SecurityLevel;
use sitepass_crypto::{expand, PasswordVersion, VersionRegistry, EXPANDED_INPUT_LEN};
use sitepass_store::CredentialStore;

#[derive(Parser, Debug)]
#[command(
    name = "sitepass",
    version,
    about = "Deterministic site password generator",
    long_about = "sitepass derives a reproducible password from a master secret, a site, \
                  and a username. Nothing secret is ever stored; forgotten passwords are \
                  regenerated by repeating the same inputs."
)]
struct Cli {
    /// Path to sitepass.toml configuration file
    #[arg(long, short = 'c', env = "SITEPASS_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SITEPASS_LOG")]
    log: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Derive a password (default when no subcommand is given)
    Generate(GenerateArgs),

    /// List the registered derivation versions
    Versions,
}

#[derive(Args, Debug, Default)]
struct GenerateArgs {
    /// Derivation version name (default: prompt, blank for the latest)
    #[arg(long, short = 'a')]
    algorithm: Option<String>,

    /// Site or application the password is for
    #[arg(long)]
    site: Option<String>,

    /// Username on the site
    #[arg(long)]
    username: Option<String>,

    /// Master secret (prefer the interactive prompt; flags leak into
    /// shell history)
    #[arg(long)]
    secret: Option<String>,

    /// Security tier for the fingerprint store
    #[arg(long, short = 'l', env = "SITEPASS_LEVEL")]
    level: Option<SecurityLevel>,

    /// Skip the fingerprint store check
    #[arg(long)]
    no_store: bool,

    /// Do not copy the password to the clipboard
    #[arg(long)]
    no_clipboard: bool,

    /// Do not print the password to stdout
    #[arg(long)]
    no_echo: bool,

    /// Directory for the per-level key and hash files
    #[arg(long, env = "SITEPASS_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = SitepassConfig::load(&config_path)?;

    let log = cli.log.as_deref().unwrap_or(&config.log_level);
    init_logging(log);

    match cli
        .command
        .unwrap_or_else(|| Commands::Generate(GenerateArgs::default()))
    {
        Commands::Generate(args) => generate(args, &config),
        Commands::Versions => versions(),
    }
}

fn generate(args: GenerateArgs, config: &SitepassConfig) -> Result<()> {
    let clipboard = config.output.clipboard && !args.no_clipboard;
    let echo = config.output.echo && !args.no_echo;
    if !clipboard && !echo {
        anyhow::bail!("all password output forms are turned off");
    }

    let registry = VersionRegistry::builtin();
    let version = match args.algorithm.as_deref() {
        Some(name) => registry
            .resolve(name)
            .with_context(|| format!("unknown version {name:?}"))?,
        None => prompt_version(&registry)?,
    };
    debug!(version = version.name(), "version selected");

    let site = read_input(args.site, "Site or application", config.prompt.site_sensitive, config)?;
    let username = read_input(args.username, "Username", config.prompt.username_sensitive, config)?;
    let secret = match args.secret {
        Some(value) => SecretString::from(value),
        None => prompt_secret("Master secret", config)?,
    };

    // Inputs are normalized through seeded expansion immediately; the
    // raw bytes never reach the pipeline or the fingerprint store.
    let site = normalized(&site);
    let username = normalized(&username);
    let secret = normalized(secret.expose_secret().as_bytes());

    if config.oracle.enabled && !args.no_store {
        let data_dir = args
            .data_dir
            .or_else(|| config.oracle.data_dir.clone())
            .unwrap_or_else(default_data_dir);
        let level = args.level.unwrap_or(config.oracle.level);
        let store = CredentialStore::new(data_dir, level);
        if !check_credentials(&store, &username, &secret, config)? {
            return Ok(());
        }
    }

    let password_bytes = version.generate(&secret, &site, &username)?;
    let password = Zeroizing::new(
        String::from_utf8(password_bytes).context("derived password is not valid ASCII")?,
    );

    if clipboard {
        match arboard::Clipboard::new() {
            Ok(mut board) => match board.set_text(password.as_str()) {
                Ok(()) => println!("Copied password to clipboard"),
                Err(e) => warn!("clipboard write failed: {e}"),
            },
            Err(e) => warn!("clipboard unavailable: {e}"),
        }
    }
    if echo {
        println!("Your password is:");
        println!("{}", password.as_str());
    }
    Ok(())
}

fn versions() -> Result<()> {
    let registry = VersionRegistry::builtin();
    let latest = registry.latest().name().to_string();
    for name in registry.names() {
        if name == latest {
            println!("{name} (latest)");
        } else {
            println!("{name}");
        }
    }
    Ok(())
}

/// Check the (username, secret) pair against the fingerprint store.
///
/// Returns false when the operator decides the credentials are wrong
/// and the run should stop. On an unknown pair the operator may record
/// it; when a terminal is attached the secret must be retyped and
/// fingerprint-match before it is recorded.
fn check_credentials(
    store: &CredentialStore,
    username: &[u8],
    secret: &[u8],
    config: &SitepassConfig,
) -> Result<bool> {
    let fingerprint = store.fingerprint(username, secret)?;
    if store.contains(&fingerprint)? {
        return Ok(true);
    }

    if !confirm("Unknown username/password combination. Are you sure it is correct? (y/n)")? {
        return Ok(false);
    }
    if confirm("Record it for future checks? (y/n)")? {
        if std::io::stdin().is_terminal() {
            let retyped = prompt_secret("Repeat the master secret", config)?;
            let retyped = normalized(retyped.expose_secret().as_bytes());
            if store.fingerprint(username, &retyped)? != fingerprint {
                println!("The secrets do not match.");
                return Ok(false);
            }
        }
        store.record(&fingerprint)?;
    }
    Ok(true)
}

/// Expand raw input bytes to the fixed pipeline width.
fn normalized(raw: &[u8]) -> Zeroizing<Vec<u8>> {
    Zeroizing::new(expand(raw, EXPANDED_INPUT_LEN))
}

fn prompt_version(registry: &VersionRegistry) -> Result<Box<dyn PasswordVersion>> {
    let stdin = std::io::stdin();
    loop {
        print!("Version (blank for latest): ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(registry.latest());
        }
        let name = line.trim();
        if name.is_empty() {
            let latest = registry.latest();
            println!("Using version {}", latest.name());
            return Ok(latest);
        }
        match registry.resolve(name) {
            Some(version) => return Ok(version),
            None => println!("Unknown version"),
        }
    }
}

fn read_input(
    preset: Option<String>,
    label: &str,
    sensitive: bool,
    config: &SitepassConfig,
) -> Result<Zeroizing<Vec<u8>>> {
    if let Some(value) = preset {
        return Ok(Zeroizing::new(value.into_bytes()));
    }
    if sensitive {
        let value = prompt_secret(label, config)?;
        return Ok(Zeroizing::new(value.expose_secret().as_bytes().to_vec()));
    }
    print!("{label}: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let trimmed = line.trim_end_matches(['\r', '\n']);
    Ok(Zeroizing::new(trimmed.as_bytes().to_vec()))
}

fn prompt_secret(label: &str, config: &SitepassConfig) -> Result<SecretString> {
    if std::io::stdin().is_terminal() {
        let value = rpassword::prompt_password(format!("{label}: "))?;
        return Ok(SecretString::from(value));
    }
    if config.prompt.force_secure {
        anyhow::bail!("stdin is not a terminal and echo-less input is required");
    }
    // Piped input: read one line; there is no echo to suppress.
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let trimmed = line.trim_end_matches(['\r', '\n']).to_string();
    Ok(SecretString::from(trimmed))
}

fn confirm(question: &str) -> Result<bool> {
    let stdin = std::io::stdin();
    loop {
        println!("{question}");
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(false);
        }
        match line.trim() {
            s if s.eq_ignore_ascii_case("y") => return Ok(true),
            s if s.eq_ignore_ascii_case("n") => return Ok(false),
            _ => {}
        }
    }
}

fn default_config_path() -> PathBuf {
    ProjectDirs::from("", "", "sitepass")
        .map(|dirs| dirs.config_dir().join("sitepass.toml"))
        .unwrap_or_else(|| PathBuf::from("sitepass.toml"))
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "sitepass")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
