use crate::utils::PathOr;
use clap::App;
use log::LevelFilter;
use picky::hash::HashAlgorithm;
use picky::signature::SignatureAlgorithm;
use picky_ocsp::{IssuerIdentity, OcspError};
use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const YAML_CONF_PATH: &str = "picky_ocsp_conf.yaml";

const PICKY_OCSP_LISTEN_ADDRESS_ENV: &str = "PICKY_OCSP_LISTEN_ADDRESS";
const PICKY_OCSP_LOG_LEVEL_ENV: &str = "PICKY_OCSP_LOG_LEVEL";
const PICKY_OCSP_VALIDITY_SECS_ENV: &str = "PICKY_OCSP_VALIDITY_SECS";

const PICKY_OCSP_ISSUER_CERT_ENV: &str = "PICKY_OCSP_ISSUER_CERT";
const PICKY_OCSP_ISSUER_CERT_PATH_ENV: &str = "PICKY_OCSP_ISSUER_CERT_PATH";
const PICKY_OCSP_ISSUER_KEY_ENV: &str = "PICKY_OCSP_ISSUER_KEY";
const PICKY_OCSP_ISSUER_KEY_PATH_ENV: &str = "PICKY_OCSP_ISSUER_KEY_PATH";

fn default_listen_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8888))
}

const fn default_log_level() -> LevelFilter {
    LevelFilter::Info
}

const fn default_signing_algorithm() -> SignatureAlgorithm {
    SignatureAlgorithm::RsaPkcs1v15(HashAlgorithm::SHA2_256)
}

const fn default_validity_secs() -> u64 {
    4
}

fn parse_level_filter(s: &str) -> LevelFilter {
    match s.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Off,
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't read yaml config: {0}")]
    ReadYaml(#[source] std::io::Error),

    #[error("invalid yaml config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },

    #[error("issuer certificate and private key are not configured")]
    MissingIssuer,

    #[error("couldn't read {what}: {source}")]
    ReadPem {
        what: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid issuer identity: {0}")]
    Issuer(#[from] OcspError),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CertKeyPair {
    pub cert: PathOr<String>,
    pub key: PathOr<String>,
}

impl CertKeyPair {
    pub fn load(&self) -> Result<IssuerIdentity, ConfigError> {
        let cert = self.cert.read_to_string().map_err(|source| ConfigError::ReadPem {
            what: "issuer certificate",
            source,
        })?;
        let key = self.key.read_to_string().map_err(|source| ConfigError::ReadPem {
            what: "issuer private key",
            source,
        })?;
        Ok(IssuerIdentity::from_pem_str(&cert, &key)?)
    }
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Config {
    #[serde(default = "default_listen_address")]
    pub listen_address: SocketAddr,
    #[serde(default = "default_log_level")]
    pub log_level: LevelFilter,
    #[serde(default = "default_signing_algorithm")]
    pub signing_algorithm: SignatureAlgorithm,
    /// Seconds between `thisUpdate` and `nextUpdate`
    #[serde(default = "default_validity_secs")]
    pub validity_secs: u64,

    #[serde(default)]
    pub issuer: Option<CertKeyPair>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            log_level: default_log_level(),
            signing_algorithm: default_signing_algorithm(),
            validity_secs: default_validity_secs(),
            issuer: None,
        }
    }
}

impl Config {
    pub fn startup_init() -> Result<Self, ConfigError> {
        let mut config = match std::fs::read_to_string(YAML_CONF_PATH) {
            Ok(yaml_conf) => serde_yaml::from_str(&yaml_conf)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
            Err(e) => return Err(ConfigError::ReadYaml(e)),
        };

        config.inject_env()?;
        config.inject_cli()?;

        Ok(config)
    }

    pub fn validity(&self) -> Duration {
        Duration::from_secs(self.validity_secs)
    }

    pub fn load_issuer(&self) -> Result<IssuerIdentity, ConfigError> {
        self.issuer.as_ref().ok_or(ConfigError::MissingIssuer)?.load()
    }

    fn inject_cli(&mut self) -> Result<(), ConfigError> {
        let yaml = clap::load_yaml!("cli.yml");
        let app = App::from_yaml(yaml).version(env!("CARGO_PKG_VERSION"));
        let matches = app.get_matches();

        if let Some(v) = matches.value_of("listen") {
            self.listen_address = parse_value("--listen", v)?;
        }

        if let Some(v) = matches.value_of("log-level") {
            self.log_level = parse_level_filter(v);
        }

        if let Some(v) = matches.value_of("validity") {
            self.validity_secs = parse_value("--validity", v)?;
        }

        if let (Some(cert), Some(key)) = (matches.value_of("issuer-cert"), matches.value_of("issuer-key")) {
            self.issuer = Some(CertKeyPair {
                cert: PathOr::Path(cert.into()),
                key: PathOr::Path(key.into()),
            });
        }

        if matches.is_present("dump-config") {
            match serde_yaml::to_string(&self) {
                Ok(yaml_conf) => {
                    if let Err(e) = std::fs::write(YAML_CONF_PATH, yaml_conf) {
                        println!("failed to write yaml config: {}", e);
                    }
                }
                Err(e) => println!("failed to serialize config: {}", e),
            }
        }

        if matches.is_present("show-config") {
            println!("{:#?}", self);
        }

        Ok(())
    }

    fn inject_env(&mut self) -> Result<(), ConfigError> {
        self.inject_vars(|name| env::var(name).ok())
    }

    fn inject_vars(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(val) = var(PICKY_OCSP_LISTEN_ADDRESS_ENV) {
            self.listen_address = parse_value(PICKY_OCSP_LISTEN_ADDRESS_ENV, &val)?;
        }

        if let Some(val) = var(PICKY_OCSP_LOG_LEVEL_ENV) {
            self.log_level = parse_level_filter(&val);
        }

        if let Some(val) = var(PICKY_OCSP_VALIDITY_SECS_ENV) {
            self.validity_secs = parse_value(PICKY_OCSP_VALIDITY_SECS_ENV, &val)?;
        }

        // inline PEM takes precedence over paths
        let cert = var(PICKY_OCSP_ISSUER_CERT_ENV)
            .map(PathOr::Pem)
            .or_else(|| var(PICKY_OCSP_ISSUER_CERT_PATH_ENV).map(|path| PathOr::Path(PathBuf::from(path))));
        let key = var(PICKY_OCSP_ISSUER_KEY_ENV)
            .map(PathOr::Pem)
            .or_else(|| var(PICKY_OCSP_ISSUER_KEY_PATH_ENV).map(|path| PathOr::Path(PathBuf::from(path))));

        if let (Some(cert), Some(key)) = (cert, key) {
            self.issuer = Some(CertKeyPair { cert, key });
        }

        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_owned(),
    })
}
