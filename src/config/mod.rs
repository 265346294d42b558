use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use clap::Parser;
use log::Level;
use crate::errors::WikiError;

/// Application configuration, from the command line or the environment
#[derive(Debug, Clone, Parser)]
#[command(name = "flatwiki", version, about = "A minimal flat-file wiki server")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "WIKI_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "WIKI_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Directory holding the `{title}.txt` page files
    #[arg(long, env = "WIKI_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Directory holding view.html and edit.html
    #[arg(long, env = "WIKI_TEMPLATE_DIR", default_value = "templates")]
    pub template_dir: PathBuf,

    /// Minimum log level (error, warn, info, debug, trace)
    #[arg(long, env = "WIKI_LOG", default_value = "info")]
    pub log_level: String,

    /// Also append log lines to this file
    #[arg(long, env = "WIKI_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            data_dir: PathBuf::from("."),
            template_dir: PathBuf::from("templates"),
            log_level: "info".to_string(),
            log_file: None,
        }
    }

    /// Parsed log level; unknown names fall back to info
    pub fn severity(&self) -> Level {
        self.log_level.parse::<Level>().unwrap_or(Level::Info)
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> Result<SocketAddr, WikiError> {
        let ip: IpAddr = self.host.parse().map_err(|e| {
            WikiError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid host {:?}: {}", self.host, e),
            ))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
