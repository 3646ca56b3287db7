use clap::Parser;
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(name = "worktray", about = "terminal worktray for case-management processes")]
pub struct Cli {
    /// Search service base URL
    #[arg(long, env = "WORKTRAY_SEARCH_API_URL", default_value = "http://localhost/api")]
    pub search_api_url: String,

    /// Patches and areas service base URL
    #[arg(long, env = "WORKTRAY_PATCHES_API_URL", default_value = "http://localhost/api/v1")]
    pub patches_api_url: String,

    /// Staff email used to resolve the assigned patch
    #[arg(long, env = "WORKTRAY_EMAIL")]
    pub email: Option<String>,

    /// Session slot name; filter/sort/page state is restored from it on
    /// re-entry
    #[arg(long, default_value = "worktray")]
    pub session_key: String,

    /// Start from this query string instead of the session slot
    /// (e.g. "?p=2&t=30&sort=name")
    #[arg(long)]
    pub query: Option<String>,

    /// Log file path
    #[arg(long, env = "WORKTRAY_LOG_FILE")]
    pub log_file: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub search_api_url: Option<String>,
    pub patches_api_url: Option<String>,
    pub email: Option<String>,
    pub session_key: Option<String>,
}

impl ConfigFile {
    pub fn load() -> Option<Self> {
        let config_dir = dirs::config_dir()?;
        let config_path = config_dir.join("worktray").join("config.toml");
        let content = std::fs::read_to_string(config_path).ok()?;
        toml::from_str(&content).ok()
    }
}

impl Cli {
    /// Config-file values fill in anything the CLI/env left at defaults.
    pub fn merge_config_file(&mut self, file: ConfigFile) {
        if let Some(email) = file.email {
            self.email.get_or_insert(email);
        }
        if let Some(url) = file.search_api_url {
            if self.search_api_url == "http://localhost/api" {
                self.search_api_url = url;
            }
        }
        if let Some(url) = file.patches_api_url {
            if self.patches_api_url == "http://localhost/api/v1" {
                self.patches_api_url = url;
            }
        }
        if let Some(key) = file.session_key {
            if self.session_key == "worktray" {
                self.session_key = key;
            }
        }
    }
}
