//! Configuration for the campaign portal CLI
//!
//! CLI arguments and environment variable handling using clap.

use clap::{Parser, Subcommand};
use portal_backend_client::BackendConfig;
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::RetryPolicy;
use crate::images::{ImageKind, DEFAULT_IMAGE_BUCKET};
use crate::model::SubmissionStatus;
use crate::stats::Period;

/// Campaign portal - campaigns, submissions, earnings and competitions
#[derive(Parser, Debug, Clone)]
#[command(name = "campaign-portal")]
#[command(about = "Inspect and report on creator campaigns from the command line")]
pub struct Args {
    /// Backend project URL
    #[arg(long, env = "SUPABASE_URL", default_value = "http://localhost:54321")]
    pub backend_url: String,

    /// Public anon key sent with every request
    #[arg(long, env = "SUPABASE_ANON_KEY", default_value = "")]
    pub anon_key: String,

    /// Database schema exposed by the REST endpoint
    #[arg(long, env = "DB_SCHEMA", default_value = "public")]
    pub schema: String,

    /// Per-request timeout in milliseconds
    #[arg(long, env = "REQUEST_TIMEOUT_MS", default_value = "30000")]
    pub request_timeout_ms: u64,

    /// Attempts for the initial load and connection check
    #[arg(long, env = "LOAD_ATTEMPTS", default_value = "3")]
    pub load_attempts: u32,

    /// Pause between load attempts in milliseconds
    #[arg(long, env = "LOAD_RETRY_DELAY_MS", default_value = "1000")]
    pub load_retry_delay_ms: u64,

    /// Storage bucket for campaign images
    #[arg(long, env = "IMAGE_BUCKET", default_value = DEFAULT_IMAGE_BUCKET)]
    pub image_bucket: String,

    /// Sign in as this user before loading (row-level security applies)
    #[arg(long, env = "PORTAL_EMAIL")]
    pub email: Option<String>,

    #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Probe the backend with retries
    Check,
    /// List campaigns with statistics and budget use
    Campaigns,
    /// Earnings dashboard of one creator
    Earnings {
        #[arg(long)]
        creator: String,
        /// week, month, year or all
        #[arg(long, default_value = "month")]
        period: Period,
        /// Only this campaign
        #[arg(long)]
        campaign: Option<String>,
        /// Only videos in this state (pending, approved, rejected)
        #[arg(long)]
        status: Option<SubmissionStatus>,
    },
    /// Competition standings of one campaign
    Ranking {
        #[arg(long)]
        campaign: String,
        /// Write rank and prize to the placed submissions
        #[arg(long)]
        award: bool,
    },
    /// Write a CSV report of one campaign
    Export {
        #[arg(long)]
        campaign: String,
        /// Defaults to campaign-<id>-export.csv
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Upload a logo or thumbnail into IMAGE_BUCKET and attach it to a campaign
    UploadImage {
        #[arg(long)]
        campaign: String,
        #[arg(long, value_enum)]
        kind: ImageKind,
        /// jpeg, png, gif or webp, 5 MB at most
        #[arg(long)]
        file: PathBuf,
    },
}

impl Args {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.anon_key.trim().is_empty() {
            return Err("SUPABASE_ANON_KEY is required".to_string());
        }

        let url = Url::parse(&self.backend_url)
            .map_err(|e| format!("SUPABASE_URL is not a valid URL: {}", e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err("SUPABASE_URL must use http or https".to_string());
        }

        if self.request_timeout_ms == 0 {
            return Err("REQUEST_TIMEOUT_MS must be greater than zero".to_string());
        }

        if self.load_attempts == 0 {
            return Err("LOAD_ATTEMPTS must be at least 1".to_string());
        }

        if self.email.is_some() != self.password.is_some() {
            return Err("PORTAL_EMAIL and PORTAL_PASSWORD must be set together".to_string());
        }

        Ok(())
    }

    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            base_url: self.backend_url.trim_end_matches('/').to_string(),
            anon_key: self.anon_key.clone(),
            schema: self.schema.clone(),
            timeout_secs: self.request_timeout_ms.div_ceil(1000).max(1),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.load_attempts,
            delay: Duration::from_millis(self.load_retry_delay_ms),
        }
    }
}
