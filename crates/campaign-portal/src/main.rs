//! Campaign portal CLI

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use campaign_portal::{
    config::{Args, Command},
    export, BackendClient, EarningsFilter, ImageUpload, ImageUploader, PortalCache, RemoteBackend,
    SessionStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "campaign_portal={0},portal_backend_client={0},warn",
                    log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("Backend: {}", args.backend_url);
    info!("Schema: {}", args.schema);

    let client = BackendClient::new(args.backend_config()).context("creating backend client")?;
    let session = SessionStore::new(client.auth());
    if let (Some(email), Some(password)) = (&args.email, &args.password) {
        let identity = session.login(email, password).await.context("signing in")?;
        info!("Signed in as {} ({})", identity.name, identity.role);
    }

    let cache = PortalCache::new(Arc::new(RemoteBackend::new(&client)));
    let policy = args.retry_policy();

    match &args.command {
        Command::Check => {
            let attempts = cache
                .check_connection(&policy)
                .await
                .context("backend unreachable")?;
            println!("Backend reachable after {} attempt(s)", attempts);
        }
        Command::Campaigns => {
            load(&cache, &policy).await;
            let state = cache.read().await;
            for campaign in &state.campaigns {
                let stats = state.campaign_statistics(&campaign.id);
                let usage = state.budget_usage(&campaign.id);
                println!(
                    "{}  {:<32} {:<9} {:<8} views={} creators={} spent={} remaining={} used={}%",
                    campaign.id,
                    campaign.title,
                    campaign.status,
                    campaign.content_type,
                    stats.total_views,
                    stats.total_creators,
                    stats.total_spent,
                    usage.as_ref().map(|u| u.remaining).unwrap_or_default(),
                    usage.as_ref().map(|u| u.percent_used).unwrap_or_default(),
                );
            }
        }
        Command::Earnings {
            creator,
            period,
            campaign,
            status,
        } => {
            load(&cache, &policy).await;
            let state = cache.read().await;
            let filter = EarningsFilter {
                campaign_id: campaign.clone(),
                status: *status,
            };
            let summary = state.creator_summary(creator, &filter);
            println!("Total earnings:   {}", summary.total_earnings);
            println!("Pending earnings: {}", summary.pending_earnings);
            println!("Total views:      {}", summary.total_views);
            println!("Approved videos:  {}", summary.approved_videos);
            println!("Active campaigns: {}", summary.active_campaigns);
            println!();
            let today = Utc::now().date_naive();
            for day in state.creator_daily_metrics(creator, &filter, *period, today) {
                if day.views > 0 {
                    println!("{}  views={} earnings={}", day.date, day.views, day.earnings);
                }
            }
        }
        Command::Ranking { campaign, award } => {
            load(&cache, &policy).await;
            let standings = if *award {
                cache.award_competition(campaign).await?
            } else {
                cache.read().await.competition_standings(campaign)
            };
            let Some(standings) = standings else {
                anyhow::bail!("campaign {} not found", campaign);
            };
            for standing in standings {
                println!(
                    "#{:<3} {}  creator={} views={} prize={}",
                    standing.rank,
                    standing.submission_id,
                    standing.creator_id,
                    standing.views,
                    standing
                        .prize
                        .map(|p| p.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
        }
        Command::Export { campaign, output } => {
            load(&cache, &policy).await;
            let state = cache.read().await;
            let Some(found) = state.get_campaign(campaign) else {
                anyhow::bail!("campaign {} not found", campaign);
            };
            let stats = state.campaign_statistics(campaign);
            let csv = export::campaign_report_csv(found, &stats, &state.submissions_by_campaign(campaign));
            let path = output
                .clone()
                .unwrap_or_else(|| export::report_file_name(campaign).into());
            std::fs::write(&path, csv).with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        Command::UploadImage { campaign, kind, file } => {
            load(&cache, &policy).await;
            if cache.get_campaign(campaign).await.is_none() {
                anyhow::bail!("campaign {} not found", campaign);
            }
            let data = std::fs::read(file).with_context(|| format!("reading {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let uploader = ImageUploader::new(client.storage(), &args.image_bucket);
            let uploaded = uploader.upload(*kind, ImageUpload::new(file_name, data)).await?;

            match cache.update_campaign(campaign, &kind.campaign_update(&uploaded.public_url)).await {
                Ok(Some(_)) => println!("Uploaded {}", uploaded.public_url),
                outcome => {
                    if let Err(e) = uploader.remove(std::slice::from_ref(&uploaded.path)).await {
                        warn!("Could not remove orphaned image {}: {}", uploaded.path, e);
                    }
                    outcome?;
                    anyhow::bail!("campaign {} not updated", campaign);
                }
            }
        }
    }

    if session.is_authenticated().await {
        session.logout().await;
    }
    Ok(())
}

async fn load(cache: &PortalCache, policy: &campaign_portal::RetryPolicy) {
    let outcome = cache.initialize(policy).await;
    if outcome.is_degraded() {
        warn!("Backend unavailable, showing empty data: {:?}", outcome);
    }
}
