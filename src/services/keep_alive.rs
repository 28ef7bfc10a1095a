use std::time::Duration;
use tokio_cron_scheduler::{Job, JobScheduler};

/// Periodically pings the bot's own public URL so that free hosting tiers
/// do not put the process to sleep between guest visits.
pub struct KeepAliveService {
    url: String,
    interval: Duration,
    client: reqwest::Client,
    scheduler: JobScheduler,
}

impl KeepAliveService {
    pub async fn new(
        base_url: &str,
        interval_minutes: u64,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let url = normalize_ping_url(base_url).ok_or("Keep-alive URL is empty")?;
        let scheduler = JobScheduler::new().await?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            url,
            interval: Duration::from_secs(interval_minutes.max(1) * 60),
            client,
            scheduler,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let url = self.url.clone();
        let client = self.client.clone();

        let ping_job = Job::new_repeated_async(self.interval, move |_uuid, _l| {
            let url = url.clone();
            let client = client.clone();
            Box::pin(async move {
                ping(&client, &url).await;
            })
        })?;

        self.scheduler.add(ping_job).await?;
        self.scheduler.start().await?;

        tracing::info!(
            "Keep-alive service started - pinging {} every {} minutes",
            self.url,
            self.interval.as_secs() / 60
        );
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.scheduler.shutdown().await?;
        Ok(())
    }
}

async fn ping(client: &reqwest::Client, url: &str) {
    match client.get(url).send().await {
        Ok(response) if response.status().is_success() => {
            tracing::debug!("Keep-alive ping to {} returned {}", url, response.status());
        }
        Ok(response) => {
            tracing::warn!("Keep-alive ping to {} returned {}", url, response.status());
        }
        Err(e) => {
            tracing::warn!("Keep-alive ping to {} failed: {}", url, e);
        }
    }
}

/// Turns a base URL into the health endpoint that gets pinged.
/// Returns `None` for an empty input.
pub fn normalize_ping_url(base_url: &str) -> Option<String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }

    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    if with_scheme.ends_with("/health") {
        Some(with_scheme)
    } else {
        Some(format!("{with_scheme}/health"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_ping_url() {
        assert_eq!(
            normalize_ping_url("https://rsvp.example.com"),
            Some("https://rsvp.example.com/health".to_string())
        );
        assert_eq!(
            normalize_ping_url("https://rsvp.example.com/"),
            Some("https://rsvp.example.com/health".to_string())
        );
        assert_eq!(
            normalize_ping_url("rsvp.example.com"),
            Some("https://rsvp.example.com/health".to_string())
        );
        assert_eq!(
            normalize_ping_url("http://localhost:3000/health"),
            Some("http://localhost:3000/health".to_string())
        );
        assert_eq!(normalize_ping_url("   "), None);
    }

    #[tokio::test]
    async fn test_service_rejects_empty_url() {
        assert!(KeepAliveService::new("", 14).await.is_err());
    }

    #[tokio::test]
    async fn test_service_uses_health_endpoint() {
        let service = KeepAliveService::new("rsvp.example.com", 14)
            .await
            .expect("Failed to create keep-alive service");
        assert_eq!(service.url(), "https://rsvp.example.com/health");
        assert_eq!(service.interval, Duration::from_secs(14 * 60));
    }
}
