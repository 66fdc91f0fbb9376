use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use reqwest::redirect::Policy;
use std::time::Duration;

use crate::config::Config;
use crate::core::constants::routes;
use crate::core::types::WorkersResponse;
use crate::core::{ActiveWorkers, CorrelationResult, ReportError, Result, ResultsPage};
use crate::logging::{log_error, log_fetch_start, log_warning};

/// Where analysis results and worker status come from.
#[async_trait]
pub trait AnalysisSource {
    /// Stored results, newest first as returned by the backend.
    async fn fetch_results(&self, limit: usize) -> Result<Vec<CorrelationResult>>;

    /// Number of text-processing workers currently running.
    async fn fetch_active_workers(&self) -> Result<u32>;

    async fn delete_result(&self, job_id: &str) -> Result<()>;
}

/// HTTP client for the dashboard gateway.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    config: Config,
}

impl GatewayClient {
    pub fn new(config: &Config) -> Result<Self> {
        let user_agent = config.user_agent.as_deref().unwrap_or(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        let client = reqwest::Client::builder()
            .timeout(config.timeout_duration())
            .redirect(Policy::limited(5))
            .user_agent(user_agent)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn url(&self, route: &str) -> String {
        self.config.api_url(route)
    }

    /// URL of a single stored result; the job id is one percent-encoded segment.
    fn result_url(&self, job_id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.url(routes::RESULTS))
            .map_err(|e| ReportError::Config(format!("invalid gateway URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ReportError::Config("gateway URL cannot take a path".to_string()))?
            .push(job_id);
        Ok(url)
    }
}

#[async_trait]
impl AnalysisSource for GatewayClient {
    async fn fetch_results(&self, limit: usize) -> Result<Vec<CorrelationResult>> {
        let url = self.url(routes::RESULTS);
        log_fetch_start(&url);

        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        let page: ResultsPage = serde_json::from_str(&body)?;
        for result in &page.results {
            result.validate()?;
        }
        Ok(page.results)
    }

    async fn fetch_active_workers(&self) -> Result<u32> {
        let url = self.url(routes::ACTIVE_WORKERS);
        log_fetch_start(&url);

        let outcome = async {
            let response = self.client.get(&url).send().await?.error_for_status()?;
            let workers: WorkersResponse = response.json().await?;
            Ok::<u32, reqwest::Error>(workers.active_workers)
        }
        .await;

        outcome.map_err(|e| ReportError::AncillaryFetch(e.to_string()))
    }

    async fn delete_result(&self, job_id: &str) -> Result<()> {
        let url = self.result_url(job_id)?;
        log_fetch_start(url.as_str());

        let response = self.client.delete(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ReportError::NotFound(format!("result '{job_id}'")));
        }
        response.error_for_status()?;
        Ok(())
    }
}

/// Active worker count for the cover page; any failure degrades to
/// [`ActiveWorkers::Unavailable`].
pub async fn resolve_active_workers(source: &(dyn AnalysisSource + Sync)) -> ActiveWorkers {
    match source.fetch_active_workers().await {
        Ok(count) => ActiveWorkers::Known(count),
        Err(err) if err.is_soft() => {
            log_warning(&format!("{err}; showing placeholder"));
            ActiveWorkers::Unavailable
        }
        Err(err) => {
            log_error("Active worker lookup failed unexpectedly", Some(&err));
            ActiveWorkers::Unavailable
        }
    }
}

/// Which stored result to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultSelector {
    /// First entry of the listing
    Latest,
    JobId(String),
    /// 1-based position in the listing
    Index(usize),
}

/// Pick a result from a listing. Returns its 1-based sequence number and the result.
pub fn select_result(
    results: Vec<CorrelationResult>,
    selector: &ResultSelector,
) -> Result<(usize, CorrelationResult)> {
    let position = match selector {
        ResultSelector::Latest => {
            if results.is_empty() {
                return Err(ReportError::NotFound("no stored results".to_string()));
            }
            0
        }
        ResultSelector::JobId(job_id) => results
            .iter()
            .position(|r| &r.job_id == job_id)
            .ok_or_else(|| ReportError::NotFound(format!("result '{job_id}'")))?,
        ResultSelector::Index(0) => {
            return Err(ReportError::InvalidArgument(
                "index is 1-based".to_string(),
            ));
        }
        ResultSelector::Index(index) => {
            if *index > results.len() {
                return Err(ReportError::NotFound(format!(
                    "result #{index} (listing has {})",
                    results.len()
                )));
            }
            index - 1
        }
    };

    let result = results
        .into_iter()
        .nth(position)
        .ok_or_else(|| ReportError::NotFound(format!("result #{}", position + 1)))?;
    Ok((position + 1, result))
}
