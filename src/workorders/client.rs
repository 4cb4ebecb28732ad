use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response};
use std::time::Duration;

use super::{RateLimit, UpdateReceipt, WorkOrderApi, WorkOrderApiError};
use crate::config::Config;
use crate::models::{DueDateUpdate, WorkOrderEnvelope, WorkOrderSnapshot};

/// Header scoping requests to one organization
pub const ORGANIZATION_HEADER: &str = "x-organization-id";

/// Work order API client over HTTPS
pub struct HttpWorkOrderClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    organization_id: Option<u64>,
}

impl HttpWorkOrderClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        organization_id: Option<u64>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            organization_id,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.api_base_url,
            &config.api_key,
            config.organization_id,
            Duration::from_secs(config.http_timeout_secs),
        )
    }

    fn request(&self, method: Method, id: u64) -> RequestBuilder {
        let request = self
            .client
            .request(method, format!("{}/workorders/{}", self.base_url, id))
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key));

        match self.organization_id {
            Some(org) => request.header(ORGANIZATION_HEADER, org.to_string()),
            None => request,
        }
    }

    async fn check(resp: Response) -> Result<Response, WorkOrderApiError> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status().as_u16();
        let rate_limit = RateLimit::from_headers(resp.headers());
        let body = resp.text().await.unwrap_or_default();
        Err(WorkOrderApiError::Status {
            status,
            body,
            rate_limit,
        })
    }
}

#[async_trait]
impl WorkOrderApi for HttpWorkOrderClient {
    async fn get_work_order(&self, id: u64) -> Result<WorkOrderSnapshot, WorkOrderApiError> {
        let resp = self.request(Method::GET, id).send().await?;
        let envelope: WorkOrderEnvelope = Self::check(resp).await?.json().await?;
        Ok(envelope.work_order)
    }

    async fn update_due_date(
        &self,
        id: u64,
        due_date: &str,
    ) -> Result<UpdateReceipt, WorkOrderApiError> {
        let resp = self
            .request(Method::PATCH, id)
            .json(&DueDateUpdate {
                due_date: due_date.to_string(),
            })
            .send()
            .await?;
        let resp = Self::check(resp).await?;

        Ok(UpdateReceipt {
            status: resp.status().as_u16(),
            rate_limit: RateLimit::from_headers(resp.headers()),
        })
    }
}
