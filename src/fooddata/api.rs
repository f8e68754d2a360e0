//! Blocking FoodData Central client
//!
//! Requires the `api-backend` feature. Every request carries the data.gov
//! key as the `api_key` query parameter.

use std::time::Duration;

use anyhow::Context;
use serde_json::Value;
use tracing::{debug, info};

use super::detail::FoodDetail;
use super::error::{FoodDataError, FoodDataResult};
use super::ingredients::IngredientEntry;
use super::search::{FoodDataType, FoodSearchCriteria, FoodSearchResponse};
use crate::config::{DEFAULT_API_BASE_URL, DatatransConfig, PLACEHOLDER_API_KEY};
use crate::schema::{ConstructOptions, DataClass};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the search and detail endpoints
pub struct FoodDataClient {
    base_url: String,
    api_key: String,
    options: ConstructOptions,
    client: reqwest::blocking::Client,
}

impl FoodDataClient {
    /// Client for the public API.
    ///
    /// A missing key or the `.env` placeholder is rejected here, before any
    /// request is made.
    pub fn new(api_key: impl Into<String>) -> FoodDataResult<Self> {
        Self::with_base_url(api_key, DEFAULT_API_BASE_URL)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> FoodDataResult<Self> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() || api_key == PLACEHOLDER_API_KEY {
            return Err(FoodDataError::InvalidApiKey);
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FoodDataError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            options: ConstructOptions::default(),
            client,
        })
    }

    pub fn from_config(config: &DatatransConfig) -> FoodDataResult<Self> {
        let api_key = config.usable_api_key().ok_or(FoodDataError::InvalidApiKey)?;
        Ok(Self::with_base_url(api_key, config.api_base_url.clone())?
            .with_options(config.construct_options()))
    }

    /// Options used to build response records
    pub fn with_options(mut self, options: ConstructOptions) -> Self {
        self.options = options;
        self
    }

    /// POST `{base}/search`
    pub fn search(&self, criteria: &FoodSearchCriteria) -> FoodDataResult<FoodSearchResponse> {
        let body = criteria.request_body()?;
        let url = format!("{}/search", self.base_url);
        debug!(url = %url, "Sending food search request");

        let response = self
            .client
            .post(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .json(&body)
            .send()
            .map_err(|e| FoodDataError::Network(format!("Failed to search foods: {}", e)))?;
        let value = read_json(response, &url)?;
        Ok(FoodSearchResponse::construct(value, &self.options)?)
    }

    /// GET `{base}/{fdc_id}`
    pub fn detail(&self, fdc_id: i64) -> FoodDataResult<FoodDetail> {
        let url = format!("{}/{}", self.base_url, fdc_id);
        debug!(url = %url, "Sending food detail request");

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .map_err(|e| FoodDataError::Network(format!("Failed to fetch food {}: {}", fdc_id, e)))?;
        let value = read_json(response, &url)?;
        FoodDetail::from_response(value, &self.options)
    }
}

fn read_json(response: reqwest::blocking::Response, url: &str) -> FoodDataResult<Value> {
    let status = response.status();
    if !status.is_success() {
        return Err(FoodDataError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    response
        .json()
        .map_err(|e| FoodDataError::Network(format!("Failed to read response from {}: {}", url, e)))
}

/// Page through SR Legacy search results and collect ingredient entries
pub fn collect_legacy_ingredients(
    client: &FoodDataClient,
    pages: u32,
) -> anyhow::Result<Vec<IngredientEntry>> {
    let mut entries = Vec::new();
    for page in 1..=pages {
        let criteria = FoodSearchCriteria::builder()
            .general_search_input("")
            .include(FoodDataType::Legacy)
            .page_number(i64::from(page))
            .build()
            .context("Failed to build search criteria")?;
        let response = client
            .search(&criteria)
            .with_context(|| format!("Failed to search page {}", page))?;
        entries.extend(
            response
                .foods()
                .iter()
                .filter_map(IngredientEntry::from_search_result),
        );
    }
    info!(count = entries.len(), pages, "Collected SR Legacy ingredients");
    Ok(entries)
}
