//! National Weather Service client and weather report rendering.
//!
//! Alerts come from `{base}/alerts/active/area/{state}`; forecasts are a
//! two-stage lookup where `{base}/points/{lat},{lon}` resolves a coordinate
//! to its forecast-grid URL. Every report function is total: upstream
//! failures turn into fixed fallback text, never into errors.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;

use crate::config::WeatherConfig;
use crate::http;

const SECTION_SEPARATOR: &str = "\n---\n";
/// Forecast responses carry up to two weeks of periods; only the next few
/// are worth relaying to an agent.
const MAX_FORECAST_PERIODS: usize = 5;

/// National Weather Service API client
pub struct NwsClient {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl NwsClient {
    /// Create a new client
    pub fn new(config: &WeatherConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            user_agent: config.user_agent.clone(),
        }
    }

    /// The NWS API rejects requests without an identifying User-Agent.
    /// Headers are built fresh for every call.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&self.user_agent) {
            headers.insert(USER_AGENT, value);
        }
        headers.insert(ACCEPT, HeaderValue::from_static("application/geo+json"));
        headers
    }

    /// Fetch active alerts for a two-letter US state code.
    pub async fn active_alerts(&self, state: &str) -> Option<AlertResponse> {
        let url = format!(
            "{}/alerts/active/area/{}",
            self.base_url,
            urlencoding::encode(state)
        );
        http::get_json(&self.client, &url, self.headers()).await
    }

    /// Resolve a coordinate to its forecast-grid metadata.
    pub async fn points(&self, latitude: f64, longitude: f64) -> Option<PointsResponse> {
        let url = format!("{}/points/{},{}", self.base_url, latitude, longitude);
        http::get_json(&self.client, &url, self.headers()).await
    }

    /// Fetch a forecast document from a grid URL returned by `points`.
    pub async fn forecast(&self, url: &str) -> Option<ForecastResponse> {
        http::get_json(&self.client, url, self.headers()).await
    }
}

/// GeoJSON envelope for active alerts
#[derive(Debug, Deserialize)]
pub struct AlertResponse {
    pub features: Option<Vec<AlertFeature>>,
}

/// One alert record from the NWS feed
#[derive(Debug, Default, Deserialize)]
pub struct AlertFeature {
    #[serde(default)]
    pub properties: AlertProperties,
}

/// Alert fields; all optional in the upstream schema
#[derive(Debug, Default, Deserialize)]
pub struct AlertProperties {
    pub event: Option<String>,
    #[serde(rename = "areaDesc")]
    pub area_desc: Option<String>,
    pub severity: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
}

/// Points endpoint response; carries the grid forecast URL
#[derive(Debug, Deserialize)]
pub struct PointsResponse {
    pub properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
pub struct PointsProperties {
    pub forecast: String,
}

/// Grid forecast response
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
pub struct ForecastProperties {
    #[serde(default)]
    pub periods: Vec<ForecastPeriod>,
}

/// One forecast period (e.g. "Tonight", "Saturday")
#[derive(Debug, Default, Deserialize)]
pub struct ForecastPeriod {
    pub name: Option<String>,
    pub temperature: Option<f64>,
    #[serde(rename = "temperatureUnit")]
    pub temperature_unit: Option<String>,
    #[serde(rename = "windSpeed")]
    pub wind_speed: Option<String>,
    #[serde(rename = "windDirection")]
    pub wind_direction: Option<String>,
    #[serde(rename = "detailedForecast")]
    pub detailed_forecast: Option<String>,
}

/// Render one alert into the fixed five-line block. Total over any
/// combination of missing fields.
pub fn format_alert(feature: &AlertFeature) -> String {
    let props = &feature.properties;
    format!(
        "\nEvent: {}\nArea: {}\nSeverity: {}\nDescription: {}\nInstructions: {}\n",
        props.event.as_deref().unwrap_or("Unknown"),
        props.area_desc.as_deref().unwrap_or("Unknown"),
        props.severity.as_deref().unwrap_or("Unknown"),
        props
            .description
            .as_deref()
            .unwrap_or("No description available"),
        props
            .instruction
            .as_deref()
            .unwrap_or("No specific instructions provided"),
    )
}

/// Render one forecast period into the fixed four-line block.
pub fn format_period(period: &ForecastPeriod) -> String {
    let temperature = period
        .temperature
        .map_or_else(|| "Unknown".to_string(), |t| t.to_string());
    format!(
        "\n{}:\nTemperature: {}°{}\nWind: {} {}\nForecast: {}\n",
        period.name.as_deref().unwrap_or("Unknown"),
        temperature,
        period.temperature_unit.as_deref().unwrap_or(""),
        period.wind_speed.as_deref().unwrap_or("Unknown"),
        period.wind_direction.as_deref().unwrap_or(""),
        period
            .detailed_forecast
            .as_deref()
            .unwrap_or("No forecast available"),
    )
}

/// Active-alerts report for a US state. Every feature is rendered in source
/// order; nothing is truncated.
pub async fn alerts_report(client: &NwsClient, state: &str) -> String {
    let Some(features) = client
        .active_alerts(state)
        .await
        .and_then(|data| data.features)
    else {
        return "Unable to fetch alerts or no alerts found.".to_string();
    };

    if features.is_empty() {
        return "No active alerts for this state.".to_string();
    }

    features
        .iter()
        .map(format_alert)
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR)
}

/// Forecast report for a coordinate pair. The points lookup and the grid
/// fetch fail with distinct messages so an agent can tell them apart.
pub async fn forecast_report(client: &NwsClient, latitude: f64, longitude: f64) -> String {
    let Some(points) = client.points(latitude, longitude).await else {
        return "Unable to fetch forecast data for this location.".to_string();
    };

    let Some(forecast) = client.forecast(&points.properties.forecast).await else {
        return "Unable to fetch detailed forecast.".to_string();
    };

    forecast
        .properties
        .periods
        .iter()
        .take(MAX_FORECAST_PERIODS)
        .map(format_period)
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR)
}
