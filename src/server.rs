//! MCP tool surface: request schemas, routing and dispatch.
//!
//! Each tool wraps one report or planner function and always answers with
//! text. Failures were already rendered into strings further down, so no
//! tool here needs error handling of its own.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router,
};
use serde::Deserialize;

use crate::amadeus::{self, AmadeusClient};
use crate::config::AppConfig;
use crate::planning;
use crate::weather::{self, NwsClient};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetAlertsRequest {
    /// Two-letter US state code (e.g. CA, NY)
    pub state: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetForecastRequest {
    /// Latitude of the location
    pub latitude: f64,
    /// Longitude of the location
    pub longitude: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetFlightsRequest {
    /// IATA code for departure (e.g. 'NYC')
    pub from_city: String,
    /// IATA code for destination (e.g. 'LON')
    pub to_city: String,
    /// Departure date (YYYY-MM-DD)
    pub date: String,
    /// Number of adult passengers
    #[serde(default = "default_flight_adults")]
    pub adults: u32,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetHotelsRequest {
    /// IATA or Amadeus code for the city (e.g. 'PAR')
    pub city_code: String,
    /// Check-in date (YYYY-MM-DD)
    pub checkin: String,
    /// Check-out date (YYYY-MM-DD)
    pub checkout: String,
    /// Number of adults
    #[serde(default = "default_hotel_adults")]
    pub adults: u32,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetPlacesRequest {
    /// IATA or Amadeus city code (e.g. 'PAR')
    pub city_code: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PlanBudgetRequest {
    /// Roundtrip flight cost
    pub flight_cost: f64,
    /// Total hotel cost (for all days)
    pub hotel_cost: f64,
    /// Estimated daily food expense
    pub daily_food: f64,
    /// Number of days
    pub days: i64,
    /// Total cost for all activities (optional)
    #[serde(default)]
    pub activities_cost: f64,
    /// Local transport cost for entire trip (optional)
    #[serde(default)]
    pub transport_cost: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PlanLuggageRequest {
    /// Travel destination
    pub city: String,
    /// Number of travel days
    pub days: i64,
    /// Expected weather (hot, cold, rainy, mild)
    #[serde(default = "default_weather")]
    pub weather: String,
    /// Type of travel (leisure, business, adventure)
    #[serde(default = "default_travel_type")]
    pub travel_type: String,
}

fn default_flight_adults() -> u32 {
    1
}

fn default_hotel_adults() -> u32 {
    2
}

fn default_weather() -> String {
    "mild".to_string()
}

fn default_travel_type() -> String {
    "leisure".to_string()
}

fn text_result(text: String) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// The travel-planning MCP server. Clients share the two upstream clients;
/// no mutable state crosses invocations.
#[derive(Clone)]
pub struct TripServer {
    weather: Arc<NwsClient>,
    amadeus: Arc<AmadeusClient>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TripServer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            weather: Arc::new(NwsClient::new(&config.weather)),
            amadeus: Arc::new(AmadeusClient::new(&config.amadeus)),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Get weather alerts for a US state")]
    async fn get_alerts(
        &self,
        Parameters(req): Parameters<GetAlertsRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(weather::alerts_report(&self.weather, &req.state).await)
    }

    #[tool(description = "Get weather forecast for a location")]
    async fn get_forecast(
        &self,
        Parameters(req): Parameters<GetForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(weather::forecast_report(&self.weather, req.latitude, req.longitude).await)
    }

    #[tool(description = "Search for flight offers between two cities")]
    async fn get_flights(
        &self,
        Parameters(req): Parameters<GetFlightsRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(
            amadeus::flights_report(
                &self.amadeus,
                &req.from_city,
                &req.to_city,
                &req.date,
                req.adults,
            )
            .await,
        )
    }

    #[tool(description = "Search for hotel offers in a city")]
    async fn get_hotels(
        &self,
        Parameters(req): Parameters<GetHotelsRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(
            amadeus::hotels_report(
                &self.amadeus,
                &req.city_code,
                &req.checkin,
                &req.checkout,
                req.adults,
            )
            .await,
        )
    }

    #[tool(description = "Get top destination content (e.g. restaurants, sightseeing) for a city")]
    async fn get_places(
        &self,
        Parameters(req): Parameters<GetPlacesRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(amadeus::places_report(&self.amadeus, &req.city_code).await)
    }

    #[tool(description = "Estimate total trip cost with optional activity and transport budget")]
    async fn plan_budget(
        &self,
        Parameters(req): Parameters<PlanBudgetRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(planning::plan_budget(
            req.flight_cost,
            req.hotel_cost,
            req.daily_food,
            req.days,
            req.activities_cost,
            req.transport_cost,
        ))
    }

    #[tool(description = "Suggest a basic luggage packing list for a trip")]
    async fn plan_luggage(
        &self,
        Parameters(req): Parameters<PlanLuggageRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(planning::plan_luggage(
            &req.city,
            req.days,
            &req.weather,
            &req.travel_type,
        ))
    }
}

#[tool_handler]
impl ServerHandler for TripServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Travel planning tools: US weather alerts and forecasts, flight/hotel/places \
                 search via Amadeus, plus budget estimation and packing-list helpers. All tools \
                 answer with plain text."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}
