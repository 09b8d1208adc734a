//! Amadeus travel-data client: flight, hotel and places search.
//!
//! The API authenticates with OAuth2 client credentials; a fresh token is
//! requested per operation (no token cache, matching the no-caching policy
//! of the rest of the server). Operations return explicit results and the
//! report functions pattern-match them into the user-facing strings.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::AmadeusConfig;

/// Flight and hotel reports show at most this many offers.
const OFFER_LIMIT: usize = 3;
/// Places reports show at most this many locations.
const PLACE_LIMIT: usize = 5;

/// Failure raised by an Amadeus call. The `Display` form is what ends up
/// inside the "Error fetching ..." tool messages.
#[derive(Debug, Error)]
pub enum AmadeusError {
    /// Connection error, timeout, or undecodable body
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response from the provider
    #[error("[{status}] {detail}")]
    Api { status: u16, detail: String },
}

/// Amadeus API client with constructor-injected, immutable credentials
pub struct AmadeusClient {
    client: Client,
    base_url: String,
    client_id: String,
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Every Amadeus collection endpoint wraps its results in `data`.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

/// One flight offer; segment and price fields are required by the upstream
/// schema, so a missing field fails deserialization and surfaces as a
/// provider error.
#[derive(Debug, Deserialize)]
pub struct FlightOffer {
    pub itineraries: Vec<Itinerary>,
    pub price: Price,
}

#[derive(Debug, Deserialize)]
pub struct Itinerary {
    pub segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
pub struct Segment {
    #[serde(rename = "carrierCode")]
    pub carrier_code: String,
    pub number: String,
    pub departure: SegmentEndpoint,
    pub arrival: SegmentEndpoint,
}

#[derive(Debug, Deserialize)]
pub struct SegmentEndpoint {
    #[serde(rename = "iataCode")]
    pub iata_code: String,
}

#[derive(Debug, Deserialize)]
pub struct Price {
    pub total: String,
    pub currency: String,
}

impl FlightOffer {
    /// One-line summary: first-segment carrier and number, route from the
    /// first departure to the last arrival, then the offer price. An offer
    /// with no segments yields `None` and is skipped.
    pub fn summary(&self) -> Option<String> {
        let itinerary = self.itineraries.first()?;
        let first = itinerary.segments.first()?;
        let last = itinerary.segments.last()?;
        Some(format!(
            "{} {}: {} → {} | Price: {} {}",
            first.carrier_code,
            first.number,
            first.departure.iata_code,
            last.arrival.iata_code,
            self.price.total,
            self.price.currency,
        ))
    }
}

/// One hotel offer with its nightly rate options
#[derive(Debug, Deserialize)]
pub struct HotelOffer {
    pub hotel: Hotel,
    pub offers: Vec<RoomOffer>,
}

#[derive(Debug, Deserialize)]
pub struct Hotel {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RoomOffer {
    pub price: Price,
}

impl HotelOffer {
    /// One-line summary using the first room offer's price. A hotel with no
    /// offers yields `None` and is skipped.
    pub fn summary(&self) -> Option<String> {
        let offer = self.offers.first()?;
        Some(format!(
            "{} | {} {}",
            self.hotel.name, offer.price.total, offer.price.currency
        ))
    }
}

/// Safety-rated location; all fields are optional upstream
#[derive(Debug, Default, Deserialize)]
pub struct PlaceRecord {
    pub category: Option<String>,
    pub name: Option<String>,
    pub score: Option<f64>,
}

impl PlaceRecord {
    pub fn summary(&self) -> String {
        let score = self
            .score
            .map_or_else(|| "N/A".to_string(), |s| s.to_string());
        format!(
            "{} - {} (Rating: {})",
            self.category.as_deref().unwrap_or("N/A"),
            self.name.as_deref().unwrap_or("Unknown"),
            score,
        )
    }
}

/// Generic location record from the reference-data search
#[derive(Debug, Deserialize)]
pub struct CityRecord {
    pub name: Option<String>,
}

impl AmadeusClient {
    /// Create a new client
    pub fn new(config: &AmadeusConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(format!("tripkit/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }
    }

    /// Exchange the client credentials for a bearer token.
    async fn access_token(&self) -> Result<String, AmadeusError> {
        let url = format!("{}/v1/security/oauth2/token", self.base_url);
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        let response = self.client.post(&url).form(&params).send().await?;
        let response = check_status(response).await?;
        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    /// Authenticated GET returning the unwrapped `data` collection.
    async fn get_data<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, AmadeusError> {
        let token = self.access_token().await?;
        debug!(url, "calling Amadeus API");
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;
        let response = check_status(response).await?;
        let envelope: DataEnvelope<T> = response.json().await?;
        Ok(envelope.data)
    }

    /// Search flight offers between two IATA location codes on a date.
    pub async fn flight_offers(
        &self,
        origin: &str,
        destination: &str,
        date: &str,
        adults: u32,
    ) -> Result<Vec<FlightOffer>, AmadeusError> {
        let url = format!("{}/v2/shopping/flight-offers", self.base_url);
        let query = [
            ("originLocationCode", origin.to_string()),
            ("destinationLocationCode", destination.to_string()),
            ("departureDate", date.to_string()),
            ("adults", adults.to_string()),
        ];
        self.get_data(&url, &query).await
    }

    /// Search hotel offers in a city for a stay window.
    pub async fn hotel_offers(
        &self,
        city_code: &str,
        checkin: &str,
        checkout: &str,
        adults: u32,
    ) -> Result<Vec<HotelOffer>, AmadeusError> {
        let url = format!("{}/v2/shopping/hotel-offers", self.base_url);
        let query = [
            ("cityCode", city_code.to_string()),
            ("checkInDate", checkin.to_string()),
            ("checkOutDate", checkout.to_string()),
            ("adults", adults.to_string()),
        ];
        self.get_data(&url, &query).await
    }

    /// Search safety-rated locations for a city code.
    pub async fn safety_rated_locations(
        &self,
        city_code: &str,
    ) -> Result<Vec<PlaceRecord>, AmadeusError> {
        let url = format!("{}/v1/safety/safety-rated-locations", self.base_url);
        let query = [("cityCode", city_code.to_string())];
        self.get_data(&url, &query).await
    }

    /// Generic city lookup by keyword.
    pub async fn city_search(&self, keyword: &str) -> Result<Vec<CityRecord>, AmadeusError> {
        let url = format!("{}/v1/reference-data/locations", self.base_url);
        let query = [
            ("keyword", keyword.to_string()),
            ("subType", "CITY".to_string()),
        ];
        self.get_data(&url, &query).await
    }
}

/// Map a non-2xx response into `AmadeusError::Api` with the most useful
/// detail the body offers.
async fn check_status(response: Response) -> Result<Response, AmadeusError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AmadeusError::Api {
        status: status.as_u16(),
        detail: extract_error_detail(&body),
    })
}

/// Amadeus error bodies look like `{"errors":[{"title":..,"detail":..}]}`.
/// Fall back to the raw text when the shape is anything else.
fn extract_error_detail(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(default)]
        errors: Vec<ErrorIssue>,
    }

    #[derive(Deserialize)]
    struct ErrorIssue {
        title: Option<String>,
        detail: Option<String>,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(issue) = parsed.errors.first() {
            if let Some(text) = issue.detail.as_deref().or(issue.title.as_deref()) {
                return text.to_string();
            }
        }
    }

    if body.is_empty() {
        "no error detail".to_string()
    } else {
        body.to_string()
    }
}

/// Flight search report: first three offers, one line each.
pub async fn flights_report(
    client: &AmadeusClient,
    origin: &str,
    destination: &str,
    date: &str,
    adults: u32,
) -> String {
    match client
        .flight_offers(origin, destination, date, adults)
        .await
    {
        Ok(offers) => offers
            .iter()
            .take(OFFER_LIMIT)
            .filter_map(FlightOffer::summary)
            .collect::<Vec<_>>()
            .join("\n"),
        Err(err) => format!("Error fetching flights: {err}"),
    }
}

/// Hotel search report: first three offers, one line each.
pub async fn hotels_report(
    client: &AmadeusClient,
    city_code: &str,
    checkin: &str,
    checkout: &str,
    adults: u32,
) -> String {
    match client
        .hotel_offers(city_code, checkin, checkout, adults)
        .await
    {
        Ok(hotels) => hotels
            .iter()
            .take(OFFER_LIMIT)
            .filter_map(HotelOffer::summary)
            .collect::<Vec<_>>()
            .join("\n"),
        Err(err) => format!("Error fetching hotels: {err}"),
    }
}

/// Places report with a two-level fallback: safety-rated locations first,
/// then a plain city search under the same code. Any failure left after
/// both levels collapses into one fixed message.
pub async fn places_report(client: &AmadeusClient, city_code: &str) -> String {
    match client.safety_rated_locations(city_code).await {
        Ok(places) => places
            .iter()
            .take(PLACE_LIMIT)
            .map(PlaceRecord::summary)
            .collect::<Vec<_>>()
            .join("\n"),
        Err(err) => {
            warn!(error = %err, "rated-locations lookup failed, falling back to city search");
            let fallback = client
                .city_search(city_code)
                .await
                .ok()
                .and_then(|cities| cities.into_iter().next())
                .and_then(|city| city.name);
            match fallback {
                Some(name) => format!("Found location: {name}"),
                None => "Unable to fetch places.".to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flight_summary_uses_first_and_last_segment() {
        let offer: FlightOffer = serde_json::from_value(json!({
            "itineraries": [{
                "segments": [
                    {"carrierCode": "KL", "number": "642", "departure": {"iataCode": "JFK"}, "arrival": {"iataCode": "AMS"}},
                    {"carrierCode": "KL", "number": "1233", "departure": {"iataCode": "AMS"}, "arrival": {"iataCode": "CDG"}}
                ]
            }],
            "price": {"total": "812.20", "currency": "USD"}
        }))
        .unwrap();
        assert_eq!(
            offer.summary().unwrap(),
            "KL 642: JFK → CDG | Price: 812.20 USD"
        );
    }

    #[test]
    fn test_flight_summary_skips_empty_itineraries() {
        let offer: FlightOffer = serde_json::from_value(json!({
            "itineraries": [],
            "price": {"total": "1.00", "currency": "USD"}
        }))
        .unwrap();
        assert!(offer.summary().is_none());
    }

    #[test]
    fn test_flight_offer_requires_price_fields() {
        let result: Result<FlightOffer, _> = serde_json::from_value(json!({
            "itineraries": [],
            "price": {"total": "10.00"}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_hotel_summary_uses_first_offer() {
        let hotel: HotelOffer = serde_json::from_value(json!({
            "hotel": {"name": "Hotel Le Six"},
            "offers": [
                {"price": {"total": "210.00", "currency": "EUR"}},
                {"price": {"total": "340.00", "currency": "EUR"}}
            ]
        }))
        .unwrap();
        assert_eq!(hotel.summary().unwrap(), "Hotel Le Six | 210.00 EUR");
    }

    #[test]
    fn test_hotel_summary_without_offers_is_skipped() {
        let hotel: HotelOffer = serde_json::from_value(json!({
            "hotel": {"name": "Empty Inn"},
            "offers": []
        }))
        .unwrap();
        assert!(hotel.summary().is_none());
    }

    #[test]
    fn test_place_summary_defaults_missing_fields() {
        let place: PlaceRecord = serde_json::from_value(json!({})).unwrap();
        assert_eq!(place.summary(), "N/A - Unknown (Rating: N/A)");
    }

    #[test]
    fn test_place_summary_renders_fields() {
        let place: PlaceRecord = serde_json::from_value(json!({
            "category": "SIGHTS",
            "name": "Louvre",
            "score": 92
        }))
        .unwrap();
        assert_eq!(place.summary(), "SIGHTS - Louvre (Rating: 92)");
    }

    #[test]
    fn test_error_detail_prefers_structured_body() {
        let detail =
            extract_error_detail(r#"{"errors":[{"title":"Bad","detail":"Invalid city code"}]}"#);
        assert_eq!(detail, "Invalid city code");
    }

    #[test]
    fn test_error_detail_falls_back_to_title() {
        let detail = extract_error_detail(r#"{"errors":[{"title":"RATE LIMITED"}]}"#);
        assert_eq!(detail, "RATE LIMITED");
    }

    #[test]
    fn test_error_detail_falls_back_to_raw_text() {
        assert_eq!(extract_error_detail("gateway timeout"), "gateway timeout");
        assert_eq!(extract_error_detail(""), "no error detail");
    }

    #[test]
    fn test_api_error_display() {
        let err = AmadeusError::Api {
            status: 400,
            detail: "Invalid city code".to_string(),
        };
        assert_eq!(err.to_string(), "[400] Invalid city code");
    }
}
