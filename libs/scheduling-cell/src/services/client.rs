// libs/scheduling-cell/src/services/client.rs
use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, warn};

use shared_config::AppConfig;

use crate::models::{EventType, Schedule};

/// Provider calls must not block the page beyond this bound. On timeout the
/// result degrades to empty rather than being retried.
const PROVIDER_TIMEOUT: Duration = Duration::from_secs(2);

/// Slots endpoint requires this version header.
const SLOTS_API_VERSION: &str = "2024-09-04";

/// Thin client for the Cal.com v2 API. All knowledge of the provider's JSON
/// shapes lives here; callers only see `EventType`, `Schedule` and raw
/// timestamps. Every failure is logged and converted to an empty result so
/// the page always renders something.
pub struct CalClient {
    client: Client,
    base_url: String,
    api_key: String,
    booking_origin: String,
    username: String,
}

// Cal.com v2 wraps every payload in { "data": ... }.
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventTypeGroups {
    #[serde(default)]
    event_type_groups: Vec<EventTypeGroup>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventTypeGroup {
    #[serde(default)]
    event_types: Vec<RawEventType>,
}

#[derive(Deserialize)]
struct RawEventType {
    id: i64,
    title: String,
    slug: String,
    description: Option<String>,
    length: i32,
    #[serde(default)]
    hidden: bool,
    #[serde(default)]
    metadata: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct RawSlot {
    start: DateTime<Utc>,
}

impl CalClient {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(PROVIDER_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.cal_api_base_url.clone(),
            api_key: config.cal_api_key.clone(),
            booking_origin: config.cal_booking_origin.clone(),
            username: config.cal_username.clone(),
        }
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", self.api_key)) {
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }

    async fn get_json<T>(&self, path: &str, extra_headers: Option<HeaderMap>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        if self.api_key.is_empty() {
            // Fatal configuration error, surfaced at the point of use. The
            // caller degrades to an empty result so the page still renders.
            return Err(anyhow!("CAL_API_KEY is not configured"));
        }

        let url = format!("{}{}", self.base_url, path);
        debug!("Making request to {}", url);

        let mut headers = self.headers();
        if let Some(extra) = extra_headers {
            headers.extend(extra);
        }

        let response = self.client.get(&url).headers(headers).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Cal.com API error ({}): {}", status, error_text));
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    fn booking_url(&self, slug: &str) -> String {
        format!("{}/{}/{}", self.booking_origin, self.username, slug)
    }

    /// Fetch all event types for the authenticated user. The v2 API nests
    /// them as `{ data: { eventTypeGroups: [{ eventTypes: [...] }] } }`.
    pub async fn fetch_event_types(&self) -> Vec<EventType> {
        match self
            .get_json::<Envelope<EventTypeGroups>>("/event-types", None)
            .await
        {
            Ok(envelope) => envelope
                .data
                .event_type_groups
                .into_iter()
                .flat_map(|group| group.event_types)
                .map(|et| EventType {
                    booking_url: self.booking_url(&et.slug),
                    id: et.id,
                    title: et.title,
                    slug: et.slug,
                    description: et.description,
                    length: et.length,
                    hidden: et.hidden,
                    metadata: et.metadata,
                })
                .collect(),
            Err(e) => {
                error!("Error fetching event types: {e:#}");
                Vec::new()
            }
        }
    }

    /// Fetch a single event type by id. Failure yields `None`.
    pub async fn fetch_event_type(&self, event_type_id: i64) -> Option<EventType> {
        let path = format!("/event-types/{event_type_id}");
        match self.get_json::<Envelope<RawEventType>>(&path, None).await {
            Ok(envelope) => {
                let et = envelope.data;
                Some(EventType {
                    booking_url: self.booking_url(&et.slug),
                    id: et.id,
                    title: et.title,
                    slug: et.slug,
                    description: et.description,
                    length: et.length,
                    hidden: et.hidden,
                    metadata: et.metadata,
                })
            }
            Err(e) => {
                error!("Error fetching event type {event_type_id}: {e:#}");
                None
            }
        }
    }

    /// Fetch the user's schedules.
    pub async fn fetch_schedules(&self) -> Vec<Schedule> {
        match self
            .get_json::<Envelope<Vec<Schedule>>>("/schedules", None)
            .await
        {
            Ok(envelope) => envelope.data,
            Err(e) => {
                error!("Error fetching schedules: {e:#}");
                Vec::new()
            }
        }
    }

    /// Fetch free slots for an event type over a date range. The v2 slots API
    /// returns `{ data: { "2025-09-05": [{ start: "..." }], ... } }`; the
    /// flattened timestamps are returned sorted ascending.
    pub async fn fetch_slots(
        &self,
        event_type_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<DateTime<Utc>> {
        let path = format!(
            "/slots?eventTypeId={}&start={}&end={}",
            event_type_id,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
        );

        let mut extra = HeaderMap::new();
        extra.insert("cal-api-version", HeaderValue::from_static(SLOTS_API_VERSION));

        match self
            .get_json::<Envelope<BTreeMap<String, Vec<RawSlot>>>>(&path, Some(extra))
            .await
        {
            Ok(envelope) => {
                let mut slots: Vec<DateTime<Utc>> = envelope
                    .data
                    .into_values()
                    .flatten()
                    .map(|slot| slot.start)
                    .collect();
                slots.sort_unstable();
                slots
            }
            Err(e) => {
                warn!("Error fetching slots for event type {event_type_id}: {e:#}");
                Vec::new()
            }
        }
    }
}
