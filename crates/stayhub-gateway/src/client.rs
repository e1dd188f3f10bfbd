use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use stayhub_core::{
    BookingGateway, CoreError, LocationGateway, MediaGateway, PropertyGateway, UploadFile,
};
use stayhub_domain::{
    Address, Booking, DistanceInfo, Document, GeoPoint, InventoryItem, PlacePrediction,
    PropertyDraft, PropertyRecord, PropertySummary,
};
use tracing::{debug, instrument, warn};

use crate::payload::{
    extract_error_message, extract_id, unwrap_data, DocumentsPayload, PropertyPayload,
    RoomTypePayload,
};
use crate::GatewayError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the marketplace REST backend.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        Self::with_options(base_url, None, DEFAULT_TIMEOUT)
    }

    pub fn with_options(
        base_url: impl Into<String>,
        auth_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and returns the body with any `data` envelope removed.
    async fn send(&self, builder: RequestBuilder) -> Result<Value, GatewayError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = extract_error_message(&body).unwrap_or_default();
            warn!(status = status.as_u16(), %message, "backend request failed");
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!(status = status.as_u16(), bytes = body.len(), "received response");
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(unwrap_data(serde_json::from_str(&body)?))
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, GatewayError> {
        let value = self.send(builder).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Accepts either a bare array or an object holding it under `field`.
    async fn fetch_list<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        field: &str,
    ) -> Result<Vec<T>, GatewayError> {
        let value = match self.send(builder).await? {
            Value::Object(mut map) => map.remove(field).unwrap_or(Value::Array(Vec::new())),
            Value::Null => Value::Array(Vec::new()),
            other => other,
        };
        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait]
impl PropertyGateway for HttpGateway {
    #[instrument(skip(self, draft), fields(category = %draft.category()))]
    async fn create_property(&self, draft: &PropertyDraft) -> Result<String, CoreError> {
        let builder = self
            .request(Method::POST, "properties")
            .json(&PropertyPayload::new(draft));
        let value = self.send(builder).await?;
        Ok(extract_id(&value, &["property"])?)
    }

    #[instrument(skip(self, draft))]
    async fn update_property(&self, id: &str, draft: &PropertyDraft) -> Result<(), CoreError> {
        let builder = self
            .request(Method::PUT, &format!("properties/{id}"))
            .json(&PropertyPayload::new(draft));
        self.send(builder).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_property(&self, id: &str) -> Result<PropertyRecord, CoreError> {
        let value = self
            .send(self.request(Method::GET, &format!("properties/{id}")))
            .await?;
        let value = match value {
            Value::Object(mut map) if map.contains_key("property") => {
                map.remove("property").unwrap_or(Value::Null)
            }
            other => other,
        };
        serde_json::from_value(value).map_err(|err| GatewayError::from(err).into())
    }

    #[instrument(skip(self))]
    async fn list_my_properties(&self) -> Result<Vec<PropertySummary>, CoreError> {
        Ok(self
            .fetch_list(self.request(Method::GET, "properties/mine"), "properties")
            .await?)
    }

    #[instrument(skip(self))]
    async fn delete_property(&self, id: &str) -> Result<(), CoreError> {
        self.send(self.request(Method::DELETE, &format!("properties/{id}")))
            .await?;
        Ok(())
    }

    #[instrument(skip(self, documents), fields(count = documents.len()))]
    async fn upsert_documents(
        &self,
        property_id: &str,
        documents: &[Document],
    ) -> Result<(), CoreError> {
        let builder = self
            .request(Method::POST, &format!("properties/{property_id}/documents"))
            .json(&DocumentsPayload { documents });
        self.send(builder).await?;
        Ok(())
    }

    #[instrument(skip(self, item), fields(name = %item.name))]
    async fn create_room_type(
        &self,
        property_id: &str,
        item: &InventoryItem,
    ) -> Result<String, CoreError> {
        let builder = self
            .request(Method::POST, &format!("properties/{property_id}/room-types"))
            .json(&RoomTypePayload::from(item));
        let value = self.send(builder).await?;
        Ok(extract_id(&value, &["roomType"])?)
    }

    #[instrument(skip(self, item))]
    async fn update_room_type(
        &self,
        property_id: &str,
        room_type_id: &str,
        item: &InventoryItem,
    ) -> Result<(), CoreError> {
        let builder = self
            .request(
                Method::PUT,
                &format!("properties/{property_id}/room-types/{room_type_id}"),
            )
            .json(&RoomTypePayload::from(item));
        self.send(builder).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_room_type(
        &self,
        property_id: &str,
        room_type_id: &str,
    ) -> Result<(), CoreError> {
        self.send(self.request(
            Method::DELETE,
            &format!("properties/{property_id}/room-types/{room_type_id}"),
        ))
        .await?;
        Ok(())
    }
}

#[async_trait]
impl LocationGateway for HttpGateway {
    #[instrument(skip(self))]
    async fn reverse_geocode(&self, point: GeoPoint) -> Result<Address, CoreError> {
        let builder = self
            .request(Method::GET, "geocode")
            .query(&[("lat", point.lat), ("lng", point.lng)]);
        Ok(self.fetch(builder).await?)
    }

    #[instrument(skip(self))]
    async fn search_places(&self, query: &str) -> Result<Vec<PlacePrediction>, CoreError> {
        let builder = self
            .request(Method::GET, "places/search")
            .query(&[("q", query)]);
        Ok(self.fetch_list(builder, "predictions").await?)
    }

    #[instrument(skip(self))]
    async fn distance(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<DistanceInfo, CoreError> {
        let builder = self.request(Method::GET, "distance").query(&[
            ("originLat", origin.lat),
            ("originLng", origin.lng),
            ("destLat", destination.lat),
            ("destLng", destination.lng),
        ]);
        Ok(self.fetch(builder).await?)
    }
}

#[async_trait]
impl MediaGateway for HttpGateway {
    #[instrument(skip(self, files), fields(count = files.len()))]
    async fn upload_images(&self, files: Vec<UploadFile>) -> Result<Vec<String>, CoreError> {
        let mut form = multipart::Form::new();
        for file in files {
            let part = multipart::Part::bytes(file.bytes)
                .file_name(file.name)
                .mime_str(&file.content_type)
                .map_err(GatewayError::from)?;
            form = form.part("images", part);
        }
        let builder = self.request(Method::POST, "images/upload").multipart(form);
        Ok(self.fetch_list(builder, "urls").await?)
    }
}

#[async_trait]
impl BookingGateway for HttpGateway {
    #[instrument(skip(self))]
    async fn my_bookings(&self) -> Result<Vec<Booking>, CoreError> {
        Ok(self
            .fetch_list(self.request(Method::GET, "bookings/mine"), "bookings")
            .await?)
    }
}
