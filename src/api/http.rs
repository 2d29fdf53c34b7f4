//! HTTP implementation of the admin API

use super::{AdminApi, ApiError};
use crate::models::{
    ActivityLogEntry, MetricsSnapshot, ProtoMapping, ProtoMappingDraft, RequestLogEntry,
    ResourceId, Route, RouteDraft, ServerLogEntry, Service, ServiceDraft, TraceEntry,
};
use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Admin API client backed by `reqwest`
#[derive(Clone)]
pub struct HttpAdminClient {
    client: reqwest::Client,
    base: Url,
}

impl HttpAdminClient {
    /// Create a client for the gateway at `base_url`
    ///
    /// Every request is bounded by `timeout`, so a hung call settles as a
    /// transport failure.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base = Url::parse(base_url.trim()).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                message: format!("unsupported scheme '{}'", base.scheme()),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::transport(base_url, e))?;

        tracing::debug!("Created admin client for: {} (timeout {:?})", base, timeout);

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Build `<base>/admin/<segments...>`, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl {
                url: self.base.to_string(),
                message: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .push("admin")
            .extend(segments);
        Ok(url)
    }

    /// Send a request and return the body text of a 2xx response
    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<String, ApiError> {
        tracing::debug!("{} {}", method, url);

        let mut req = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::transport(url.as_str(), e))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::transport(url.as_str(), e))?;

        if !status.is_success() {
            return Err(ApiError::Status {
                method: method.to_string(),
                url: url.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }

    async fn get_list<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<Vec<T>, ApiError> {
        let url = self.endpoint(segments)?;
        let text = self.execute::<()>(Method::GET, url.clone(), None).await?;
        decode_or_default(url.as_str(), &text)
    }

    async fn send_record<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        let text = self.execute(method, url.clone(), Some(body)).await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    async fn delete(&self, collection: &str, id: ResourceId) -> Result<(), ApiError> {
        let id = id.to_string();
        let url = self.endpoint(&[collection, &id])?;
        self.execute::<()>(Method::DELETE, url, None).await?;
        Ok(())
    }
}

/// Decode a body, treating an empty or `null` payload as the default value
fn decode_or_default<T>(url: &str, text: &str) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(T::default());
    }
    serde_json::from_str(trimmed).map_err(|e| ApiError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

#[async_trait]
impl AdminApi for HttpAdminClient {
    async fn list_services(&self) -> Result<Vec<Service>, ApiError> {
        self.get_list(&["services"]).await
    }

    async fn create_service(&self, draft: &ServiceDraft) -> Result<Service, ApiError> {
        self.send_record(Method::POST, &["services"], draft).await
    }

    async fn update_service(
        &self,
        id: ResourceId,
        draft: &ServiceDraft,
    ) -> Result<Service, ApiError> {
        self.send_record(Method::PUT, &["services", &id.to_string()], draft)
            .await
    }

    async fn delete_service(&self, id: ResourceId) -> Result<(), ApiError> {
        self.delete("services", id).await
    }

    async fn list_routes(&self) -> Result<Vec<Route>, ApiError> {
        self.get_list(&["routes"]).await
    }

    async fn create_route(&self, draft: &RouteDraft) -> Result<Route, ApiError> {
        self.send_record(Method::POST, &["routes"], draft).await
    }

    async fn update_route(&self, id: ResourceId, draft: &RouteDraft) -> Result<Route, ApiError> {
        self.send_record(Method::PUT, &["routes", &id.to_string()], draft)
            .await
    }

    async fn delete_route(&self, id: ResourceId) -> Result<(), ApiError> {
        self.delete("routes", id).await
    }

    async fn list_proto_mappings(&self) -> Result<Vec<ProtoMapping>, ApiError> {
        self.get_list(&["proto-mappings"]).await
    }

    async fn create_proto_mapping(
        &self,
        draft: &ProtoMappingDraft,
    ) -> Result<ProtoMapping, ApiError> {
        self.send_record(Method::POST, &["proto-mappings"], draft)
            .await
    }

    async fn update_proto_mapping(
        &self,
        id: ResourceId,
        draft: &ProtoMappingDraft,
    ) -> Result<ProtoMapping, ApiError> {
        self.send_record(Method::PUT, &["proto-mappings", &id.to_string()], draft)
            .await
    }

    async fn delete_proto_mapping(&self, id: ResourceId) -> Result<(), ApiError> {
        self.delete("proto-mappings", id).await
    }

    async fn metrics(&self) -> Result<MetricsSnapshot, ApiError> {
        let url = self.endpoint(&["metrics"])?;
        let text = self.execute::<()>(Method::GET, url.clone(), None).await?;
        decode_or_default(url.as_str(), &text)
    }

    async fn activity_logs(&self) -> Result<Vec<ActivityLogEntry>, ApiError> {
        self.get_list(&["logs"]).await
    }

    async fn request_logs(&self) -> Result<Vec<RequestLogEntry>, ApiError> {
        self.get_list(&["request-logs"]).await
    }

    async fn server_logs(&self) -> Result<Vec<ServerLogEntry>, ApiError> {
        self.get_list(&["server-logs"]).await
    }

    async fn traces(&self, request_id: &str) -> Result<Vec<TraceEntry>, ApiError> {
        self.get_list(&["traces", request_id]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> HttpAdminClient {
        HttpAdminClient::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_endpoint_at_root() {
        let c = client("http://localhost:8080");
        let url = c.endpoint(&["services"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/admin/services");
    }

    #[test]
    fn test_endpoint_under_prefix() {
        for base in ["http://gw.internal/console", "http://gw.internal/console/"] {
            let url = client(base).endpoint(&["routes", "12"]).unwrap();
            assert_eq!(url.as_str(), "http://gw.internal/console/admin/routes/12");
        }
    }

    #[test]
    fn test_trace_id_is_escaped() {
        let url = client("http://localhost:8080")
            .endpoint(&["traces", "a/b c"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/admin/traces/a%2Fb%20c");
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = HttpAdminClient::new("ftp://gw", Duration::from_secs(1))
            .err()
            .unwrap();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
    }

    #[test]
    fn test_null_and_empty_lists_decode_as_empty() {
        for body in ["", "  ", "null", "[]"] {
            let services: Vec<Service> = decode_or_default("u", body).unwrap();
            assert!(services.is_empty(), "body {:?}", body);
        }
    }

    #[test]
    fn test_malformed_list_is_decode_error() {
        let err = decode_or_default::<Vec<Service>>("u", "{\"oops\"").unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }
}
