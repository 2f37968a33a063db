use async_trait::async_trait;
use serde::de::DeserializeOwned;

use apihub_core::{PropertySet, Tenant};
use apihub_registry::{
    ApiArtifactEntry, RegistryError, RegistryResource, RegistryStore, TenantDirectory,
};

/// Registry client for the hub's admin API.
pub struct HttpRegistry {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpRegistry {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    fn admin_url(&self, path: &str) -> String {
        format!("{}/admin/api/{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let mut req = self.http.request(method, url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req.header("Accept", "application/json")
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RegistryError> {
        let resp = self
            .request(reqwest::Method::GET, url)
            .send()
            .await
            .map_err(|e| RegistryError::connection(e.to_string()))?;
        read_json(resp).await
    }
}

#[async_trait]
impl RegistryStore for HttpRegistry {
    async fn list_api_artifacts(
        &self,
        tenant: &Tenant,
    ) -> Result<Vec<ApiArtifactEntry>, RegistryError> {
        let url = self.admin_url(&format!("tenants/{}/artifacts", tenant.domain));
        let resp = self
            .request(reqwest::Method::GET, &url)
            .send()
            .await
            .map_err(|e| RegistryError::connection(e.to_string()))?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::unknown_tenant(&tenant.domain));
        }
        read_json(resp).await
    }

    async fn resource_exists(&self, tenant: &Tenant, path: &str) -> Result<bool, RegistryError> {
        let url = self.admin_url(&format!("tenants/{}/resource", tenant.domain));
        let resp = self
            .request(reqwest::Method::HEAD, &url)
            .query(&[("path", path)])
            .send()
            .await
            .map_err(|e| RegistryError::connection(e.to_string()))?;
        match resp.status() {
            status if status.is_success() => Ok(true),
            reqwest::StatusCode::NOT_FOUND => Ok(false),
            status => Err(RegistryError::backend(format!("HTTP {status}"))),
        }
    }

    async fn get_resource(
        &self,
        tenant: &Tenant,
        path: &str,
    ) -> Result<Option<RegistryResource>, RegistryError> {
        let url = self.admin_url(&format!("tenants/{}/resource", tenant.domain));
        let resp = self
            .request(reqwest::Method::GET, &url)
            .query(&[("path", path)])
            .send()
            .await
            .map_err(|e| RegistryError::connection(e.to_string()))?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        read_json(resp).await.map(Some)
    }

    async fn put_resource(
        &self,
        tenant: &Tenant,
        path: &str,
        properties: PropertySet,
    ) -> Result<(), RegistryError> {
        let url = self.admin_url(&format!("tenants/{}/resource", tenant.domain));
        let resp = self
            .request(reqwest::Method::PUT, &url)
            .query(&[("path", path)])
            .header("Content-Type", "application/json")
            .json(&properties)
            .send()
            .await
            .map_err(|e| RegistryError::connection(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RegistryError::backend(format!("HTTP {status}: {body}")));
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}

#[async_trait]
impl TenantDirectory for HttpRegistry {
    async fn tenants(&self) -> Result<Vec<Tenant>, RegistryError> {
        self.get_json(&self.admin_url("tenants")).await
    }
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, RegistryError> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| RegistryError::connection(e.to_string()))?;

    if !status.is_success() {
        return Err(RegistryError::backend(format!("HTTP {status}: {body}")));
    }

    serde_json::from_str(&body)
        .map_err(|e| RegistryError::backend(format!("Failed to parse response JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let registry = HttpRegistry::new("https://hub.example.com/", None);
        assert_eq!(
            registry.admin_url("tenants"),
            "https://hub.example.com/admin/api/tenants"
        );
    }
}
