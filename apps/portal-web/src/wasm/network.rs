use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use portal_client_core::api::endpoint_url;
use portal_client_core::{
    HttpMethod, PortalRequest, PortalResponse, PortalTransport, RequestBody, TransportError,
};
use uuid::Uuid;

/// Browser fetch through `gloo-net`.
pub(super) struct GlooTransport {
    base_url: String,
}

impl GlooTransport {
    pub(super) fn new(base_url: String) -> Self {
        Self { base_url }
    }
}

fn map_network_error(error: gloo_net::Error) -> TransportError {
    TransportError::new(format!("network error: {error}"))
}

fn form_body(fields: &[(String, String)]) -> Result<String, TransportError> {
    let params = web_sys::UrlSearchParams::new()
        .map_err(|_| TransportError::new("failed to build form body"))?;
    for (name, value) in fields {
        params.append(name, value);
    }
    Ok(params.to_string().into())
}

#[async_trait(?Send)]
impl PortalTransport for GlooTransport {
    async fn execute(&self, request: PortalRequest) -> Result<PortalResponse, TransportError> {
        let url = endpoint_url(&self.base_url, request.path());
        let mut builder: RequestBuilder = match request.method() {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
        };
        builder = builder.header("x-request-id", &format!("req_{}", Uuid::new_v4().simple()));
        if let Some(token) = request.bearer.as_deref() {
            builder = builder.header("authorization", &format!("Bearer {token}"));
        }

        let prepared = match &request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Form(fields) => builder
                .header("content-type", "application/x-www-form-urlencoded")
                .body(form_body(fields)?),
            RequestBody::Json(value) => builder.json(value),
        }
        .map_err(|error| TransportError::new(format!("failed to build request: {error}")))?;

        let response = prepared.send().await.map_err(map_network_error)?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| TransportError::new(format!("failed to read response: {error}")))?;
        Ok(PortalResponse::new(status, body))
    }
}
