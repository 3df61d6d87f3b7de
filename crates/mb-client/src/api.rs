//! The server API adapter.
//!
//! One client implements every service port: the streamed path import, the
//! single-file upload, the render-fragment fetch, and tag completion. A
//! non-success status is surfaced as `TransportError::Status` carrying the
//! response text, which is exactly what the UI shows the user.

use async_trait::async_trait;
use futures_util::StreamExt;
use mb_core::{
    ports::{
        ByteStream, FileUploadPort, PathImportPort, PathImportRequest, RenderFragmentPort,
        TagCompletePort, TransportError, UploadFile, UploadFlags, UploadReceipt,
    },
    ItemId, RenderFragment,
};
use reqwest::{multipart, Client, Response, Url};
use tracing::debug;

/// HTTP implementation of the mediaboard service ports.
#[derive(Debug, Clone)]
pub struct HttpApi {
    base: Url,
    client: Client,
}

impl HttpApi {
    pub fn new(base: Url) -> Self {
        Self::with_client(base, Client::new())
    }

    pub fn with_client(base: Url, client: Client) -> Self {
        Self { base, client }
    }

    fn url(&self, path: &str) -> Result<Url, TransportError> {
        self.base
            .join(path)
            .map_err(|err| TransportError::Network(err.to_string()))
    }
}

/// Import parameters as the form fields the server expects.
fn import_form(request: &PathImportRequest) -> Vec<(&'static str, String)> {
    vec![
        ("path", request.path.clone()),
        ("del", request.delete_source.to_string()),
        ("fetchTags", request.fetch_tags.to_string()),
        ("storeName", request.store_name.to_string()),
        ("tagStr", request.tags.clone()),
    ]
}

fn network(err: reqwest::Error) -> TransportError {
    TransportError::Network(err.to_string())
}

/// Turn a non-success response into a `Status` error carrying the body text.
async fn check(response: Response) -> Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TransportError::Status {
        code: status.as_u16(),
        body,
    })
}

#[async_trait]
impl PathImportPort for HttpApi {
    async fn open_stream(
        &self,
        request: &PathImportRequest,
    ) -> Result<ByteStream, TransportError> {
        debug!(path = %request.path, "opening import stream");
        let response = self
            .client
            .post(self.url("api/import")?)
            .form(&import_form(request))
            .send()
            .await
            .map_err(network)?;
        let response = check(response).await?;
        Ok(Box::pin(
            response.bytes_stream().map(|chunk| chunk.map_err(network)),
        ))
    }
}

#[async_trait]
impl FileUploadPort for HttpApi {
    async fn upload(
        &self,
        file: &UploadFile,
        flags: &UploadFlags,
    ) -> Result<UploadReceipt, TransportError> {
        debug!(name = %file.name, bytes = file.bytes.len(), "uploading file");
        let mut form = multipart::Form::new().part(
            "file",
            multipart::Part::bytes(file.bytes.to_vec()).file_name(file.name.clone()),
        );
        if flags.fetch_tags {
            form = form.text("fetch_tags", "true");
        }
        if flags.store_name {
            form = form.text("store_name", "true");
        }

        let response = self
            .client
            .post(self.url("api/images/")?)
            .multipart(form)
            .send()
            .await
            .map_err(network)?;
        check(response).await?.json().await.map_err(network)
    }
}

#[async_trait]
impl RenderFragmentPort for HttpApi {
    async fn fetch(&self, id: &ItemId) -> Result<RenderFragment, TransportError> {
        let response = self
            .client
            .get(self.url(&format!("ajax/thumbnail/{id}"))?)
            .send()
            .await
            .map_err(network)?;
        let markup = check(response).await?.text().await.map_err(network)?;
        Ok(RenderFragment::from(markup))
    }
}

#[async_trait]
impl TagCompletePort for HttpApi {
    async fn complete(&self, prefix: &str) -> Result<Vec<String>, TransportError> {
        let response = self
            .client
            .get(self.url(&format!("api/complete_tag/{prefix}"))?)
            .send()
            .await
            .map_err(network)?;
        check(response).await?.json().await.map_err(network)
    }
}
