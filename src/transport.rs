//! reqwestによるTransport実装

use reqwest::multipart::{Form, Part};
use visionguide_common::{CandidateFile, Error, HttpReply, Result, Transport};

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> crate::error::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("visionguide/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpReply> {
        let response = self.client.get(url).send().await.map_err(transport_error)?;
        into_reply(response).await
    }

    async fn post_files(
        &self,
        url: &str,
        field: &str,
        files: &[CandidateFile],
    ) -> Result<HttpReply> {
        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.name.clone())
                .mime_str(&file.mime_type)
                .map_err(transport_error)?;
            form = form.part(field.to_string(), part);
        }

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;
        into_reply(response).await
    }
}

async fn into_reply(response: reqwest::Response) -> Result<HttpReply> {
    let status = response.status().as_u16();
    let body = response.text().await.map_err(transport_error)?;
    tracing::debug!(status, bytes = body.len(), "response received");
    Ok(HttpReply::new(status, body))
}

fn transport_error(e: reqwest::Error) -> Error {
    Error::Transport(e.to_string())
}
