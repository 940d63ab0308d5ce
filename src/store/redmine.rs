// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Redmine REST implementation of [`DocumentStore`].

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    path::encode_segment, AttachmentRef, DocumentPath, DocumentStore, DocumentUpdate,
    TransportError, UpdateBody, UploadToken,
};
use crate::config::EditorConfig;
use crate::model::{AttachmentRecord, HostDocument};

pub const API_KEY_HEADER: &str = "X-Redmine-API-Key";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    upload: UploadBody,
}

#[derive(Debug, Deserialize)]
struct UploadBody {
    token: String,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct WithAttachments {
    #[serde(default)]
    attachments: Vec<AttachmentRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum AttachmentsEnvelope {
    WikiPage(WithAttachments),
    Issue(WithAttachments),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum UpdateRequest<'a> {
    WikiPage {
        text: &'a str,
        comments: &'a str,
        uploads: &'a [AttachmentRef],
    },
    Issue {
        description: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        notes: Option<&'a str>,
        private_notes: bool,
        uploads: &'a [AttachmentRef],
    },
}

impl<'a> UpdateRequest<'a> {
    fn from_update(update: &'a DocumentUpdate) -> Self {
        match &update.body {
            UpdateBody::WikiPage { text, comments } => Self::WikiPage {
                text,
                comments,
                uploads: &update.attachments,
            },
            UpdateBody::Issue {
                description,
                notes,
                private_notes,
            } => Self::Issue {
                description,
                notes: notes.as_deref(),
                private_notes: *private_notes,
                uploads: &update.attachments,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct RedmineStore {
    client: Client,
    base: Url,
    api_key: Option<String>,
}

impl RedmineStore {
    pub fn new(base: Url, api_key: Option<String>) -> Self {
        Self::with_client(Client::new(), base, api_key)
    }

    pub fn with_client(client: Client, base: Url, api_key: Option<String>) -> Self {
        Self {
            client,
            base,
            api_key,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Result<Self, TransportError> {
        let base = Url::parse(&config.redmine_base())
            .map_err(|err| TransportError::network(format!("invalid redmine_url: {err}")))?;
        Ok(Self::new(base, config.credential()))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.api_key {
            Some(key) => builder.header(API_KEY_HEADER, key),
            None => builder,
        }
    }

    fn document_url(&self, path: &DocumentPath) -> Result<Url, TransportError> {
        path.json_url(&self.base).map_err(TransportError::network)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, TransportError> {
        let response = builder
            .send()
            .await
            .map_err(|err| TransportError::network(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let errors = serde_json::from_str::<ErrorBody>(&body)
            .unwrap_or_default()
            .errors;
        let reason = status.canonical_reason().unwrap_or("request failed");
        Err(TransportError::http(status.as_u16(), errors, reason))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        include: &str,
    ) -> Result<T, TransportError> {
        let response = self
            .send(self.request(Method::GET, url).query(&[("include", include)]))
            .await?;
        response
            .json()
            .await
            .map_err(|err| TransportError::network(format!("invalid response body: {err}")))
    }
}

impl DocumentStore for RedmineStore {
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<UploadToken, TransportError> {
        let url = self
            .base
            .join("uploads.json")
            .map_err(|err| TransportError::network(err.to_string()))?;
        debug!(filename, size = bytes.len(), "uploading diagram");

        let response = self
            .send(
                self.request(Method::POST, url)
                    .query(&[("filename", filename)])
                    .header(CONTENT_TYPE, "application/octet-stream")
                    .body(bytes),
            )
            .await?;
        let body: UploadResponse = response
            .json()
            .await
            .map_err(|err| TransportError::network(format!("invalid upload response: {err}")))?;
        Ok(UploadToken(body.upload.token))
    }

    async fn fetch_document(
        &self,
        path: &DocumentPath,
        include_journals: bool,
    ) -> Result<HostDocument, TransportError> {
        let url = self.document_url(path)?;
        let include = if include_journals { "journals" } else { "" };
        self.get_json(url, include).await
    }

    async fn update_document(
        &self,
        path: &DocumentPath,
        update: &DocumentUpdate,
    ) -> Result<(), TransportError> {
        let url = self.document_url(path)?;
        debug!(%path, "updating document");
        self.send(
            self.request(Method::PUT, url)
                .json(&UpdateRequest::from_update(update)),
        )
        .await?;
        Ok(())
    }

    async fn fetch_attachments(
        &self,
        path: &DocumentPath,
    ) -> Result<Vec<AttachmentRecord>, TransportError> {
        let url = self.document_url(path)?;
        let envelope: AttachmentsEnvelope = self.get_json(url, "attachments").await?;
        let (AttachmentsEnvelope::WikiPage(inner) | AttachmentsEnvelope::Issue(inner)) = envelope;
        Ok(inner.attachments)
    }

    async fn put_external(
        &self,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), TransportError> {
        let url = self
            .base
            .join(&format!("dmsf/webdav/{}", encode_segment(name)))
            .map_err(|err| TransportError::network(err.to_string()))?;
        debug!(name, size = bytes.len(), "storing diagram in external store");

        self.send(
            self.request(Method::PUT, url)
                .header(CONTENT_TYPE, content_type)
                .body(bytes),
        )
        .await?;
        Ok(())
    }
}
