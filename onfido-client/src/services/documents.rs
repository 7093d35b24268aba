//! Document operations: upload, retrieval, listing and download.

use mime::Mime;
use reqwest::multipart::{Form, Part};
use reqwest::Url;

use super::client::{decode_json, Client};
use super::iter::{next_page_link, DocumentIter};
use crate::error::ClientError;
use crate::models::{Document, DocumentDownload, DocumentRequest, Documents};

impl Client {
    /// Upload a document file for an applicant.
    #[tracing::instrument(
        skip(self, request),
        fields(applicant_id = %request.applicant_id, document_type = %request.document_type)
    )]
    pub async fn upload_document(&self, request: DocumentRequest) -> Result<Document, ClientError> {
        let url = self.url(&["documents"])?;
        let form = upload_form(request)?;

        let document: Document = self
            .send_json("upload_document", self.post(&url).multipart(form))
            .await?;

        tracing::info!(
            document_id = %document.id,
            file_size = document.file_size,
            "Document uploaded"
        );

        Ok(document)
    }

    /// Fetch a single document by ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_document(&self, id: &str) -> Result<Document, ClientError> {
        let url = self.url(&["documents", id])?;
        self.send_json("get_document", self.get(&url)).await
    }

    /// Iterate over the documents of an applicant.
    ///
    /// Nothing is requested until the iterator is first advanced.
    pub fn list_documents(&self, applicant_id: &str) -> DocumentIter {
        let first_page = self.url(&["documents"]).map(|mut url| {
            url.query_pairs_mut().append_pair("applicant_id", applicant_id);
            url
        });

        DocumentIter::new(self.clone(), first_page)
    }

    /// Download the file behind a document, base64 encoded.
    #[tracing::instrument(skip(self))]
    pub async fn download_document(&self, id: &str) -> Result<DocumentDownload, ClientError> {
        let url = self.url(&["documents", id, "download"])?;
        let bytes = self
            .execute("download_document", self.get(&url), |response| async move {
                Ok::<_, ClientError>(response.bytes().await?)
            })
            .await?;

        tracing::info!(size = bytes.len(), "Document downloaded");

        Ok(DocumentDownload::from_bytes(&bytes))
    }

    /// Fetch one page of documents and the link to the following page.
    pub(crate) async fn fetch_documents_page(
        &self,
        url: &Url,
    ) -> Result<(Vec<Document>, Option<Url>), ClientError> {
        let (page, next) = self
            .execute("list_documents", self.get(url), |response| async move {
                let next = next_page_link(response.url(), response.headers());
                let page: Documents = decode_json("list_documents", response).await?;
                Ok::<_, ClientError>((page, next))
            })
            .await?;

        tracing::debug!(
            count = page.documents.len(),
            has_next = next.is_some(),
            "Fetched documents page"
        );

        Ok((page.documents, next))
    }
}

fn upload_form(request: DocumentRequest) -> Result<Form, ClientError> {
    let content_type = sniff_content_type(&request.file);
    let file_name = request
        .file_name
        .unwrap_or_else(|| default_file_name(&content_type));

    let file = Part::bytes(request.file)
        .file_name(file_name)
        .mime_str(content_type.as_ref())?;

    let mut form = Form::new()
        .text("applicant_id", request.applicant_id)
        .text("type", request.document_type.as_str());
    if let Some(side) = request.side {
        form = form.text("side", side.as_str());
    }

    Ok(form.part("file", file))
}

/// Guess the content type of an upload from its leading bytes.
pub fn sniff_content_type(bytes: &[u8]) -> Mime {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        mime::IMAGE_PNG
    } else if bytes.starts_with(b"\xff\xd8\xff") {
        mime::IMAGE_JPEG
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        mime::IMAGE_GIF
    } else if bytes.starts_with(b"%PDF-") {
        mime::APPLICATION_PDF
    } else {
        mime::APPLICATION_OCTET_STREAM
    }
}

fn default_file_name(content_type: &Mime) -> String {
    if *content_type == mime::APPLICATION_OCTET_STREAM {
        "document".to_string()
    } else {
        format!("document.{}", content_type.subtype())
    }
}
