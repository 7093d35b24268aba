//! Client for the Onfido identity verification API documents endpoints.
//!
//! ```ignore
//! use onfido_client::{Client, DocumentRequest, DocumentSide, DocumentType};
//!
//! let client = Client::from_env()?;
//! let request = DocumentRequest::new(applicant_id, std::fs::read("id.png")?, DocumentType::NationalIdentityCard)
//!     .side(DocumentSide::Front);
//! let document = client.upload_document(request).await?;
//! let download = client.download_document(&document.id).await?;
//! ```
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::ClientConfig;
pub use error::{ApiError, ApiErrorDetail, ClientError};
pub use models::{
    Document, DocumentDownload, DocumentRequest, DocumentSide, DocumentType, Documents,
};
pub use services::{Client, DocumentIter};
