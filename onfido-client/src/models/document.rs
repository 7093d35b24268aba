use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of identity document.
///
/// Values the client does not know about decode as `Unknown`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Passport,
    NationalIdentityCard,
    DrivingLicence,
    UkBiometricResidencePermit,
    TaxId,
    VoterId,
    #[serde(other)]
    Unknown,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Passport => "passport",
            DocumentType::NationalIdentityCard => "national_identity_card",
            DocumentType::DrivingLicence => "driving_licence",
            DocumentType::UkBiometricResidencePermit => "uk_biometric_residence_permit",
            DocumentType::TaxId => "tax_id",
            DocumentType::VoterId => "voter_id",
            DocumentType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "passport" => Ok(DocumentType::Passport),
            "national_identity_card" => Ok(DocumentType::NationalIdentityCard),
            "driving_licence" => Ok(DocumentType::DrivingLicence),
            "uk_biometric_residence_permit" => Ok(DocumentType::UkBiometricResidencePermit),
            "tax_id" => Ok(DocumentType::TaxId),
            "voter_id" => Ok(DocumentType::VoterId),
            "unknown" => Ok(DocumentType::Unknown),
            _ => Err(format!("Invalid document type: {}", s)),
        }
    }
}

/// Which face of the document an image shows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DocumentSide {
    Front,
    Back,
}

impl DocumentSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentSide::Front => "front",
            DocumentSide::Back => "back",
        }
    }
}

impl fmt::Display for DocumentSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "front" => Ok(DocumentSide::Front),
            "back" => Ok(DocumentSide::Back),
            _ => Err(format!("Invalid document side: {}", s)),
        }
    }
}

/// A document as stored by the API.
///
/// Every field is optional on the wire; absent values decode to their
/// defaults and empty values are left out when serialising.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub href: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub download_href: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub file_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub file_type: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub file_size: u64,
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub document_type: Option<DocumentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<DocumentSide>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub applicant_id: String,
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

/// Envelope returned by the list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Documents {
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// Parameters for uploading a document file.
#[derive(Debug, Clone)]
pub struct DocumentRequest {
    pub applicant_id: String,
    pub file: Vec<u8>,
    /// Name sent with the file part; defaults to a name derived from the
    /// sniffed content type.
    pub file_name: Option<String>,
    pub document_type: DocumentType,
    pub side: Option<DocumentSide>,
}

impl DocumentRequest {
    pub fn new(
        applicant_id: impl Into<String>,
        file: impl Into<Vec<u8>>,
        document_type: DocumentType,
    ) -> Self {
        Self {
            applicant_id: applicant_id.into(),
            file: file.into(),
            file_name: None,
            document_type,
            side: None,
        }
    }

    pub fn side(mut self, side: DocumentSide) -> Self {
        self.side = Some(side);
        self
    }

    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }
}

/// Downloaded document content, base64 encoded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentDownload {
    pub data: String,
}

impl DocumentDownload {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            data: STANDARD.encode(bytes),
        }
    }

    /// Raw bytes of the downloaded file.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.data)
    }
}
