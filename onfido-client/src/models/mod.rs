pub mod document;

pub use document::{
    Document, DocumentDownload, DocumentRequest, DocumentSide, DocumentType, Documents,
};
