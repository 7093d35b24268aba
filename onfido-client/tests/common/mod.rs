use onfido_client::{Client, Document, DocumentSide, DocumentType};
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "123";
pub const TEST_APPLICANT_ID: &str = "541d040b-89f8-444b-8921-16b1333bf1c6";
pub const TEST_DOCUMENT_ID: &str = "ce62d838-56f8-4ea5-98be-e7166d1dc33d";
pub const ERROR_BODY: &str = "{\"error\": \"things went bad\"}";

pub struct TestApi {
    pub server: MockServer,
    pub client: Client,
}

impl TestApi {
    /// Start a mock API server and a client pointed at it.
    pub async fn spawn() -> Self {
        let server = MockServer::start().await;
        let client = Client::new(TEST_TOKEN)
            .expect("Failed to build client")
            .with_endpoint(server.uri());

        Self { server, client }
    }

    pub fn auth_header() -> String {
        format!("Token token={}", TEST_TOKEN)
    }
}

pub fn sample_document() -> Document {
    Document {
        id: TEST_DOCUMENT_ID.to_string(),
        created_at: None,
        href: "/v2/live_photos/7410A943-8F00-43D8-98DE-36A774196D86".to_string(),
        download_href: "/v2/live_photos/7410A943-8F00-43D8-98DE-36A774196D86/download"
            .to_string(),
        file_name: "localfile.png".to_string(),
        file_type: "png".to_string(),
        file_size: 282123,
        document_type: Some(DocumentType::Passport),
        side: Some(DocumentSide::Back),
        applicant_id: TEST_APPLICANT_ID.to_string(),
    }
}
