pub use mango_types::MAX_PICTURE_BYTES;
use mango_types::{
    validate_picture, CreateSessionRequest, EdfFile, LoginRequest, Patient, ProfileUpdate,
    RegisterPatientRequest, RegisterScientistRequest, Scientist, Session,
};
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{upstream_detail, GatewayError, Result};

/// Tokens and profile handed out by `POST /scientists/login`.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginGrant {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub scientist: Option<Scientist>,
}

/// Generic acknowledgement carrying an optional message.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Ack {
    pub message: Option<String>,
    pub registration_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Many(Vec<T>),
    Keyed {
        #[serde(
            alias = "data",
            alias = "patients",
            alias = "sessions",
            alias = "files"
        )]
        items: Vec<T>,
    },
    One(T),
}

/// Records decode with every field defaulted, so a bare object only counts as
/// a listing entry when it names something.
trait Identified {
    fn is_identified(&self) -> bool;
}

impl Identified for Patient {
    fn is_identified(&self) -> bool {
        !self.id.is_empty() || !self.patient_iid.is_empty()
    }
}

impl Identified for Session {
    fn is_identified(&self) -> bool {
        !self.id.is_empty() || !self.file_path.is_empty() || !self.file_name.is_empty()
    }
}

impl Identified for EdfFile {
    fn is_identified(&self) -> bool {
        !self.path.is_empty() || !self.name.is_empty()
    }
}

impl<T: Identified> Listing<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Many(items) | Listing::Keyed { items } => items,
            Listing::One(item) if item.is_identified() => vec![item],
            Listing::One(_) => Vec::new(),
        }
    }
}

/// File ids become one path segment of the upstream URL.
fn path_segment(value: &str) -> Result<&str> {
    let value = value.trim();
    let unsafeChar = |c: char| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_control();
    if value.is_empty() || value == "." || value == ".." || value.contains(unsafeChar) {
        return Err(GatewayError::InvalidInput(format!(
            "Identificador de arquivo inválido: {value}"
        )));
    }
    Ok(value)
}

#[derive(Deserialize)]
struct ScientistEnvelope {
    scientist: Scientist,
}

#[derive(Serialize)]
struct ScientistRegistration<'a> {
    email: &'a str,
    password: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    institution: &'a str,
    specialization: &'a str,
}

#[derive(Serialize)]
struct PatientRegistration<'a> {
    cpf: &'a str,
    password: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    birth_date: &'a str,
    gender: &'a str,
    scientist: &'a str,
}

#[derive(Serialize)]
struct EdfProcessing<'a> {
    patient_iid: &'a str,
    session_name: &'a str,
    file_path: &'a str,
}

/// Image attached to a profile update.
#[derive(Clone, Debug)]
pub struct PictureUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PictureUpload {
    pub fn validate(&self) -> std::result::Result<(), String> {
        validate_picture(&self.content_type, self.bytes.len())
    }
}

/// HTTP client for the MANGO gateway. Every method performs exactly one
/// upstream call; nothing is retried or cached.
#[derive(Clone, Debug)]
pub struct GatewayClient {
    http: reqwest::Client,
    baseUrl: String,
}

impl GatewayClient {
    pub fn new(baseUrl: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), baseUrl)
    }

    pub fn with_client(http: reqwest::Client, baseUrl: impl Into<String>) -> Self {
        let baseUrl = baseUrl.into().trim_end_matches('/').to_string();
        Self { http, baseUrl }
    }

    pub fn base_url(&self) -> &str {
        &self.baseUrl
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.baseUrl, path.trim_start_matches('/'))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = upstream_detail(status.as_u16(), &body);
            warn!(status = status.as_u16(), "gateway rejected request: {detail}");
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                detail,
            });
        }

        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(body).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginGrant> {
        debug!("POST /scientists/login for {}", credentials.email);
        self.send(self.http.post(self.url("scientists/login")).json(credentials))
            .await
    }

    pub async fn logout(&self, accessToken: &str, refreshToken: &str) -> Result<()> {
        let _: serde_json::Value = self
            .send(
                self.http
                    .post(self.url("scientists/logout"))
                    .bearer_auth(accessToken)
                    .json(&serde_json::json!({ "refresh_token": refreshToken })),
            )
            .await?;
        Ok(())
    }

    pub async fn register_scientist(&self, req: &RegisterScientistRequest) -> Result<Ack> {
        let payload = ScientistRegistration {
            email: &req.email,
            password: &req.password,
            first_name: &req.first_name,
            last_name: &req.last_name,
            institution: &req.institution,
            specialization: &req.specialization,
        };
        self.send(self.http.post(self.url("scientists/register")).json(&payload))
            .await
    }

    pub async fn profile(&self, accessToken: &str) -> Result<Scientist> {
        let envelope: ScientistEnvelope = self
            .send(
                self.http
                    .get(self.url("scientists/profile"))
                    .bearer_auth(accessToken),
            )
            .await?;
        Ok(envelope.scientist)
    }

    pub async fn update_profile(
        &self,
        accessToken: &str,
        update: &ProfileUpdate,
        picture: Option<PictureUpload>,
    ) -> Result<Scientist> {
        let mut form = Form::new();
        for (name, value) in update.fields() {
            form = form.text(name, value);
        }
        if let Some(picture) = picture {
            let part = Part::bytes(picture.bytes)
                .file_name(picture.file_name)
                .mime_str(&picture.content_type)?;
            form = form.part("profile_picture", part);
        }

        let envelope: ScientistEnvelope = self
            .send(
                self.http
                    .patch(self.url("scientists/update"))
                    .bearer_auth(accessToken)
                    .multipart(form),
            )
            .await?;
        Ok(envelope.scientist)
    }

    pub async fn list_patients(&self, accessToken: &str) -> Result<Vec<Patient>> {
        let listing: Listing<Patient> = self
            .send(
                self.http
                    .get(self.url("patients/list"))
                    .bearer_auth(accessToken),
            )
            .await?;
        Ok(listing.into_vec())
    }

    pub async fn register_patient(
        &self,
        accessToken: &str,
        scientistId: &str,
        req: &RegisterPatientRequest,
    ) -> Result<Ack> {
        let payload = PatientRegistration {
            cpf: &req.cpf,
            password: &req.password,
            first_name: &req.first_name,
            last_name: &req.last_name,
            birth_date: &req.birth_date,
            gender: &req.gender,
            scientist: scientistId,
        };
        self.send(
            self.http
                .post(self.url("patients/register"))
                .bearer_auth(accessToken)
                .json(&payload),
        )
        .await
    }

    pub async fn discover_edf_files(&self, accessToken: &str) -> Result<Vec<EdfFile>> {
        let listing: Listing<EdfFile> = self
            .send(
                self.http
                    .get(self.url("filters/discover"))
                    .bearer_auth(accessToken),
            )
            .await?;
        Ok(listing.into_vec())
    }

    /// Queues an EDF file for processing; the gateway's answer is relayed as-is.
    pub async fn process_edf_file(
        &self,
        accessToken: &str,
        req: &CreateSessionRequest,
    ) -> Result<serde_json::Value> {
        let payload = EdfProcessing {
            patient_iid: &req.patient_id,
            session_name: &req.session_name,
            file_path: &req.edf_file,
        };
        debug!("queueing {} for patient {}", req.edf_file, req.patient_id);
        self.send(
            self.http
                .post(self.url("edf_files/process-edf-file"))
                .bearer_auth(accessToken)
                .json(&payload),
        )
        .await
    }

    pub async fn list_sessions(&self, accessToken: &str) -> Result<Vec<Session>> {
        let listing: Listing<Session> = self
            .send(
                self.http
                    .get(self.url("edf_files/edf-files"))
                    .bearer_auth(accessToken),
            )
            .await?;
        Ok(listing.into_vec())
    }

    pub async fn show_session(&self, accessToken: &str, fileId: &str) -> Result<Session> {
        let fileId = path_segment(fileId)?;
        self.send(
            self.http
                .get(self.url(&format!("edf_files/edf-files/{fileId}")))
                .bearer_auth(accessToken),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> GatewayClient {
        GatewayClient::new(format!("{}/api/", server.uri()))
    }

    #[tokio::test]
    async fn login_posts_credentials_and_reads_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/scientists/login"))
            .and(body_json(serde_json::json!({
                "email": "ana@utfpr.edu.br",
                "password": "s3cret"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "access_token": "acc",
                "refresh_token": "ref",
                "scientist": { "id": "42", "email": "ana@utfpr.edu.br" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let grant = client_for(&server)
            .await
            .login(&LoginRequest {
                email: "ana@utfpr.edu.br".into(),
                password: "s3cret".into(),
            })
            .await
            .unwrap();

        assert_eq!(grant.access_token, "acc");
        assert_eq!(grant.refresh_token, "ref");
        assert_eq!(grant.scientist.unwrap().id, "42");
    }

    #[tokio::test]
    async fn upstream_errors_keep_status_and_detail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/patients/list"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(serde_json::json!({ "detail": "Token inválido" })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .list_patients("expired")
            .await
            .unwrap_err();

        assert_eq!(err.upstream_status(), Some(403));
        assert_eq!(err.to_string(), "Token inválido");
    }

    #[tokio::test]
    async fn patient_listing_unwraps_gateway_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/patients/list"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "scientist_id": "42",
                "patients": [
                    { "id": "1", "first_name": "Maria", "last_name": "Souza", "patient_iid": "Maria Souza_ab12cd" }
                ]
            })))
            .mount(&server)
            .await;

        let patients = client_for(&server).await.list_patients("tok").await.unwrap();
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].patient_iid, "Maria Souza_ab12cd");
    }

    #[tokio::test]
    async fn discovery_wraps_a_single_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/filters/discover"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "file_name": "S01.edf",
                "file_path": "/code/edf/S01.edf",
                "exists_on_disk": true
            })))
            .mount(&server)
            .await;

        let files = client_for(&server).await.discover_edf_files("tok").await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "/code/edf/S01.edf");
    }

    #[tokio::test]
    async fn session_creation_renames_fields_for_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/edf_files/process-edf-file"))
            .and(body_json(serde_json::json!({
                "patient_iid": "Maria Souza_ab12cd",
                "session_name": "baseline",
                "file_path": "/code/edf/S01.edf"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "status": "queued" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let answer = client_for(&server)
            .await
            .process_edf_file(
                "tok",
                &CreateSessionRequest {
                    patient_id: "Maria Souza_ab12cd".into(),
                    session_name: "baseline".into(),
                    edf_file: "/code/edf/S01.edf".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(answer["status"], "queued");
    }

    #[tokio::test]
    async fn unreachable_gateway_is_a_transport_error() {
        let client = GatewayClient::new("http://127.0.0.1:9/api");
        let err = client.profile("tok").await.unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_)));
        assert_eq!(err.upstream_status(), None);
    }

    #[test]
    fn picture_validation() {
        let mut picture = PictureUpload {
            file_name: "me.png".into(),
            content_type: "image/png".into(),
            bytes: vec![0; 1024],
        };
        assert!(picture.validate().is_ok());

        picture.content_type = "application/pdf".into();
        assert!(picture.validate().is_err());

        picture.content_type = "image/webp".into();
        picture.bytes = vec![0; MAX_PICTURE_BYTES + 1];
        assert_eq!(picture.validate().unwrap_err(), "A imagem deve ter no máximo 5MB");
    }

    #[tokio::test]
    async fn empty_data_envelope_is_an_empty_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/patients/list"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/edf_files/edf-files"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "message": "Nenhuma sessão"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.list_patients("tok").await.unwrap().is_empty());
        assert!(client.list_sessions("tok").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn data_envelope_carries_sessions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/edf_files/edf-files"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{ "id": 9, "session_name": "baseline" }]
            })))
            .mount(&server)
            .await;

        let sessions = client_for(&server).await.list_sessions("tok").await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, "9");
    }

    #[tokio::test]
    async fn session_ids_cannot_leave_their_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/patients/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        for fileId in ["../../patients/list", "..", "a/b", "x?y=1", "%2e%2e", ""] {
            let err = client.show_session("tok", fileId).await.unwrap_err();
            assert!(matches!(err, GatewayError::InvalidInput(_)), "{fileId}");
        }
    }

    #[tokio::test]
    async fn session_detail_uses_the_file_id_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/edf_files/edf-files/0f8c2a1e"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "0f8c2a1e",
                "session_name": "baseline"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = client_for(&server)
            .await
            .show_session("tok", "0f8c2a1e")
            .await
            .unwrap();
        assert_eq!(session.session_name, "baseline");
    }
}
