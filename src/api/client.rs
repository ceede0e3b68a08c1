//! HTTP client for the persons backend

use super::error::ApiError;
use super::models::{Dni, NewPerson, Person, PersonId, PersonQuery};
use anyhow::{Context, Result};
use reqwest::{Response, Url};
use serde::Deserialize;

/// Error body the backend sends on failed writes
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Thin async client over the backend REST endpoints
///
/// Cheap to clone: the inner `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the given base URL (e.g. `http://127.0.0.1:5000/api`)
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid backend URL '{}'", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Backend URL '{}' cannot be used as a base", base_url);
        }

        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `GET /status`: Ok if the backend answered 2xx
    pub async fn check_status(&self) -> Result<(), ApiError> {
        let response = self.client.get(self.endpoint(&["status"])).send().await?;
        ensure_success(response).await.map(|_| ())
    }

    /// `GET /personas?q=..&trabajo=..`
    pub async fn list_personas(&self, query: &PersonQuery) -> Result<Vec<Person>, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&["personas"]))
            .query(&query.params())
            .send()
            .await?;

        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// `GET /personas/dni/<dni>`: `Ok(None)` when the backend answers 404
    pub async fn find_by_dni(&self, dni: &Dni) -> Result<Option<Person>, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&["personas", "dni", dni.as_str()]))
            .send()
            .await?;

        match ensure_success(response).await {
            Ok(response) => Ok(Some(response.json().await?)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// `POST /personas`
    ///
    /// Returns the created person when the backend echoes it back. A success
    /// status with an unexpected body still counts as created.
    pub async fn create_persona(&self, person: &NewPerson) -> Result<Option<Person>, ApiError> {
        let response = self
            .client
            .post(self.endpoint(&["personas"]))
            .json(person)
            .send()
            .await?;

        let response = ensure_success(response).await?;
        let body = response.bytes().await?;
        match serde_json::from_slice::<Person>(&body) {
            Ok(created) => Ok(Some(created)),
            Err(e) => {
                tracing::debug!("Create response body not a person: {}", e);
                Ok(None)
            }
        }
    }

    /// `DELETE /personas/<id>`
    pub async fn delete_persona(&self, id: &PersonId) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.endpoint(&["personas", id.as_str()]))
            .send()
            .await?;

        ensure_success(response).await.map(|_| ())
    }
}

/// Turn non-2xx responses into `ApiError::Status`, keeping the `{error}` text
async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .ok()
        .and_then(|text| serde_json::from_str::<ErrorBody>(&text).ok())
        .map(|body| body.error);

    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{Trabajo, TrabajoFilter};
    use crate::demo::DemoBackend;

    fn ana(dni: &str) -> NewPerson {
        NewPerson {
            dni: dni.to_string(),
            nombre: "Ana".to_string(),
            apellido: "Diaz".to_string(),
            trabajo: Trabajo::Salud,
        }
    }

    #[test]
    fn test_endpoint_keeps_base_path_and_encodes_segments() {
        let client = ApiClient::new("http://127.0.0.1:5000/api").unwrap();
        assert_eq!(
            client.endpoint(&["personas", "dni", "123"]).as_str(),
            "http://127.0.0.1:5000/api/personas/dni/123"
        );
        assert_eq!(
            client.endpoint(&["personas", "a/b c"]).as_str(),
            "http://127.0.0.1:5000/api/personas/a%2Fb%20c"
        );

        let trailing = ApiClient::new("http://localhost:5000/api/").unwrap();
        assert_eq!(
            trailing.endpoint(&["status"]).as_str(),
            "http://localhost:5000/api/status"
        );
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(ApiClient::new("not a url").is_err());
        assert!(ApiClient::new("mailto:someone@example.com").is_err());
    }

    #[tokio::test]
    async fn test_status_reflects_backend_availability() {
        let backend = DemoBackend::new();
        let server = backend.spawn("127.0.0.1:0").await.unwrap();
        let client = ApiClient::new(&server.base_url()).unwrap();

        assert!(client.check_status().await.is_ok());

        backend.set_online(false);
        let err = client.check_status().await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_status_network_error_when_nothing_listens() {
        // Bind then drop to get a port with no listener
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(&format!("http://{}/api", addr)).unwrap();
        let err = client.check_status().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn test_find_by_dni_maps_404_to_none() {
        let backend = DemoBackend::new();
        let server = backend.spawn("127.0.0.1:0").await.unwrap();
        let client = ApiClient::new(&server.base_url()).unwrap();

        let dni = Dni::parse("12345678").unwrap();
        assert_eq!(client.find_by_dni(&dni).await.unwrap(), None);

        let created = client.create_persona(&ana("12345678")).await.unwrap();
        let created = created.expect("demo backend echoes the created person");
        assert_eq!(created.dni, "12345678");

        let found = client.find_by_dni(&dni).await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.trabajo, Trabajo::Salud);
    }

    #[tokio::test]
    async fn test_create_duplicate_surfaces_server_error_text() {
        let backend = DemoBackend::new();
        let server = backend.spawn("127.0.0.1:0").await.unwrap();
        let client = ApiClient::new(&server.base_url()).unwrap();

        client.create_persona(&ana("555")).await.unwrap();
        let err = client.create_persona(&ana("555")).await.unwrap_err();

        assert!(matches!(err, ApiError::Status { status: 409, .. }));
        assert_eq!(err.user_text(), "El DNI '555' ya está registrado.");
    }

    #[tokio::test]
    async fn test_list_sends_query_parameters_verbatim() {
        let backend = DemoBackend::new();
        let server = backend.spawn("127.0.0.1:0").await.unwrap();
        let client = ApiClient::new(&server.base_url()).unwrap();

        client.create_persona(&ana("1")).await.unwrap();
        client
            .create_persona(&NewPerson {
                dni: "2".to_string(),
                nombre: "Bruno".to_string(),
                apellido: "Paz".to_string(),
                trabajo: Trabajo::Caja,
            })
            .await
            .unwrap();

        let all = client
            .list_personas(&PersonQuery::from_filters("", TrabajoFilter::Todos, 3))
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let cajas = client
            .list_personas(&PersonQuery::from_filters(
                "",
                TrabajoFilter::Only(Trabajo::Caja),
                3,
            ))
            .await
            .unwrap();
        assert_eq!(cajas.len(), 1);
        assert_eq!(cajas[0].nombre, "Bruno");

        let searched = client
            .list_personas(&PersonQuery::from_filters("bru", TrabajoFilter::Todos, 3))
            .await
            .unwrap();
        assert_eq!(searched.len(), 1);

        let requests = backend.requests();
        assert!(requests.contains(&"GET /personas?q=&trabajo=todos".to_string()));
        assert!(requests.contains(&"GET /personas?q=&trabajo=caja".to_string()));
        assert!(requests.contains(&"GET /personas?q=bru&trabajo=todos".to_string()));
    }

    #[tokio::test]
    async fn test_delete_removes_only_that_id() {
        let backend = DemoBackend::new();
        let server = backend.spawn("127.0.0.1:0").await.unwrap();
        let client = ApiClient::new(&server.base_url()).unwrap();

        let first = client.create_persona(&ana("1")).await.unwrap().unwrap();
        client.create_persona(&ana("2")).await.unwrap();

        client.delete_persona(&first.id).await.unwrap();
        let remaining = client
            .list_personas(&PersonQuery::from_filters("", TrabajoFilter::Todos, 3))
            .await
            .unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].dni, "2");

        let err = client.delete_persona(&first.id).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
