mod fixture;

use api_types::{
    employee::{Employee, EmployeeList},
    transaction::{PaginatedRequest, PaginatedResponse, RequestByEmployee, Transaction},
};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::error::{AppError, Result};

pub use fixture::FixtureProvider;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("server unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    fn from_status(status: StatusCode, body: String) -> Self {
        match status.as_u16() {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            400 | 422 => Self::Validation(body),
            _ => Self::Server(body),
        }
    }
}

/// Read side of the transactions backend.
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn employees(&self) -> std::result::Result<Vec<Employee>, ClientError>;

    async fn paginated_transactions(
        &self,
        page: Option<String>,
    ) -> std::result::Result<PaginatedResponse<Transaction>, ClientError>;

    async fn transactions_by_employee(
        &self,
        employee_id: &str,
    ) -> std::result::Result<Vec<Transaction>, ClientError>;
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Clone)]
pub struct HttpProvider {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        // `join` drops the last path segment unless the base ends with a slash.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|err| AppError::Terminal(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    async fn post<B, R>(&self, path: &str, payload: &B) -> std::result::Result<R, ClientError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned + Send,
    {
        let endpoint = self
            .base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))?;

        tracing::debug!("POST {endpoint}");
        let res = self.http.post(endpoint).json(payload).send().await?;

        let status = res.status();
        if status.is_success() {
            let bytes = res.bytes().await?;
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let body = res
            .json::<ErrorResponse>()
            .await
            .map(|err| err.error)
            .unwrap_or_else(|_| "unknown error".to_string());
        Err(ClientError::from_status(status, body))
    }
}

#[async_trait]
impl DataProvider for HttpProvider {
    async fn employees(&self) -> std::result::Result<Vec<Employee>, ClientError> {
        self.post("employees", &EmployeeList::default()).await
    }

    async fn paginated_transactions(
        &self,
        page: Option<String>,
    ) -> std::result::Result<PaginatedResponse<Transaction>, ClientError> {
        self.post("paginatedTransactions", &PaginatedRequest { page })
            .await
    }

    async fn transactions_by_employee(
        &self,
        employee_id: &str,
    ) -> std::result::Result<Vec<Transaction>, ClientError> {
        let payload = RequestByEmployee {
            employee_id: employee_id.to_string(),
        };
        self.post("transactionsByEmployee", &payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(matches!(
            ClientError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            ClientError::Unauthorized
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::NOT_FOUND, String::new()),
            ClientError::NotFound
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "bad id".to_string()),
            ClientError::Validation(msg) if msg == "bad id"
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_GATEWAY, "down".to_string()),
            ClientError::Server(msg) if msg == "down"
        ));
    }

    #[test]
    fn base_url_keeps_path_prefix() {
        let provider = HttpProvider::new("http://127.0.0.1:3000/api").unwrap();
        let endpoint = provider.base_url.join("employees").unwrap();
        assert_eq!(endpoint.as_str(), "http://127.0.0.1:3000/api/employees");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(HttpProvider::new("not a url").is_err());
    }
}
