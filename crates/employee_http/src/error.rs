//! HTTP error mapping.
//!
//! # Invariants
//! - Only `DuplicateResource` reaches clients with its message (409).
//! - Every other failure becomes an opaque 500; details go to the log only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use employee_core::{RepoError, ServiceError};
use log::error;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// JSON body of every non-2xx response that carries one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable machine-readable kind: `duplicate_resource` | `internal`.
    pub error: String,
    pub message: String,
}

#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    /// The shared connection could not be used (poisoned lock).
    StorageUnavailable,
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(err) => write!(f, "{err}"),
            Self::StorageUnavailable => write!(f, "storage connection unavailable"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            Self::StorageUnavailable => None,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        Self::Service(value.into())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Service(ServiceError::DuplicateResource { .. }) => StatusCode::CONFLICT,
            Self::Service(ServiceError::Repo(_)) | Self::StorageUnavailable => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Service(err @ ServiceError::DuplicateResource { .. }) => ErrorBody {
                error: "duplicate_resource".to_string(),
                message: err.to_string(),
            },
            _ => {
                error!("event=http_error module=http status=error error={self}");
                ErrorBody {
                    error: "internal".to_string(),
                    message: "internal server error".to_string(),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use employee_core::{RepoError, ServiceError};

    #[test]
    fn duplicate_resource_maps_to_conflict() {
        let err = ApiError::from(ServiceError::DuplicateResource {
            email: "banana@gmail.com".to_string(),
        });
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn storage_level_duplicate_email_also_maps_to_conflict() {
        let err = ApiError::from(RepoError::DuplicateEmail("banana@gmail.com".to_string()));
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn other_failures_map_to_internal_error() {
        let err = ApiError::from(RepoError::InvalidData("bad row".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            ApiError::StorageUnavailable.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
