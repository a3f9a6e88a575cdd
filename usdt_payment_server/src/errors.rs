use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use log::error;
use thiserror::Error;
use usdt_payment_engine::{CollectionError, DashboardError, WalletPaymentError};

const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred. Please try again later.";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("{0}")]
    NoRecordFound(String),
    #[error("{0}")]
    InsufficientPermissions(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InsufficientPermissions(_) => StatusCode::FORBIDDEN,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Server-side failures are logged in full, but the caller only sees a generic message.
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = if status.is_server_error() {
            error!("💻️ {self}");
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        };
        HttpResponse::build(status)
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": message }).to_string())
    }
}

impl From<CollectionError> for ServerError {
    fn from(e: CollectionError) -> Self {
        match e {
            CollectionError::StoreNotFound(_) => Self::NoRecordFound(e.to_string()),
            CollectionError::NotAuthorized(_) |
            CollectionError::DestinationMismatch |
            CollectionError::TransactionNotOwned(_) => Self::InsufficientPermissions(e.to_string()),
            CollectionError::PaymentWalletNotConfigured |
            CollectionError::InvalidTransactionId(_) |
            CollectionError::ZeroBalance |
            CollectionError::CollectionInProgress => Self::ValidationError(e.to_string()),
            CollectionError::InvalidAmount(_) |
            CollectionError::DatabaseError(_) |
            CollectionError::ExecutionServiceError(_) => Self::BackendError(e.to_string()),
        }
    }
}

impl From<WalletPaymentError> for ServerError {
    fn from(e: WalletPaymentError) -> Self {
        match e {
            WalletPaymentError::StoreNotFound(_) |
            WalletPaymentError::MemberNotFound { .. } |
            WalletPaymentError::PaymentNotFound(_) => Self::NoRecordFound(e.to_string()),
            WalletPaymentError::NotPaymentOwner(_) => Self::InsufficientPermissions(e.to_string()),
            WalletPaymentError::PaymentWalletNotConfigured |
            WalletPaymentError::InvalidWalletAddress(_) |
            WalletPaymentError::InvalidAmount |
            WalletPaymentError::InvalidTransactionHash(_) |
            WalletPaymentError::AlreadyConfirmed(_) => Self::ValidationError(e.to_string()),
            WalletPaymentError::DatabaseError(_) => Self::BackendError(e.to_string()),
        }
    }
}

impl From<DashboardError> for ServerError {
    fn from(e: DashboardError) -> Self {
        match e {
            DashboardError::StoreNotFound(_) => Self::NoRecordFound(e.to_string()),
            DashboardError::DatabaseError(_) | DashboardError::ExecutionServiceError(_) => {
                Self::BackendError(e.to_string())
            },
        }
    }
}
