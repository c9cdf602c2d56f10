//! # Auth Service エラー定義
//!
//! Auth Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## ステータスコードの対応
//!
//! - 認証情報のパース失敗（リクエスト不正）→ 400
//! - ストラテジ実行の失敗 → 500
//!
//! ストラテジ失敗は「認証拒否」と「バックエンド障害」を区別せず、
//! どちらも 500 として返す。バリアント自体は区別を保持しているため、
//! 将来 401/403 へ細分化する場合も変更はこの変換に閉じる。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use vigil_domain::auth::CredentialsError;
use vigil_infra::InfraError;
use vigil_shared::ErrorResponse;

/// Auth Service で発生するエラー
#[derive(Debug, Error)]
pub enum AuthError {
    /// リクエストボディの認証情報が不正
    #[error(transparent)]
    InvalidCredentials(#[from] CredentialsError),

    /// 選択されたストラテジが認証を拒否した
    #[error("認証に失敗しました")]
    AuthenticationFailed,

    /// 外部 IdP との通信・応答の失敗
    #[error("IdP エラー: {0}")]
    IdentityProvider(String),

    /// インフラエラー
    #[error("インフラエラー: {0}")]
    Infra(#[from] InfraError),

    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

// Keycloak ストラテジの通信エラーを IdP エラーとして扱う
impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::IdentityProvider(err.to_string())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AuthError::InvalidCredentials(e @ CredentialsError::Malformed(_)) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(e.to_string()))
            }
            AuthError::InvalidCredentials(e @ CredentialsError::MissingField(_)) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::validation_error(e.to_string()),
            ),
            AuthError::AuthenticationFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(
                    "authentication-failed",
                    "Authentication Failed",
                    500,
                    self.to_string(),
                ),
            ),
            AuthError::IdentityProvider(_) => {
                tracing::error!(
                    error.category = "external_service",
                    error.kind = "identity_provider",
                    "IdP との通信に失敗: {}",
                    self
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "identity-provider-error",
                        "Identity Provider Error",
                        500,
                        self.to_string(),
                    ),
                )
            }
            AuthError::Infra(e) => {
                tracing::error!(
                    error.category = "infrastructure",
                    "インフラエラー: {}",
                    e
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "internal-error",
                        "Internal Server Error",
                        500,
                        self.to_string(),
                    ),
                )
            }
            AuthError::Internal(msg) => {
                tracing::error!(error.category = "internal", "内部エラー: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "internal-error",
                        "Internal Server Error",
                        500,
                        self.to_string(),
                    ),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}
