//! # Vigil 共有ユーティリティ
//!
//! このクレートは、Vigil
//! プロジェクト全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, サービス）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum への依存を持たない（`IntoResponse` 変換は各サービスの責務）
//! - observability 系モジュールは `observability` feature でオプトイン

pub mod error_response;
pub mod health;

#[cfg(feature = "observability")]
pub mod canonical_log;
#[cfg(feature = "observability")]
pub mod observability;

pub use error_response::ErrorResponse;
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
