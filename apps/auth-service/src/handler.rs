//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュールで re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、方式選択と検証はユースケース層に委譲
//!
//! ## ハンドラ一覧
//!
//! - `health`: ヘルスチェック
//! - `auth`: 認証関連（config, authenticate）

pub mod auth;
pub mod health;

pub use auth::{AuthState, authenticate, get_auth_config};
pub use health::{ReadinessState, health_check, readiness_check};
