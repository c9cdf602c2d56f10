//! # Vigil インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートは認証サービスが依存する外部リソースの詳細をカプセル化し、
//! トレイト経由でモック可能なインターフェースを提供する。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理とマイグレーション
//! - **リポジトリ実装**: アカウント永続化トレイトの具体実装
//! - **パスワード検証**: Argon2id によるハッシュ検証
//!
//! ## 依存関係
//!
//! ```text
//! auth-service → infra → domain
//! ```
//!
//! インフラ層は `domain` に依存する。
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`password`] - パスワード検証
//! - [`repository`] - リポジトリ実装

pub mod db;
pub mod error;
pub mod password;
pub mod repository;

pub use error::InfraError;
pub use password::{Argon2PasswordChecker, PasswordChecker};
