//! # Vigil ドメイン層
//!
//! 認証ドメインの中核となる値オブジェクトを定義する。
//!
//! ## 設計方針
//!
//! - **値オブジェクト**: 生成時にバリデーションを実行し、不正な値の存在を防ぐ
//! - **インフラ非依存**: DB や HTTP などの外部システムには一切依存しない
//! - **秘匿情報の保護**: パスワードを含む型は Debug 出力をマスクする
//!
//! ## 依存関係の方向
//!
//! ```text
//! auth-service → infra → domain
//!            ↘          ↗
//!              shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`auth`] - 認証情報（Credentials）と認証方式（AuthType）
//! - [`password`] - パスワード関連の値オブジェクト

pub mod auth;
pub mod password;

pub use auth::{AuthType, Credentials, CredentialsError};
