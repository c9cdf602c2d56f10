//! # ユースケース層
//!
//! 認証リクエストのディスパッチを実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: テスト可能性のためトレイトを定義
//! - **依存性注入**: ストラテジを外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、方式選択はディスパッチャに集約

pub mod auth;

use async_trait::async_trait;
pub use auth::AuthDispatcher;
use vigil_domain::auth::{AuthType, Credentials};

use crate::{error::AuthError, strategy::AuthResult};

/// 認証ユースケーストレイト
///
/// 認証情報を受け取り、方式に対応するストラテジへ委譲する。
/// 具体的な実装は [`AuthDispatcher`] で提供される。
#[async_trait]
pub trait AuthUseCase: Send + Sync {
    /// 認証情報を検証する
    ///
    /// ## 引数
    ///
    /// - `credentials`: パース済みの認証情報
    /// - `requested`: リクエストが指定した認証方式（未指定なら設定値を使用）
    ///
    /// ## 戻り値
    ///
    /// - `Ok(AuthResult)`: ストラテジが返した不透明な成功ペイロード
    /// - `Err(AuthError)`: ストラテジの失敗（リトライしない）
    async fn authenticate(
        &self,
        credentials: Credentials,
        requested: Option<AuthType>,
    ) -> Result<AuthResult, AuthError>;
}

/// AuthDispatcher に AuthUseCase トレイトを実装
#[async_trait]
impl AuthUseCase for AuthDispatcher {
    async fn authenticate(
        &self,
        credentials: Credentials,
        requested: Option<AuthType>,
    ) -> Result<AuthResult, AuthError> {
        self.authenticate(credentials, requested).await
    }
}
