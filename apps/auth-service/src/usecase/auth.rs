//! # 認証ディスパッチャ
//!
//! 有効な認証方式に対応するストラテジを選択し、検証を委譲する。
//!
//! ディスパッチャ自体は検証ロジックを持たない。責務は方式の解決と
//! エラーの伝播のみで、ストラテジの失敗をリトライすることもない。

use std::sync::Arc;

use vigil_domain::auth::{AuthType, Credentials};

use crate::{
    error::AuthError,
    strategy::{AuthResult, Authenticator},
};

/// 認証ディスパッチャの実装
///
/// 方式ごとのストラテジを保持し、リクエストごとに1つを選択して委譲する。
/// `keycloak` は設定されている場合のみ利用可能。
pub struct AuthDispatcher {
    configured: AuthType,
    native:     Arc<dyn Authenticator>,
    keycloak:   Option<Arc<dyn Authenticator>>,
}

impl AuthDispatcher {
    /// 新しいディスパッチャを作成する
    pub fn new(
        configured: AuthType,
        native: Arc<dyn Authenticator>,
        keycloak: Option<Arc<dyn Authenticator>>,
    ) -> Self {
        Self {
            configured,
            native,
            keycloak,
        }
    }

    /// 認証方式に対応するストラテジを解決する
    fn strategy_for(&self, auth_type: AuthType) -> Result<&dyn Authenticator, AuthError> {
        match auth_type {
            AuthType::Vigil => Ok(self.native.as_ref()),
            AuthType::Keycloak => self
                .keycloak
                .as_deref()
                .ok_or_else(|| AuthError::Internal("keycloak 認証が設定されていません".to_string())),
        }
    }

    /// 認証情報を検証する
    ///
    /// リクエスト指定の方式があればそれを、なければ設定値を使用する。
    pub async fn authenticate(
        &self,
        credentials: Credentials,
        requested: Option<AuthType>,
    ) -> Result<AuthResult, AuthError> {
        let effective = requested.unwrap_or(self.configured);
        tracing::debug!(auth_type = %effective, "認証ストラテジを選択");

        self.strategy_for(effective)?.authenticate(&credentials).await
    }
}
