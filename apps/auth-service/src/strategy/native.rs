//! # ネイティブ認証ストラテジ
//!
//! アカウントテーブルと Argon2id によるパスワード認証（`vigil` モード）。
//!
//! ## タイミング攻撃対策
//!
//! アカウントが存在しない場合もダミーハッシュで検証を実行し、
//! 処理時間を均一化する。これによりユーザー存在確認攻撃を防ぐ。
//!
//! ## 失敗の扱い
//!
//! アカウント不存在・無効化済み・パスワード不一致はすべて同じ
//! [`AuthError::AuthenticationFailed`] になる。失敗理由を区別して返すと
//! アカウント状態の探索に使われるため、意図的に潰している。

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;
use vigil_domain::{
    auth::Credentials,
    password::{PasswordHash, PlainPassword},
};
use vigil_infra::{PasswordChecker, repository::{Account, AccountsRepository}};

use crate::{
    error::AuthError,
    strategy::{AuthResult, Authenticator},
};

/// アクセストークンの有効期間（時間）
const TOKEN_TTL_HOURS: i64 = 1;

/// ネイティブ認証ストラテジの実装
pub struct NativeAuthenticator {
    accounts_repository: Arc<dyn AccountsRepository>,
    password_checker:    Arc<dyn PasswordChecker>,
}

impl NativeAuthenticator {
    /// 新しいストラテジインスタンスを作成する
    pub fn new(
        accounts_repository: Arc<dyn AccountsRepository>,
        password_checker: Arc<dyn PasswordChecker>,
    ) -> Self {
        Self {
            accounts_repository,
            password_checker,
        }
    }

    /// 認証成功時のトークンペイロードを組み立てる
    fn token_payload(&self, account: &Account) -> AuthResult {
        let expires_at = Utc::now() + chrono::Duration::hours(TOKEN_TTL_HOURS);

        serde_json::json!({
            "accessToken": Uuid::new_v4().to_string(),
            "expiresAt": expires_at.to_rfc3339(),
            "username": account.username,
            "isApplicationAdmin": account.is_application_admin,
        })
    }

    /// ダミーハッシュで検証を実行する（タイミング攻撃対策）
    ///
    /// アカウントが存在しない場合も実際のパスワード検証と同等の時間を消費する。
    /// 固定 sleep ではなく実際に Argon2id 検証を実行することで、
    /// CPU/メモリ状況による自然な変動も含めて同じ時間特性になる。
    fn dummy_verification(&self, password: &PlainPassword) {
        // ダミーハッシュ（有効な Argon2id 形式）
        let dummy_hash = PasswordHash::new(
            "$argon2id$v=19$m=65536,t=1,p=1$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
        );
        // 結果は使用しない（エラーでも問題ない）
        let _ = self.password_checker.verify(password, &dummy_hash);
    }
}

#[async_trait]
impl Authenticator for NativeAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthResult, AuthError> {
        let plain_password = PlainPassword::new(credentials.password());

        let account = self
            .accounts_repository
            .find_by_username(credentials.username())
            .await?;

        match account {
            Some(account) if account.is_active => {
                let hash = PasswordHash::new(&account.password_hash);
                let result = self.password_checker.verify(&plain_password, &hash)?;

                if result.is_match() {
                    // 最終ログイン日時の更新失敗で認証自体は失敗させない
                    let _ = self.accounts_repository.record_login(account.id).await;

                    Ok(self.token_payload(&account))
                } else {
                    Err(AuthError::AuthenticationFailed)
                }
            }
            Some(_) => {
                // 無効化済みアカウント。処理時間を均一化してから拒否する
                self.dummy_verification(&plain_password);
                Err(AuthError::AuthenticationFailed)
            }
            None => {
                // アカウント不存在。ダミー検証で処理時間を均一化する
                self.dummy_verification(&plain_password);
                Err(AuthError::AuthenticationFailed)
            }
        }
    }
}
