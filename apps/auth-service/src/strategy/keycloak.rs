//! # Keycloak 認証ストラテジ
//!
//! 外部の Keycloak へ認証を委譲する（`keycloak` モード）。
//!
//! Resource Owner Password Credentials グラントでトークンエンドポイントを
//! 呼び出し、発行されたトークン JSON をそのまま成功ペイロードとして返す。
//! トークンの中身はこのサービスでは解釈しない。

use async_trait::async_trait;
use vigil_domain::auth::Credentials;

use crate::{
    config::KeycloakConfig,
    error::AuthError,
    strategy::{AuthResult, Authenticator},
};

/// Keycloak 認証ストラテジの実装
pub struct KeycloakAuthenticator {
    token_url:     String,
    client_id:     String,
    client_secret: Option<String>,
    client:        reqwest::Client,
}

impl KeycloakAuthenticator {
    /// 設定から新しいストラテジインスタンスを作成する
    pub fn new(config: &KeycloakConfig) -> Self {
        Self {
            token_url:     format!(
                "{}/realms/{}/protocol/openid-connect/token",
                config.base_url.trim_end_matches('/'),
                config.realm
            ),
            client_id:     config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            client:        reqwest::Client::new(),
        }
    }

    /// トークンエンドポイントへ送るフォームパラメータを組み立てる
    fn token_form<'a>(&'a self, credentials: &'a Credentials) -> Vec<(&'static str, &'a str)> {
        let mut form = vec![
            ("grant_type", "password"),
            ("client_id", self.client_id.as_str()),
            ("username", credentials.username()),
            ("password", credentials.password()),
        ];
        if let Some(secret) = &self.client_secret {
            form.push(("client_secret", secret.as_str()));
        }
        form
    }
}

#[async_trait]
impl Authenticator for KeycloakAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthResult, AuthError> {
        let response = self
            .client
            .post(&self.token_url)
            .form(&self.token_form(credentials))
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let token = response.json::<AuthResult>().await?;
                Ok(token)
            }
            // Keycloak は認証拒否を 401（invalid_grant）または 400 で返す
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::BAD_REQUEST => {
                Err(AuthError::AuthenticationFailed)
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(AuthError::IdentityProvider(format!(
                    "予期しないステータス {status}: {body}"
                )))
            }
        }
    }
}
