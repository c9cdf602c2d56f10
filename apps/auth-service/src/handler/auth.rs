//! # 認証ハンドラ
//!
//! Auth Service の認証エンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `GET /api/auth/config` - 有効な認証方式と管理者フラグの取得
//! - `POST /api/auth/authenticate` - 認証情報の検証
//!
//! ## リクエストごとの流れ
//!
//! 1. ボディを [`Credentials`] にパースする（失敗 → 400、ディスパッチャは呼ばない）
//! 2. ディスパッチャへ委譲する（失敗 → 500）
//! 3. 成功ペイロードをそのままボディとして返す（200）

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::HeaderMap,
};
use serde::Serialize;
use vigil_domain::auth::{AuthType, Credentials};

use crate::{config::AuthConfig, error::AuthError, strategy::AuthResult, usecase::AuthUseCase};

/// 認証方式セレクタのヘッダー名
const AUTH_TYPE_HEADER: &str = "X-Auth-Type";

/// 認証ハンドラの共有状態
///
/// `config` はプロセス起動時に構築された読み取り専用の認証設定。
pub struct AuthState {
    pub config:  AuthConfig,
    pub usecase: Arc<dyn AuthUseCase>,
}

/// 認証設定レスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfigResponse {
    pub application_admin_enable: bool,
    pub auth_type: AuthType,
}

/// GET /api/auth/config
///
/// 有効な認証方式と管理者アクセスフラグを返す。
/// プロセス全体で不変の設定を読むだけであり、失敗しない。
pub async fn get_auth_config(State(state): State<Arc<AuthState>>) -> Json<AuthConfigResponse> {
    Json(AuthConfigResponse {
        application_admin_enable: state.config.application_admin_enabled,
        auth_type: state.config.auth_type,
    })
}

/// POST /api/auth/authenticate
///
/// リクエストボディの認証情報を検証する。
///
/// `X-Auth-Type` ヘッダーで認証方式を指定できる。未指定または
/// 不明な値の場合は設定された方式を使用する。
pub async fn authenticate(
    State(state): State<Arc<AuthState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<AuthResult>, AuthError> {
    let credentials = Credentials::parse(&body)?;
    let requested = requested_auth_type(&headers);

    let result = state.usecase.authenticate(credentials, requested).await?;

    Ok(Json(result))
}

/// `X-Auth-Type` ヘッダーから認証方式セレクタを取り出す
///
/// ヘッダーが存在しない、または値が既知の方式でない場合は `None`。
fn requested_auth_type(headers: &HeaderMap) -> Option<AuthType> {
    headers
        .get(AUTH_TYPE_HEADER)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use axum::{
        Router,
        body::Body,
        http::{Method, Request, StatusCode},
        middleware::from_fn,
        routing::{get, post},
    };
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;
    use crate::middleware::preflight;

    // テスト用スタブ
    //
    // 呼び出し回数とリクエスト指定の方式を記録する。
    struct StubAuthUseCase {
        payload:   Option<AuthResult>,
        calls:     AtomicUsize,
        requested: Mutex<Option<AuthType>>,
    }

    impl StubAuthUseCase {
        fn success(payload: AuthResult) -> Arc<Self> {
            Arc::new(Self {
                payload:   Some(payload),
                calls:     AtomicUsize::new(0),
                requested: Mutex::new(None),
            })
        }

        fn auth_failed() -> Arc<Self> {
            Arc::new(Self {
                payload:   None,
                calls:     AtomicUsize::new(0),
                requested: Mutex::new(None),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AuthUseCase for StubAuthUseCase {
        async fn authenticate(
            &self,
            _credentials: Credentials,
            requested: Option<AuthType>,
        ) -> Result<AuthResult, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.requested.lock().unwrap() = requested;

            match &self.payload {
                Some(payload) => Ok(payload.clone()),
                None => Err(AuthError::AuthenticationFailed),
            }
        }
    }

    fn create_test_app(config: AuthConfig, usecase: Arc<StubAuthUseCase>) -> Router {
        let state = Arc::new(AuthState { config, usecase });

        Router::new()
            .route("/api/auth/config", get(get_auth_config))
            .route("/api/auth/authenticate", post(authenticate))
            .with_state(state)
            .layer(from_fn(preflight))
    }

    fn vigil_config() -> AuthConfig {
        AuthConfig {
            auth_type: AuthType::Vigil,
            application_admin_enabled: false,
        }
    }

    fn authenticate_request(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/auth/authenticate")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    // ===== POST /api/auth/authenticate =====

    #[tokio::test]
    async fn test_authenticate_成功時に200とペイロードがそのまま返る() {
        // Given
        let payload = serde_json::json!({
            "accessToken": "stub-token",
            "expiresAt": "2026-01-01T00:00:00Z"
        });
        let usecase = StubAuthUseCase::success(payload.clone());
        let sut = create_test_app(vigil_config(), usecase);

        // When
        let response = sut
            .oneshot(authenticate_request(
                r#"{"username":"test","password":"test"}"#,
            ))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, payload);
    }

    #[tokio::test]
    async fn test_authenticate_ストラテジ失敗で500() {
        // Given
        let sut = create_test_app(vigil_config(), StubAuthUseCase::auth_failed());

        // When
        let response = sut
            .oneshot(authenticate_request(
                r#"{"username":"test","password":"test"}"#,
            ))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["detail"], "認証に失敗しました");
    }

    #[tokio::test]
    async fn test_authenticate_空のjsonで400_ディスパッチャは呼ばれない() {
        // Given
        let usecase = StubAuthUseCase::success(serde_json::json!({}));
        let sut = create_test_app(vigil_config(), usecase.clone());

        // When
        let response = sut.oneshot(authenticate_request("{}")).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(usecase.call_count(), 0);
    }

    #[tokio::test]
    async fn test_authenticate_壊れたjsonで400() {
        // Given
        let usecase = StubAuthUseCase::success(serde_json::json!({}));
        let sut = create_test_app(vigil_config(), usecase.clone());

        // When
        let response = sut
            .oneshot(authenticate_request(r#"{"username""#))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(usecase.call_count(), 0);
    }

    #[tokio::test]
    async fn test_authenticate_auth_typeヘッダーがディスパッチャに伝わる() {
        // Given
        let usecase = StubAuthUseCase::success(serde_json::json!({}));
        let sut = create_test_app(vigil_config(), usecase.clone());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/auth/authenticate")
            .header("content-type", "application/json")
            .header("X-Auth-Type", "keycloak")
            .body(Body::from(r#"{"username":"test","password":"test"}"#))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            *usecase.requested.lock().unwrap(),
            Some(AuthType::Keycloak)
        );
    }

    #[tokio::test]
    async fn test_authenticate_不明なauth_typeヘッダーは無視される() {
        // Given
        let usecase = StubAuthUseCase::success(serde_json::json!({}));
        let sut = create_test_app(vigil_config(), usecase.clone());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/auth/authenticate")
            .header("content-type", "application/json")
            .header("X-Auth-Type", "saml")
            .body(Body::from(r#"{"username":"test","password":"test"}"#))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(*usecase.requested.lock().unwrap(), None);
    }

    // ===== GET /api/auth/config =====

    #[tokio::test]
    async fn test_config_設定値がそのまま返る() {
        // Given
        let config = AuthConfig {
            auth_type: AuthType::Vigil,
            application_admin_enabled: true,
        };
        let sut = create_test_app(config, StubAuthUseCase::auth_failed());

        let request = Request::builder()
            .method(Method::GET)
            .uri("/api/auth/config")
            .body(Body::empty())
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "applicationAdminEnable": true,
                "authType": "vigil"
            })
        );
    }

    #[tokio::test]
    async fn test_config_keycloak設定時はauthtypeがkeycloak() {
        // Given
        let config = AuthConfig {
            auth_type: AuthType::Keycloak,
            application_admin_enabled: false,
        };
        let sut = create_test_app(config, StubAuthUseCase::auth_failed());

        let request = Request::builder()
            .method(Method::GET)
            .uri("/api/auth/config")
            .body(Body::empty())
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        let json = body_json(response).await;
        assert_eq!(json["authType"], "keycloak");
        assert_eq!(json["applicationAdminEnable"], false);
    }

    // ===== OPTIONS（プリフライト） =====

    #[tokio::test]
    async fn test_options_任意のパスで204と空ボディ() {
        // Given
        let sut = create_test_app(vigil_config(), StubAuthUseCase::auth_failed());

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/auth/authenticate")
            .body(Body::empty())
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }
}
