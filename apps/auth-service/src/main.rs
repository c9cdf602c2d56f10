//! # Auth Service サーバー
//!
//! 認証処理を担当する API サーバー。
//!
//! ## 役割
//!
//! Auth Service は認証ドメインを専門的に担当する:
//!
//! - **認証方式の公開**: 有効な認証モードと管理者フラグの読み取り
//! - **認証ディスパッチ**: 設定またはリクエスト指定の方式に対応する
//!   ストラテジへの委譲（ネイティブ / Keycloak）
//! - **タイミング攻撃対策**: アカウント存在確認を防ぐためのダミー検証
//!
//! ## HTTP サーフェス
//!
//! | メソッド | パス | 説明 |
//! |---------|------|------|
//! | OPTIONS | 任意 | プリフライト応答（204） |
//! | GET | `/api/auth/config` | 認証設定の取得 |
//! | POST | `/api/auth/authenticate` | 認証情報の検証 |
//! | GET | `/health` | Liveness Check |
//! | GET | `/health/ready` | Readiness Check |
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `AUTH_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `AUTH_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `AUTH_TYPE` | No | 認証方式（`vigil` / `keycloak`） |
//! | `APPLICATION_ADMIN_ENABLED` | No | 管理者アクセスの有効化 |
//! | `KEYCLOAK_BASE_URL` ほか | keycloak 時 | Keycloak 接続設定 |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p vigil-auth-service
//!
//! # 本番環境
//! AUTH_PORT=13002 DATABASE_URL=postgres://... cargo run -p vigil-auth-service --release
//! ```

mod config;
mod error;
mod handler;
mod middleware;
mod strategy;
mod usecase;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use config::ServerConfig;
use handler::{
    AuthState,
    ReadinessState,
    authenticate,
    get_auth_config,
    health_check,
    readiness_check,
};
use middleware::preflight;
use strategy::{Authenticator, KeycloakAuthenticator, NativeAuthenticator};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use usecase::AuthDispatcher;
use vigil_infra::{
    Argon2PasswordChecker,
    PasswordChecker,
    db,
    repository::{AccountsRepository, PostgresAccountsRepository},
};
use vigil_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, TracingConfig, make_request_span},
};

/// Auth Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("auth-service");
    vigil_shared::observability::init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "auth-service").entered();

    // 設定読み込み
    let config = ServerConfig::from_env().expect("設定の読み込みに失敗しました");

    tracing::info!(
        auth_type = %config.auth.auth_type,
        "Auth Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("データベース接続に失敗しました");
    tracing::info!("データベースに接続しました");

    // マイグレーション実行
    db::run_migrations(&pool)
        .await
        .expect("マイグレーションの実行に失敗しました");
    tracing::info!("マイグレーションを適用しました");

    // Readiness Check 用 State（pool が move される前に clone）
    let readiness_state = Arc::new(ReadinessState { pool: pool.clone() });

    // 依存コンポーネントを初期化
    let accounts_repository: Arc<dyn AccountsRepository> =
        Arc::new(PostgresAccountsRepository::new(pool));
    let password_checker: Arc<dyn PasswordChecker> = Arc::new(Argon2PasswordChecker::new());
    let native: Arc<dyn Authenticator> =
        Arc::new(NativeAuthenticator::new(accounts_repository, password_checker));
    let keycloak: Option<Arc<dyn Authenticator>> = config
        .keycloak
        .as_ref()
        .map(|kc| Arc::new(KeycloakAuthenticator::new(kc)) as Arc<dyn Authenticator>);

    let dispatcher = AuthDispatcher::new(config.auth.auth_type, native, keycloak);
    let auth_state = Arc::new(AuthState {
        config:  config.auth,
        usecase: Arc::new(dispatcher),
    });

    // ルーター構築
    // プリフライトはルーティングの手前で処理され、どのパスでも 204 を返す
    let app = Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .route("/api/auth/config", get(get_auth_config))
        .route("/api/auth/authenticate", post(authenticate))
        .with_state(auth_state)
        .layer(from_fn(preflight))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Auth Service サーバーが起動しました: {}", addr);

    // Graceful shutdown は axum::serve が自動的に処理する
    axum::serve(listener, app).await?;

    Ok(())
}
