//! # Auth Service 設定
//!
//! 環境変数から Auth Service サーバーの設定を読み込む。
//!
//! サーバー自体の設定（[`ServerConfig`]）と、リクエスト処理中に参照される
//! 認証設定（[`AuthConfig`]）を分離する。後者はプロセス起動時に一度だけ
//! 構築され、以降は読み取り専用でハンドラに注入される。

use std::env;

use vigil_domain::auth::AuthType;

/// Auth Service サーバーの設定
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// データベース接続 URL
    pub database_url: String,
    /// 認証設定（ハンドラに注入される読み取り専用部分）
    pub auth:         AuthConfig,
    /// Keycloak 接続設定（keycloak モード使用時のみ）
    pub keycloak:     Option<KeycloakConfig>,
}

/// 認証設定
///
/// プロセス全体で有効な認証モードと管理者アクセスフラグ。
/// 起動後は不変であり、ロックなしで全リクエストから参照される。
#[derive(Debug, Clone, Copy)]
pub struct AuthConfig {
    /// 有効な認証方式
    pub auth_type: AuthType,
    /// アプリケーション管理者アクセスの有効化
    pub application_admin_enabled: bool,
}

/// Keycloak 接続設定
#[derive(Debug, Clone)]
pub struct KeycloakConfig {
    /// Keycloak のベース URL（例: `https://keycloak.example.com`）
    pub base_url:      String,
    /// レルム名
    pub realm:         String,
    /// クライアント ID
    pub client_id:     String,
    /// クライアントシークレット（confidential クライアントの場合のみ）
    pub client_secret: Option<String>,
}

impl ServerConfig {
    /// 環境変数から設定を読み込む
    ///
    /// | 変数名 | 必須 | 説明 |
    /// |--------|------|------|
    /// | `AUTH_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
    /// | `AUTH_PORT` | **Yes** | ポート番号 |
    /// | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
    /// | `AUTH_TYPE` | No | 認証方式（`vigil` / `keycloak`、デフォルト: `vigil`） |
    /// | `APPLICATION_ADMIN_ENABLED` | No | 管理者アクセスの有効化（`true` で有効） |
    /// | `KEYCLOAK_BASE_URL` | keycloak 時 | Keycloak のベース URL |
    /// | `KEYCLOAK_REALM` | keycloak 時 | レルム名 |
    /// | `KEYCLOAK_CLIENT_ID` | keycloak 時 | クライアント ID |
    /// | `KEYCLOAK_CLIENT_SECRET` | No | クライアントシークレット |
    pub fn from_env() -> Result<Self, env::VarError> {
        let auth_type = parse_auth_type(env::var("AUTH_TYPE").ok().as_deref());
        let keycloak = keycloak_from_env();

        if auth_type == AuthType::Keycloak && keycloak.is_none() {
            panic!("AUTH_TYPE=keycloak には KEYCLOAK_BASE_URL などの設定が必要です");
        }

        Ok(Self {
            host:         env::var("AUTH_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port:         env::var("AUTH_PORT")
                .expect("AUTH_PORT が設定されていません")
                .parse()
                .expect("AUTH_PORT は有効なポート番号である必要があります"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL が設定されていません"),
            auth:         AuthConfig {
                auth_type,
                application_admin_enabled: parse_flag(
                    env::var("APPLICATION_ADMIN_ENABLED").ok().as_deref(),
                ),
            },
            keycloak,
        })
    }
}

/// 環境変数の値から認証方式をパースする
///
/// 未設定の場合はデフォルト（`vigil`）、不正な値は panic。
/// 起動時に誤設定へ気づけるよう、フォールバックはしない。
fn parse_auth_type(value: Option<&str>) -> AuthType {
    match value {
        None => AuthType::default(),
        Some(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("AUTH_TYPE の値が不正です: {raw}")),
    }
}

/// 環境変数の値からブールフラグをパースする（`true` のみ有効）
fn parse_flag(value: Option<&str>) -> bool {
    value.map(|v| v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

/// `KEYCLOAK_*` 環境変数から Keycloak 設定を組み立てる
///
/// `KEYCLOAK_BASE_URL` が未設定の場合は `None`（keycloak モード未使用）。
fn keycloak_from_env() -> Option<KeycloakConfig> {
    let base_url = env::var("KEYCLOAK_BASE_URL").ok()?;

    Some(KeycloakConfig {
        base_url,
        realm: env::var("KEYCLOAK_REALM").expect("KEYCLOAK_REALM が設定されていません"),
        client_id: env::var("KEYCLOAK_CLIENT_ID")
            .expect("KEYCLOAK_CLIENT_ID が設定されていません"),
        client_secret: env::var("KEYCLOAK_CLIENT_SECRET").ok(),
    })
}
