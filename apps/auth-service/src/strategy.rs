//! # 認証ストラテジ
//!
//! 認証方式ごとの検証処理を [`Authenticator`] トレイトの実装として提供する。
//!
//! ## 設計方針
//!
//! - **差し替え可能**: ディスパッチャはトレイトにのみ依存する。
//!   新しい方式（LDAP 等）の追加は実装を1つ増やすだけで済む
//! - **不透明な成功ペイロード**: 成功時の値はストラテジごとに形が異なるため、
//!   [`AuthResult`]（JSON 値）としてそのままレスポンスに流す
//! - **リトライしない**: 失敗はそのまま呼び出し側へ伝播する

pub mod keycloak;
pub mod native;

use async_trait::async_trait;
pub use keycloak::KeycloakAuthenticator;
pub use native::NativeAuthenticator;
use vigil_domain::auth::Credentials;

use crate::error::AuthError;

/// 認証成功時の不透明なペイロード
///
/// ハンドラとディスパッチャは中身を解釈せず、そのままボディとして返す。
pub type AuthResult = serde_json::Value;

/// 認証ストラテジトレイト
///
/// 1つの認証方式の検証処理を表す。実行中にネットワークや
/// ストレージへの I/O を伴う場合があり、キャンセルは下位の
/// トランスポートから伝播する。
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// 認証情報を検証し、成功ペイロードまたはエラーを返す
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthResult, AuthError>;
}
