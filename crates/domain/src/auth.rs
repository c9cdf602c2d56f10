//! # 認証情報
//!
//! 認証リクエストのボディから構築される値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`Credentials`] | 認証情報 | ユーザー名とパスワード（または外部 IdP のシークレット） |
//! | [`AuthType`] | 認証方式 | プロセス全体で有効な認証モード |
//! | [`CredentialsError`] | パース失敗 | リクエスト不正として 400 に対応付けられる |
//!
//! ## 設計方針
//!
//! - パーサーは認証方式を知らない。どの方式宛てのペイロードも同じ形を通る
//! - 必須フィールドの空文字列は欠落と同じ扱い（パース失敗）
//! - パスワードは Debug 出力でマスクする

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// 認証方式
///
/// サポートする認証モードの閉じた集合。設定（`AUTH_TYPE`）または
/// リクエストヘッダーのセレクタから決定される。
///
/// 新しい方式（LDAP 等）の追加はバリアントとストラテジ実装の追加のみで、
/// ハンドラとディスパッチャには手を入れない。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AuthType {
    /// ネイティブ認証（アカウントテーブル + Argon2id）
    #[default]
    Vigil,
    /// Keycloak への委譲（OpenID Connect トークンエンドポイント）
    Keycloak,
}

/// 認証情報のパース失敗
///
/// ストラテジ実行前に検出されるリクエスト不正。
/// ストラテジ自体の失敗（[認証エラー]）とは区別される。
///
/// [認証エラー]: https://www.rfc-editor.org/rfc/rfc9457
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// ボディが期待する形の JSON ではない
    #[error("認証情報の形式が不正です: {0}")]
    Malformed(#[from] serde_json::Error),

    /// 必須フィールドが欠落または空
    #[error("{0} は必須です")]
    MissingField(&'static str),
}

/// デシリアライズ専用の中間表現
///
/// フィールド欠落と空文字列を同じ検証パスに通すため、
/// いったん Option で受けてから [`Credentials`] に昇格する。
#[derive(Deserialize)]
struct RawCredentials {
    username: Option<String>,
    password: Option<String>,
}

/// 認証情報（リクエストごとに構築される値オブジェクト）
///
/// リクエストボディのバイト列から [`parse`](Credentials::parse) で構築し、
/// ディスパッチ後に破棄される。リクエストをまたいで保持しない。
///
/// # セキュリティ
///
/// Debug 出力ではパスワードをマスクする。
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// フィールド値から認証情報を作成する
    ///
    /// 主にテストとストラテジ内部で使用する。検証は行わない。
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// リクエストボディのバイト列から認証情報を構築する
    ///
    /// # Errors
    ///
    /// - [`CredentialsError::Malformed`]: JSON として解釈できない
    /// - [`CredentialsError::MissingField`]: username / password が欠落または空
    pub fn parse(body: &[u8]) -> Result<Self, CredentialsError> {
        let raw: RawCredentials = serde_json::from_slice(body)?;

        let username = raw.username.unwrap_or_default();
        if username.is_empty() {
            return Err(CredentialsError::MissingField("username"));
        }

        let password = raw.password.unwrap_or_default();
        if password.is_empty() {
            return Err(CredentialsError::MissingField("password"));
        }

        Ok(Self { username, password })
    }

    /// ユーザー名を取得する
    pub fn username(&self) -> &str {
        &self.username
    }

    /// パスワード（または外部 IdP 向けシークレット）を取得する
    pub fn password(&self) -> &str {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    // ===== Credentials::parse テスト =====

    #[test]
    fn test_parse_usernameとpasswordが揃っていれば成功する() {
        let body = br#"{"username":"test","password":"test"}"#;

        let credentials = Credentials::parse(body).unwrap();

        assert_eq!(credentials.username(), "test");
        assert_eq!(credentials.password(), "test");
    }

    #[test]
    fn test_parse_未知のフィールドは無視される() {
        let body = br#"{"username":"test","password":"test","otp":"123456"}"#;

        let credentials = Credentials::parse(body).unwrap();

        assert_eq!(credentials.username(), "test");
    }

    #[rstest]
    #[case::空オブジェクト(br#"{}"#.as_slice(), "username")]
    #[case::username欠落(br#"{"password":"test"}"#.as_slice(), "username")]
    #[case::username空文字(br#"{"username":"","password":"test"}"#.as_slice(), "username")]
    #[case::password欠落(br#"{"username":"test"}"#.as_slice(), "password")]
    #[case::password空文字(br#"{"username":"test","password":""}"#.as_slice(), "password")]
    fn test_parse_必須フィールド欠落はエラー(#[case] body: &[u8], #[case] field: &str) {
        let result = Credentials::parse(body);

        match result {
            Err(CredentialsError::MissingField(name)) => assert_eq!(name, field),
            other => panic!("expected MissingField({field}), got {other:?}"),
        }
    }

    #[rstest]
    #[case::壊れたjson(br#"{"username""#.as_slice())]
    #[case::json以外(b"not json at all".as_slice())]
    #[case::配列(br#"["test","test"]"#.as_slice())]
    #[case::空ボディ(b"".as_slice())]
    fn test_parse_不正なボディはmalformed(#[case] body: &[u8]) {
        let result = Credentials::parse(body);

        assert!(matches!(result, Err(CredentialsError::Malformed(_))));
    }

    #[test]
    fn test_debug出力でパスワードがマスクされる() {
        let credentials = Credentials::new("test", "secret-password");

        let debug = format!("{:?}", credentials);

        assert!(debug.contains("test"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret-password"));
    }

    // ===== AuthType テスト =====

    #[rstest]
    #[case("vigil", AuthType::Vigil)]
    #[case("keycloak", AuthType::Keycloak)]
    fn test_auth_type_文字列からパースできる(#[case] input: &str, #[case] expected: AuthType) {
        assert_eq!(input.parse::<AuthType>().unwrap(), expected);
    }

    #[test]
    fn test_auth_type_未知の値はパースエラー() {
        assert!("saml".parse::<AuthType>().is_err());
        assert!("".parse::<AuthType>().is_err());
    }

    #[test]
    fn test_auth_type_displayは小文字() {
        assert_eq!(AuthType::Vigil.to_string(), "vigil");
        assert_eq!(AuthType::Keycloak.to_string(), "keycloak");
    }

    #[test]
    fn test_auth_type_serdeシリアライズは小文字() {
        assert_eq!(
            serde_json::to_value(AuthType::Vigil).unwrap(),
            serde_json::json!("vigil")
        );
    }

    #[test]
    fn test_auth_type_デフォルトはvigil() {
        assert_eq!(AuthType::default(), AuthType::Vigil);
    }
}
