//! # HTTP ミドルウェア
//!
//! Auth Service 固有の tower ミドルウェアを定義する。

use axum::{
    extract::Request,
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// CORS プリフライトリクエストに応答する
///
/// `OPTIONS` リクエストをルーティングより手前で打ち切り、
/// どのパスに対しても 204 No Content（空ボディ）を返す。
/// 状態には一切触れない。
pub async fn preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }

    next.run(request).await
}
