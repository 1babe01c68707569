//! 認識サーバーとの通信（同一オリジン）

mod fetch;

pub use fetch::FetchTransport;

use visionguide_common::{ApiEndpoints, Client};

/// ページと同じオリジンのサーバーに向けたクライアント
pub fn client() -> Client<FetchTransport> {
    Client::new(FetchTransport, ApiEndpoints::same_origin())
}
