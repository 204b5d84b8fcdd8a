use super::SessionToken;

/// セッションの保管場所
///
/// 有効期限の扱いは実装側が持つ。期限切れのトークンは存在しないものとして扱う。
pub trait SessionRepository: Send + Sync {
    /// 新しいセッションを作成してトークンを返す
    fn create(&self) -> SessionToken;

    /// トークンが有効なら期限を延長して `true` を返す
    fn touch(&self, token: &str) -> bool;

    fn revoke(&self, token: &str);

    /// 期限切れのセッションを削除し、削除した件数を返す
    fn purge_expired(&self) -> usize;
}

/// オペレーターの認証情報を照合する
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}
