use sha2::{Digest, Sha256};

/// Hex digest of `password + salt`. Deterministic by design: rows written by
/// earlier deployments must keep verifying, so there is no per-user salt and
/// no KDF iteration. Fine for a game credential, unfit for reuse anywhere
/// security-sensitive; a stronger scheme changes the stored format and needs
/// a migration.
pub fn hash_password(plain: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plain.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}
