use sha2::{Digest, Sha256};

pub const SCOPE_ACTIVATION: &str = "activation";
pub const SCOPE_AUTHENTICATION: &str = "authentication";
pub const SCOPE_PASSWORD_RESET: &str = "password-reset";

/// Length of the hex plaintext handed to users.
pub const PLAINTEXT_LEN: usize = 64;

/// Generate a fresh token. Returns (plaintext, hash); only the hash is ever
/// stored, the plaintext is delivered to the user once and never logged.
pub fn generate() -> (String, String) {
    let bytes: [u8; 32] = rand::random();
    let plaintext = hex::encode(bytes);
    let token_hash = hash(&plaintext);
    (plaintext, token_hash)
}

pub fn hash(plaintext: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plaintext.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Shape check for client-supplied plaintext, before touching the database.
pub fn is_well_formed(plaintext: &str) -> bool {
    plaintext.len() == PLAINTEXT_LEN && plaintext.bytes().all(|b| b.is_ascii_hexdigit())
}
