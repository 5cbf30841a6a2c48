use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

/// Length of identifiers produced in token mode
pub const TOKEN_LENGTH: usize = 10;

/// Generate a random base64url token of exactly `length` characters.
///
/// Bytes come from the operating system CSPRNG. Encoding `length` bytes
/// always yields at least `length` characters, so truncation never pads.
pub fn random_token(length: usize) -> String {
    let mut bytes = vec![0u8; length];
    OsRng.fill_bytes(&mut bytes);

    let mut token = URL_SAFE_NO_PAD.encode(&bytes);
    token.truncate(length);
    token
}

/// Whether `c` belongs to the unpadded base64url alphabet
pub fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}
