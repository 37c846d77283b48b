use rand::{rngs::OsRng, Rng, RngCore};
use std::fmt::Write;

/// Bytes of entropy behind a bearer token; hex-encoded, so tokens are
/// twice this many characters.
const TOKEN_BYTES: usize = 24;

const APPOINTMENT_ID_LEN: usize = 32;
const URLSAFE_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Mints the opaque bearer credential issued once at signup.
pub fn mint_bearer_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    let mut out = String::with_capacity(TOKEN_BYTES * 2);
    for b in bytes {
        write!(out, "{:02x}", b).expect("writing to a String cannot fail");
    }
    out
}

/// Mints a URL-safe appointment identifier.
pub fn mint_appointment_id() -> String {
    let mut rng = OsRng;
    (0..APPOINTMENT_ID_LEN)
        .map(|_| URLSAFE_ALPHABET[rng.gen_range(0..URLSAFE_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_is_48_lowercase_hex_chars() {
        let token = mint_bearer_token();
        assert_eq!(token.len(), 48);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn bearer_tokens_are_unique() {
        assert_ne!(mint_bearer_token(), mint_bearer_token());
    }

    #[test]
    fn appointment_id_is_urlsafe() {
        let id = mint_appointment_id();
        assert_eq!(id.len(), 32);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
