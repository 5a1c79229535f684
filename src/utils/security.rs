//! Input sanitising and token helpers

use rand::{Rng, RngCore};
use sha2::{Digest, Sha256};

/// Security utilities
pub struct SecurityUtils;

impl SecurityUtils {
    /// HTML-escape characters that could open markup
    pub fn sanitize_input(input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        for c in input.chars() {
            match c {
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&#x27;"),
                '/' => out.push_str("&#x2F;"),
                _ => out.push(c),
            }
        }
        out
    }

    /// Whether `input` parses as an http or https URL
    pub fn validate_url(input: &str) -> bool {
        url::Url::parse(input)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false)
    }

    /// 32 random bytes, hex encoded
    pub fn generate_csrf_token() -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Hex SHA-256 of `password` followed by `salt`
    pub fn hash_password(password: &str, salt: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        hasher.update(salt.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Session API key of the form `session_xxxx-xxxx-xxxx`
    pub fn generate_session_key() -> String {
        let mut rng = rand::thread_rng();
        let groups: Vec<String> = (0..3)
            .map(|_| {
                (0..4)
                    .map(|_| {
                        char::from_digit(rng.gen_range(0..16), 16).unwrap_or('0')
                    })
                    .collect()
            })
            .collect();
        format!("session_{}", groups.join("-"))
    }
}
