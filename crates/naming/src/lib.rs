//! Identifier generation for stored files

pub mod friendly;
pub mod token;

pub use friendly::{friendly_name, Category};
pub use token::{is_token_char, random_token, TOKEN_LENGTH};

/// Attempts made in token mode before accepting a possible overwrite
pub const TOKEN_MAX_ATTEMPTS: usize = 3;

/// Attempts made in friendly mode before accepting a possible overwrite
pub const FRIENDLY_MAX_ATTEMPTS: usize = 100;

/// How identifiers are generated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingStrategy {
    /// Fixed-length base64url token from the OS CSPRNG
    Token { length: usize },
    /// Adjective-adjective-noun plus a category suffix derived from the extension
    Friendly,
}

impl Default for NamingStrategy {
    fn default() -> Self {
        NamingStrategy::Token {
            length: TOKEN_LENGTH,
        }
    }
}

impl NamingStrategy {
    /// Produce a fresh identifier (without extension) for a file with `extension`
    pub fn generate(&self, extension: &str) -> String {
        match self {
            NamingStrategy::Token { length } => random_token(*length),
            NamingStrategy::Friendly => friendly_name(extension),
        }
    }

    /// Upper bound on existence-check retries for this strategy
    pub fn max_attempts(&self) -> usize {
        match self {
            NamingStrategy::Token { .. } => TOKEN_MAX_ATTEMPTS,
            NamingStrategy::Friendly => FRIENDLY_MAX_ATTEMPTS,
        }
    }

    /// Full stored name for a candidate identifier
    pub fn stored_name(identifier: &str, extension: &str) -> String {
        format!("{}{}", identifier, extension)
    }
}
