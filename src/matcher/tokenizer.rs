//! Tokenizer
//!
//! Splits normalized text on whitespace and classifies each token as a model
//! identifier or a descriptive word.

use serde::Serialize;

use crate::matcher::rules::MODEL_TOKEN;

/// Token type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// SKU-like identifier (`s21`, `rtx4090`), matched exactly
    Model,
    /// Free-text word (`ultra`, `wireless`), matched approximately
    Descriptive,
}

/// Token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub token_type: TokenType,
}

impl Token {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            token_type: Tokenizer::classify(text),
        }
    }

    pub fn is_model(&self) -> bool {
        self.token_type == TokenType::Model
    }
}

/// Tokenizer
pub struct Tokenizer;

impl Tokenizer {
    /// Tokenize normalized text, preserving left-to-right order
    pub fn tokenize(text: &str) -> Vec<Token> {
        text.split_whitespace().map(Token::new).collect()
    }

    /// Classify a single token
    pub fn classify(token: &str) -> TokenType {
        if is_model_token(token) {
            TokenType::Model
        } else {
            TokenType::Descriptive
        }
    }
}

/// Letters immediately followed by digits at the start of the token.
/// Whatever follows the digits is irrelevant (`rtx4090ti` is a model token).
pub fn is_model_token(token: &str) -> bool {
    MODEL_TOKEN.is_match(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_order_and_types() {
        let tokens = Tokenizer::tokenize("galaxy s21 ultra");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "galaxy");
        assert_eq!(tokens[0].token_type, TokenType::Descriptive);
        assert_eq!(tokens[1].text, "s21");
        assert_eq!(tokens[1].token_type, TokenType::Model);
        assert_eq!(tokens[2].text, "ultra");
        assert_eq!(tokens[2].token_type, TokenType::Descriptive);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(Tokenizer::tokenize("").is_empty());
        assert!(Tokenizer::tokenize("   ").is_empty());
    }

    #[test]
    fn test_classify() {
        assert!(is_model_token("a53"));
        assert!(is_model_token("m1"));
        assert!(is_model_token("rtx4090"));
        assert!(is_model_token("sm9000x"));
        // digits first, or no digits at all
        assert!(!is_model_token("13"));
        assert!(!is_model_token("5g"));
        assert!(!is_model_token("pro"));
        assert!(!is_model_token(""));
    }
}
