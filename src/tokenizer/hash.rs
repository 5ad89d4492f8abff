//! Token sequence checksum.

use std::hash::Hasher;

use fxhash::FxHasher64;

use super::token::Token;

/// Order-sensitive hash over the type tag and text of every token.
///
/// Two sequences that render identically hash identically, which lets a view
/// skip repainting a line whose tokens did not change. Not collision resistant.
pub fn hash_tokens(tokens: &[Token]) -> u64 {
    let mut hasher = FxHasher64::default();
    for token in tokens {
        hasher.write_u8(token.kind().tag());
        hasher.write(token.text().as_bytes());
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::token::TokenType;

    #[test]
    fn test_hash_is_deterministic() {
        let tokens = vec![
            Token::new(TokenType::MnemonicNormal, "mov"),
            Token::new(TokenType::Space, " "),
            Token::new(TokenType::GeneralRegister, "eax"),
        ];
        assert_eq!(hash_tokens(&tokens), hash_tokens(&tokens.clone()));
    }

    #[test]
    fn test_hash_sees_type_text_and_order() {
        let a = vec![
            Token::new(TokenType::MnemonicNormal, "mov"),
            Token::new(TokenType::GeneralRegister, "eax"),
        ];
        let retyped = vec![
            Token::new(TokenType::MnemonicNormal, "mov"),
            Token::new(TokenType::Uncategorized, "eax"),
        ];
        let reordered = vec![
            Token::new(TokenType::GeneralRegister, "eax"),
            Token::new(TokenType::MnemonicNormal, "mov"),
        ];
        let shorter = vec![Token::new(TokenType::MnemonicNormal, "mov")];

        let h = hash_tokens(&a);
        assert_ne!(h, hash_tokens(&retyped));
        assert_ne!(h, hash_tokens(&reordered));
        assert_ne!(h, hash_tokens(&shorter));
    }
}
