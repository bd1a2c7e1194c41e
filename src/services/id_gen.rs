//! # ID 생성기
//!
//! nanoid 방식의 무작위 문자열 ID를 만듭니다.
//! 운영체제의 암호학적 난수(`OsRng`)에서 바이트를 읽고, 알파벳 크기에 맞는
//! 비트 마스크를 적용한 뒤 범위를 벗어나는 값은 버립니다(편향 없는 추출).

use rand_core::{OsRng, RngCore};
use thiserror::Error;

/// URL에 그대로 쓸 수 있는 64개 기호
pub const URL_ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_-";

/// 사용자 정의 알파벳에 허용하는 최대 기호 수 (한 바이트로 색인 가능한 범위)
pub const MAX_ALPHABET_LEN: usize = 255;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdGenError {
    #[error("id length must be greater than zero")]
    ZeroLength,

    #[error("alphabet must not be empty")]
    EmptyAlphabet,

    #[error("alphabet must contain at most 255 symbols, got {0}")]
    AlphabetTooLarge(usize),

    #[error("failed to read random bytes: {0}")]
    Random(String),
}

/// 무작위 문자열 ID를 만드는 구성 요소
pub trait IdGenerator: Send + Sync {
    /// URL 안전 알파벳으로 `length` 글자 ID를 만듭니다.
    fn generate(&self, length: usize) -> Result<String, IdGenError>;

    /// 주어진 알파벳의 기호만 사용해 `length` 글자 ID를 만듭니다.
    fn generate_custom(&self, alphabet: &str, length: usize) -> Result<String, IdGenError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NanoIdGenerator;

impl IdGenerator for NanoIdGenerator {
    fn generate(&self, length: usize) -> Result<String, IdGenError> {
        self.generate_custom(URL_ALPHABET, length)
    }

    fn generate_custom(&self, alphabet: &str, length: usize) -> Result<String, IdGenError> {
        if length == 0 {
            return Err(IdGenError::ZeroLength);
        }

        let symbols: Vec<char> = alphabet.chars().collect();
        if symbols.is_empty() {
            return Err(IdGenError::EmptyAlphabet);
        }
        if symbols.len() > MAX_ALPHABET_LEN {
            return Err(IdGenError::AlphabetTooLarge(symbols.len()));
        }

        // 알파벳 크기 이상의 가장 작은 2의 거듭제곱 - 1
        let mask = symbols.len().next_power_of_two() - 1;
        // 버려지는 바이트를 감안해 한 번에 넉넉히 읽습니다.
        let step = (mask + 1) * length * 8 / (5 * symbols.len()) + 1;

        let mut id = String::with_capacity(length);
        let mut produced = 0;
        let mut bytes = vec![0u8; step];

        loop {
            OsRng
                .try_fill_bytes(&mut bytes)
                .map_err(|e| IdGenError::Random(e.to_string()))?;

            for byte in &bytes {
                let Some(&symbol) = symbols.get(usize::from(*byte) & mask) else {
                    continue;
                };
                id.push(symbol);
                produced += 1;
                if produced == length {
                    return Ok(id);
                }
            }
        }
    }
}
