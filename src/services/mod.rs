//! # 비즈니스 로직 모듈
//!
//! - `category`: 카테고리 유스케이스 (검증 → 트랜잭션 → 저장소 호출 → 응답 변환)
//! - `id_gen`: 무작위 문자열 ID 생성기

pub mod category;
pub mod id_gen;

pub use category::{CategoryService, CategoryUseCase};
pub use id_gen::{IdGenerator, NanoIdGenerator};
