//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `category`: 카테고리 엔티티, 요청/응답 모델과 변환 함수
//! - `web`: 모든 응답을 감싸는 JSON 봉투(envelope)

pub mod category;
pub mod web;

pub use category::*;
pub use web::*;
