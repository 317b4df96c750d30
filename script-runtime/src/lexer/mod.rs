//! # Lexer 模块
//!
//! 词法扫描：把源文本切分为带位置信息的 token 流。
//!
//! ## 模块结构
//!
//! - [`token`]：Token 和 TokenKind 定义
//! - [`tokenizer`]：逐字符扫描器实现

pub mod token;
pub mod tokenizer;


pub use token::{Token, TokenKind};
pub use tokenizer::Tokenizer;
