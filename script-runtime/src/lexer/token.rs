//! # Token 定义
//!
//! 词法单元：类型标签、字面文本和源码位置。

use serde::{Deserialize, Serialize};

/// token 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// 输入末尾哨兵（文本为空）
    EndOfInput,
    /// 空格/制表符的最长连续串
    Whitespace,
    /// 换行（`\n`、`\r` 或 `\r\n`）
    EndOfLine,
    /// 字母/下划线组成的单词
    Word,
    /// 数字字面量
    Number,
    /// 引号包裹的字符串（文本已去掉两端引号）
    QuotedString,
    /// 符号集中的单个字符
    Symbol,
}

/// 词法单元
///
/// 由 [`Tokenizer`](crate::lexer::Tokenizer) 逐个产出，产出后不再修改。
/// `line`/`column` 是 token **第一个字符**的位置，均从 1 开始计。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// token 类型
    pub kind: TokenKind,
    /// 字面文本
    pub text: String,
    /// 起始行号（1 起始）
    pub line: usize,
    /// 起始列号（1 起始）
    pub column: usize,
}

impl Token {
    /// 创建新的 token
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }
}
