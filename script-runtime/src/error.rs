//! # Error 模块
//!
//! 定义 script-runtime 中使用的错误类型。
//!
//! 带源码位置的错误统一渲染为 `[Line 行:列] 消息`；
//! 参数个数/类型错误发生在调用分发阶段，没有可归属的位置，
//! 只渲染裸消息。

use thiserror::Error;

use crate::value::ValueKind;

/// 词法错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    /// 无法识别的字符
    #[error("[Line {line}:{column}] 未知的字符 '{ch}'")]
    UnknownCharacter { line: usize, column: usize, ch: char },

    /// 字符串在结束引号之前遇到输入末尾
    ///
    /// 位置指向字符串的起始引号。
    #[error("[Line {line}:{column}] 字符串缺少结束引号")]
    UnterminatedString { line: usize, column: usize },
}

/// 执行错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecError {
    /// 语句在读完所有 token 之前被截断
    #[error("没有更多可读取的 token")]
    OutOfTokens,

    /// 语法错误：token 不符合当前位置的预期
    #[error("[Line {line}:{column}] {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// 变量重复声明
    #[error("[Line {line}:{column}] 变量 '{name}' 已存在")]
    DuplicateVariable {
        line: usize,
        column: usize,
        name: String,
    },

    /// 标识符既不是变量也不是已注册函数
    #[error("[Line {line}:{column}] 标识符 '{name}' 未定义")]
    UndefinedIdentifier {
        line: usize,
        column: usize,
        name: String,
    },

    /// token 不能作为值使用
    #[error("[Line {line}:{column}] 变量值 '{text}' 不是字符串/数字/布尔/关键字")]
    InvalidValue {
        line: usize,
        column: usize,
        text: String,
    },

    /// 数字字面量无法转换为 32 位整数
    #[error("[Line {line}:{column}] 数字 '{text}' 不是合法的 32 位整数")]
    InvalidNumber {
        line: usize,
        column: usize,
        text: String,
    },

    /// 实参个数与注册的签名不一致
    #[error("参数个数不匹配：期望 {expected} 个，实际 {actual} 个")]
    ArgumentCountMismatch { expected: usize, actual: usize },

    /// 实参类型与注册的签名不一致
    ///
    /// `index` 为 0 起始的参数位置。
    #[error("第 {index} 个参数类型错误：期望 {expected}，实际 {actual}")]
    ArgumentTypeMismatch {
        index: usize,
        expected: ValueKind,
        actual: ValueKind,
    },
}

/// script-runtime 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    /// 词法错误
    #[error(transparent)]
    Lex(#[from] LexError),

    /// 执行错误
    #[error(transparent)]
    Exec(#[from] ExecError),
}

/// Result 类型别名
pub type ScriptResult<T> = Result<T, ScriptError>;
