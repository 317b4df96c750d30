//! # Value 模块
//!
//! 定义脚本运行时的值模型。
//!
//! ## 设计原则
//!
//! - 值是**封闭的**带标签枚举，四个变体穷尽匹配，宿主函数
//!   取参时不需要任何向下转型
//! - `clone()` 产生**完全独立**的副本（`String` 是深拷贝），
//!   变量读取按"读取即克隆"处理，后续重新赋值不会影响
//!   已经求值过的参数
//! - 数字恒为 32 位有符号整数，语法层不存在浮点字面量

use serde::{Deserialize, Serialize};

/// 值的类型标签
///
/// 用于函数签名声明和严格的类型检查（不做任何隐式转换）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    /// 空值
    Null,
    /// 32 位有符号整数
    Number,
    /// 字符串
    String,
    /// 布尔值
    Bool,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueKind::Null => "Null",
            ValueKind::Number => "Number",
            ValueKind::String => "String",
            ValueKind::Bool => "Bool",
        };
        write!(f, "{}", name)
    }
}

/// 脚本运行时值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// 空值
    Null,
    /// 32 位有符号整数
    Number(i32),
    /// 字符串
    String(String),
    /// 布尔值
    Bool(bool),
}

impl Value {
    /// 创建字符串值
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    /// 创建数字值
    pub fn number(n: i32) -> Self {
        Self::Number(n)
    }

    /// 创建布尔值
    pub fn bool(b: bool) -> Self {
        Self::Bool(b)
    }

    /// 获取类型标签
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Bool(_) => ValueKind::Bool,
        }
    }

    /// 是否为空值
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// 按字符串取值
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// 按数字取值
    pub fn as_number(&self) -> Option<i32> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// 按布尔取值
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}
