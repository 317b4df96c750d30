//! # Script Runtime
//!
//! 可嵌入的迷你脚本引擎核心库。
//!
//! ## 架构概述
//!
//! `script-runtime` 是纯逻辑核心，自身不做任何 IO。宿主程序
//! 注册原生函数后提交脚本文本，引擎完成词法扫描和逐语句执行：
//!
//! ```text
//! Host                              Engine
//!   │                                  │
//!   │──── register(name, kinds, fn) ──►│
//!   │──── parse(source) ──────────────►│ 词法扫描 → token 缓冲
//!   │──── execute() ──────────────────►│ 逐语句执行
//!   │◄─── Value（经由被调用的原生函数）─│
//! ```
//!
//! 语言本身刻意保持最小：变量声明/赋值和宿主函数调用，
//! 没有语法树，没有控制流，没有运算符。
//!
//! ## 核心类型
//!
//! - [`ScriptEngine`]：引擎实例（token 缓冲 + 变量表 + 函数表）
//! - [`Value`] / [`ValueKind`]：带标签的运行时值
//! - [`FunctionBinding`]：宿主注册的原生函数绑定
//! - [`Token`] / [`Tokenizer`]：词法层
//! - [`ScriptError`]：统一错误类型
//!
//! ## 使用示例
//!
//! ```ignore
//! use script_runtime::{ScriptEngine, Value, ValueKind};
//!
//! let mut engine = ScriptEngine::new();
//!
//! engine.register("log", vec![ValueKind::String], |args| {
//!     println!("{}", args[0].as_str().unwrap_or_default());
//!     Value::Null
//! });
//!
//! engine.parse(r#"
//!     $name = "world";
//!     log(name);
//! "#)?;
//! engine.execute()?;
//! ```
//!
//! ## 模块结构
//!
//! - [`value`]：值模型
//! - [`function`]：原生函数绑定
//! - [`lexer`]：词法扫描
//! - [`runtime`]：引擎与执行器
//! - [`error`]：错误类型定义

pub mod error;
pub mod function;
pub mod lexer;
pub mod runtime;
pub mod value;

// 重导出核心类型
pub use error::{ExecError, LexError, ScriptError, ScriptResult};
pub use function::{FunctionBinding, NativeFn};
pub use lexer::{Token, TokenKind, Tokenizer};
pub use runtime::ScriptEngine;
pub use value::{Value, ValueKind};
