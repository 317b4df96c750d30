//! # Runtime 模块
//!
//! 脚本执行核心：公共引擎 API 和语句执行器。
//!
//! ## 模块结构
//!
//! - [`engine`]：引擎（token 缓冲、变量表、函数表、嵌入 API）
//! - [`executor`]：语句执行器（游标驱动的逐语句求值）

pub mod engine;
pub(crate) mod executor;

pub use engine::ScriptEngine;
