//! # Function 模块
//!
//! 宿主注册的原生函数绑定。
//!
//! 绑定由固定的参数类型签名和一个原生闭包组成。调用分发按
//! 签名做严格校验：个数不符或任一位置类型不符都直接报错，
//! 且**不会**调用闭包本身。

use crate::error::ExecError;
use crate::value::{Value, ValueKind};

/// 原生函数类型
///
/// 参数已经通过签名校验，闭包内可以放心使用类型化访问器。
pub type NativeFn = Box<dyn Fn(&[Value]) -> Value>;

/// 宿主函数绑定
///
/// # 使用示例
///
/// ```ignore
/// let binding = FunctionBinding::new(vec![ValueKind::String], |args| {
///     println!("{}", args[0].as_str().unwrap_or_default());
///     Value::Null
/// });
/// ```
pub struct FunctionBinding {
    /// 参数类型签名（可以为空）
    kinds: Vec<ValueKind>,
    /// 原生闭包
    func: NativeFn,
}

impl FunctionBinding {
    /// 创建新的函数绑定
    pub fn new(kinds: Vec<ValueKind>, func: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Self {
            kinds,
            func: Box::new(func),
        }
    }

    /// 获取参数类型签名
    pub fn kinds(&self) -> &[ValueKind] {
        &self.kinds
    }

    /// 按签名校验实参并调用原生闭包
    ///
    /// # 错误
    ///
    /// - [`ExecError::ArgumentCountMismatch`]：实参个数与签名不符
    /// - [`ExecError::ArgumentTypeMismatch`]：某个位置的类型与签名不符
    pub fn invoke(&self, args: &[Value]) -> Result<Value, ExecError> {
        if args.len() != self.kinds.len() {
            return Err(ExecError::ArgumentCountMismatch {
                expected: self.kinds.len(),
                actual: args.len(),
            });
        }

        for (index, (arg, kind)) in args.iter().zip(self.kinds.iter()).enumerate() {
            if arg.kind() != *kind {
                return Err(ExecError::ArgumentTypeMismatch {
                    index,
                    expected: *kind,
                    actual: arg.kind(),
                });
            }
        }

        Ok((self.func)(args))
    }
}

impl std::fmt::Debug for FunctionBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionBinding")
            .field("kinds", &self.kinds)
            .finish_non_exhaustive()
    }
}
