//! # Executor 模块
//!
//! 语句执行器：持有游标，沿 token 缓冲严格向前走，
//! 逐语句分发执行。
//!
//! ## 职责
//!
//! - 语句分发（声明 / 重新赋值 / 函数调用）
//! - 赋值尾部和参数列表的解析
//! - 单 token 的值求值（含值位置的嵌套函数调用）
//!
//! ## 不变式
//!
//! 游标只会通过 `next_token` 严格向前推进，没有回溯；
//! 每条语句的所有解析与校验都成功之后，才会写入变量表或
//! 调用宿主函数，失败的语句不产生任何部分效果。

use std::collections::HashMap;

use crate::error::ExecError;
use crate::function::FunctionBinding;
use crate::lexer::{Token, TokenKind};
use crate::value::Value;

/// 语句执行器
///
/// 借用引擎的三张表作为执行上下文，自身只持有游标。
pub(crate) struct Executor<'a> {
    /// token 缓冲（来自 `ScriptEngine::parse`）
    tokens: &'a [Token],
    /// 变量表
    variables: &'a mut HashMap<String, Value>,
    /// 函数表（执行期间只读）
    functions: &'a HashMap<String, FunctionBinding>,
    /// 游标
    index: usize,
}

impl<'a> Executor<'a> {
    /// 创建执行器
    pub(crate) fn new(
        tokens: &'a [Token],
        variables: &'a mut HashMap<String, Value>,
        functions: &'a HashMap<String, FunctionBinding>,
    ) -> Self {
        Self {
            tokens,
            variables,
            functions,
            index: 0,
        }
    }

    /// 执行整个 token 缓冲，每轮循环一条语句
    pub(crate) fn run(&mut self) -> Result<(), ExecError> {
        let tokens = self.tokens;

        while self.index < tokens.len() {
            let token = &tokens[self.index];

            match token.kind {
                TokenKind::Symbol => self.execute_symbol(token)?,
                TokenKind::Word => self.execute_word(token)?,
                _ => {
                    return Err(ExecError::Syntax {
                        line: token.line,
                        column: token.column,
                        message: format!("token '{}' 不能作为语句开头", token.text),
                    });
                }
            }

            self.index += 1;
        }

        Ok(())
    }

    /// 读取下一个 token，缓冲耗尽时报错
    ///
    /// 这是执行器唯一的饥饿保护。
    fn next_token(&mut self) -> Result<&'a Token, ExecError> {
        let tokens = self.tokens;

        if self.index + 1 >= tokens.len() {
            return Err(ExecError::OutOfTokens);
        }

        self.index += 1;
        Ok(&tokens[self.index])
    }

    /// 以符号开头的语句：目前只有 `$` 引导的变量声明
    fn execute_symbol(&mut self, token: &Token) -> Result<(), ExecError> {
        if token.text != "$" {
            return Err(ExecError::Syntax {
                line: token.line,
                column: token.column,
                message: format!("符号 '{}' 不能作为语句开头", token.text),
            });
        }

        let name = self.next_token()?;

        if name.kind != TokenKind::Word {
            return Err(ExecError::Syntax {
                line: name.line,
                column: name.column,
                message: "'$' 之后应当是变量名".to_string(),
            });
        }

        if self.variables.contains_key(&name.text) {
            return Err(ExecError::DuplicateVariable {
                line: name.line,
                column: name.column,
                name: name.text.clone(),
            });
        }

        let value = self.parse_assignment()?;
        self.variables.insert(name.text.clone(), value);

        Ok(())
    }

    /// 以单词开头的语句：重新赋值或语句级函数调用
    ///
    /// 检查顺序有含义：先查变量表，查不到再查函数表。
    fn execute_word(&mut self, token: &'a Token) -> Result<(), ExecError> {
        if self.variables.contains_key(&token.text) {
            let value = self.parse_assignment()?;
            self.variables.insert(token.text.clone(), value);
            Ok(())
        } else if self.functions.contains_key(&token.text) {
            // 语句级调用丢弃返回值
            self.parse_call(token, true)?;
            Ok(())
        } else {
            Err(ExecError::UndefinedIdentifier {
                line: token.line,
                column: token.column,
                name: token.text.clone(),
            })
        }
    }

    /// 解析赋值尾部：`= <value> ;`，返回求出的值
    fn parse_assignment(&mut self) -> Result<Value, ExecError> {
        let equal = self.next_token()?;

        if equal.text != "=" {
            return Err(ExecError::Syntax {
                line: equal.line,
                column: equal.column,
                message: format!("变量名之后应当是 '='，而不是 '{}'", equal.text),
            });
        }

        let value_token = self.next_token()?;
        let value = self.parse_value(value_token)?;

        let semicolon = self.next_token()?;

        if semicolon.text != ";" {
            return Err(ExecError::Syntax {
                line: semicolon.line,
                column: semicolon.column,
                message: format!("值之后应当是 ';'，而不是 '{}'", semicolon.text),
            });
        }

        Ok(value)
    }

    /// 对单个 token 求值
    ///
    /// - 引号字符串 → String（引号已由词法器去掉）
    /// - 数字 → 严格按十进制 32 位整数解析，带小数点的文本
    ///   在这里报 [`ExecError::InvalidNumber`]
    /// - `true` / `false` / `null` → 对应字面量
    /// - 其他单词：变量读取（**克隆**，绝不共享），或值位置的
    ///   函数调用
    fn parse_value(&mut self, token: &'a Token) -> Result<Value, ExecError> {
        match token.kind {
            TokenKind::QuotedString => Ok(Value::String(token.text.clone())),

            TokenKind::Number => {
                token
                    .text
                    .parse::<i32>()
                    .map(Value::Number)
                    .map_err(|_| ExecError::InvalidNumber {
                        line: token.line,
                        column: token.column,
                        text: token.text.clone(),
                    })
            }

            TokenKind::Word => match token.text.as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                "null" => Ok(Value::Null),
                name => {
                    if let Some(value) = self.variables.get(name) {
                        // 读取即克隆：之后对源变量的重新赋值
                        // 不会影响已经求出的这个值
                        Ok(value.clone())
                    } else if self.functions.contains_key(name) {
                        // 值位置的调用没有尾随 ';'，由外层的
                        // ',' 或 ')' 终结
                        self.parse_call(token, false)
                    } else {
                        Err(ExecError::InvalidValue {
                            line: token.line,
                            column: token.column,
                            text: token.text.clone(),
                        })
                    }
                }
            },

            _ => Err(ExecError::InvalidValue {
                line: token.line,
                column: token.column,
                text: token.text.clone(),
            }),
        }
    }

    /// 解析并执行函数调用（语句级和值位置共用）
    ///
    /// `check_semicolon` 仅语句级调用为 true，要求尾随 `;`。
    fn parse_call(&mut self, name_token: &Token, check_semicolon: bool) -> Result<Value, ExecError> {
        let open = self.next_token()?;

        if open.text != "(" {
            return Err(ExecError::Syntax {
                line: open.line,
                column: open.column,
                message: format!("函数名之后应当是 '('，而不是 '{}'", open.text),
            });
        }

        let functions = self.functions;
        let Some(binding) = functions.get(&name_token.text) else {
            return Err(ExecError::UndefinedIdentifier {
                line: name_token.line,
                column: name_token.column,
                name: name_token.text.clone(),
            });
        };

        let mut args = Vec::new();

        loop {
            let param = self.next_token()?;

            if param.kind == TokenKind::Symbol {
                match param.text.as_str() {
                    ")" => break,
                    "," => continue, // 分隔符
                    _ => {
                        return Err(ExecError::Syntax {
                            line: param.line,
                            column: param.column,
                            message: format!("参数列表中出现意外符号 '{}'", param.text),
                        });
                    }
                }
            }

            let value = self.parse_value(param)?;
            args.push(value);
        }

        if check_semicolon {
            let semicolon = self.next_token()?;

            if semicolon.text != ";" {
                return Err(ExecError::Syntax {
                    line: semicolon.line,
                    column: semicolon.column,
                    message: format!("调用之后应当是 ';'，而不是 '{}'", semicolon.text),
                });
            }
        }

        binding.invoke(&args)
    }
}
