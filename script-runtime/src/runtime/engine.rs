//! # Engine 模块
//!
//! 脚本引擎的公共嵌入 API。
//!
//! ## 执行模型
//!
//! ```text
//! register(...) → parse(source) → execute()
//! ```
//!
//! 1. 宿主在 `parse` 之前注册全部原生函数
//! 2. `parse` 驱动词法器，过滤空白/换行，填充 token 缓冲，
//!    同时清空变量表（变量不跨越 parse 存活）
//! 3. `execute` 把缓冲交给 [`Executor`] 逐语句执行
//!
//! 任何错误都立刻中止整个 `execute`：没有语句级恢复，也没有
//! 已执行语句的回滚。

use std::collections::HashMap;

use crate::error::ScriptResult;
use crate::function::FunctionBinding;
use crate::lexer::{Token, TokenKind, Tokenizer};
use crate::runtime::executor::Executor;
use crate::value::{Value, ValueKind};

/// 脚本引擎
///
/// 持有 token 缓冲、变量表和函数表。实例之间完全隔离，
/// 单个实例不支持并发访问。
///
/// # 使用示例
///
/// ```ignore
/// let mut engine = ScriptEngine::new();
/// engine.register("log", vec![ValueKind::String], |args| {
///     println!("{}", args[0].as_str().unwrap_or_default());
///     Value::Null
/// });
///
/// engine.parse(r#"log("hello");"#)?;
/// engine.execute()?;
/// ```
#[derive(Default)]
pub struct ScriptEngine {
    /// token 缓冲（每次 parse 整体替换）
    tokens: Vec<Token>,
    /// 变量表（每次 parse 清空）
    variables: HashMap<String, Value>,
    /// 函数表（由宿主注册一次，跨 parse 存活）
    functions: HashMap<String, FunctionBinding>,
}

impl ScriptEngine {
    /// 创建新的引擎实例
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册宿主函数
    ///
    /// 应当在 `parse`/`execute` 之前调用；执行期间函数表只读。
    /// 同名注册会覆盖旧绑定。
    pub fn register(
        &mut self,
        name: impl Into<String>,
        kinds: Vec<ValueKind>,
        func: impl Fn(&[Value]) -> Value + 'static,
    ) {
        self.functions
            .insert(name.into(), FunctionBinding::new(kinds, func));
    }

    /// 注册已构造好的函数绑定
    pub fn register_binding(&mut self, name: impl Into<String>, binding: FunctionBinding) {
        self.functions.insert(name.into(), binding);
    }

    /// 解析源文本，填充 token 缓冲
    ///
    /// 清空 token 缓冲和变量表，然后逐个取 token：空白和换行
    /// 直接丢弃，其余追加进缓冲，直到看到输入末尾哨兵
    /// （哨兵本身不入缓冲）。词法错误从这里传播。
    pub fn parse(&mut self, source: &str) -> ScriptResult<()> {
        self.tokens.clear();
        self.variables.clear();

        let mut tokenizer = Tokenizer::new(source);

        loop {
            let token = tokenizer.next()?;

            match token.kind {
                TokenKind::EndOfInput => break,
                TokenKind::Whitespace | TokenKind::EndOfLine => continue,
                _ => self.tokens.push(token),
            }
        }

        Ok(())
    }

    /// 执行 token 缓冲中的全部语句
    ///
    /// 没有返回值；副作用只通过被调用的宿主函数发生。
    pub fn execute(&mut self) -> ScriptResult<()> {
        Executor::new(&self.tokens, &mut self.variables, &self.functions).run()?;
        Ok(())
    }

    /// 查询变量当前绑定的值（供宿主在 execute 之后检视）
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// 当前已声明的变量名
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    /// 名字是否已注册为宿主函数
    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExecError, LexError, ScriptError};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// 解析并执行一段源码
    fn run(engine: &mut ScriptEngine, source: &str) -> ScriptResult<()> {
        engine.parse(source)?;
        engine.execute()
    }

    #[test]
    fn test_declare_and_read_variable() {
        let mut engine = ScriptEngine::new();
        run(&mut engine, "$x = 5;").unwrap();

        assert_eq!(engine.variable("x"), Some(&Value::Number(5)));
    }

    #[test]
    fn test_declare_all_literal_kinds() {
        let mut engine = ScriptEngine::new();
        run(
            &mut engine,
            concat!(
                "$n = 42;\n",
                "$s = \"text\";\n",
                "$t = true;\n",
                "$f = false;\n",
                "$z = null;\n",
            ),
        )
        .unwrap();

        assert_eq!(engine.variable("n"), Some(&Value::Number(42)));
        assert_eq!(engine.variable("s"), Some(&Value::string("text")));
        assert_eq!(engine.variable("t"), Some(&Value::Bool(true)));
        assert_eq!(engine.variable("f"), Some(&Value::Bool(false)));
        assert_eq!(engine.variable("z"), Some(&Value::Null));
    }

    #[test]
    fn test_duplicate_declaration_fails() {
        let mut engine = ScriptEngine::new();
        let err = run(&mut engine, "$x = 5; $x = 6;").unwrap_err();

        assert!(matches!(
            err,
            ScriptError::Exec(ExecError::DuplicateVariable { ref name, .. }) if name == "x"
        ));
    }

    #[test]
    fn test_reassignment_replaces_binding() {
        let mut engine = ScriptEngine::new();
        run(&mut engine, "$x = 5; x = \"now a string\";").unwrap();

        assert_eq!(engine.variable("x"), Some(&Value::string("now a string")));
    }

    #[test]
    fn test_variable_to_variable_assignment_clones() {
        let mut engine = ScriptEngine::new();
        run(&mut engine, "$a = \"original\"; $b = a; a = \"changed\";").unwrap();

        // b 持有独立副本，不受 a 的重新赋值影响
        assert_eq!(engine.variable("b"), Some(&Value::string("original")));
        assert_eq!(engine.variable("a"), Some(&Value::string("changed")));
    }

    #[test]
    fn test_escaped_quotes_kept_verbatim() {
        let mut engine = ScriptEngine::new();
        run(&mut engine, r#"$s = "he said ""hi""";"#).unwrap();

        // 只去掉边界引号，内部转义对原样保留
        assert_eq!(
            engine.variable("s"),
            Some(&Value::string(r#"he said ""hi"""#))
        );
    }

    #[test]
    fn test_statement_call_invokes_binding_once() {
        let recorded: Rc<RefCell<Vec<Value>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = recorded.clone();

        let mut engine = ScriptEngine::new();
        engine.register("log", vec![ValueKind::String], move |args| {
            sink.borrow_mut().push(args[0].clone());
            Value::Null
        });

        run(&mut engine, r#"log("ok");"#).unwrap();

        assert_eq!(recorded.borrow().as_slice(), &[Value::string("ok")]);
    }

    #[test]
    fn test_call_with_wrong_count_does_not_invoke() {
        let called = Rc::new(RefCell::new(0));
        let counter = called.clone();

        let mut engine = ScriptEngine::new();
        engine.register("log", vec![ValueKind::String], move |_| {
            *counter.borrow_mut() += 1;
            Value::Null
        });

        let err = run(&mut engine, r#"log("a", "b");"#).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Exec(ExecError::ArgumentCountMismatch {
                expected: 1,
                actual: 2
            })
        ));
        assert_eq!(*called.borrow(), 0);
    }

    #[test]
    fn test_call_with_wrong_kind_does_not_invoke() {
        let called = Rc::new(RefCell::new(0));
        let counter = called.clone();

        let mut engine = ScriptEngine::new();
        engine.register("log", vec![ValueKind::String], move |_| {
            *counter.borrow_mut() += 1;
            Value::Null
        });

        let err = run(&mut engine, "log(5);").unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Exec(ExecError::ArgumentTypeMismatch {
                index: 0,
                expected: ValueKind::String,
                actual: ValueKind::Number,
            })
        ));
        assert_eq!(*called.borrow(), 0);
    }

    #[test]
    fn test_clone_on_read_with_nested_call() {
        let mut engine = ScriptEngine::new();
        engine.register(
            "add",
            vec![ValueKind::Number, ValueKind::Number],
            |args| {
                let a = args[0].as_number().unwrap();
                let b = args[1].as_number().unwrap();
                Value::Number(a + b)
            },
        );

        // n 在调用前求值为 5（克隆），之后重新绑定为返回值 6
        run(&mut engine, "$n = 5; n = add(n, 1);").unwrap();

        assert_eq!(engine.variable("n"), Some(&Value::Number(6)));
    }

    #[test]
    fn test_nested_call_as_argument() {
        let recorded: Rc<RefCell<Vec<Value>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = recorded.clone();

        let mut engine = ScriptEngine::new();
        engine.register("one", vec![], |_| Value::Number(1));
        engine.register("echo", vec![ValueKind::Number], move |args| {
            sink.borrow_mut().push(args[0].clone());
            args[0].clone()
        });

        // 值位置的调用没有尾随 ';'，由外层 ')' 终结
        run(&mut engine, "echo(one());").unwrap();

        assert_eq!(recorded.borrow().as_slice(), &[Value::Number(1)]);
    }

    #[test]
    fn test_call_result_assignable() {
        let mut engine = ScriptEngine::new();
        engine.register("greeting", vec![], |_| Value::string("hello"));

        run(&mut engine, "$g = greeting();").unwrap();

        assert_eq!(engine.variable("g"), Some(&Value::string("hello")));
    }

    #[test]
    fn test_empty_argument_list() {
        let called = Rc::new(RefCell::new(0));
        let counter = called.clone();

        let mut engine = ScriptEngine::new();
        engine.register("nothing", vec![], move |_| {
            *counter.borrow_mut() += 1;
            Value::Null
        });

        run(&mut engine, "nothing();").unwrap();
        assert_eq!(*called.borrow(), 1);
    }

    #[test]
    fn test_undefined_identifier_fails() {
        let mut engine = ScriptEngine::new();
        let err = run(&mut engine, "mystery();").unwrap_err();

        assert!(matches!(
            err,
            ScriptError::Exec(ExecError::UndefinedIdentifier { ref name, .. }) if name == "mystery"
        ));
    }

    #[test]
    fn test_undefined_word_in_value_position_fails() {
        let mut engine = ScriptEngine::new();
        let err = run(&mut engine, "$x = mystery;").unwrap_err();

        assert!(matches!(
            err,
            ScriptError::Exec(ExecError::InvalidValue { ref text, .. }) if text == "mystery"
        ));
    }

    #[test]
    fn test_decimal_number_rejected_at_eval() {
        // 词法器接受 "3.5" 作为一个 Number token，
        // 求值阶段的严格 i32 解析将其拒绝（不截断）
        let mut engine = ScriptEngine::new();
        let err = run(&mut engine, "$x = 3.5;").unwrap_err();

        assert!(matches!(
            err,
            ScriptError::Exec(ExecError::InvalidNumber { ref text, line: 1, column: 6, .. })
                if text == "3.5"
        ));
        assert_eq!(engine.variable("x"), None);
    }

    #[test]
    fn test_missing_equals_is_syntax_error() {
        let mut engine = ScriptEngine::new();
        let err = run(&mut engine, "$x 5;").unwrap_err();

        assert!(matches!(err, ScriptError::Exec(ExecError::Syntax { .. })));
        assert_eq!(engine.variable("x"), None);
    }

    #[test]
    fn test_truncated_statement_reports_starvation() {
        let mut engine = ScriptEngine::new();
        let err = run(&mut engine, "$x = 5").unwrap_err();

        assert!(matches!(err, ScriptError::Exec(ExecError::OutOfTokens)));
    }

    #[test]
    fn test_earlier_statements_keep_effects_on_failure() {
        let mut engine = ScriptEngine::new();
        let err = run(&mut engine, "$a = 1; $b = oops;").unwrap_err();

        assert!(matches!(err, ScriptError::Exec(ExecError::InvalidValue { .. })));
        // 第一条语句的效果保留，失败语句无部分效果
        assert_eq!(engine.variable("a"), Some(&Value::Number(1)));
        assert_eq!(engine.variable("b"), None);
    }

    #[test]
    fn test_parse_clears_variables_but_keeps_functions() {
        let mut engine = ScriptEngine::new();
        engine.register("nothing", vec![], |_| Value::Null);

        run(&mut engine, "$x = 1;").unwrap();
        assert_eq!(engine.variable("x"), Some(&Value::Number(1)));

        // 重新 parse：变量清空，函数表仍在
        run(&mut engine, "nothing();").unwrap();
        assert_eq!(engine.variable("x"), None);
        assert!(engine.has_function("nothing"));
    }

    #[test]
    fn test_lex_error_propagates_from_parse() {
        let mut engine = ScriptEngine::new();
        let err = engine.parse("$x = #;").unwrap_err();

        assert!(matches!(
            err,
            ScriptError::Lex(LexError::UnknownCharacter { ch: '#', .. })
        ));
    }

    #[test]
    fn test_error_rendering_includes_position() {
        let mut engine = ScriptEngine::new();
        let err = run(&mut engine, "$x = 5; $x = 6;").unwrap_err();

        // 第二个 x 在第 1 行第 10 列
        assert_eq!(err.to_string(), "[Line 1:10] 变量 'x' 已存在");
    }

    #[test]
    fn test_multiline_script_positions() {
        let mut engine = ScriptEngine::new();
        let err = run(&mut engine, "$a = 1;\r\n$b = wrong;").unwrap_err();

        assert!(matches!(
            err,
            ScriptError::Exec(ExecError::InvalidValue { line: 2, column: 6, .. })
        ));
    }

    #[test]
    fn test_statement_call_requires_semicolon() {
        let mut engine = ScriptEngine::new();
        engine.register("nothing", vec![], |_| Value::Null);

        let err = run(&mut engine, "nothing() nothing();").unwrap_err();
        assert!(matches!(err, ScriptError::Exec(ExecError::Syntax { .. })));
    }
}
