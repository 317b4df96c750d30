//! # Tokenizer 实现
//!
//! 逐字符的手写扫描器，无正则依赖。每次调用 [`Tokenizer::next`]
//! 产出一个 token，直到返回 [`TokenKind::EndOfInput`] 哨兵。
//!
//! ## 位置记账
//!
//! - 每消费一个字符，列号加一
//! - 只有产生换行消费（包括字符串内部的换行）才会行号加一、
//!   列号重置为 1
//! - token 上记录的行列是其**第一个字符**的位置，在扫描开始前
//!   由 `start_read` 保存

use crate::error::LexError;
use crate::lexer::token::{Token, TokenKind};

/// 默认符号字符集
const DEFAULT_SYMBOLS: [char; 8] = ['=', ',', '$', '(', ')', '{', '}', ';'];

/// 词法扫描器
///
/// 扫描状态（位置、行列、已保存的起点）全部是实例字段，
/// 多个扫描器实例互不影响。
pub struct Tokenizer {
    /// 源文本（按字符索引）
    chars: Vec<char>,
    /// 当前扫描位置
    pos: usize,
    /// 当前行号（1 起始）
    line: usize,
    /// 当前列号（1 起始）
    column: usize,

    /// token 起点：行号
    save_line: usize,
    /// token 起点：列号
    save_column: usize,
    /// token 起点：字符位置
    save_pos: usize,

    /// 构成 [`TokenKind::Symbol`] 的字符集
    symbol_chars: Vec<char>,
}

impl Tokenizer {
    /// 创建新的扫描器
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            save_line: 1,
            save_column: 1,
            save_pos: 0,
            symbol_chars: DEFAULT_SYMBOLS.to_vec(),
        }
    }

    /// 获取符号字符集
    pub fn symbol_chars(&self) -> &[char] {
        &self.symbol_chars
    }

    /// 替换符号字符集
    pub fn set_symbol_chars(&mut self, chars: Vec<char>) {
        self.symbol_chars = chars;
    }

    /// 向前看第 `count` 个字符，越界返回 `None`
    fn la(&self, count: usize) -> Option<char> {
        self.chars.get(self.pos + count).copied()
    }

    /// 消费当前字符
    fn consume(&mut self) {
        self.pos += 1;
        self.column += 1;
    }

    /// 保存当前位置作为 token 起点，供 `create_token` 使用
    fn start_read(&mut self) {
        self.save_line = self.line;
        self.save_column = self.column;
        self.save_pos = self.pos;
    }

    /// 用起点到当前位置的文本创建 token
    ///
    /// 引号字符串去掉两端引号；内部的 `""` 转义对原样保留，
    /// 不折叠为单个 `"`。
    fn create_token(&self, kind: TokenKind) -> Token {
        let range = if kind == TokenKind::QuotedString {
            self.save_pos + 1..self.pos - 1
        } else {
            self.save_pos..self.pos
        };

        let text: String = self.chars[range].iter().collect();
        Token::new(kind, text, self.save_line, self.save_column)
    }

    /// 产出下一个 token
    ///
    /// 返回 [`TokenKind::EndOfInput`] 之后不应再调用。
    pub fn next(&mut self) -> Result<Token, LexError> {
        let Some(ch) = self.la(0) else {
            return Ok(Token::new(
                TokenKind::EndOfInput,
                "",
                self.line,
                self.column,
            ));
        };

        match ch {
            ' ' | '\t' => Ok(self.read_whitespace()),

            '0'..='9' => Ok(self.read_number()),

            '\r' => {
                self.start_read();
                self.consume();

                // DOS/Windows 的 \r\n 归一为一个换行
                if self.la(0) == Some('\n') {
                    self.consume();
                }

                self.line += 1;
                self.column = 1;

                Ok(self.create_token(TokenKind::EndOfLine))
            }

            '\n' => {
                self.start_read();
                self.consume();
                self.line += 1;
                self.column = 1;

                Ok(self.create_token(TokenKind::EndOfLine))
            }

            '"' => self.read_string(),

            _ if ch.is_alphabetic() || ch == '_' => Ok(self.read_word()),

            _ if self.is_symbol(ch) => {
                self.start_read();
                self.consume();
                Ok(self.create_token(TokenKind::Symbol))
            }

            _ => Err(LexError::UnknownCharacter {
                line: self.line,
                column: self.column,
                ch,
            }),
        }
    }

    /// 读取空格/制表符的最长连续串（不含换行）
    fn read_whitespace(&mut self) -> Token {
        self.start_read();
        self.consume();

        while matches!(self.la(0), Some(' ') | Some('\t')) {
            self.consume();
        }

        self.create_token(TokenKind::Whitespace)
    }

    /// 读取数字字面量：`DIGIT+ ('.' DIGIT*)?`
    ///
    /// 最多接受一个小数点，第二个 `.` 终止扫描。带小数点的文本
    /// 会在求值阶段被整数转换拒绝。
    fn read_number(&mut self) -> Token {
        self.start_read();
        self.consume();

        let mut had_dot = false;

        loop {
            match self.la(0) {
                Some(c) if c.is_ascii_digit() => self.consume(),
                Some('.') if !had_dot => {
                    had_dot = true;
                    self.consume();
                }
                _ => break,
            }
        }

        self.create_token(TokenKind::Number)
    }

    /// 读取单词：字母或下划线的最长连续串（不含数字）
    fn read_word(&mut self) -> Token {
        self.start_read();
        self.consume();

        while matches!(self.la(0), Some(c) if c.is_alphabetic() || c == '_') {
            self.consume();
        }

        self.create_token(TokenKind::Word)
    }

    /// 读取引号字符串
    ///
    /// - `""` 是转义的引号，两个字符都被消费，扫描继续
    /// - 字符串内部允许换行（CR/LF/CRLF），并正常推进行列
    /// - 在结束引号之前遇到输入末尾是词法错误，位置指向
    ///   字符串的起始引号
    fn read_string(&mut self) -> Result<Token, LexError> {
        self.start_read();
        self.consume(); // 起始引号

        loop {
            match self.la(0) {
                None => {
                    return Err(LexError::UnterminatedString {
                        line: self.save_line,
                        column: self.save_column,
                    });
                }

                Some('\r') => {
                    self.consume();
                    if self.la(0) == Some('\n') {
                        self.consume();
                    }
                    self.line += 1;
                    self.column = 1;
                }

                Some('\n') => {
                    self.consume();
                    self.line += 1;
                    self.column = 1;
                }

                Some('"') => {
                    self.consume();
                    if self.la(0) == Some('"') {
                        self.consume(); // 转义对的第二个引号
                    } else {
                        break; // 结束引号
                    }
                }

                Some(_) => self.consume(),
            }
        }

        Ok(self.create_token(TokenKind::QuotedString))
    }

    /// 判断字符是否属于符号集
    fn is_symbol(&self, ch: char) -> bool {
        self.symbol_chars.contains(&ch)
    }
}
