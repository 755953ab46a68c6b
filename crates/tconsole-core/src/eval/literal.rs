//! Offline evaluator for Lua literals and simple expressions.
//!
//! Understands numbers, strings, booleans, `nil`/`box.NULL`, table
//! constructors and the arithmetic, comparison, concatenation and logical
//! operators, plus a handful of builtins (`error`, `tostring`, `tonumber`,
//! `type`, `box.tuple.new`). Anything that would need a live server is
//! reported as an error value.

use tracing::trace;

use super::lexer::{Lexer, Token};
use super::{Evaluator, Language};
use crate::value::{Key, Value, format_float};

#[derive(Debug, Default, Clone, Copy)]
pub struct LiteralEvaluator;

impl LiteralEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for LiteralEvaluator {
    fn evaluate(&mut self, source: &str, language: Language) -> Vec<Value> {
        if source.trim().is_empty() {
            return Vec::new();
        }
        if language == Language::Sql {
            return vec![Value::error("SQL is not supported by the literal evaluator")];
        }
        match evaluate_lua(source) {
            Ok(values) => values,
            Err(message) => {
                trace!(%message, "evaluation failed");
                vec![Value::Error(message)]
            }
        }
    }
}

fn evaluate_lua(source: &str) -> Result<Vec<Value>, String> {
    let tokens = Lexer::new(source).tokenize()?;
    let exprs = Parser::new(tokens).parse_chunk()?;
    exprs
        .iter()
        .map(|expr| eval(expr).and_then(Object::into_value))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Concat,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum UnOp {
    Neg,
    Not,
    Len,
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Nil,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Str(String),
    Name(String),
    Table(Vec<Field>),
    Index(Box<Expr>, Box<Expr>),
    Call(Box<Expr>, Vec<Expr>),
    Method(Box<Expr>, String),
    Unary(UnOp, Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
enum Field {
    Positional(Expr),
    Named(String, Expr),
    Keyed(Expr, Expr),
}

static EOF: Token = Token::Eof;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&EOF)
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == token {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token) -> Result<(), String> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(format!("'{token}' expected near '{}'", self.peek()))
        }
    }

    fn is_keyword(&self, word: &str) -> bool {
        matches!(self.peek(), Token::Name(name) if name == word)
    }

    /// `[return] expr {, expr} [;]`
    fn parse_chunk(mut self) -> Result<Vec<Expr>, String> {
        if self.is_keyword("return") {
            self.advance();
        }
        let mut exprs = Vec::new();
        if !matches!(self.peek(), Token::Eof | Token::Semicolon) {
            exprs.push(self.parse_expr()?);
            while self.eat(&Token::Comma) {
                exprs.push(self.parse_expr()?);
            }
        }
        self.eat(&Token::Semicolon);
        match self.peek() {
            Token::Eof => Ok(exprs),
            other => Err(format!("unexpected symbol near '{other}'")),
        }
    }

    fn parse_expr(&mut self) -> Result<Expr, String> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, String> {
        let mut left = self.parse_and()?;
        while self.is_keyword("or") {
            self.advance();
            let right = self.parse_and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, String> {
        let mut left = self.parse_comparison()?;
        while self.is_keyword("and") {
            self.advance();
            let right = self.parse_comparison()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expr, String> {
        let mut left = self.parse_concat()?;
        loop {
            let op = match self.peek() {
                Token::Eq => BinOp::Eq,
                Token::NotEq => BinOp::NotEq,
                Token::Less => BinOp::Less,
                Token::LessEq => BinOp::LessEq,
                Token::Greater => BinOp::Greater,
                Token::GreaterEq => BinOp::GreaterEq,
                _ => break,
            };
            self.advance();
            let right = self.parse_concat()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    // Right associative.
    fn parse_concat(&mut self) -> Result<Expr, String> {
        let left = self.parse_additive()?;
        if self.eat(&Token::Concat) {
            let right = self.parse_concat()?;
            return Ok(Expr::Binary(BinOp::Concat, Box::new(left), Box::new(right)));
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, String> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, String> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                Token::Percent => BinOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, String> {
        let op = match self.peek() {
            Token::Minus => UnOp::Neg,
            Token::Hash => UnOp::Len,
            Token::Name(name) if name == "not" => UnOp::Not,
            _ => return self.parse_power(),
        };
        self.advance();
        let operand = self.parse_unary()?;
        Ok(Expr::Unary(op, Box::new(operand)))
    }

    // `^` binds tighter than unary minus on its left: `-2^2` is `-(2^2)`.
    fn parse_power(&mut self) -> Result<Expr, String> {
        let base = self.parse_suffixed()?;
        if self.eat(&Token::Caret) {
            let exponent = self.parse_unary()?;
            return Ok(Expr::Binary(BinOp::Pow, Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn parse_suffixed(&mut self) -> Result<Expr, String> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.peek() {
                Token::Dot => {
                    self.advance();
                    let name = self.parse_name()?;
                    expr = Expr::Index(Box::new(expr), Box::new(Expr::Str(name)));
                }
                Token::LBracket => {
                    self.advance();
                    let key = self.parse_expr()?;
                    self.expect(&Token::RBracket)?;
                    expr = Expr::Index(Box::new(expr), Box::new(key));
                }
                Token::LParen => {
                    let args = self.parse_args()?;
                    expr = Expr::Call(Box::new(expr), args);
                }
                Token::String(text) => {
                    let arg = Expr::Str(text.clone());
                    self.advance();
                    expr = Expr::Call(Box::new(expr), vec![arg]);
                }
                Token::LBrace => {
                    let table = self.parse_table()?;
                    expr = Expr::Call(Box::new(expr), vec![table]);
                }
                Token::Colon => {
                    self.advance();
                    let name = self.parse_name()?;
                    if matches!(self.peek(), Token::LParen) {
                        self.parse_args()?;
                    }
                    expr = Expr::Method(Box::new(expr), name);
                }
                _ => return Ok(expr),
            }
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, String> {
        match self.advance() {
            Token::Integer(n) => Ok(Expr::Integer(n)),
            Token::Float(x) => Ok(Expr::Float(x)),
            Token::String(s) => Ok(Expr::Str(s)),
            Token::Name(name) => match name.as_str() {
                "nil" => Ok(Expr::Nil),
                "true" => Ok(Expr::Bool(true)),
                "false" => Ok(Expr::Bool(false)),
                "and" | "or" | "not" | "return" | "function" | "local" | "end" => {
                    Err(format!("unexpected symbol near '{name}'"))
                }
                _ => Ok(Expr::Name(name)),
            },
            Token::LParen => {
                let inner = self.parse_expr()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            Token::LBrace => {
                self.pos -= 1;
                self.parse_table()
            }
            other => Err(format!("unexpected symbol near '{other}'")),
        }
    }

    fn parse_name(&mut self) -> Result<String, String> {
        match self.advance() {
            Token::Name(name) => Ok(name),
            other => Err(format!("<name> expected near '{other}'")),
        }
    }

    fn parse_args(&mut self) -> Result<Vec<Expr>, String> {
        self.expect(&Token::LParen)?;
        let mut args = Vec::new();
        if !self.eat(&Token::RParen) {
            args.push(self.parse_expr()?);
            while self.eat(&Token::Comma) {
                args.push(self.parse_expr()?);
            }
            self.expect(&Token::RParen)?;
        }
        Ok(args)
    }

    /// `{ [field {sep field} [sep]] }` where sep is `,` or `;`.
    fn parse_table(&mut self) -> Result<Expr, String> {
        self.expect(&Token::LBrace)?;
        let mut fields = Vec::new();
        while !self.eat(&Token::RBrace) {
            fields.push(self.parse_field()?);
            if !self.eat(&Token::Comma) && !self.eat(&Token::Semicolon) {
                self.expect(&Token::RBrace)?;
                break;
            }
        }
        Ok(Expr::Table(fields))
    }

    fn parse_field(&mut self) -> Result<Field, String> {
        if self.eat(&Token::LBracket) {
            let key = self.parse_expr()?;
            self.expect(&Token::RBracket)?;
            self.expect(&Token::Assign)?;
            return Ok(Field::Keyed(key, self.parse_expr()?));
        }
        if let Token::Name(name) = self.peek()
            && self.tokens.get(self.pos + 1) == Some(&Token::Assign)
        {
            let name = name.clone();
            self.pos += 2;
            return Ok(Field::Named(name, self.parse_expr()?));
        }
        Ok(Field::Positional(self.parse_expr()?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Builtin {
    Error,
    ToString,
    ToNumber,
    Type,
    TupleNew,
}

/// Intermediate result: a plain value or something only callable/indexable.
#[derive(Debug, Clone, PartialEq)]
enum Object {
    Value(Value),
    Builtin(Builtin),
    Namespace(&'static str),
}

impl Object {
    fn into_value(self) -> Result<Value, String> {
        match self {
            Object::Value(value) => Ok(value),
            Object::Builtin(_) => Err("functions cannot be displayed".to_string()),
            Object::Namespace(_) => Err("modules cannot be displayed".to_string()),
        }
    }
}

fn eval(expr: &Expr) -> Result<Object, String> {
    let value = match expr {
        Expr::Nil => Value::Null,
        Expr::Bool(b) => Value::Bool(*b),
        Expr::Integer(n) => Value::Integer(*n),
        Expr::Float(x) => Value::Float(*x),
        Expr::Str(s) => Value::String(s.clone()),
        Expr::Name(name) => return global(name),
        Expr::Table(fields) => build_table(fields)?,
        Expr::Index(target, key) => return index(eval(target)?, &eval_value(key)?),
        Expr::Call(callee, args) => {
            let args = args.iter().map(eval_value).collect::<Result<Vec<_>, _>>()?;
            call(eval(callee)?, args)?
        }
        Expr::Method(_, name) => {
            return Err(format!("method '{name}' needs a connected server"));
        }
        Expr::Unary(op, operand) => unary(*op, eval_value(operand)?)?,
        Expr::Binary(op, left, right) => binary(*op, eval_value(left)?, eval_value(right)?)?,
        Expr::And(left, right) => {
            let left = eval_value(left)?;
            if truthy(&left) { eval_value(right)? } else { left }
        }
        Expr::Or(left, right) => {
            let left = eval_value(left)?;
            if truthy(&left) { left } else { eval_value(right)? }
        }
    };
    Ok(Object::Value(value))
}

fn eval_value(expr: &Expr) -> Result<Value, String> {
    eval(expr)?.into_value()
}

fn global(name: &str) -> Result<Object, String> {
    match name {
        "error" => Ok(Object::Builtin(Builtin::Error)),
        "tostring" => Ok(Object::Builtin(Builtin::ToString)),
        "tonumber" => Ok(Object::Builtin(Builtin::ToNumber)),
        "type" => Ok(Object::Builtin(Builtin::Type)),
        "box" => Ok(Object::Namespace("box")),
        _ => Err(format!("variable '{name}' is not declared")),
    }
}

fn index(target: Object, key: &Value) -> Result<Object, String> {
    match (&target, key) {
        (Object::Namespace("box"), Value::String(k)) if k == "NULL" => {
            Ok(Object::Value(Value::Null))
        }
        (Object::Namespace("box"), Value::String(k)) if k == "tuple" => {
            Ok(Object::Namespace("box.tuple"))
        }
        (Object::Namespace("box.tuple"), Value::String(k)) if k == "new" => {
            Ok(Object::Builtin(Builtin::TupleNew))
        }
        (Object::Namespace(module), _) => Err(format!(
            "'{module}.{}' needs a connected server",
            key.cell_text()
        )),
        (Object::Value(value @ (Value::Array(_) | Value::Map(_))), _) => {
            let found = table_key(key)?.and_then(|key| value.get(&key).cloned());
            Ok(Object::Value(found.unwrap_or(Value::Null)))
        }
        (Object::Value(value), _) => Err(format!(
            "attempt to index a {} value",
            type_name(value)
        )),
        (Object::Builtin(_), _) => Err("attempt to index a function value".to_string()),
    }
}

fn call(callee: Object, mut args: Vec<Value>) -> Result<Value, String> {
    let builtin = match callee {
        Object::Builtin(builtin) => builtin,
        Object::Value(value) => {
            return Err(format!("attempt to call a {} value", type_name(&value)));
        }
        Object::Namespace(_) => return Err("attempt to call a table value".to_string()),
    };
    let first = args.first().cloned().unwrap_or(Value::Null);
    match builtin {
        Builtin::Error => Err(first.cell_text()),
        Builtin::ToString => Ok(Value::String(first.cell_text())),
        Builtin::ToNumber => Ok(to_number(&first).unwrap_or(Value::Null)),
        Builtin::Type => Ok(Value::string(type_name(&first))),
        Builtin::TupleNew => {
            if args.len() == 1 && args[0].is_container() {
                Ok(args.remove(0))
            } else {
                Ok(Value::Array(args))
            }
        }
    }
}

fn build_table(fields: &[Field]) -> Result<Value, String> {
    if fields.iter().all(|f| matches!(f, Field::Positional(_))) {
        let items = fields
            .iter()
            .filter_map(|f| match f {
                Field::Positional(expr) => Some(eval_value(expr)),
                _ => None,
            })
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Value::Array(items));
    }

    let mut entries: Vec<(Key, Value)> = Vec::new();
    let mut next_index = 1;
    for field in fields {
        let (key, value) = match field {
            Field::Positional(expr) => {
                let key = Key::Index(next_index);
                next_index += 1;
                (key, eval_value(expr)?)
            }
            Field::Named(name, expr) => (Key::Name(name.clone()), eval_value(expr)?),
            Field::Keyed(key, expr) => {
                let key = eval_value(key)?;
                let Some(key) = table_key(&key)? else {
                    return Err("table index is nil".to_string());
                };
                (key, eval_value(expr)?)
            }
        };
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => entries.push((key, value)),
        }
    }

    // Index keys come first in ascending order, like the array part of a Lua table.
    entries.sort_by_key(|(key, _)| match key {
        Key::Index(index) => (false, *index),
        Key::Name(_) => (true, 0),
    });
    if Value::is_positional_map(&entries) {
        return Ok(Value::Array(entries.into_iter().map(|(_, v)| v).collect()));
    }
    Ok(Value::Map(entries))
}

/// Map key for a Lua value; `None` for nil.
fn table_key(key: &Value) -> Result<Option<Key>, String> {
    match key {
        Value::Null => Ok(None),
        Value::Integer(n) if *n >= 1 => Ok(Some(Key::Index(n.unsigned_abs()))),
        Value::Float(x) if *x >= 1.0 && x.fract() == 0.0 && *x < 9.0e15 => {
            Ok(Some(Key::Index(*x as u64)))
        }
        Value::String(s) => Ok(Some(Key::Name(s.clone()))),
        Value::Integer(_) | Value::Float(_) | Value::Bool(_) => Ok(Some(Key::Name(key.cell_text()))),
        _ => Err("unsupported table key".to_string()),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "nil",
        Value::Bool(_) => "boolean",
        Value::Integer(_) | Value::Float(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) | Value::Map(_) | Value::Error(_) => "table",
    }
}

fn truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

fn to_number(value: &Value) -> Option<Value> {
    match value {
        Value::Integer(_) | Value::Float(_) => Some(value.clone()),
        Value::String(s) => match Lexer::new(s.trim()).tokenize().ok()?.as_slice() {
            [Token::Integer(n), Token::Eof] => Some(Value::Integer(*n)),
            [Token::Float(x), Token::Eof] => Some(Value::Float(*x)),
            [Token::Minus, Token::Integer(n), Token::Eof] => Some(Value::Integer(-n)),
            [Token::Minus, Token::Float(x), Token::Eof] => Some(Value::Float(-x)),
            _ => None,
        },
        _ => None,
    }
}

fn as_float(value: &Value) -> f64 {
    match value {
        Value::Integer(n) => *n as f64,
        Value::Float(x) => *x,
        _ => f64::NAN,
    }
}

fn unary(op: UnOp, operand: Value) -> Result<Value, String> {
    match op {
        UnOp::Not => Ok(Value::Bool(!truthy(&operand))),
        UnOp::Neg => match to_number(&operand) {
            Some(Value::Integer(n)) => Ok(n
                .checked_neg()
                .map_or(Value::Float(-(n as f64)), Value::Integer)),
            Some(number) => Ok(Value::Float(-as_float(&number))),
            None => Err(format!(
                "attempt to perform arithmetic on a {} value",
                type_name(&operand)
            )),
        },
        UnOp::Len => match &operand {
            Value::String(s) => Ok(Value::Integer(s.len() as i64)),
            Value::Array(items) => Ok(Value::Integer(items.len() as i64)),
            Value::Map(entries) => Ok(Value::Integer(Value::positional_prefix(entries) as i64)),
            other => Err(format!(
                "attempt to get length of a {} value",
                type_name(other)
            )),
        },
    }
}

fn binary(op: BinOp, left: Value, right: Value) -> Result<Value, String> {
    match op {
        BinOp::Concat => concat(&left, &right),
        BinOp::Eq => Ok(Value::Bool(equals(&left, &right))),
        BinOp::NotEq => Ok(Value::Bool(!equals(&left, &right))),
        BinOp::Less | BinOp::LessEq | BinOp::Greater | BinOp::GreaterEq => {
            compare(op, &left, &right)
        }
        _ => arithmetic(op, &left, &right),
    }
}

fn equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Integer(_) | Value::Float(_), Value::Integer(_) | Value::Float(_)) => {
            as_float(left) == as_float(right)
        }
        _ => left == right,
    }
}

fn concat(left: &Value, right: &Value) -> Result<Value, String> {
    let piece = |value: &Value| match value {
        Value::String(s) => Ok(s.clone()),
        Value::Integer(n) => Ok(n.to_string()),
        Value::Float(x) => Ok(format_float(*x)),
        other => Err(format!(
            "attempt to concatenate a {} value",
            type_name(other)
        )),
    };
    Ok(Value::String(piece(left)? + &piece(right)?))
}

fn compare(op: BinOp, left: &Value, right: &Value) -> Result<Value, String> {
    let ordering = match (left, right) {
        (Value::String(a), Value::String(b)) => a.partial_cmp(b),
        (Value::Integer(a), Value::Integer(b)) => a.partial_cmp(b),
        (Value::Integer(_) | Value::Float(_), Value::Integer(_) | Value::Float(_)) => {
            as_float(left).partial_cmp(&as_float(right))
        }
        _ => {
            return Err(format!(
                "attempt to compare {} with {}",
                type_name(left),
                type_name(right)
            ));
        }
    };
    let result = ordering.is_some_and(|ordering| match op {
        BinOp::Less => ordering.is_lt(),
        BinOp::LessEq => ordering.is_le(),
        BinOp::Greater => ordering.is_gt(),
        _ => ordering.is_ge(),
    });
    Ok(Value::Bool(result))
}

fn arithmetic(op: BinOp, left: &Value, right: &Value) -> Result<Value, String> {
    let operand = |value: &Value| {
        to_number(value).ok_or_else(|| {
            format!(
                "attempt to perform arithmetic on a {} value",
                type_name(value)
            )
        })
    };
    let (a, b) = (operand(left)?, operand(right)?);

    if let (Value::Integer(x), Value::Integer(y)) = (&a, &b) {
        let exact = match op {
            BinOp::Add => x.checked_add(*y),
            BinOp::Sub => x.checked_sub(*y),
            BinOp::Mul => x.checked_mul(*y),
            BinOp::Mod if *y != 0 => x.checked_rem_euclid(*y).map(|r| {
                if r != 0 && *y < 0 { r + y } else { r }
            }),
            _ => None,
        };
        if let Some(n) = exact {
            return Ok(Value::Integer(n));
        }
    }

    let (x, y) = (as_float(&a), as_float(&b));
    let result = match op {
        BinOp::Add => x + y,
        BinOp::Sub => x - y,
        BinOp::Mul => x * y,
        BinOp::Div => x / y,
        BinOp::Mod => x - (x / y).floor() * y,
        _ => x.powf(y),
    };
    Ok(Value::Float(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lua(source: &str) -> Vec<Value> {
        LiteralEvaluator::new().evaluate(source, Language::Lua)
    }

    fn ints(values: &[i64]) -> Value {
        Value::Array(values.iter().copied().map(Value::Integer).collect())
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(lua("2+2"), vec![Value::Integer(4)]);
        assert_eq!(lua("2 + 3 * 4"), vec![Value::Integer(14)]);
        assert_eq!(lua("(2 + 3) * 4"), vec![Value::Integer(20)]);
        assert_eq!(lua("10 / 4"), vec![Value::Float(2.5)]);
        assert_eq!(lua("-2^2"), vec![Value::Float(-4.0)]);
        assert_eq!(lua("2^3^2"), vec![Value::Float(512.0)]);
        assert_eq!(lua("-7 % 3"), vec![Value::Integer(2)]);
        assert_eq!(lua("'10' + 1"), vec![Value::Integer(11)]);
    }

    #[test]
    fn test_multiple_results() {
        assert_eq!(
            lua("1, 'two', true, nil"),
            vec![
                Value::Integer(1),
                Value::string("two"),
                Value::Bool(true),
                Value::Null
            ]
        );
    }

    #[test]
    fn test_return_prefix_and_semicolon() {
        assert_eq!(lua("return 1, 2;"), vec![Value::Integer(1), Value::Integer(2)]);
    }

    #[test]
    fn test_blank_input_yields_nothing() {
        assert!(lua("").is_empty());
        assert!(lua("   \t").is_empty());
    }

    #[test]
    fn test_array_constructors() {
        assert_eq!(
            lua("{10,20,30},{40,50,60},{70,80},{box.NULL,90}"),
            vec![
                ints(&[10, 20, 30]),
                ints(&[40, 50, 60]),
                ints(&[70, 80]),
                Value::Array(vec![Value::Null, Value::Integer(90)]),
            ]
        );
        assert_eq!(lua("{}"), vec![Value::Array(vec![])]);
    }

    #[test]
    fn test_keyed_constructors() {
        assert_eq!(
            lua("{data=123,'Hi'}"),
            vec![Value::Map(vec![
                (Key::Index(1), Value::string("Hi")),
                (Key::from("data"), Value::Integer(123)),
            ])]
        );
        assert_eq!(
            lua("{['a b'] = 1, [5] = 2, x = 3}"),
            vec![Value::Map(vec![
                (Key::Index(5), Value::Integer(2)),
                (Key::from("a b"), Value::Integer(1)),
                (Key::from("x"), Value::Integer(3)),
            ])]
        );
        assert_eq!(lua("{[1]='x', [2]='y'}"), vec![Value::Array(vec![
            Value::string("x"),
            Value::string("y")
        ])]);
    }

    #[test]
    fn test_tuple_new_is_identity() {
        assert_eq!(
            lua("box.tuple.new({1, 'a'})"),
            vec![Value::Array(vec![Value::Integer(1), Value::string("a")])]
        );
        assert_eq!(lua("box.tuple.new(1, 2)"), vec![ints(&[1, 2])]);
    }

    #[test]
    fn test_error_call() {
        assert_eq!(lua("error('test')"), vec![Value::error("test")]);
        assert_eq!(lua("1, error('boom')"), vec![Value::error("boom")]);
    }

    #[test]
    fn test_undeclared_variable() {
        assert_eq!(
            lua("foo"),
            vec![Value::error("variable 'foo' is not declared")]
        );
    }

    #[test]
    fn test_logic_short_circuits() {
        assert_eq!(lua("false and error('x')"), vec![Value::Bool(false)]);
        assert_eq!(lua("nil or 'fallback'"), vec![Value::string("fallback")]);
        assert_eq!(lua("not nil"), vec![Value::Bool(true)]);
    }

    #[test]
    fn test_strings_and_builtins() {
        assert_eq!(lua("'a' .. 1 .. 'b'"), vec![Value::string("a1b")]);
        assert_eq!(lua("#'hello'"), vec![Value::Integer(5)]);
        assert_eq!(lua("#{1, 2, 3}"), vec![Value::Integer(3)]);
        assert_eq!(lua("tostring(12)"), vec![Value::string("12")]);
        assert_eq!(lua("tonumber('0x10')"), vec![Value::Integer(16)]);
        assert_eq!(lua("type({})"), vec![Value::string("table")]);
        assert_eq!(lua("1 < 2, 'b' >= 'a', 1 == 1.0"), vec![
            Value::Bool(true),
            Value::Bool(true),
            Value::Bool(true)
        ]);
    }

    #[test]
    fn test_indexing_tables() {
        assert_eq!(lua("({a = 1}).a"), vec![Value::Integer(1)]);
        assert_eq!(lua("({10, 20})[2]"), vec![Value::Integer(20)]);
    }

    #[test]
    fn test_syntax_errors_become_values() {
        assert_eq!(lua("1 +"), vec![Value::error("unexpected symbol near '<eof>'")]);
        assert_eq!(lua("{1, 2"), vec![Value::error("'}' expected near '<eof>'")]);
    }

    #[test]
    fn test_sql_is_reported() {
        let values = LiteralEvaluator::new().evaluate("SELECT 1", Language::Sql);
        assert_eq!(
            values,
            vec![Value::error("SQL is not supported by the literal evaluator")]
        );
    }
}
