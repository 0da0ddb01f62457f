/*
	polyplot - Plot Symbolic Expressions and Evolve Polynomial Fits

	Copyright(c) 2025 Luo Jie

	Permission is hereby granted, free of charge, to any person obtaining a copy
	of this softwareand associated documentation files(the "Software"), to deal
	in the Software without restriction, including without limitation the rights
	to use, copy, modify, merge, publish, distribute, sublicense, and /or sell
	copies of the Software, and to permit persons to whom the Software is
	furnished to do so, subject to the following conditions :

	The above copyright noticeand this permission notice shall be included in all
	copies or substantial portions of the Software.

	THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
	IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
	FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.IN NO EVENT SHALL THE
	AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
	LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
	OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
	SOFTWARE.
 */

//! Tokenizer that converts a mathematical expression in a string form into a series of `Token`s.
//!
//! The underlying parser is built using the [nom] parser combinator crate.
//!
//! The parser should tokenize only well-formed expressions.
//!
//! [nom]: https://crates.io/crates/nom

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{char, digit0, digit1, multispace0, one_of, satisfy},
    combinator::{map, map_res, opt, recognize},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

use thiserror::Error;

/// An error reported by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenParseError {
    /// A token that is not allowed at the given location (contains the location of the offending
    /// character in the source string).
    #[error("unexpected token at byte {0}")]
    UnexpectedToken(usize),
    /// Missing right parentheses at the end of the source string (contains the number of missing
    /// parens).
    #[error("missing {0} right parenthes{}", paren_suffix(.0))]
    MissingRParen(usize),
    /// Missing operator or function argument at the end of the expression.
    #[error("missing argument at the end of expression")]
    MissingArgument,
}

fn paren_suffix(n: &usize) -> &'static str {
    if *n == 1 { "is" } else { "es" }
}

/// Mathematical operations.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Operation {
    Plus,
    Minus,
    Times,
    Div,
    Rem,
    Pow,
}

/// Expression tokens.
#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    /// Binary operation.
    Binary(Operation),
    /// Unary operation.
    Unary(Operation),

    /// Left parenthesis.
    LParen,
    /// Right parenthesis.
    RParen,
    /// Comma: function argument separator
    Comma,

    /// A number.
    Number(f64),
    /// A variable.
    Var(String),
    /// A function with name and number of arguments.
    Func(String, Option<usize>),
}

type ParseResult<'a> = IResult<&'a str, Token>;

/// `**` is the power operator of the expression files, `^` is accepted as well.
fn binop(i: &str) -> ParseResult<'_> {
    alt((
        map(tag("**"), |_| Token::Binary(Operation::Pow)),
        map(one_of("+-*/%^"), |c| {
            Token::Binary(match c {
                '+' => Operation::Plus,
                '-' => Operation::Minus,
                '*' => Operation::Times,
                '/' => Operation::Div,
                '%' => Operation::Rem,
                _ => Operation::Pow,
            })
        }),
    ))(i)
}

fn lparen(i: &str) -> ParseResult<'_> {
    map(char('('), |_| Token::LParen)(i)
}

fn rparen(i: &str) -> ParseResult<'_> {
    map(char(')'), |_| Token::RParen)(i)
}

fn comma(i: &str) -> ParseResult<'_> {
    map(char(','), |_| Token::Comma)(i)
}

/// Unary sign, either `-` or `+`.
fn negpos(i: &str) -> ParseResult<'_> {
    map(one_of("+-"), |c| match c {
        '-' => Token::Unary(Operation::Minus),
        _ => Token::Unary(Operation::Plus),
    })(i)
}

fn ident(i: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(i)
}

fn var(i: &str) -> ParseResult<'_> {
    map(ident, |s: &str| Token::Var(s.into()))(i)
}

/// Parse `func(`, returns `func`.
fn func(i: &str) -> ParseResult<'_> {
    map(
        terminated(ident, preceded(multispace0, char('('))),
        |s: &str| Token::Func(s.into(), None),
    )(i)
}

/// Unsigned decimal literal: `12`, `1.5`, `.5`, `2.`, `1e3`, `2.5E-2`.
///
/// A dangling exponent (`1e`) is not consumed, so the tokenizer rejects it on the next step.
fn number(i: &str) -> ParseResult<'_> {
    let mantissa = alt((
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    ));
    let exponent = tuple((one_of("eE"), opt(one_of("+-")), digit1));

    map_res(recognize(pair(mantissa, opt(exponent))), |s: &str| {
        s.parse::<f64>().map(Token::Number)
    })(i)
}

fn lexpr(i: &str) -> ParseResult<'_> {
    delimited(
        multispace0,
        alt((number, func, var, negpos, lparen)),
        multispace0,
    )(i)
}

fn after_rexpr(i: &str) -> ParseResult<'_> {
    delimited(multispace0, alt((binop, rparen)), multispace0)(i)
}

fn after_rexpr_no_paren(i: &str) -> ParseResult<'_> {
    delimited(multispace0, binop, multispace0)(i)
}

fn after_rexpr_comma(i: &str) -> ParseResult<'_> {
    delimited(multispace0, alt((binop, rparen, comma)), multispace0)(i)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenizerState {
    // accept any token that is an expression from the left: var, num, (, negpos
    LExpr,
    // accept any token that needs an expression on the left: binop, ), comma
    AfterRExpr,
}

#[derive(Debug, Clone, Copy)]
enum ParenState {
    Subexpr,
    Func,
}

/// Tokenize a given mathematical expression.
///
/// The parser should return `Ok` only if the expression is well-formed.
///
/// # Failure
///
/// Returns `Err` if the expression is not well-formed.
pub fn tokenize<S: AsRef<str>>(input: S) -> Result<Vec<Token>, TokenParseError> {
    let input = input.as_ref();
    let mut state = TokenizerState::LExpr;
    let mut paren_stack = vec![];
    let mut res = vec![];

    let mut s = input;

    while !s.trim_start().is_empty() {
        let r = match (state, paren_stack.last()) {
            (TokenizerState::LExpr, _) => lexpr(s),
            (TokenizerState::AfterRExpr, None) => after_rexpr_no_paren(s),
            (TokenizerState::AfterRExpr, Some(&ParenState::Subexpr)) => after_rexpr(s),
            (TokenizerState::AfterRExpr, Some(&ParenState::Func)) => after_rexpr_comma(s),
        };

        let (rest, t) = r.map_err(|_| {
            TokenParseError::UnexpectedToken(input.len() - s.trim_start().len())
        })?;

        match t {
            Token::LParen => {
                paren_stack.push(ParenState::Subexpr);
            }
            Token::Func(..) => {
                paren_stack.push(ParenState::Func);
            }
            Token::RParen => {
                paren_stack.pop();
            }
            Token::Var(_) | Token::Number(_) => {
                state = TokenizerState::AfterRExpr;
            }
            Token::Binary(_) | Token::Comma => {
                state = TokenizerState::LExpr;
            }
            Token::Unary(_) => {}
        }
        res.push(t);
        s = rest;
    }

    match state {
        TokenizerState::LExpr => Err(TokenParseError::MissingArgument),
        TokenizerState::AfterRExpr if !paren_stack.is_empty() => {
            Err(TokenParseError::MissingRParen(paren_stack.len()))
        }
        TokenizerState::AfterRExpr => Ok(res),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nom::error::{Error, ErrorKind};
    use nom::Err;

    #[test]
    fn it_works() {
        assert_eq!(binop("+"), Ok(("", Token::Binary(Operation::Plus))));
        assert_eq!(binop("**2"), Ok(("2", Token::Binary(Operation::Pow))));
        assert_eq!(binop("*2"), Ok(("2", Token::Binary(Operation::Times))));
        assert_eq!(binop("^"), Ok(("", Token::Binary(Operation::Pow))));
        assert_eq!(ident("abc32"), Ok(("", "abc32")));
        assert_eq!(func("abc("), Ok(("", Token::Func("abc".into(), None))));
        assert_eq!(func("abc ("), Ok(("", Token::Func("abc".into(), None))));
        assert_eq!(var("abc"), Ok(("", Token::Var("abc".into()))));
        assert_eq!(negpos("+"), Ok(("", Token::Unary(Operation::Plus))));
        assert_eq!(negpos("-563"), Ok(("563", Token::Unary(Operation::Minus))));
        assert_eq!(lparen("("), Ok(("", Token::LParen)));
        assert_eq!(rparen(")"), Ok(("", Token::RParen)));
        assert_eq!(comma(","), Ok(("", Token::Comma)));
    }

    #[test]
    fn test_lexpr() {
        assert_eq!(lexpr("a"), Ok(("", Token::Var("a".into()))));
        assert_eq!(lexpr("2+"), Ok(("+", Token::Number(2.0))));
        assert_eq!(lexpr("2 +(3--2) "), Ok(("+(3--2) ", Token::Number(2.0))));
        assert_eq!(lexpr(" -x"), Ok(("x", Token::Unary(Operation::Minus))));
        assert_eq!(lexpr("sin (x)"), Ok(("x)", Token::Func("sin".into(), None))));
    }

    #[test]
    fn test_var() {
        for &s in ["abc", "U0", "_034", "a_be45EA", "aAzZ_"].iter() {
            assert_eq!(var(s), Ok(("", Token::Var(s.into()))));
        }

        assert_eq!(var(""), Err(Err::Error(Error::new("", ErrorKind::Satisfy))));
        assert_eq!(var("0"), Err(Err::Error(Error::new("0", ErrorKind::Satisfy))));
    }

    #[test]
    fn test_number() {
        assert_eq!(number("45"), Ok(("", Token::Number(45.0))));
        assert_eq!(number("32143.25"), Ok(("", Token::Number(32143.25))));
        assert_eq!(number("2."), Ok(("", Token::Number(2.0))));
        assert_eq!(number(".5"), Ok(("", Token::Number(0.5))));
        assert_eq!(number("0.125e9"), Ok(("", Token::Number(0.125e9))));
        assert_eq!(number("20.5E-3"), Ok(("", Token::Number(20.5E-3))));
        assert_eq!(number("123423e+50"), Ok(("", Token::Number(123423e+50))));
        assert_eq!(number("3--2 "), Ok(("--2 ", Token::Number(3.0))));
        assert_eq!(number("1e"), Ok(("e", Token::Number(1.0))));
        assert_eq!(number("1e+-?%"), Ok(("e+-?%", Token::Number(1.0))));
        assert_eq!(number("2*x"), Ok(("*x", Token::Number(2.0))));

        assert!(number("").is_err());
        assert!(number("+3").is_err());
        assert!(number("e").is_err());
        assert!(number(".").is_err());
        assert!(number("(3) ").is_err());
    }

    #[test]
    fn test_func() {
        for &s in ["abc(", "u0(", "_034 (", "A_be45EA  ("].iter() {
            assert_eq!(
                func(s),
                Ok(("", Token::Func(s[0..s.len() - 1].trim().into(), None)))
            );
        }

        assert!(func("").is_err());
        assert!(func("(").is_err());
        assert!(func("0(").is_err());
        assert!(func("abc").is_err());
    }

    #[test]
    fn test_tokenize() {
        use super::Operation::*;
        use super::Token::*;

        assert_eq!(tokenize("a"), Ok(vec![Var("a".into())]));

        assert_eq!(
            tokenize("2 +(3--2) "),
            Ok(vec![
                Number(2.),
                Binary(Plus),
                LParen,
                Number(3.),
                Binary(Minus),
                Unary(Minus),
                Number(2.),
                RParen
            ])
        );

        assert_eq!(
            tokenize("3*x**0+-2*x**1"),
            Ok(vec![
                Number(3.),
                Binary(Times),
                Var("x".into()),
                Binary(Pow),
                Number(0.),
                Binary(Plus),
                Unary(Minus),
                Number(2.),
                Binary(Times),
                Var("x".into()),
                Binary(Pow),
                Number(1.),
            ])
        );

        assert_eq!(
            tokenize("-sin(pi * 3)^ cos(2) / Func2(x, f(y), z)"),
            Ok(vec![
                Unary(Minus),
                Func("sin".into(), None),
                Var("pi".into()),
                Binary(Times),
                Number(3.),
                RParen,
                Binary(Pow),
                Func("cos".into(), None),
                Number(2.),
                RParen,
                Binary(Div),
                Func("Func2".into(), None),
                Var("x".into()),
                Comma,
                Func("f".into(), None),
                Var("y".into()),
                RParen,
                Comma,
                Var("z".into()),
                RParen,
            ])
        );

        assert_eq!(
            tokenize("2 % 3"),
            Ok(vec![Number(2.), Binary(Rem), Number(3.)])
        );

        assert_eq!(tokenize("!3"), Err(TokenParseError::UnexpectedToken(0)));
        assert_eq!(tokenize("()"), Err(TokenParseError::UnexpectedToken(1)));
        assert_eq!(tokenize(""), Err(TokenParseError::MissingArgument));
        assert_eq!(tokenize("   "), Err(TokenParseError::MissingArgument));
        assert_eq!(tokenize("2)"), Err(TokenParseError::UnexpectedToken(1)));
        assert_eq!(tokenize("2^"), Err(TokenParseError::MissingArgument));
        assert_eq!(tokenize("(((2)"), Err(TokenParseError::MissingRParen(2)));
        assert_eq!(tokenize("f(2,)"), Err(TokenParseError::UnexpectedToken(4)));
        assert_eq!(tokenize("f(,2)"), Err(TokenParseError::UnexpectedToken(2)));
        assert_eq!(tokenize("x x"), Err(TokenParseError::UnexpectedToken(2)));
        assert_eq!(tokenize("2x"), Err(TokenParseError::UnexpectedToken(1)));
        assert_eq!(tokenize("x, 1"), Err(TokenParseError::UnexpectedToken(1)));
    }
}
