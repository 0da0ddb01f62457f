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

//! Conversion of a token stream from infix to Reverse Polish notation.

use thiserror::Error;

use crate::tokenizer::{Operation, Token};

#[derive(Debug, Clone, Copy)]
enum Associativity {
    Left,
    Right,
    NA,
}

/// An error reported by the conversion to RPN. Positions are token indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RPNError {
    #[error("mismatched left parenthesis at token {0}")]
    MismatchedLParen(usize),
    #[error("mismatched right parenthesis at token {0}")]
    MismatchedRParen(usize),
    #[error("comma outside of a function call at token {0}")]
    UnexpectedComma(usize),
    #[error("missing operands for the operator at token {0}")]
    NotEnoughOperands(usize),
    #[error("too many operands left on the stack")]
    TooManyOperands,
}

/// Return operator precedence and associativity for a given token.
///
/// Unary signs bind tighter than products but looser than powers, so `-x**2` is `-(x**2)`.
fn prec_assoc(token: &Token) -> (u32, Associativity) {
    use self::Associativity::*;
    use Operation::*;
    use Token::*;
    match *token {
        Binary(op) => match op {
            Plus | Minus => (1, Left),
            Times | Div | Rem => (2, Left),
            Pow => (4, Right),
        },
        Unary(_) => (3, NA),
        Var(_) | Number(_) | Func(..) | LParen | RParen | Comma => (0, NA),
    }
}

/// Convert a tokenized infix expression to a Reverse Polish notation.
///
/// Function tokens in the output carry the number of their arguments.
pub fn to_rpn(input: &[Token]) -> Result<Vec<Token>, RPNError> {
    use Token::*;

    let mut output = Vec::with_capacity(input.len());
    let mut stack: Vec<(usize, Token)> = Vec::with_capacity(input.len());
    // argument counts of the currently open function calls
    let mut arg_counts: Vec<usize> = Vec::new();

    for (index, token) in input.iter().enumerate() {
        let token = token.clone();
        match token {
            Number(_) | Var(_) => output.push(token),
            Unary(_) => stack.push((index, token)),
            Binary(_) => {
                let pa1 = prec_assoc(&token);
                while let Some((_, top)) = stack.last() {
                    match (pa1, prec_assoc(top)) {
                        ((i, Associativity::Left), (j, _)) if i <= j => {}
                        ((i, Associativity::Right), (j, _)) if i < j => {}
                        _ => break,
                    }
                    if let Some((_, t)) = stack.pop() {
                        output.push(t);
                    }
                }
                stack.push((index, token))
            }
            LParen => stack.push((index, token)),
            Func(..) => {
                arg_counts.push(1);
                stack.push((index, token));
            }
            Comma => {
                while let Some((_, top)) = stack.last() {
                    if matches!(top, Func(..)) {
                        break;
                    }
                    if matches!(top, LParen) {
                        return Err(RPNError::UnexpectedComma(index));
                    }
                    if let Some((_, t)) = stack.pop() {
                        output.push(t);
                    }
                }
                match arg_counts.last_mut() {
                    Some(n) if !stack.is_empty() => *n += 1,
                    _ => return Err(RPNError::UnexpectedComma(index)),
                }
            }
            RParen => {
                let mut found = false;
                while let Some((_, t)) = stack.pop() {
                    match t {
                        LParen => {
                            found = true;
                            break;
                        }
                        Func(name, _) => {
                            let n = arg_counts.pop().unwrap_or(1);
                            output.push(Func(name, Some(n)));
                            found = true;
                            break;
                        }
                        _ => output.push(t),
                    }
                }
                if !found {
                    return Err(RPNError::MismatchedRParen(index));
                }
            }
        }
    }

    while let Some((index, token)) = stack.pop() {
        match token {
            Unary(_) | Binary(_) => output.push(token),
            _ => return Err(RPNError::MismatchedLParen(index)),
        }
    }

    // verify rpn
    let mut n_operands: isize = 0;
    for (index, token) in output.iter().enumerate() {
        match *token {
            Var(_) | Number(_) => n_operands += 1,
            Unary(_) => (),
            Binary(_) => n_operands -= 1,
            Func(_, Some(n)) => n_operands -= n as isize - 1,
            _ => return Err(RPNError::NotEnoughOperands(index)),
        }
        if n_operands <= 0 {
            return Err(RPNError::NotEnoughOperands(index));
        }
    }

    if n_operands > 1 {
        return Err(RPNError::TooManyOperands);
    }

    output.shrink_to_fit();
    Ok(output)
}
