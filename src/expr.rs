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

//! Parsed expressions and the contexts they are evaluated in.

use std::collections::BTreeMap;
use std::f64::consts;
use std::str::FromStr;

use thiserror::Error;

use crate::shunting_yard::{to_rpn, RPNError};
use crate::tokenizer::{tokenize, Operation, Token, TokenParseError};

/// Failure of a function call during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FuncEvalError {
    #[error("unknown function")]
    UnknownFunction,
    #[error("expected {0} argument(s)")]
    NumberArgs(usize),
    #[error("too few arguments")]
    TooFewArguments,
}

/// Any failure while parsing, binding or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    #[error("parse error: {0}")]
    ParseError(#[from] TokenParseError),
    #[error("RPN error: {0}")]
    RPNError(#[from] RPNError),
    #[error("unknown variable `{0}`")]
    UnknownVariable(String),
    #[error("function `{0}`: {1}")]
    Function(String, FuncEvalError),
}

/// Representation of an expression in the Reverse Polish notation form.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    rpn: Vec<Token>,
}

impl Expr {
    /// Evaluates the expression with the default constants and functions.
    pub fn eval(&self) -> Result<f64, ExprError> {
        self.eval_with_context(Context::new())
    }

    /// Evaluates the expression with variables and functions given by the argument.
    pub fn eval_with_context<C: ContextProvider>(&self, ctx: C) -> Result<f64, ExprError> {
        use Operation::*;
        use Token::*;

        let mut stack = Vec::with_capacity(16);
        let underflow = |index| ExprError::RPNError(RPNError::NotEnoughOperands(index));

        for (index, token) in self.rpn.iter().enumerate() {
            match *token {
                Var(ref n) => match ctx.get_var(n) {
                    Some(v) => stack.push(v),
                    None => return Err(ExprError::UnknownVariable(n.clone())),
                },
                Number(f) => stack.push(f),
                Binary(op) => {
                    let right = stack.pop().ok_or_else(|| underflow(index))?;
                    let left = stack.pop().ok_or_else(|| underflow(index))?;
                    stack.push(match op {
                        Plus => left + right,
                        Minus => left - right,
                        Times => left * right,
                        Div => left / right,
                        Rem => floored_rem(left, right),
                        Pow => left.powf(right),
                    });
                }
                Unary(op) => {
                    let x = stack.pop().ok_or_else(|| underflow(index))?;
                    stack.push(match op {
                        Minus => -x,
                        _ => x,
                    });
                }
                Func(ref name, Some(n)) => {
                    if stack.len() < n {
                        return Err(underflow(index));
                    }
                    let args = stack.split_off(stack.len() - n);
                    let r = ctx
                        .eval_func(name, &args)
                        .map_err(|e| ExprError::Function(name.clone(), e))?;
                    stack.push(r);
                }
                _ => return Err(underflow(index)),
            }
        }

        match (stack.pop(), stack.is_empty()) {
            (Some(r), true) => Ok(r),
            _ => Err(ExprError::RPNError(RPNError::TooManyOperands)),
        }
    }

    /// Creates a function of one variable based on this expression, with default constants and
    /// functions.
    ///
    /// Every other variable and every function is resolved up front, so the returned closure
    /// cannot fail; domain errors show up as `NaN`.
    pub fn bind(self, var: &str) -> Result<impl Fn(f64) -> f64, ExprError> {
        self.bind_with_context(Context::new(), var)
    }

    /// Creates a function of one variable based on this expression and the given context.
    pub fn bind_with_context<C: ContextProvider>(
        self,
        ctx: C,
        var: &str,
    ) -> Result<impl Fn(f64) -> f64, ExprError> {
        self.check_context(((var, 0.), &ctx))?;
        let var = var.to_owned();
        Ok(move |x: f64| {
            self.eval_with_context(((var.as_str(), x), &ctx))
                .unwrap_or(f64::NAN)
        })
    }

    /// Checks that every variable and function of the expression is known to `ctx`.
    pub fn check_context<C: ContextProvider>(&self, ctx: C) -> Result<(), ExprError> {
        for token in &self.rpn {
            match *token {
                Token::Var(ref name) if ctx.get_var(name).is_none() => {
                    return Err(ExprError::UnknownVariable(name.clone()));
                }
                Token::Func(ref name, Some(n)) => match ctx.eval_func(name, &vec![0.; n]) {
                    Ok(_) => {}
                    Err(e) => return Err(ExprError::Function(name.clone(), e)),
                },
                _ => {}
            }
        }
        Ok(())
    }
}

/// `%` with the sign of the divisor, matching the modulo of the expression files.
fn floored_rem(left: f64, right: f64) -> f64 {
    let r = left % right;
    if r != 0. && (r < 0.) != (right < 0.) {
        r + right
    } else {
        r
    }
}

impl FromStr for Expr {
    type Err = ExprError;

    /// Constructs an expression by parsing a string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(s)?;
        let rpn = to_rpn(&tokens)?;
        Ok(Expr { rpn })
    }
}

/// Evaluate a string with default constants.
pub fn eval_str<S: AsRef<str>>(expr: S) -> Result<f64, ExprError> {
    expr.as_ref().parse::<Expr>()?.eval()
}

/// Source of variables and functions for evaluation.
pub trait ContextProvider {
    fn get_var(&self, _: &str) -> Option<f64> {
        None
    }
    fn eval_func(&self, _: &str, _: &[f64]) -> Result<f64, FuncEvalError> {
        Err(FuncEvalError::UnknownFunction)
    }
}

/// A single named value.
impl<'a> ContextProvider for (&'a str, f64) {
    fn get_var(&self, name: &str) -> Option<f64> {
        (self.0 == name).then_some(self.1)
    }
}

/// Look in the first provider, then in the second.
impl<T: ContextProvider, S: ContextProvider> ContextProvider for (T, S) {
    fn get_var(&self, name: &str) -> Option<f64> {
        self.0.get_var(name).or_else(|| self.1.get_var(name))
    }
    fn eval_func(&self, name: &str, args: &[f64]) -> Result<f64, FuncEvalError> {
        match self.0.eval_func(name, args) {
            Err(FuncEvalError::UnknownFunction) => self.1.eval_func(name, args),
            e => e,
        }
    }
}

impl<'a, T: ContextProvider> ContextProvider for &'a T {
    fn get_var(&self, name: &str) -> Option<f64> {
        (**self).get_var(name)
    }
    fn eval_func(&self, name: &str, args: &[f64]) -> Result<f64, FuncEvalError> {
        (**self).eval_func(name, args)
    }
}

/// Variables plus the built-in functions.
#[derive(Debug, Clone)]
pub struct Context {
    vars: BTreeMap<String, f64>,
}

impl Context {
    /// Context with `pi`, `e` and `E` defined.
    pub fn new() -> Context {
        let mut ctx = Context::empty();
        ctx.var("pi", consts::PI).var("e", consts::E).var("E", consts::E);
        ctx
    }

    /// Context without any variables; built-in functions stay available.
    pub fn empty() -> Context {
        Context { vars: BTreeMap::new() }
    }

    pub fn var<S: Into<String>>(&mut self, name: S, value: f64) -> &mut Self {
        self.vars.insert(name.into(), value);
        self
    }
}

impl Default for Context {
    fn default() -> Context {
        Context::new()
    }
}

impl ContextProvider for Context {
    fn get_var(&self, name: &str) -> Option<f64> {
        self.vars.get(name).copied()
    }

    fn eval_func(&self, name: &str, args: &[f64]) -> Result<f64, FuncEvalError> {
        builtin(name, args)
    }
}

macro_rules! one_arg {
    ($args:expr, $func:ident) => {
        match $args {
            [x] => Ok(x.$func()),
            _ => Err(FuncEvalError::NumberArgs(1)),
        }
    };
}

macro_rules! two_args {
    ($args:expr, $func:ident) => {
        match $args {
            [x, y] => Ok(x.$func(*y)),
            _ => Err(FuncEvalError::NumberArgs(2)),
        }
    };
}

macro_rules! one_or_more_arg {
    ($args:expr, $fold:ident) => {
        $args
            .iter()
            .copied()
            .reduce(f64::$fold)
            .ok_or(FuncEvalError::TooFewArguments)
    };
}

fn sign(x: f64) -> f64 {
    if x == 0. || x.is_nan() {
        x
    } else {
        x.signum()
    }
}

fn builtin(name: &str, args: &[f64]) -> Result<f64, FuncEvalError> {
    match name {
        "sqrt" => one_arg!(args, sqrt),
        "exp" => one_arg!(args, exp),
        "ln" => one_arg!(args, ln),
        "log" => match args {
            [x] => Ok(x.ln()),
            [x, base] => Ok(x.log(*base)),
            _ => Err(FuncEvalError::NumberArgs(1)),
        },
        "abs" | "Abs" => one_arg!(args, abs),
        "sin" => one_arg!(args, sin),
        "cos" => one_arg!(args, cos),
        "tan" => one_arg!(args, tan),
        "asin" => one_arg!(args, asin),
        "acos" => one_arg!(args, acos),
        "atan" => one_arg!(args, atan),
        "sinh" => one_arg!(args, sinh),
        "cosh" => one_arg!(args, cosh),
        "tanh" => one_arg!(args, tanh),
        "asinh" => one_arg!(args, asinh),
        "acosh" => one_arg!(args, acosh),
        "atanh" => one_arg!(args, atanh),
        "floor" => one_arg!(args, floor),
        "ceil" | "ceiling" => one_arg!(args, ceil),
        "round" => one_arg!(args, round),
        "sign" | "signum" => match args {
            [x] => Ok(sign(*x)),
            _ => Err(FuncEvalError::NumberArgs(1)),
        },
        "atan2" => two_args!(args, atan2),
        "max" | "Max" => one_or_more_arg!(args, max),
        "min" | "Min" => one_or_more_arg!(args, min),
        _ => Err(FuncEvalError::UnknownFunction),
    }
}
