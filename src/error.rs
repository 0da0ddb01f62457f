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

use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

use crate::expr::ExprError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{}:{line}: `{text}`: {source}", .path.display())]
    Expression {
        path: PathBuf,
        line: usize,
        text: String,
        source: ExprError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid bound `{0}`: must be a finite number greater than zero")]
    InvalidBound(String),

    #[error("no expressions to plot in {}", .0.display())]
    NoExpressions(PathBuf),

    #[error("plot error: {0}")]
    Plot(String),

    #[error("{}:{line}: {reason}", .path.display())]
    Data {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("inputs and outputs must be of same length ({inputs} != {outputs})")]
    LengthMismatch { inputs: usize, outputs: usize },

    #[error("sample {index} is not a finite number: {value}")]
    NonFiniteSample { index: usize, value: f64 },

    #[error("a population needs at least {min} expressions, got {got}")]
    TooFewExpressions { min: usize, got: usize },
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for Error {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        Error::Plot(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
