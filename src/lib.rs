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

//! Plot symbolic expressions of `x` and evolve integer polynomials toward sample points.
//!
//! [`script::graph_file`] reads one expression per line and saves them as the series of one
//! chart; [`genetic::Population`] breeds polynomials and graphs every generation through it.

pub mod config;
pub mod error;
pub mod expr;
pub mod genetic;
pub mod plot;
pub mod script;
pub mod shunting_yard;
pub mod tokenizer;

pub use config::{Config, EvolveConfig, PlotConfig, DEFAULT_CONFIG_PATH};
pub use error::{Error, Result};
pub use expr::{eval_str, Context, ContextProvider, Expr, ExprError, FuncEvalError};
pub use genetic::{Movie, MovieOptions, Options, Polynomial, Population};
pub use plot::{Bounds, Graph};
pub use script::{graph_file, USAGE};
