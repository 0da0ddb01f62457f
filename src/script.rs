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

//! The plotting script: expression file in, one chart out.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::config::PlotConfig;
use crate::error::{Error, Result};
use crate::expr::Expr;
use crate::plot::{plot_graphs, Bounds, Graph};

/// Printed when the script is not called with its five parameters.
pub const USAGE: &str = "Please only call me with exactly five parameters";

/// Name of the variable every expression is plotted over.
pub const VARIABLE: &str = "x";

/// One non-blank line of an expression file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionLine {
    pub line: usize,
    pub text: String,
}

/// Read one expression per line; line terminators are stripped and blank lines skipped.
pub fn read_expressions<P: AsRef<Path>>(path: P) -> Result<Vec<ExpressionLine>> {
    let file = std::fs::File::open(path.as_ref())?;
    let mut exprs = vec![];
    for (n, line) in std::io::BufReader::new(file).lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if !text.is_empty() {
            exprs.push(ExpressionLine { line: n + 1, text: text.to_owned() });
        }
    }
    log::debug!("{} expression(s) read from {}", exprs.len(), path.as_ref().display());
    Ok(exprs)
}

/// Parse, bind and sample every expression; each one becomes a series of the chart.
pub fn build_graphs<C: PlotConfig>(path: &Path, lines: &[ExpressionLine], bounds: &Bounds, config: &C) -> Result<Vec<Graph>> {
    let to_graph = |l: &ExpressionLine| -> Result<Graph> {
        let func = l.text.parse::<Expr>()
            .and_then(|e| e.bind(VARIABLE))
            .map_err(|source| Error::Expression { path: path.to_path_buf(), line: l.line, text: l.text.clone(), source })?;
        Ok(Graph::sampled(l.text.as_str(), func, bounds, config.samples()))
    };
    lines.iter().map(to_graph).collect()
}

/// `<hash>_<frame>.png`
pub fn output_name(hash: &str, frame: &str) -> String {
    format!("{hash}_{frame}.png")
}

/// Plot every expression of `savefile` on one chart saved as `<hash>_<frame>.png` in `out_dir`.
pub fn graph_file<C: PlotConfig>(savefile: &Path, hash: &str, frame: &str, bounds: &Bounds, config: &C, out_dir: &Path)
    -> Result<PathBuf>
{
    let lines = read_expressions(savefile)?;
    if lines.is_empty() {
        return Err(Error::NoExpressions(savefile.to_path_buf()));
    }
    let graphs = build_graphs(savefile, &lines, bounds, config)?;
    let file = out_dir.join(output_name(hash, frame));
    plot_graphs(&file, config, bounds, &graphs)?;
    Ok(file)
}
