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

//! Evolution of integer polynomials toward a set of sample points, graphed generation by
//! generation.

use std::fmt;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{EvolveConfig, PlotConfig};
use crate::error::{Error, Result};
use crate::plot::{animate_graphs, Bounds, Graph};
use crate::script::graph_file;

/// Best expressions kept as they are at every generation.
const SAVE_FIRST: usize = 2;
/// Worst expressions replaced by the children of the best ones.
const SAVE_LAST: usize = 2;

fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    if rng.gen_bool(0.5) {1} else {-1}
}

/// `rand(max)` on integers: `[0, max)`, with an empty range treated as `[0, 1)`.
fn below<R: Rng + ?Sized>(rng: &mut R, max: i64) -> i64 {
    rng.gen_range(0..max.max(1))
}

/// Polynomial with integer coefficients starting from `x^0`; `[1, -2, 3]` is `1 - 2x + 3x^2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    terms: Vec<i64>,
}

impl Polynomial {
    pub fn new(terms: Vec<i64>) -> Polynomial {
        Polynomial { terms }
    }

    /// `degree + 1` coefficients drawn from `(-coeff_max, coeff_max)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, degree: usize, coeff_max: i64) -> Polynomial {
        let terms = (0..=degree).map(|_| below(rng, coeff_max) * random_sign(rng)).collect();
        Polynomial { terms }
    }

    pub fn terms(&self) -> &[i64] {
        &self.terms
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.terms.iter().rev().fold(0.0, |acc, &c| acc * x + c as f64)
    }

    /// One-point crossover followed by mutation.
    ///
    /// Without `abs_max`, mutated coefficients stay below the largest coefficient of the
    /// children.
    pub fn mate_with<R: Rng + ?Sized>(&self, other: &Polynomial, rng: &mut R, mutate_p: f64, abs_max: Option<i64>)
        -> (Polynomial, Polynomial)
    {
        let degree = self.terms.len().max(other.terms.len());
        if degree == 0 {
            return (self.clone(), other.clone());
        }
        let crossover = rng.gen_range(0..degree);
        let splice = |head: &[i64], tail: &[i64]| -> Vec<i64> {
            head.iter().take(crossover).chain(tail.iter().skip(crossover)).copied().collect()
        };
        let mut a = splice(&self.terms, &other.terms);
        let mut b = splice(&other.terms, &self.terms);

        let abs_max = abs_max.unwrap_or_else(|| {
            a.iter().chain(b.iter()).map(|c| c.abs()).max().unwrap_or(0) - 1
        });

        if mutate_p > 0.0 {
            for c in a.iter_mut().chain(b.iter_mut()) {
                if rng.gen::<f64>() < mutate_p {
                    *c = random_sign(rng) * below(rng, abs_max);
                }
            }
        }

        (Polynomial::new(a), Polynomial::new(b))
    }
}

impl fmt::Display for Polynomial {
    /// `c0*x**0+c1*x**1+...`, readable by the expression parser.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let term = |(d, c): (usize, &i64)| format!("{c}*x**{d}");
        write!(f, "{}", self.terms.iter().enumerate().map(term).join("+"))
    }
}

pub type CostFn = fn(f64, f64) -> f64;

pub fn squared_error(expected: f64, actual: f64) -> f64 {
    (expected - actual).powi(2)
}

pub struct Options {
    pub num_exprs: usize,
    pub max_degree: usize,
    pub cost_function: CostFn,
    pub mutate_p: f64,
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Options { num_exprs: 10, max_degree: 3, cost_function: squared_error, mutate_p: 0.10, seed: None }
    }
}

impl Options {
    pub fn from_config<C: EvolveConfig>(config: &C) -> Options {
        Options {
            num_exprs: config.num_exprs(),
            max_degree: config.max_degree(),
            mutate_p: config.mutate_p(),
            ..Options::default()
        }
    }
}

/// How the recorded generations are turned into a movie.
pub struct MovieOptions {
    pub frames_per_sec: u32,
    /// Remove the per-generation PNG files once the movie is written.
    pub rm: bool,
}

impl Default for MovieOptions {
    fn default() -> Self {
        MovieOptions { frames_per_sec: 4, rm: true }
    }
}

/// Result of [`Population::quick_movie`].
#[derive(Debug)]
pub struct Movie {
    pub path: PathBuf,
    pub frames: usize,
    pub best_fit: Polynomial,
}

pub struct Population {
    exprs: Vec<Polynomial>,
    inputs: Vec<f64>,
    outputs: Vec<f64>,
    cost_func: CostFn,
    bounds: Bounds,
    mutate_p: f64,
    scores: Option<Vec<f64>>,
    graphed: bool,
    frame_num: u32,
    id: u64,
    abs_max: i64,
    history: Vec<Vec<Polynomial>>,
    rng: StdRng,
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn abs_max_of(values: &[f64]) -> f64 {
    values.iter().map(|v| v.abs()).fold(0.0, f64::max)
}

fn check_lengths(inputs: &[f64], outputs: &[f64]) -> Result<()> {
    if inputs.len() == outputs.len() {
        Ok(())
    } else {
        Err(Error::LengthMismatch { inputs: inputs.len(), outputs: outputs.len() })
    }
}

fn check_finite(inputs: &[f64], outputs: &[f64]) -> Result<()> {
    let non_finite = inputs.iter().zip(outputs).enumerate().find_map(|(index, (&x, &y))| {
        [x, y].into_iter().find(|v| !v.is_finite()).map(|value| (index, value))
    });
    match non_finite {
        Some((index, value)) => Err(Error::NonFiniteSample { index, value }),
        None => Ok(()),
    }
}

fn score(expr: &Polynomial, inputs: &[f64], outputs: &[f64], cost: CostFn) -> f64 {
    inputs.iter().zip(outputs).map(|(&x, &y)| cost(y, expr.eval(x))).sum()
}

impl Population {
    pub fn new(inputs: Vec<f64>, outputs: Vec<f64>, options: Options) -> Result<Population> {
        check_lengths(&inputs, &outputs)?;
        check_finite(&inputs, &outputs)?;
        let min = SAVE_FIRST + SAVE_LAST;
        if options.num_exprs < min {
            return Err(Error::TooFewExpressions { min, got: options.num_exprs });
        }

        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let abs_max = (max_of(&inputs).max(max_of(&outputs)).ceil().max(0.0) as i64).saturating_add(1);
        let exprs = (0..options.num_exprs)
            .map(|_| Polynomial::random(&mut rng, options.max_degree, abs_max))
            .collect();
        let bounds = Bounds::new(abs_max_of(&inputs) + 1.0, abs_max_of(&outputs) + 1.0)?;
        let id = u64::from(rng.gen::<u32>());

        Ok(Population {
            exprs,
            inputs,
            outputs,
            cost_func: options.cost_function,
            bounds,
            mutate_p: options.mutate_p,
            scores: None,
            graphed: false,
            frame_num: 0,
            id,
            abs_max,
            history: vec![],
            rng,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn frame_num(&self) -> u32 {
        self.frame_num
    }

    pub fn exprs(&self) -> &[Polynomial] {
        &self.exprs
    }

    pub fn inputs(&self) -> &[f64] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[f64] {
        &self.outputs
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn abs_max(&self) -> i64 {
        self.abs_max
    }

    pub fn set_inputs(&mut self, inputs: Vec<f64>) -> Result<()> {
        check_lengths(&inputs, &self.outputs)?;
        check_finite(&inputs, &self.outputs)?;
        self.inputs = inputs;
        self.scores = None;
        Ok(())
    }

    pub fn set_outputs(&mut self, outputs: Vec<f64>) -> Result<()> {
        check_lengths(&self.inputs, &outputs)?;
        check_finite(&self.inputs, &outputs)?;
        self.outputs = outputs;
        self.scores = None;
        Ok(())
    }

    pub fn set_values(&mut self, inputs: Vec<f64>, outputs: Vec<f64>) -> Result<()> {
        check_lengths(&inputs, &outputs)?;
        check_finite(&inputs, &outputs)?;
        self.inputs = inputs;
        self.outputs = outputs;
        self.scores = None;
        Ok(())
    }

    pub fn push_values(&mut self, input: f64, output: f64) {
        self.inputs.push(input);
        self.outputs.push(output);
        self.scores = None;
    }

    pub fn push_expr(&mut self, expr: Polynomial) {
        self.exprs.push(expr);
        self.scores = None;
    }

    /// Adds a random expression of the population's current degree.
    pub fn push_random_expr(&mut self) {
        let degree = self.exprs.first().map_or(0, |e| e.terms.len().saturating_sub(1));
        let expr = Polynomial::random(&mut self.rng, degree, self.abs_max);
        self.push_expr(expr);
    }

    /// Total cost of each expression over the sample points, cached for the generation.
    pub fn scores(&mut self) -> &[f64] {
        let (exprs, inputs, outputs, cost) = (&self.exprs, &self.inputs, &self.outputs, self.cost_func);
        self.scores.get_or_insert_with(|| exprs.iter().map(|e| score(e, inputs, outputs, cost)).collect())
    }

    /// `(score, index)` pairs, best first.
    fn score_pairs(&mut self) -> Vec<(f64, usize)> {
        self.scores().iter().copied().enumerate()
            .map(|(i, s)| (s, i))
            .sorted_by(|a, b| a.0.total_cmp(&b.0))
            .collect()
    }

    pub fn best_fit(&mut self) -> &Polynomial {
        let best = self.score_pairs().first().map_or(0, |&(_, i)| i);
        &self.exprs[best]
    }

    /// Breed the next generation and advance the frame.
    pub fn mate_exprs(&mut self) {
        let order = self.score_pairs();
        let mut exprs: Vec<Polynomial> = order.iter().map(|&(_, i)| self.exprs[i].clone()).collect();
        let len = exprs.len();
        let mutate_p = self.mutate_p;
        let rng = &mut self.rng;

        let mut middle: Vec<Polynomial> = exprs[SAVE_FIRST..len - SAVE_LAST].to_vec();
        let mut index = SAVE_FIRST;
        while !middle.is_empty() {
            if middle.len() >= 2 {
                let a = middle.swap_remove(rng.gen_range(0..middle.len()));
                let b = middle.swap_remove(rng.gen_range(0..middle.len()));
                let (c1, c2) = a.mate_with(&b, rng, mutate_p, None);
                exprs[index] = c1;
                exprs[index + 1] = c2;
                index += 2;
            } else {
                exprs[index] = middle.remove(0);
                index += 1;
            }
        }

        for i in (0..SAVE_FIRST).step_by(2) {
            let (c1, c2) = exprs[i].mate_with(&exprs[i + 1], rng, mutate_p, None);
            exprs[len - i - 1] = c1;
            exprs[len - i - 2] = c2;
        }

        if let Some(&(best, _)) = order.first() {
            log::info!("frame {}: best score {best}", self.frame_num);
        }
        self.exprs = exprs;
        self.next_generation();
    }

    fn next_generation(&mut self) {
        self.graphed = false;
        self.frame_num += 1;
        self.scores = None;
    }

    /// Write the expressions to `savefile` and plot them as `<id>_<frame>.png` in `out_dir`.
    ///
    /// Returns `None` when this generation has already been graphed.
    pub fn graph_exprs<C: PlotConfig>(&mut self, savefile: &Path, config: &C, out_dir: &Path) -> Result<Option<PathBuf>> {
        if self.graphed {
            log::warn!("this generation has already been graphed");
            return Ok(None);
        }
        let content: String = self.exprs.iter().map(|e| format!("{e}\n")).collect();
        std::fs::write(savefile, content)?;

        let frame = graph_file(savefile, &self.id.to_string(), &self.frame_num.to_string(), &self.bounds, config, out_dir)?;
        self.history.push(self.exprs.clone());
        self.graphed = true;
        Ok(Some(frame))
    }

    /// Write `<id>.gif` in `out_dir` from every graphed generation, removing the PNG frames if
    /// asked to.
    pub fn animate<C: PlotConfig>(&self, frames: &[PathBuf], options: &MovieOptions, config: &C, out_dir: &Path) -> Result<PathBuf> {
        let samples = config.samples();
        let to_graph = |e: &Polynomial| Graph::sampled(e.to_string(), |x| e.eval(x), &self.bounds, samples);
        let graphs: Vec<Vec<Graph>> = self.history.iter()
            .map(|generation| generation.iter().map(to_graph).collect())
            .collect();

        let path = out_dir.join(format!("{}.gif", self.id));
        animate_graphs(&path, config, &self.bounds, &graphs, 1000 / options.frames_per_sec.max(1))?;

        if options.rm {
            for frame in frames {
                std::fs::remove_file(frame)?;
            }
        }
        log::info!("your movie is saved as {}", path.display());
        Ok(path)
    }

    /// Graph and breed `frames` generations (the square of the sample count by default), then
    /// animate them.
    pub fn quick_movie<C: PlotConfig>(&mut self, frames: Option<usize>, options: &MovieOptions, config: &C, out_dir: &Path)
        -> Result<Movie>
    {
        let frames = frames.unwrap_or(self.inputs.len().pow(2));
        log::info!("frames to produce: {frames}");
        let savefile = out_dir.join("exprs.txt");

        let mut pngs = Vec::with_capacity(frames);
        for _ in 0..frames {
            pngs.extend(self.graph_exprs(&savefile, config, out_dir)?);
            self.mate_exprs();
        }
        let path = self.animate(&pngs, options, config, out_dir)?;

        Ok(Movie { path, frames: pngs.len(), best_fit: self.best_fit().clone() })
    }
}

impl fmt::Display for Population {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "inputs:  {:?}", self.inputs)?;
        writeln!(f, "outputs: {:?}", self.outputs)?;
        writeln!(f, "exprs:")?;
        self.exprs.iter().try_for_each(|e| writeln!(f, "{e}"))
    }
}

/// Read `x,y` sample pairs, one per line; blank lines and `#` comments are skipped.
pub fn read_samples<P: AsRef<Path>>(path: P) -> Result<(Vec<f64>, Vec<f64>)> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let data_err = |line: usize, reason: String| Error::Data { path: path.to_path_buf(), line, reason };

    let mut inputs = vec![];
    let mut outputs = vec![];
    for (n, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut item = line.split(',').map(str::trim);
        let (x, y) = match (item.next(), item.next(), item.next()) {
            (Some(x), Some(y), None) => (x, y),
            _ => return Err(data_err(n + 1, format!("expected `x,y`, got `{line}`"))),
        };
        let to_f64 = |s: &str| match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            Ok(_) => Err(data_err(n + 1, format!("`{s}` is not a finite number"))),
            Err(e) => Err(data_err(n + 1, format!("`{s}`: {e}"))),
        };
        inputs.push(to_f64(x)?);
        outputs.push(to_f64(y)?);
    }
    Ok((inputs, outputs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::expr::Expr;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn population(num_exprs: usize) -> Population {
        let options = Options { num_exprs, seed: Some(42), ..Options::default() };
        Population::new(vec![0.0, 1.0, 2.0, 3.0], vec![1.0, 3.0, 7.0, 13.0], options).unwrap()
    }

    fn no_text() -> Config {
        Config::from_json(r#"{"plot_conf": {"draw_labels": false, "plot_width": 120, "plot_height": 90, "samples": 30}}"#).unwrap()
    }

    #[test]
    fn display_and_eval() {
        let p = Polynomial::new(vec![1, -2, 3]);
        assert_eq!(p.to_string(), "1*x**0+-2*x**1+3*x**2");
        assert_eq!(p.eval(0.0), 1.0);
        assert_eq!(p.eval(2.0), 9.0);
        assert_eq!(Polynomial::new(vec![]).eval(5.0), 0.0);
    }

    #[test]
    fn display_is_plottable() {
        let mut rng = rng();
        for _ in 0..20 {
            let p = Polynomial::random(&mut rng, 4, 9);
            let f = p.to_string().parse::<Expr>().unwrap().bind("x").unwrap();
            for x in [-2.0, -0.5, 0.0, 1.5, 3.0] {
                assert!((f(x) - p.eval(x)).abs() < 1e-9, "{p} at {x}");
            }
        }
    }

    #[test]
    fn random_coefficients() {
        let mut rng = rng();
        let p = Polynomial::random(&mut rng, 3, 5);
        assert_eq!(p.terms().len(), 4);
        assert!(p.terms().iter().all(|c| c.abs() < 5));
        let zero = Polynomial::random(&mut rng, 2, 0);
        assert_eq!(zero.terms(), &[0, 0, 0]);
    }

    #[test]
    fn crossover_keeps_positions() {
        let mut rng = rng();
        let p = Polynomial::new(vec![1, 2, 3, 4]);
        let q = Polynomial::new(vec![-5, -6, -7, -8]);
        for _ in 0..20 {
            let (a, b) = p.mate_with(&q, &mut rng, 0.0, None);
            assert_eq!(a.terms().len(), 4);
            for i in 0..4 {
                let mut got = [a.terms()[i], b.terms()[i]];
                let mut want = [p.terms()[i], q.terms()[i]];
                got.sort();
                want.sort();
                assert_eq!(got, want);
            }
            // one-point: a starts with p's head and ends with q's tail
            let c = a.terms().iter().take_while(|&&t| t > 0).count();
            assert!(a.terms()[c..].iter().all(|&t| t < 0));
        }
    }

    #[test]
    fn mutation_stays_in_range() {
        let mut rng = rng();
        let p = Polynomial::new(vec![10, 20, 30]);
        let q = Polynomial::new(vec![1, 2, 3]);
        for _ in 0..20 {
            let (a, b) = p.mate_with(&q, &mut rng, 1.0, Some(4));
            assert!(a.terms().iter().chain(b.terms()).all(|c| c.abs() < 4));
            let (a, b) = p.mate_with(&q, &mut rng, 1.0, None);
            assert!(a.terms().iter().chain(b.terms()).all(|c| c.abs() < 30));
        }
    }

    #[test]
    fn options_from_config() {
        let conf = Config::from_json(r#"{"evolve_conf": {"num_exprs": 6, "mutate_p": 0.5}}"#).unwrap();
        let options = Options::from_config(&conf.evolve_conf);
        assert_eq!(options.num_exprs, 6);
        assert_eq!(options.max_degree, 3);
        assert_eq!(options.mutate_p, 0.5);
        assert_eq!(options.seed, None);
    }

    #[test]
    fn new_population() {
        let mut pop = population(10);
        assert_eq!(pop.exprs().len(), 10);
        assert_eq!(pop.abs_max(), 14);
        assert_eq!(pop.bounds(), Bounds { x: 4.0, y: 14.0 });
        assert_eq!(pop.frame_num(), 0);
        assert!(pop.exprs().iter().all(|e| e.terms().len() == 4));

        assert!(matches!(
            Population::new(vec![1.0], vec![], Options::default()),
            Err(Error::LengthMismatch { inputs: 1, outputs: 0 })
        ));
        let few = Options { num_exprs: 3, ..Options::default() };
        assert!(matches!(
            Population::new(vec![1.0], vec![1.0], few),
            Err(Error::TooFewExpressions { min: 4, got: 3 })
        ));

        assert!(pop.set_inputs(vec![1.0]).is_err());
        assert!(pop.set_outputs(vec![1.0, 2.0]).is_err());
        assert!(pop.set_values(vec![1.0], vec![2.0]).is_ok());
        pop.push_values(2.0, 4.0);
        assert_eq!(pop.inputs(), &[1.0, 2.0]);
        assert_eq!(pop.outputs(), &[2.0, 4.0]);
        pop.push_random_expr();
        assert_eq!(pop.exprs().len(), 11);
        assert_eq!(pop.exprs()[10].terms().len(), 4);
        assert_eq!(pop.scores().len(), 11);
    }

    #[test]
    fn huge_and_non_finite_samples() {
        let options = || Options { num_exprs: 4, seed: Some(3), ..Options::default() };
        let mut pop = Population::new(vec![0.0, 1.0], vec![1.0, 1e19], options()).unwrap();
        assert_eq!(pop.abs_max(), i64::MAX);
        assert_eq!(pop.bounds(), Bounds { x: 2.0, y: 1e19 + 1.0 });
        assert_eq!(pop.scores().len(), 4);
        pop.mate_exprs();
        assert_eq!(pop.exprs().len(), 4);

        assert!(matches!(
            Population::new(vec![0.0, 1.0], vec![1.0, f64::INFINITY], options()),
            Err(Error::NonFiniteSample { index: 1, .. })
        ));
        assert!(matches!(
            Population::new(vec![f64::NAN], vec![1.0], options()),
            Err(Error::NonFiniteSample { index: 0, .. })
        ));
        assert!(matches!(pop.set_inputs(vec![0.0, f64::NEG_INFINITY]), Err(Error::NonFiniteSample { index: 1, .. })));
        assert_eq!(pop.inputs(), &[0.0, 1.0]);
    }

    #[test]
    fn scores_and_best_fit() {
        let mut pop = population(4);
        pop.push_expr(Polynomial::new(vec![1, 1, 1]));
        let scores = pop.scores().to_vec();
        assert_eq!(scores.len(), 5);
        assert_eq!(scores[4], 0.0);
        let manual = score(&pop.exprs()[0], &[0.0, 1.0, 2.0, 3.0], &[1.0, 3.0, 7.0, 13.0], squared_error);
        assert_eq!(scores[0], manual);
        assert_eq!(pop.best_fit(), &Polynomial::new(vec![1, 1, 1]));
    }

    #[test]
    fn mating_keeps_the_best() {
        let mut pop = population(9);
        pop.push_expr(Polynomial::new(vec![1, 1, 1]));
        pop.push_expr(Polynomial::new(vec![1, 1, 1, 0]));
        pop.mate_exprs();
        assert_eq!(pop.frame_num(), 1);
        assert_eq!(pop.exprs().len(), 11);
        let best: Vec<&Polynomial> = pop.exprs()[..2].iter().collect();
        assert!(best.contains(&&Polynomial::new(vec![1, 1, 1])));
        assert!(best.contains(&&Polynomial::new(vec![1, 1, 1, 0])));
        assert_eq!(pop.scores()[0], 0.0);
        assert_eq!(pop.scores()[1], 0.0);
    }

    #[test]
    fn graph_once_per_generation() {
        let dir = tempfile::tempdir().unwrap();
        let config = no_text();
        let mut pop = population(4);
        let savefile = dir.path().join("exprs.txt");
        let frame = pop.graph_exprs(&savefile, &config.plot_conf, dir.path()).unwrap().unwrap();
        assert_eq!(frame, dir.path().join(format!("{}_0.png", pop.id())));
        assert!(frame.exists());
        assert_eq!(std::fs::read_to_string(&savefile).unwrap().lines().count(), 4);
        assert_eq!(pop.graph_exprs(&savefile, &config.plot_conf, dir.path()).unwrap(), None);
        pop.mate_exprs();
        let next = pop.graph_exprs(&savefile, &config.plot_conf, dir.path()).unwrap().unwrap();
        assert_eq!(next, dir.path().join(format!("{}_1.png", pop.id())));
    }

    #[test]
    fn quick_movie() {
        let dir = tempfile::tempdir().unwrap();
        let config = no_text();
        let mut pop = population(6);
        let movie = pop.quick_movie(Some(3), &MovieOptions::default(), &config.plot_conf, dir.path()).unwrap();
        assert_eq!(movie.frames, 3);
        assert_eq!(movie.path, dir.path().join(format!("{}.gif", pop.id())));
        assert!(movie.path.exists());
        assert_eq!(pop.frame_num(), 3);
        assert!(!dir.path().join(format!("{}_0.png", pop.id())).exists());
        assert_eq!(&movie.best_fit, pop.best_fit());

        let mut kept = population(4);
        let keep = MovieOptions { rm: false, ..MovieOptions::default() };
        kept.quick_movie(Some(2), &keep, &config.plot_conf, dir.path()).unwrap();
        assert!(dir.path().join(format!("{}_1.png", kept.id())).exists());
    }

    #[test]
    fn samples_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.csv");
        std::fs::write(&path, "# x,y\n0, 1\n1,3\n\n2,7\n").unwrap();
        assert_eq!(read_samples(&path).unwrap(), (vec![0.0, 1.0, 2.0], vec![1.0, 3.0, 7.0]));

        std::fs::write(&path, "0,1\n1\n").unwrap();
        assert!(matches!(read_samples(&path), Err(Error::Data { line: 2, .. })));
        std::fs::write(&path, "0,1\n1,b\n").unwrap();
        assert!(matches!(read_samples(&path), Err(Error::Data { line: 2, .. })));
        std::fs::write(&path, "0,1\n1,1e19\n2,inf\n").unwrap();
        assert!(matches!(read_samples(&path), Err(Error::Data { line: 3, .. })));
    }

    #[test]
    fn display_population() {
        let mut pop = population(4);
        pop.set_values(vec![1.0], vec![2.0]).unwrap();
        let text = pop.to_string();
        assert!(text.starts_with("inputs:  [1.0]\noutputs: [2.0]\nexprs:\n"));
        assert_eq!(text.lines().count(), 3 + 4);
    }
}
