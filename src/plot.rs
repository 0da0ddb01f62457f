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

//! Sampling of functions and rendering of charts.

use std::ops::Range;
use std::path::Path;

use itertools::Itertools;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::config::PlotConfig;
use crate::error::{Error, Result};
use crate::expr::Expr;

type Point = (f64, f64);

/// Half-width and half-height of the plotted window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64) -> Result<Bounds> {
        Ok(Bounds { x: valid_bound(x, || x.to_string())?, y: valid_bound(y, || y.to_string())? })
    }

    /// Parses both bounds as constant expressions, so `5`, `2.5` and `2*pi` are all accepted.
    pub fn parse(x: &str, y: &str) -> Result<Bounds> {
        let parse_bound = |s: &str| {
            s.parse::<Expr>().and_then(|e| e.eval()).map_err(|_| Error::InvalidBound(s.into()))
        };
        Ok(Bounds { x: valid_bound(parse_bound(x)?, || x.into())?, y: valid_bound(parse_bound(y)?, || y.into())? })
    }

    pub fn x_range(&self) -> Range<f64> {
        -self.x..self.x
    }

    pub fn y_range(&self) -> Range<f64> {
        -self.y..self.y
    }
}

fn valid_bound(v: f64, text: impl Fn() -> String) -> Result<f64> {
    (v.is_finite() && v > 0.0).then_some(v).ok_or_else(|| Error::InvalidBound(text()))
}

/// `n` evenly spaced samples of `f` over `range`, both ends included.
pub fn sample<F: Fn(f64) -> f64>(f: F, range: &Range<f64>, n: usize) -> Vec<Point> {
    let n = n.max(2);
    let step = (range.end - range.start) / (n - 1) as f64;
    let x_at = |i: usize| if i == n - 1 {range.end} else {range.start + step * i as f64};
    (0..n).map(x_at).map(|x| (x, f(x))).collect()
}

/// Cut a sampled polyline into the pieces that lie inside `y`.
///
/// Non-finite samples end a piece; a piece leaving or entering the band is cut at the crossing.
/// Pieces with fewer than two points are dropped.
pub fn clip_segments(points: &[Point], y: &Range<f64>) -> Vec<Vec<Point>> {
    let mut segments: Vec<Vec<Point>> = vec![];
    let mut current: Vec<Point> = vec![];
    // `current` ends exactly at the first point of the next pair
    let mut open = false;

    for (&p0, &p1) in points.iter().tuple_windows() {
        let visible = (is_finite(p0) && is_finite(p1)).then(|| clip_pair(p0, p1, y)).flatten();
        match visible {
            Some((t0, t1)) => {
                if !(open && t0 == 0.0) {
                    close_segment(&mut segments, &mut current);
                    current.push(clamp_y(lerp(p0, p1, t0), y));
                }
                current.push(clamp_y(lerp(p0, p1, t1), y));
                open = t1 == 1.0;
            }
            None => {
                close_segment(&mut segments, &mut current);
                open = false;
            }
        }
    }
    close_segment(&mut segments, &mut current);
    segments
}

fn is_finite(p: Point) -> bool {
    p.0.is_finite() && p.1.is_finite()
}

fn clamp_y(p: Point, y: &Range<f64>) -> Point {
    (p.0, p.1.clamp(y.start, y.end))
}

fn close_segment(segments: &mut Vec<Vec<Point>>, current: &mut Vec<Point>) {
    let segment = std::mem::take(current);
    if segment.len() > 1 {
        segments.push(segment);
    }
}

/// Parameter interval `[t0, t1]` of the segment `p0 -> p1` whose y lies inside `y`.
fn clip_pair(p0: Point, p1: Point, y: &Range<f64>) -> Option<(f64, f64)> {
    let dy = p1.1 - p0.1;
    if dy == 0.0 {
        return (y.start <= p0.1 && p0.1 <= y.end).then_some((0.0, 1.0));
    }
    let ta = (y.start - p0.1) / dy;
    let tb = (y.end - p0.1) / dy;
    let (t_in, t_out) = if ta < tb {(ta, tb)} else {(tb, ta)};
    let t0 = t_in.max(0.0);
    let t1 = t_out.min(1.0);
    (t0 <= t1).then_some((t0, t1))
}

fn lerp(p0: Point, p1: Point, t: f64) -> Point {
    if t == 0.0 {
        p0
    } else if t == 1.0 {
        p1
    } else {
        (p0.0 + (p1.0 - p0.0) * t, p0.1 + (p1.1 - p0.1) * t)
    }
}

/// One function on the chart: its label and the drawable pieces of its curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    pub label: String,
    pub segments: Vec<Vec<Point>>,
}

impl Graph {
    pub fn sampled<S: Into<String>, F: Fn(f64) -> f64>(label: S, f: F, bounds: &Bounds, samples: usize) -> Graph {
        let points = sample(f, &bounds.x_range(), samples);
        Graph { label: label.into(), segments: clip_segments(&points, &bounds.y_range()) }
    }

    pub fn point_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }
}

fn draw_frame<DB, C>(root: &DrawingArea<DB, Shift>, config: &C, bounds: &Bounds, graphs: &[Graph]) -> Result<()>
where
    DB: DrawingBackend,
    C: PlotConfig,
{
    let corner = config.legend_rectangle();
    let legend_rect = move |x: i32, y: i32| [(x + corner[0], y + corner[1]), (x + corner[2], y + corner[3])];

    root.fill(&config.bg_color())?;

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(config.margin())
        .x_label_area_size(config.x_label_area_size())
        .y_label_area_size(config.y_label_area_size());
    if let Some(caption) = config.caption() {
        builder.caption(caption, config.title_style());
    }
    let mut chart = builder.build_cartesian_2d(bounds.x_range(), bounds.y_range())?;

    {
        let mut mesh = chart.configure_mesh();
        mesh.light_line_style(config.grid_color().mix(0.5))
            .bold_line_style(config.grid_color())
            .axis_style(config.axis_color());
        if config.draw_labels() {
            mesh.x_label_style(config.label_style()).y_label_style(config.label_style());
        } else {
            mesh.x_labels(0).y_labels(0);
        }
        mesh.draw()?;
    }

    let (x, y) = (bounds.x_range(), bounds.y_range());
    let axes = [vec![(x.start, 0.0), (x.end, 0.0)], vec![(0.0, y.start), (0.0, y.end)]];
    chart.draw_series(axes.into_iter().map(|axis| PathElement::new(axis, config.axis_color())))?;

    for (n, graph) in graphs.iter().enumerate() {
        let color = config.line_color(n);
        let mut pieces = graph.segments.iter();
        if let Some(first) = pieces.next() {
            let anno = chart.draw_series(LineSeries::new(first.iter().copied(), config.line_stroke_style(n)))?;
            if config.legend() {
                anno.label(graph.label.as_str())
                    .legend(move |(x, y)| Rectangle::new(legend_rect(x, y), color.filled()));
            }
        }
        for piece in pieces {
            chart.draw_series(LineSeries::new(piece.iter().copied(), config.line_stroke_style(n)))?;
        }
        log::debug!("graph {n} `{}`: {} pieces, {} points", graph.label, graph.segments.len(), graph.point_count());
    }

    if config.legend() && !graphs.is_empty() {
        chart.configure_series_labels().position(SeriesLabelPosition::UpperLeft)
            .border_style(config.legend_rect_bd())
            .background_style(config.legend_rect_bg())
            .label_font(config.legend_style())
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Render all graphs as series of one chart into a PNG file.
pub fn plot_graphs<P, C>(file: &P, config: &C, bounds: &Bounds, graphs: &[Graph]) -> Result<()>
where
    P: AsRef<Path> + ?Sized,
    C: PlotConfig,
{
    let root = BitMapBackend::new(file.as_ref(), config.plot_size()).into_drawing_area();
    draw_frame(&root, config, bounds, graphs)?;
    log::info!("{} graph(s) saved to {}", graphs.len(), file.as_ref().display());
    Ok(())
}

/// Render one chart per frame into an animated GIF.
pub fn animate_graphs<P, C>(file: &P, config: &C, bounds: &Bounds, frames: &[Vec<Graph>], delay_ms: u32) -> Result<()>
where
    P: AsRef<Path> + ?Sized,
    C: PlotConfig,
{
    let root = BitMapBackend::gif(file.as_ref(), config.plot_size(), delay_ms)
        .map_err(|e| Error::Plot(e.to_string()))?
        .into_drawing_area();
    for graphs in frames {
        draw_frame(&root, config, bounds, graphs)?;
    }
    log::info!("{} frame(s) saved to {}", frames.len(), file.as_ref().display());
    Ok(())
}
