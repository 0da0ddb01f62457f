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

use std::cell::OnceCell;
use std::path::Path;

use plotters::prelude::*;
use plotters::style::ShapeStyle;
use serde::{Deserialize, Serialize};

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "graph_config.json";

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfigData {
    plot_width: u32,
    plot_height: u32,
    bg_color_str: String,

    #[serde(skip)]
    bg_color: OnceCell<RGBColor>,

    title_font: String,
    title_size: f64,
    caption: Option<String>,

    label_font: String,
    label_size: f64,
    draw_labels: bool,

    x_label_area_size: u32,
    y_label_area_size: u32,
    margin: u32,

    axis_color_str: String,
    grid_color_str: String,

    #[serde(skip)]
    axis_color: OnceCell<RGBColor>,
    #[serde(skip)]
    grid_color: OnceCell<RGBColor>,

    legend: bool,
    legend_font: String,
    legend_size: f64,
    legend_rectangle: [i32; 4],
    legend_rect_bd_str: String,
    legend_rect_bg_str: String,

    #[serde(skip)]
    legend_rect_bd: OnceCell<RGBColor>,
    #[serde(skip)]
    legend_rect_bg: OnceCell<RGBColor>,

    line_colors_str: Vec<String>,
    #[serde(skip)]
    line_colors: OnceCell<Vec<RGBColor>>,

    stroke_size: u32,
    samples: usize,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolveConfigData {
    num_exprs: usize,
    max_degree: usize,
    mutate_p: f64,
    frames_per_sec: u32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub plot_conf: PlotConfigData,
    pub evolve_conf: EvolveConfigData,
}

impl Default for PlotConfigData {
    fn default() -> Self {
        PlotConfigData {
            plot_width: 640,
            plot_height: 480,
            bg_color_str: String::from("WHITE"),
            bg_color: OnceCell::new(),

            title_font: String::from("sans-serif"),
            title_size: 24.0,
            caption: None,

            label_font: String::from("sans-serif"),
            label_size: 14.0,
            draw_labels: true,

            x_label_area_size: 30,
            y_label_area_size: 40,
            margin: 10,

            axis_color_str: String::from("BLACK"),
            grid_color_str: String::from("225,225,225"),
            axis_color: OnceCell::new(),
            grid_color: OnceCell::new(),

            legend: false,
            legend_font: String::from("sans-serif"),
            legend_size: 14.0,
            legend_rectangle: [0, -3, 16, 3],
            legend_rect_bd_str: String::from("BLACK"),
            legend_rect_bg_str: String::from("WHITE"),
            legend_rect_bd: OnceCell::new(),
            legend_rect_bg: OnceCell::new(),

            line_colors_str: ["BLUE", "RED", "GREEN", "MAGENTA", "CYAN", "BLACK"]
                .map(String::from)
                .to_vec(),
            line_colors: OnceCell::new(),

            stroke_size: 2,
            samples: 400,
        }
    }
}

impl Default for EvolveConfigData {
    fn default() -> Self {
        EvolveConfigData {
            num_exprs: 10,
            max_degree: 3,
            mutate_p: 0.10,
            frames_per_sec: 4,
        }
    }
}

pub type RectangleCorner = [i32; 4];

pub trait PlotConfig {
    fn plot_size(&self) -> (u32, u32);
    fn bg_color(&self) -> RGBColor;
    fn caption(&self) -> Option<&str>;
    fn title_style(&'_ self) -> TextStyle<'_>;
    fn label_style(&'_ self) -> TextStyle<'_>;
    fn draw_labels(&self) -> bool;
    fn x_label_area_size(&self) -> u32;
    fn y_label_area_size(&self) -> u32;
    fn margin(&self) -> u32;
    fn axis_color(&self) -> RGBColor;
    fn grid_color(&self) -> RGBColor;
    fn legend(&self) -> bool;
    fn legend_style(&'_ self) -> TextStyle<'_>;
    fn legend_rectangle(&self) -> RectangleCorner;
    fn legend_rect_bd(&self) -> RGBColor;
    fn legend_rect_bg(&self) -> RGBColor;
    fn line_color(&self, n: usize) -> RGBColor;
    fn line_stroke_style(&self, n: usize) -> ShapeStyle;
    fn samples(&self) -> usize;
}

pub trait EvolveConfig {
    fn num_exprs(&self) -> usize;
    fn max_degree(&self) -> usize;
    fn mutate_p(&self) -> f64;
    fn frames_per_sec(&self) -> u32;
}

macro_rules! str2color {
    ($e:expr; $($c:ident),+; $d:expr) => {
        match $e {
            $(stringify!($c) => $c,)+
            _ => $d,
        }
    };
}

macro_rules! fn_color {
    ($id:ident, $strid:ident) => {
        fn $id(&self) -> RGBColor {
            *self.$id.get_or_init(|| PlotConfigData::str2color(&self.$strid))
        }
    };
}

impl PlotConfigData {
    fn digi2color(color: &str) -> RGBColor {
        let color: Vec<u8> = color.split(',').filter_map(|s| s.trim().parse::<u8>().ok()).collect();
        if color.len() == 3 {RGBColor(color[0], color[1], color[2])} else {BLACK}
    }

    fn str2color(color: &str) -> RGBColor {
        str2color!(color; BLACK, BLUE, CYAN, GREEN, MAGENTA, RED, WHITE, YELLOW; PlotConfigData::digi2color(color))
    }

    fn line_colors(&self) -> &[RGBColor] {
        self.line_colors.get_or_init(|| {
            let colors: Vec<RGBColor> = self.line_colors_str.iter().map(|c| PlotConfigData::str2color(c)).collect();
            if colors.is_empty() {vec![BLUE]} else {colors}
        })
    }
}

impl PlotConfig for PlotConfigData {
    fn plot_size(&self) -> (u32, u32) {
        (self.plot_width, self.plot_height)
    }

    fn_color!(bg_color, bg_color_str);

    fn caption(&self) -> Option<&str> {
        self.caption.as_deref().filter(|c| !c.is_empty())
    }

    fn title_style(&'_ self) -> TextStyle<'_> {
        (self.title_font.as_str(), self.title_size).into()
    }

    fn label_style(&'_ self) -> TextStyle<'_> {
        (self.label_font.as_str(), self.label_size).into()
    }

    fn draw_labels(&self) -> bool {
        self.draw_labels
    }

    fn x_label_area_size(&self) -> u32 {
        if self.draw_labels {self.x_label_area_size} else {0}
    }

    fn y_label_area_size(&self) -> u32 {
        if self.draw_labels {self.y_label_area_size} else {0}
    }

    fn margin(&self) -> u32 {
        self.margin
    }

    fn_color!(axis_color, axis_color_str);
    fn_color!(grid_color, grid_color_str);

    fn legend(&self) -> bool {
        self.legend
    }

    fn legend_style(&'_ self) -> TextStyle<'_> {
        (self.legend_font.as_str(), self.legend_size).into()
    }

    fn legend_rectangle(&self) -> RectangleCorner {
        self.legend_rectangle
    }

    fn_color!(legend_rect_bd, legend_rect_bd_str);
    fn_color!(legend_rect_bg, legend_rect_bg_str);

    fn line_color(&self, n: usize) -> RGBColor {
        let colors = self.line_colors();
        colors[n % colors.len()]
    }

    fn line_stroke_style(&self, n: usize) -> ShapeStyle {
        ShapeStyle {
            color: self.line_color(n).mix(1.0),
            filled: true,
            stroke_width: self.stroke_size,
        }
    }

    fn samples(&self) -> usize {
        self.samples.max(2)
    }
}

impl EvolveConfig for EvolveConfigData {
    fn num_exprs(&self) -> usize {
        self.num_exprs
    }

    fn max_degree(&self) -> usize {
        self.max_degree
    }

    fn mutate_p(&self) -> f64 {
        self.mutate_p
    }

    fn frames_per_sec(&self) -> u32 {
        self.frames_per_sec.max(1)
    }
}

impl Config {
    pub fn from_json(conf_str: &str) -> serde_json::Result<Config> {
        serde_json::from_str(conf_str)
    }

    /// Reads the configuration at `path`; a missing file gives the defaults, an unreadable one
    /// is reported and ignored.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Config {
        load_conf_file(path.as_ref()).unwrap_or_default()
    }
}

fn load_conf_file(path: &Path) -> Option<Config> {
    let conf_str = std::fs::read_to_string(path).ok()?;
    Config::from_json(&conf_str)
        .inspect_err(|e| log::warn!("ignoring config file {}: {e}", path.display()))
        .ok()
        .inspect(|_| log::debug!("config loaded from {}", path.display()))
}
