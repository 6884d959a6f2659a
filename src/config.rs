//! Settings of a map, read from a JSON file.  Every field has a
//! default reproducing the county education map.

use std::{fs, path::{Path, PathBuf}};
use rgb::RGB8;
use serde::Deserialize;
use crate::color::parse_css;
use crate::error::{Error, Result};
use crate::palettes::Palette;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Location of the TopoJSON document.
    pub topology: String,
    /// Location of the observations.
    pub statistics: String,
    /// Where to write the SVG; standard output if absent.
    pub output: Option<PathBuf>,
    pub width: f64,
    pub height: f64,
    /// Topology object whose geometries are colored.
    pub regions_object: String,
    /// Topology object whose inner borders are drawn on top.
    pub borders_object: String,
    pub palette: PaletteConfig,
    pub legend: LegendConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            topology: "counties.json".into(),
            statistics: "for_user_education.json".into(),
            output: None,
            width: 975.,
            height: 610.,
            regions_object: "counties".into(),
            borders_object: "states".into(),
            palette: PaletteConfig::default(),
            legend: LegendConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteConfig {
    /// Name of a built-in palette, see [`Palette::named`].
    pub name: String,
    /// Number of classes of the threshold scale.
    pub classes: usize,
    /// Explicit CSS colors, one per class, overriding `name` and
    /// `classes`.
    pub colors: Option<Vec<String>>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        PaletteConfig { name: "BuGn".into(), classes: 9, colors: None }
    }
}

impl PaletteConfig {
    /// The colors of the classes.
    pub fn colors(&self) -> Result<Vec<RGB8>> {
        match &self.colors {
            Some(colors) => {
                if colors.is_empty() { return Err(Error::EmptyPalette) }
                colors.iter().map(|c| parse_css(c)).collect()
            }
            None => Palette::named(&self.name)?.classes(self.classes),
        }
    }
}

/// Geometry of the legend, in pixels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegendConfig {
    /// Position of the legend on the map.
    pub x: f64,
    pub y: f64,
    /// Horizontal margin of the color cells inside the legend.
    pub margin: f64,
    pub cell_width: f64,
    pub cell_height: f64,
    pub caption: String,
}

impl Default for LegendConfig {
    fn default() -> Self {
        LegendConfig {
            x: 600.,
            y: 0.,
            margin: 25.,
            cell_width: 30.,
            cell_height: 20.,
            caption: "% adults >= 25 with bachelor's degree".into(),
        }
    }
}

impl Config {
    /// Read the configuration from the JSON file `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|source| Error::Config { path: path.to_path_buf(), source })
    }
}
