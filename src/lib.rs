//! Choropleth maps colored with a threshold scale.
//!
//! The observed values are split in `K` classes of equal width by a
//! [`ThresholdScale`]; each region of a TopoJSON [`Topology`] is
//! filled with the [`Palette`] color of its class and the map is
//! drawn on a [`Surface`], e.g. an [`SvgSurface`].
//!
//! - [`scale`]: [`ThresholdScale`], [`ThresholdColorScale`], [`LinearScale`]
//! - [`data`]: [`Observation`]s indexed by [`Id`]
//! - [`topology`]: decoding of regions and border meshes
//! - [`render`]: the [`Choropleth`] map and its legend
//!
//! Many [`Palette`]s are provided, all [schemes by Cynthia
//! Brewer](https://colorbrewer2.org/) with 9 classes.

use std::{fs::File, io::{self, BufWriter, Write}};
use tracing::info;

pub mod color;
pub mod config;
pub mod data;
mod error;
pub mod fetch;
mod palettes;
pub mod path;
pub mod render;
pub mod scale;
pub mod surface;
pub mod svg;
pub mod topology;

pub use config::Config;
pub use data::{Id, Observation, ObservationIndex};
pub use error::{Error, Result, ScaleError};
pub use fetch::{FileSource, Source};
pub use palettes::{Palette, PaletteType};
pub use render::{Choropleth, RenderStats};
pub use scale::{LinearScale, ThresholdColorScale, ThresholdScale};
pub use surface::{DrawCommand, Surface};
pub use svg::SvgSurface;
pub use topology::Topology;

/// Load both inputs of `config`, then render the map to `out`.
/// Nothing is written to `out` if loading fails.
pub fn render_to<W: Write>(config: &Config, topology: &dyn Source,
                           statistics: &dyn Source, out: impl FnOnce() -> io::Result<W>)
                           -> Result<RenderStats> {
    let (topo, observations) = fetch::load(topology, statistics)?;
    info!(observations = observations.len(), "inputs loaded");
    let map = Choropleth::new(config, &topo, &observations)?;
    let mut surface = SvgSurface::new(out()?, config.width, config.height);
    map.render(&mut surface)
}

/// Render the map described by `config` to its output file, or to
/// standard output.
pub fn run(config: &Config) -> Result<RenderStats> {
    let topology = FileSource::new(&config.topology)?;
    let statistics = FileSource::new(&config.statistics)?;
    match &config.output {
        Some(path) => render_to(config, &topology, &statistics,
                                || File::create(path).map(BufWriter::new)),
        None => render_to(config, &topology, &statistics,
                          || Ok(BufWriter::new(io::stdout().lock()))),
    }
}
