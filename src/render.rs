//! Drawing of the map: one command per region, borders on top, and
//! a legend whose axis shows the class boundaries.

use rgb::RGB8;
use tracing::{debug, info};
use crate::config::{Config, LegendConfig};
use crate::data::ObservationIndex;
use crate::error::Result;
use crate::path;
use crate::scale::{LinearScale, ThresholdColorScale};
use crate::surface::{Anchor, DrawCommand, Surface, Tick};
use crate::topology::{Feature, MeshFilter, Topology};

const CAPTION_COLOR: RGB8 = RGB8 { r: 0x22, g: 0x22, b: 0x22 };
/// Ticks of the legend axis go up into the color cells.
const TICK_SIZE: f64 = -10.;

/// Label of an axis tick: the value rounded to a whole percentage.
pub fn percent(value: f64) -> String {
    format!("{}%", value.round() + 0.)
}

/// Counts of a rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    pub regions: usize,
    /// Regions with an observation; the others got the fallback color.
    pub matched: usize,
}

/// A choropleth map ready to be drawn: the color scale is built from
/// all observations, and the region and border shapes are decoded.
pub struct Choropleth<'a> {
    config: &'a Config,
    observations: &'a ObservationIndex,
    scale: ThresholdColorScale,
    regions: Vec<Feature>,
    borders: String,
}

impl<'a> Choropleth<'a> {
    pub fn new(config: &'a Config, topology: &Topology,
               observations: &'a ObservationIndex) -> Result<Self> {
        let colors = config.palette.colors()?;
        let scale = ThresholdColorScale::new(observations.values(), colors)?;
        let regions = topology.features(&config.regions_object)?;
        let borders = topology.mesh(&config.borders_object,
                                    MeshFilter::Interior)?;
        debug!(regions = regions.len(), border_arcs = borders.len(),
               "topology decoded");
        Ok(Choropleth { config, observations, scale,
                        regions, borders: path::lines(&borders) })
    }

    pub fn scale(&self) -> &ThresholdColorScale { &self.scale }

    /// Issue all draw commands to `surface`, then finish it.
    pub fn render(&self, surface: &mut dyn Surface) -> Result<RenderStats> {
        self.legend(surface, &self.config.legend)?;
        let stats = self.regions(surface)?;
        surface.draw(DrawCommand::Stroke {
            path: self.borders.clone(), class: "stateBorder".into() })?;
        surface.finish()?;
        info!(regions = stats.regions, matched = stats.matched, "map rendered");
        Ok(stats)
    }

    fn legend(&self, surface: &mut dyn Surface, l: &LegendConfig) -> Result<()> {
        let colors = self.scale.colors();
        let k = colors.len() as f64;
        // Room for the cells plus a cell-wide margin each side, and
        // for the axis and caption under the cells.
        let size = (l.cell_width * (k + 2.), 2.5 * l.cell_height);
        surface.draw(DrawCommand::BeginGroup {
            id: Some("legend".into()), class: None, offset: (l.x, l.y),
            size: Some(size) })?;
        for (i, &fill) in colors.iter().enumerate() {
            surface.draw(DrawCommand::Rect {
                x: l.margin + i as f64 * l.cell_width, y: 0.,
                width: l.cell_width, height: l.cell_height, fill })?;
        }
        surface.draw(DrawCommand::Text {
            x: l.margin + l.cell_width,
            y: 2.5 * l.cell_height,
            text: l.caption.clone(),
            class: Some("caption".into()),
            fill: CAPTION_COLOR,
            font_size: l.cell_height / 2.,
            italic: true,
            anchor: Anchor::Start })?;
        let scale = self.scale.scale();
        let x = LinearScale::new((scale.min(), scale.max()),
                                 (l.margin, l.margin + l.cell_width * k));
        let ticks = scale.tick_values().into_iter()
            .map(|v| Tick { at: x.apply(v), label: percent(v) })
            .collect();
        surface.draw(DrawCommand::BeginGroup {
            id: Some("x-axis".into()), class: None, offset: (0., l.cell_height),
            size: None })?;
        surface.draw(DrawCommand::Axis {
            id: None, range: x.range(), tick_size: TICK_SIZE, ticks })?;
        surface.draw(DrawCommand::EndGroup)?;
        surface.draw(DrawCommand::EndGroup)?;
        Ok(())
    }

    fn regions(&self, surface: &mut dyn Surface) -> Result<RenderStats> {
        surface.draw(DrawCommand::BeginGroup {
            id: None, class: Some("counties".into()), offset: (0., 0.),
            size: None })?;
        let mut matched = 0;
        for f in &self.regions {
            let obs = f.id.as_ref().and_then(|id| self.observations.get(id));
            match obs {
                Some(_) => matched += 1,
                None => debug!(id = ?f.id, "no observation, using fallback color"),
            }
            let value = obs.map(|o| o.value);
            let fips = f.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
            surface.draw(DrawCommand::Area {
                path: path::shape(&f.shape),
                fill: self.scale.color_or_fallback(value),
                class: "county".into(),
                data: vec![("data-fips".into(), fips),
                           ("data-education".into(),
                            value.unwrap_or(0.).to_string())],
                tooltip: obs.map(|o| o.tooltip()) })?;
        }
        surface.draw(DrawCommand::EndGroup)?;
        Ok(RenderStats { regions: self.regions.len(), matched })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_labels() {
        assert_eq!(percent(2.6), "3%");
        assert_eq!(percent(75.1), "75%");
        assert_eq!(percent(-0.3), "0%");
        assert_eq!(percent(17.5), "18%");
    }
}
