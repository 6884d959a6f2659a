//! The contract between the map renderer and what it draws on.

use std::io;
use rgb::RGB8;

/// Where a text is anchored, relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor { Start, Middle, End }

/// One tick of an axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Position along the axis, in surface units.
    pub at: f64,
    pub label: String,
}

/// A drawing primitive.  Groups nest and must be balanced.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Open a group, translated by `offset`.  With a `size`, the
    /// group is a viewport of that width and height.
    BeginGroup {
        id: Option<String>,
        class: Option<String>,
        offset: (f64, f64),
        size: Option<(f64, f64)>,
    },
    EndGroup,
    /// A filled region, e.g. a county.
    Area {
        path: String,
        fill: RGB8,
        class: String,
        /// Extra `(name, value)` attributes describing the datum.
        data: Vec<(String, String)>,
        /// Text shown when the pointer hovers the region.
        tooltip: Option<String>,
    },
    /// Unfilled lines, e.g. borders.
    Stroke { path: String, class: String },
    Rect { x: f64, y: f64, width: f64, height: f64, fill: RGB8 },
    Text {
        x: f64,
        y: f64,
        text: String,
        class: Option<String>,
        fill: RGB8,
        font_size: f64,
        italic: bool,
        anchor: Anchor,
    },
    /// A horizontal axis at the origin of the current group: a baseline
    /// over `range`, ticks of length `tick_size` (negative ticks point
    /// up) and labels under it.
    Axis { id: Option<String>, range: (f64, f64), tick_size: f64, ticks: Vec<Tick> },
}

/// Something draw commands can be issued to.
pub trait Surface {
    /// Draw `cmd`.
    fn draw(&mut self, cmd: DrawCommand) -> io::Result<()>;

    /// Flush everything drawn so far.  No command may follow.
    fn finish(&mut self) -> io::Result<()> { Ok(()) }
}

/// Records the commands, in order.
impl Surface for Vec<DrawCommand> {
    fn draw(&mut self, cmd: DrawCommand) -> io::Result<()> {
        self.push(cmd);
        Ok(())
    }
}
