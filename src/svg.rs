//! Serialization of draw commands as a standalone SVG document.

use std::io::{self, Write};
use rgb::RGB8;
use crate::color::css_string;
use crate::path::number;
use crate::surface::{Anchor, DrawCommand, Surface, Tick};

const STYLE: &str = "\
.county:hover { stroke: #222; stroke-width: 1; }
.stateBorder { fill: none; stroke: #fff; stroke-linejoin: round; }
.axis { font: 10px sans-serif; }
.axis .domain, .axis line { fill: none; stroke: currentColor; }";

/// Escape `s` for use in text content and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn unbalanced() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, "unbalanced SVG groups")
}

/// A [`Surface`] writing an SVG document of a given size to `W`.
/// The document header is written with the first command.
pub struct SvgSurface<W: Write> {
    out: W,
    width: f64,
    height: f64,
    open: Vec<&'static str>, // tags of the open groups, root excluded
    started: bool,
}

impl<W: Write> SvgSurface<W> {
    pub fn new(out: W, width: f64, height: f64) -> Self {
        SvgSurface { out, width, height, open: vec![], started: false }
    }

    /// Return the underlying writer.
    pub fn into_inner(self) -> W { self.out }

    fn start(&mut self) -> io::Result<()> {
        if self.started { return Ok(()) }
        self.started = true;
        let (w, h) = (number(self.width), number(self.height));
        writeln!(self.out, "<svg xmlns=\"http://www.w3.org/2000/svg\" \
                            width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">")?;
        writeln!(self.out, "<style>\n{STYLE}\n</style>")
    }

    fn indent(&mut self) -> io::Result<()> {
        write!(self.out, "{:1$}", "", 2 * (self.open.len() + 1))
    }

    fn axis(&mut self, id: Option<String>, (r0, r1): (f64, f64),
            tick_size: f64, ticks: Vec<Tick>) -> io::Result<()> {
        self.indent()?;
        write!(self.out, "<g class=\"axis\"")?;
        if let Some(id) = id { write!(self.out, " id=\"{}\"", escape(&id))? }
        writeln!(self.out, ">")?;
        self.open.push("g");
        let k = number(tick_size);
        self.indent()?;
        writeln!(self.out, "<path class=\"domain\" d=\"M{},{k}V0H{}V{k}\"/>",
                 number(r0), number(r1))?;
        let label_y = number(tick_size.max(0.) + 3.);
        for Tick { at, label } in ticks {
            self.indent()?;
            writeln!(self.out, "<g class=\"tick\" transform=\"translate({},0)\">\
                                <line y2=\"{k}\"/>\
                                <text fill=\"currentColor\" y=\"{label_y}\" \
                                dy=\"0.71em\" text-anchor=\"middle\">{}</text></g>",
                     number(at), escape(&label))?;
        }
        self.open.pop();
        self.indent()?;
        writeln!(self.out, "</g>")
    }
}

fn fill(c: RGB8) -> String { css_string(c) }

impl<W: Write> Surface for SvgSurface<W> {
    fn draw(&mut self, cmd: DrawCommand) -> io::Result<()> {
        self.start()?;
        match cmd {
            DrawCommand::BeginGroup { id, class, offset: (dx, dy), size } => {
                self.indent()?;
                let tag = if size.is_some() { "svg" } else { "g" };
                write!(self.out, "<{tag}")?;
                if let Some(id) = id { write!(self.out, " id=\"{}\"", escape(&id))? }
                if let Some(c) = class { write!(self.out, " class=\"{}\"", escape(&c))? }
                match size {
                    // Nested viewports are positioned, not transformed.
                    Some((w, h)) =>
                        write!(self.out, " x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
                               number(dx), number(dy), number(w), number(h))?,
                    None if dx != 0. || dy != 0. =>
                        write!(self.out, " transform=\"translate({},{})\"",
                               number(dx), number(dy))?,
                    None => (),
                }
                writeln!(self.out, ">")?;
                self.open.push(tag);
            }
            DrawCommand::EndGroup => {
                let tag = self.open.pop().ok_or_else(unbalanced)?;
                self.indent()?;
                writeln!(self.out, "</{tag}>")?;
            }
            DrawCommand::Area { path, fill: c, class, data, tooltip } => {
                self.indent()?;
                write!(self.out, "<path class=\"{}\"", escape(&class))?;
                for (name, value) in &data {
                    write!(self.out, " {}=\"{}\"", escape(name), escape(value))?;
                }
                write!(self.out, " fill=\"{}\" d=\"{path}\"", fill(c))?;
                match tooltip {
                    Some(t) => writeln!(self.out, "><title>{}</title></path>",
                                        escape(&t))?,
                    None => writeln!(self.out, "/>")?,
                }
            }
            DrawCommand::Stroke { path, class } => {
                self.indent()?;
                writeln!(self.out, "<path class=\"{}\" d=\"{path}\"/>",
                         escape(&class))?;
            }
            DrawCommand::Rect { x, y, width, height, fill: c } => {
                self.indent()?;
                writeln!(self.out, "<rect x=\"{}\" y=\"{}\" width=\"{}\" \
                                    height=\"{}\" fill=\"{}\"/>",
                         number(x), number(y), number(width), number(height),
                         fill(c))?;
            }
            DrawCommand::Text { x, y, text, class, fill: c, font_size,
                                italic, anchor } => {
                self.indent()?;
                write!(self.out, "<text")?;
                if let Some(c) = class { write!(self.out, " class=\"{}\"", escape(&c))? }
                let anchor = match anchor { Anchor::Start => "start",
                                            Anchor::Middle => "middle",
                                            Anchor::End => "end" };
                write!(self.out, " x=\"{}\" y=\"{}\" fill=\"{}\" font-size=\"{}\" \
                                  text-anchor=\"{anchor}\"",
                       number(x), number(y), fill(c), number(font_size))?;
                if italic { write!(self.out, " font-style=\"italic\"")? }
                writeln!(self.out, ">{}</text>", escape(&text))?;
            }
            DrawCommand::Axis { id, range, tick_size, ticks } =>
                self.axis(id, range, tick_size, ticks)?,
        }
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        if !self.open.is_empty() { return Err(unbalanced()) }
        self.start()?;
        writeln!(self.out, "</svg>")?;
        self.out.flush()
    }
}
