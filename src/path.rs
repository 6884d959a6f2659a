//! SVG path data for decoded shapes.  Coordinates are used as they
//! are: the topology is expected to be projected already.

use std::fmt::Write;
use crate::topology::{Line, Point, Shape};

/// Format `x` with at most 3 decimals and no trailing zeros.
pub fn number(x: f64) -> String {
    let scaled = x * 1000.;
    // Adding 0. turns -0. into 0.
    let x = if scaled.is_finite() { scaled.round() / 1000. + 0. } else { x + 0. };
    format!("{x}")
}

fn move_line(d: &mut String, line: &[Point]) {
    for (i, [x, y]) in line.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        // Writing to a `String` cannot fail.
        let _ = write!(d, "{cmd}{},{}", number(*x), number(*y));
    }
}

fn rings(d: &mut String, rings: &[Line]) {
    for ring in rings.iter().filter(|r| !r.is_empty()) {
        move_line(d, ring);
        d.push('Z');
    }
}

/// Path data of `shape`; empty for [`Shape::Empty`].
///
/// ```
/// use choropleth::{path, topology::Shape};
/// let square = Shape::Polygons(vec![vec![
///     vec![[0., 0.], [1., 0.], [1., 1.], [0., 0.]]]]);
/// assert_eq!(path::shape(&square), "M0,0L1,0L1,1L0,0Z");
/// ```
pub fn shape(shape: &Shape) -> String {
    let mut d = String::new();
    push_shape(&mut d, shape);
    d
}

fn push_shape(d: &mut String, shape: &Shape) {
    match shape {
        Shape::Polygons(ps) => for p in ps { rings(d, p) },
        Shape::Lines(ls) => lines_into(d, ls),
        Shape::Collection(ss) => for s in ss { push_shape(d, s) },
        Shape::Empty => (),
    }
}

fn lines_into(d: &mut String, ls: &[Line]) {
    for l in ls.iter().filter(|l| l.len() >= 2) { move_line(d, l) }
}

/// Path data of open `lines` (e.g. a border mesh).
pub fn lines(ls: &[Line]) -> String {
    let mut d = String::new();
    lines_into(&mut d, ls);
    d
}
