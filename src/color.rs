//! CSS color strings and perceptual gradients for [`RGB8`] colors.

use std::f64::consts::PI;
use rgb::RGB8;
use crate::error::{Error, Result};

/// Return the CSS string `#rrggbb` of `c`.
pub fn css_string(c: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

/// Parse `#rrggbb` or `#rgb` (the `#` is optional).
///
/// ```
/// use rgb::RGB8;
/// use choropleth::color::parse_css;
/// assert_eq!(parse_css("#41ae76").unwrap(), RGB8::new(0x41, 0xae, 0x76));
/// assert_eq!(parse_css("fa0").unwrap(), RGB8::new(0xff, 0xaa, 0x00));
/// ```
pub fn parse_css(s: &str) -> Result<RGB8> {
    let hex = s.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    let invalid = || Error::InvalidColor(s.to_string());
    if !hex.is_ascii() { return Err(invalid()) }
    let digit = |i: usize, n: usize| {
        u8::from_str_radix(&hex[i .. i + n], 16).map_err(|_| invalid())
    };
    match hex.len() {
        6 => Ok(RGB8::new(digit(0, 2)?, digit(2, 2)?, digit(4, 2)?)),
        3 => Ok(RGB8::new(17 * digit(0, 1)?, 17 * digit(1, 1)?,
                          17 * digit(2, 1)?)),
        _ => Err(invalid()),
    }
}

/// The type for colors in the CIE L*C*h*_ab color space with a D50
/// reference white point.  This color space is CIE L*a*b* with polar
/// coordinates.
#[derive(Debug, Clone, Copy)]
struct Lch {
    /// Lightness, in 0. ..= 100.
    l: f64,
    /// Chroma, at most 181.02 but less in practice.
    c: f64,
    /// Hue angle, in 0. .. 2π.
    h: f64,
}

const EPS0: f64 = 6. / 29.;
const EPS: f64 = EPS0 * EPS0 * EPS0;
const TWO_PI: f64 = 2. * PI;

fn srgb_to_linear(c: u8) -> f64 {
    let c = c as f64 / 255.;
    if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
}

fn linear_to_srgb(c: f64) -> u8 {
    let c = c.clamp(0., 1.);
    let c = if c <= 0.0031308 { 12.92 * c }
            else { 1.055 * c.powf(1. / 2.4) - 0.055 };
    (255. * c).round() as u8
}

impl Lch {
    fn from_rgb(c: RGB8) -> Lch {
        const C0: f64 = 1. / 3.;
        const C1: f64 = 841. / 108.;
        const C2: f64 = 4. / 29.;
        let (r, g, b) = (srgb_to_linear(c.r), srgb_to_linear(c.g),
                         srgb_to_linear(c.b));
        // Linear sRGB → XYZ (D50), normalized by the white point.
        let xr = 0.4522795 * r + 0.3993744 * g + 0.1483460 * b;
        let yr = 0.2225105 * r + 0.7168863 * g + 0.0606032 * b;
        let zr = 0.0168820 * r + 0.1176865 * g + 0.8654315 * b;
        let f = |t: f64| if t > EPS { t.powf(C0) } else { C1 * t + C2 };
        let (fx, fy, fz) = (f(xr), f(yr), f(zr));
        let a = 500. * (fx - fy);
        let b = 200. * (fy - fz);
        let h = b.atan2(a);
        Lch { l: 116. * fy - 16.,  c: a.hypot(b),
              h: if h < 0. { h + TWO_PI } else { h } }
    }

    fn to_rgb(self) -> RGB8 {
        const C0: f64 = 108. / 841.;
        const C1: f64 = 4. / 29.;
        let a = self.c * self.h.cos();
        let b = self.c * self.h.sin();
        let fy = (self.l + 16.) / 116.;
        let fx = a / 500. + fy;
        let fz = fy - b / 200.;
        let finv = |t: f64| if t > EPS0 { t * t * t } else { C0 * (t - C1) };
        let (x, y, z) = (finv(fx), finv(fy), finv(fz));
        let r = 3.0215932 * x - 1.6168777 * y - 0.4047152 * z;
        let g = -0.9437222 * x + 1.9161365 * y + 0.0275856 * z;
        let b = 0.0693906 * x - 0.2290271 * y + 1.1596365 * z;
        RGB8::new(linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b))
    }
}

/// Gradient between two colors, interpolated in CIE LCh along the
/// shortest hue arc.
#[derive(Debug, Clone, Copy)]
pub struct Gradient {
    c0: Lch,
    dc: Lch, // c1 - c0
}

impl Gradient {
    pub fn new(c0: RGB8, c1: RGB8) -> Self {
        let lch0 = Lch::from_rgb(c0);
        let lch1 = Lch::from_rgb(c1);
        let (h0, h1) = (lch0.h, lch1.h);
        let dh = if h1 > h0 && h1 - h0 > PI { h1 - (h0 + TWO_PI) }
                 else if h1 < h0 && h0 - h1 > PI { h1 + TWO_PI - h0 }
                 else { h1 - h0 };
        Gradient { c0: lch0,
                   dc: Lch { l: lch1.l - lch0.l, c: lch1.c - lch0.c, h: dh } }
    }

    /// Color at `t` ∈ \[0, 1\]; `t` is clamped.
    pub fn rgb(&self, t: f64) -> RGB8 {
        let t = t.clamp(0., 1.);
        Lch { l: self.c0.l + t * self.dc.l,
              c: self.c0.c + t * self.dc.c,
              h: self.c0.h + t * self.dc.h }.to_rgb()
    }
}

/// Piecewise gradient through a sequence of colors.
#[derive(Debug, Clone)]
pub struct MultiGradient {
    first: RGB8,
    gradients: Vec<Gradient>,
}

impl MultiGradient {
    /// `colors` must not be empty.
    pub fn new(colors: &[RGB8]) -> Result<Self> {
        let first = *colors.first().ok_or(Error::EmptyPalette)?;
        let gradients = colors.windows(2)
            .map(|c| Gradient::new(c[0], c[1]))
            .collect();
        Ok(MultiGradient { first, gradients })
    }

    /// Color at `t` ∈ \[0, 1\]; `t` is clamped.
    pub fn rgb(&self, t: f64) -> RGB8 {
        let n = self.gradients.len();
        if n == 0 { return self.first }
        let tn = t.clamp(0., 1.) * n as f64;
        let i = tn.trunc() as usize;
        if i < n { self.gradients[i].rgb(tn.fract()) }
        else { self.gradients[n - 1].rgb(1.) }
    }

    /// Sample `n` colors uniformly, both ends included.
    pub fn sample(&self, n: usize) -> Vec<RGB8> {
        match n {
            0 => vec![],
            1 => vec![self.first],
            _ => { let dt = 1. / (n - 1) as f64;
                   (0 .. n).map(|i| self.rgb(i as f64 * dt)).collect() }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn close(c0: RGB8, c1: RGB8) -> bool {
        let d = |a: u8, b: u8| (a as i16 - b as i16).abs() <= 1;
        d(c0.r, c1.r) && d(c0.g, c1.g) && d(c0.b, c1.b)
    }

    #[test]
    fn css_roundtrip() {
        let c = RGB8::new(0x00, 0x44, 0x1b);
        assert_eq!(css_string(c), "#00441b");
        assert_eq!(parse_css(" #00441B ").unwrap(), c);
    }

    #[test]
    fn css_invalid() {
        for s in ["", "#", "#12345", "#gg0000", "red", "#ééé"] {
            assert!(matches!(parse_css(s), Err(Error::InvalidColor(_))),
                    "{s:?} accepted");
        }
    }

    #[test]
    fn gradient_ends() {
        let c0 = RGB8::new(247, 252, 253);
        let c1 = RGB8::new(0, 68, 27);
        let g = Gradient::new(c0, c1);
        assert!(close(g.rgb(0.), c0), "{:?} ≉ {:?}", g.rgb(0.), c0);
        assert!(close(g.rgb(1.), c1), "{:?} ≉ {:?}", g.rgb(1.), c1);
        assert!(close(g.rgb(7.), c1));
    }

    #[test]
    fn sample_keeps_stops() {
        let stops = [RGB8::new(255, 0, 0), RGB8::new(255, 255, 255),
                     RGB8::new(0, 0, 255)];
        let g = MultiGradient::new(&stops).unwrap();
        let s = g.sample(5);
        assert_eq!(s.len(), 5);
        for (c, stop) in [(s[0], stops[0]), (s[2], stops[1]), (s[4], stops[2])] {
            assert!(close(c, stop), "{c:?} ≉ {stop:?}");
        }
        assert_eq!(g.sample(1), vec![stops[0]]);
        assert!(MultiGradient::new(&[]).is_err());
    }
}
