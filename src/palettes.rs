//! Built-in palettes.  Brewer colormaps — see http://colorbrewer2.org/

use std::ops::Deref;
use lazy_static::lazy_static;
use tracing::debug;
use crate::color::MultiGradient;
use crate::error::{Error, Result};

pub(crate) mod ty;
use ty::*;
pub use ty::PaletteType;

const fn hex(x: u32) -> RGB8 {
    RGB8 { r: (x >> 16) as u8, g: (x >> 8) as u8, b: x as u8 }
}

macro_rules! brewer {
    ($name: literal, $typ: ident, [$($c: literal),* $(,)?]) => {
        PaletteData { name: $name, typ: PaletteType::$typ,
                      rgb: vec![$(hex($c)),*] }
    }
}

lazy_static! {
    pub(crate) static ref BUGN: PaletteData = brewer!("BuGn", Seq, [
        0xf7fcfd, 0xe5f5f9, 0xccece6, 0x99d8c9, 0x66c2a4, 0x41ae76,
        0x238b45, 0x006d2c, 0x00441b]);
    pub(crate) static ref BLUES: PaletteData = brewer!("Blues", Seq, [
        0xf7fbff, 0xdeebf7, 0xc6dbef, 0x9ecae1, 0x6baed6, 0x4292c6,
        0x2171b5, 0x08519c, 0x08306b]);
    pub(crate) static ref GREENS: PaletteData = brewer!("Greens", Seq, [
        0xf7fcf5, 0xe5f5e0, 0xc7e9c0, 0xa1d99b, 0x74c476, 0x41ab5d,
        0x238b45, 0x006d2c, 0x00441b]);
    pub(crate) static ref YLGN: PaletteData = brewer!("YlGn", Seq, [
        0xffffe5, 0xf7fcb9, 0xd9f0a3, 0xaddd8e, 0x78c679, 0x41ab5d,
        0x238443, 0x006837, 0x004529]);
    pub(crate) static ref PURPLES: PaletteData = brewer!("Purples", Seq, [
        0xfcfbfd, 0xefedf5, 0xdadaeb, 0xbcbddc, 0x9e9ac8, 0x807dba,
        0x6a51a3, 0x54278f, 0x3f007d]);
    pub(crate) static ref ORANGES: PaletteData = brewer!("Oranges", Seq, [
        0xfff5eb, 0xfee6ce, 0xfdd0a2, 0xfdae6b, 0xfd8d3c, 0xf16913,
        0xd94801, 0xa63603, 0x7f2704]);
    pub(crate) static ref REDS: PaletteData = brewer!("Reds", Seq, [
        0xfff5f0, 0xfee0d2, 0xfcbba1, 0xfc9272, 0xfb6a4a, 0xef3b2c,
        0xcb181d, 0xa50f15, 0x67000d]);
    pub(crate) static ref RDYLBU: PaletteData = brewer!("RdYlBu", Div, [
        0xd73027, 0xf46d43, 0xfdae61, 0xfee090, 0xffffbf, 0xe0f3f8,
        0xabd9e9, 0x74add1, 0x4575b4]);

    pub(crate) static ref ALL_PALETTES: [&'static PaletteData; 8] = [
        BUGN.deref(), BLUES.deref(), GREENS.deref(), YLGN.deref(),
        PURPLES.deref(), ORANGES.deref(), REDS.deref(), RDYLBU.deref()];
}

/// A built-in palette.
#[derive(Clone, Copy)]
pub struct Palette {
    palette: &'static PaletteData,
}

impl std::fmt::Debug for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Palette({})", self.palette.name)
    }
}

impl Palette {
    /// Find a palette by name (case insensitive).
    ///
    /// ```
    /// use choropleth::Palette;
    /// let p = Palette::named("bugn").unwrap();
    /// assert_eq!(p.name(), "BuGn");
    /// assert_eq!(p.len(), 9);
    /// ```
    pub fn named(name: &str) -> Result<Palette> {
        ALL_PALETTES.iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(|&palette| Palette { palette })
            .ok_or_else(|| Error::UnknownPalette(name.to_string()))
    }

    /// Iterate over all built-in palettes.
    pub fn all() -> impl Iterator<Item = Palette> {
        ALL_PALETTES.iter().map(|&palette| Palette { palette })
    }

    pub fn name(&self) -> &'static str { self.palette.name }

    /// Number of colors of the palette (at least 2).
    pub fn len(&self) -> usize { self.palette.rgb.len() }

    /// Says whether the palette is `Seq`uential or `Div`ergent.
    pub fn typ(&self) -> PaletteType { self.palette.typ }

    /// Returns the colors of the palette.
    pub fn colors(&self) -> Vec<RGB8> { self.palette.rgb.clone() }

    /// Return `classes` colors: the palette itself when the counts
    /// agree, otherwise colors sampled uniformly along the LCh
    /// gradient through the palette.
    pub fn classes(&self, classes: usize) -> Result<Vec<RGB8>> {
        if classes == 0 { return Err(Error::EmptyPalette) }
        if classes == self.len() { return Ok(self.colors()) }
        debug!(palette = self.name(), classes, "resampling palette");
        Ok(MultiGradient::new(&self.palette.rgb)?.sample(classes))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        assert_eq!(Palette::named("RdYlBu").unwrap().typ(), PaletteType::Div);
        assert!(matches!(Palette::named("Viridis"),
                         Err(Error::UnknownPalette(n)) if n == "Viridis"));
    }

    #[test]
    fn all_have_nine_classes() {
        assert_eq!(Palette::all().count(), 8);
        for p in Palette::all() {
            assert_eq!(p.len(), 9, "{}", p.name());
        }
    }

    #[test]
    fn bugn_is_the_education_palette() {
        let c = Palette::named("BuGn").unwrap().classes(9).unwrap();
        assert_eq!(c[0], RGB8::new(0xf7, 0xfc, 0xfd));
        assert_eq!(c[8], RGB8::new(0x00, 0x44, 0x1b));
    }

    #[test]
    fn resampled() {
        let p = Palette::named("Blues").unwrap();
        let c = p.classes(5).unwrap();
        assert_eq!(c.len(), 5);
        // Lightness decreases along a sequential palette.
        let luma = |c: RGB8| 299 * c.r as u32 + 587 * c.g as u32
            + 114 * c.b as u32;
        assert!(c.windows(2).all(|w| luma(w[0]) > luma(w[1])), "{c:?}");
        assert!(matches!(p.classes(0), Err(Error::EmptyPalette)));
    }
}
