pub(crate) use rgb::RGB8;

/// A named ColorBrewer scheme.
pub(crate) struct PaletteData {
    pub(crate) name: &'static str,
    pub(crate) typ: PaletteType,
    pub(crate) rgb: Vec<RGB8>, // Invariant: length ≥ 2
}

/// Type of Palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteType {
    /// Sequential color scheme, suited to ordered data that progress
    /// from low to high, with light colors for low data values to
    /// dark colors for high data values.  The natural choice for a
    /// threshold scale.
    Seq,
    /// Divergent color scheme.  Equal emphasis on mid-range critical
    /// values and extremes at both ends of the data range.
    Div,
}

impl std::fmt::Display for PaletteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self { PaletteType::Seq => "sequential",
                          PaletteType::Div => "diverging" })
    }
}
