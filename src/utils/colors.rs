use std::collections::HashMap;
use lazy_static::lazy_static;
use plotters::style::RGBColor;

lazy_static! {
    // CSS named colors understood by the SVG renderer
    static ref NAMED_COLORS: HashMap<&'static str, RGBColor> = {
        let mut m = HashMap::new();
        m.insert("black", RGBColor(0, 0, 0));
        m.insert("white", RGBColor(255, 255, 255));
        m.insert("gray", RGBColor(128, 128, 128));
        m.insert("grey", RGBColor(128, 128, 128));
        m.insert("red", RGBColor(255, 0, 0));
        m.insert("green", RGBColor(0, 128, 0));
        m.insert("blue", RGBColor(0, 0, 255));
        m.insert("purple", RGBColor(128, 0, 128));
        m.insert("lightblue", RGBColor(173, 216, 230));
        m.insert("pink", RGBColor(255, 192, 203));
        m.insert("orange", RGBColor(255, 165, 0));
        m.insert("orchid", RGBColor(218, 112, 214));
        m.insert("darkorchid", RGBColor(153, 50, 204));
        m.insert("yellow", RGBColor(255, 255, 0));
        m.insert("azure", RGBColor(240, 255, 255));
        m.insert("mintcream", RGBColor(245, 255, 250));
        m
    };
}

/// Automatic colors for series without an explicit mapping
pub const FALLBACK_PALETTE: [&str; 10] = [
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a",
    "#19d3f3", "#ff6692", "#b6e880", "#ff97ff", "#fecb52",
];

/// Series name to color lookup handed to the composer
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    entries: HashMap<String, String>,
}

impl ColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Colors used for the coin columns of the price file
    pub fn coin_defaults() -> Self {
        Self::new()
            .with("Solana-SOL", "purple")
            .with("Litecoin-LTC", "lightblue")
            .with("Etherium-ETH", "pink")
            .with("Dogecoin-DOGE", "orange")
            .with("Bitcoin-BTC", "orchid")
            .with("Binancecoin-BNB", "yellow")
            .with("Cardano-ADA", "azure")
    }

    pub fn with(mut self, name: &str, color: &str) -> Self {
        self.entries.insert(name.to_string(), color.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Resolve the color for a series.
    ///
    /// Unmapped names get a palette color picked by the trace position, so a
    /// lookup never fails.
    pub fn resolve(&self, name: &str, trace_index: usize) -> String {
        match self.get(name) {
            Some(color) => color.to_string(),
            None => FALLBACK_PALETTE[trace_index % FALLBACK_PALETTE.len()].to_string(),
        }
    }
}

/// Parse a CSS color (`#rrggbb`, `#rgb` or a known name) into an RGB value
pub fn parse_css_color(value: &str) -> Option<RGBColor> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        return match hex.len() {
            6 => Some(RGBColor(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            3 => {
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Some(RGBColor(r * 17, g * 17, b * 17))
            }
            _ => None,
        };
    }

    NAMED_COLORS.get(value.to_lowercase().as_str()).copied()
}
