//! Brand color lookup
//!
//! A static palette of brand color names and hex values with exact, partial
//! and exclusion lookup modes. Unknown names yield an empty/NA result rather
//! than an error.

use std::collections::BTreeMap;

/// A named brand color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrandColor {
    pub name: &'static str,
    pub hex: &'static str,
}

/// The brand palette, in presentation order
pub const PALETTE: &[BrandColor] = &[
    BrandColor { name: "red", hex: "#ee0000" },
    BrandColor { name: "dark red", hex: "#a30000" },
    BrandColor { name: "maroon", hex: "#6a0000" },
    BrandColor { name: "orange", hex: "#ec7a08" },
    BrandColor { name: "gold", hex: "#f0ab00" },
    BrandColor { name: "green", hex: "#3e8635" },
    BrandColor { name: "dark green", hex: "#1e4f18" },
    BrandColor { name: "teal", hex: "#009596" },
    BrandColor { name: "light blue", hex: "#73bcf7" },
    BrandColor { name: "blue", hex: "#0066cc" },
    BrandColor { name: "dark blue", hex: "#004080" },
    BrandColor { name: "purple", hex: "#5752d1" },
    BrandColor { name: "black", hex: "#151515" },
    BrandColor { name: "dark gray", hex: "#3c3f42" },
    BrandColor { name: "gray", hex: "#8a8d90" },
    BrandColor { name: "light gray", hex: "#d2d2d2" },
    BrandColor { name: "white", hex: "#ffffff" },
];

/// Exact lookup of a single name (case-insensitive)
pub fn lookup(name: &str) -> Option<&'static str> {
    let normalized = name.trim().to_lowercase();
    PALETTE
        .iter()
        .find(|color| color.name == normalized)
        .map(|color| color.hex)
}

/// Exact lookup of several names; unknown names map to None (NA)
pub fn exact(names: &[String]) -> BTreeMap<String, Option<&'static str>> {
    names
        .iter()
        .map(|name| (name.clone(), lookup(name)))
        .collect()
}

/// Colors whose name contains any of the given fragments (union)
pub fn matching(fragments: &[String]) -> Vec<BrandColor> {
    let normalized: Vec<String> = fragments
        .iter()
        .map(|f| f.trim().to_lowercase())
        .collect();
    PALETTE
        .iter()
        .filter(|color| normalized.iter().any(|f| color.name.contains(f.as_str())))
        .copied()
        .collect()
}

/// Every color except the named ones (complement)
pub fn excluding(names: &[String]) -> Vec<BrandColor> {
    let normalized: Vec<String> = names.iter().map(|n| n.trim().to_lowercase()).collect();
    PALETTE
        .iter()
        .filter(|color| !normalized.iter().any(|n| n == color.name))
        .copied()
        .collect()
}
