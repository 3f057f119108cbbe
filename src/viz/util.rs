//! Utility functions for visualization: series colors and color parsing.

use plotters::prelude::*;

use crate::models::ChartSpec;

/// Microsoft Office (2013+) chart series palette.
/// Order: Blue, Orange, Gray, Gold, Light Blue, Green, Dark Blue, Dark Orange, Dark Gray, Brownish Gold.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // blue      (#4472C4)
    RGBColor(237, 125, 49),  // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray      (#A5A5A5)
    RGBColor(255, 192, 0),   // gold      (#FFC000)
    RGBColor(91, 155, 213),  // light blue(#5B9BD5)
    RGBColor(112, 173, 71),  // green     (#70AD47)
    RGBColor(38, 68, 120),   // dark blue (#264478)
    RGBColor(158, 72, 14),   // dark org. (#9E480E)
    RGBColor(99, 99, 99),    // dark gray (#636363)
    RGBColor(153, 115, 0),   // brownish  (#997300)
];

/// Get a color from the Office palette.
#[inline]
pub fn office_color(idx: usize) -> RGBAColor {
    OFFICE10[idx % OFFICE10.len()].to_rgba()
}

/// Office palette entry as a `#rrggbb` string.
pub fn office_hex(idx: usize) -> String {
    let RGBColor(r, g, b) = OFFICE10[idx % OFFICE10.len()];
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Parse `#rrggbb` or `#rgb` (leading `#` optional).
pub fn parse_hex_color(s: &str) -> Option<RGBColor> {
    let hex = s.trim().trim_start_matches('#');
    let channel = |i: usize, len: usize| u8::from_str_radix(hex.get(i..i + len)?, 16).ok();
    match hex.len() {
        6 => Some(RGBColor(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
        3 => {
            let (r, g, b) = (channel(0, 1)?, channel(1, 1)?, channel(2, 1)?);
            Some(RGBColor(r * 17, g * 17, b * 17))
        }
        _ => None,
    }
}

/// Assigns colors to the categories of one chart spec in first-seen order.
///
/// A category listed in `colorDomain` at position `k` takes slot `k`; other
/// categories take the next slot no domain entry has claimed. Slots index into
/// `colorScale` when given, otherwise into the Office palette.
#[derive(Debug, Clone)]
pub struct SeriesPalette<'a> {
    domain: &'a [String],
    scale: Option<&'a [String]>,
    next_slot: usize,
}

impl<'a> SeriesPalette<'a> {
    pub fn for_spec(spec: &'a ChartSpec) -> Self {
        Self {
            domain: spec.color_domain.as_deref().unwrap_or(&[]),
            scale: spec.color_scale.as_deref().filter(|s| !s.is_empty()),
            next_slot: 0,
        }
    }

    pub fn color_for(&mut self, category: &str) -> String {
        if let Some(slot) = self.domain.iter().position(|d| d == category) {
            return self.slot_color(slot);
        }
        while self
            .domain
            .get(self.next_slot)
            .is_some_and(|d| !d.is_empty())
        {
            self.next_slot += 1;
        }
        let slot = self.next_slot;
        self.next_slot += 1;
        self.slot_color(slot)
    }

    fn slot_color(&self, slot: usize) -> String {
        match self.scale {
            Some(scale) => scale[slot % scale.len()].clone(),
            None => office_hex(slot),
        }
    }
}

/// Color of the single series of a chart without a color field.
pub fn fill_color(spec: &ChartSpec, chart_index: usize) -> String {
    spec.fill.clone().unwrap_or_else(|| office_hex(chart_index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(parse_hex_color("#4472c4"), Some(RGBColor(68, 114, 196)));
        assert_eq!(parse_hex_color("fff"), Some(RGBColor(255, 255, 255)));
        assert_eq!(parse_hex_color("#12"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn domain_reserves_slots() {
        let spec = ChartSpec::bar("torque")
            .with_color("EngineType")
            .with_color_domain(["", "", "piston"]);
        let mut palette = SeriesPalette::for_spec(&spec);
        // "rotary" appears first but must not steal slot 2 from "piston"
        assert_eq!(palette.color_for("rotary"), office_hex(0));
        assert_eq!(palette.color_for("piston"), office_hex(2));
        assert_eq!(palette.color_for("wankel"), office_hex(1));
        assert_eq!(palette.color_for("diesel"), office_hex(3));
    }

    #[test]
    fn color_scale_wraps() {
        let spec = ChartSpec::bar("y")
            .with_color("c")
            .with_color_scale(["#111111", "#222222"]);
        let mut palette = SeriesPalette::for_spec(&spec);
        assert_eq!(palette.color_for("a"), "#111111");
        assert_eq!(palette.color_for("b"), "#222222");
        assert_eq!(palette.color_for("c"), "#111111");
    }
}
