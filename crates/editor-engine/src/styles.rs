//! Style table and indicator appearance.
//!
//! Style ids stored per position index into a [`StyleTable`]. The table grows on demand:
//! touching a style id beyond its current size extends it with copies of the default style.

use serde::{Deserialize, Serialize};

/// Index of the style every other style is reset to.
pub const STYLE_DEFAULT: usize = 32;
/// Largest style id a position can carry.
pub const STYLE_MAX: usize = 255;
/// Size multiplier for fractional font sizes.
pub const SC_FONT_SIZE_MULTIPLIER: i32 = 100;
/// Normal font weight.
pub const SC_WEIGHT_NORMAL: i32 = 400;
/// Bold font weight.
pub const SC_WEIGHT_BOLD: i32 = 700;

/// Visual attributes of one style id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    /// Foreground colour as `0xBBGGRR`.
    pub fore: u32,
    /// Background colour as `0xBBGGRR`.
    pub back: u32,
    /// Font weight.
    pub weight: i32,
    /// Italic flag.
    pub italic: bool,
    /// Font size in hundredths of a point.
    pub size: i32,
    /// Font family name.
    pub font: String,
    /// Underline flag.
    pub underline: bool,
    /// Fill to end of line with the background colour.
    pub eol_filled: bool,
    /// Forced case (`0` mixed, `1` upper, `2` lower).
    pub case_force: i32,
    /// Character set id.
    pub character_set: i32,
    /// Rendered at all.
    pub visible: bool,
    /// Text in this style may be edited.
    pub changeable: bool,
    /// Acts as a clickable hotspot.
    pub hotspot: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fore: 0x000000,
            back: 0xFFFFFF,
            weight: SC_WEIGHT_NORMAL,
            italic: false,
            size: 10 * SC_FONT_SIZE_MULTIPLIER,
            font: "Menlo".to_string(),
            underline: false,
            eol_filled: false,
            case_force: 0,
            character_set: 0,
            visible: true,
            changeable: true,
            hotspot: false,
        }
    }
}

/// Growable table of styles.
#[derive(Debug, Clone)]
pub struct StyleTable {
    styles: Vec<Style>,
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            styles: vec![Style::default(); STYLE_DEFAULT + 8],
        }
    }
}

impl StyleTable {
    /// Create a table with the predefined styles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of allocated styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Returns `true` when no styles are allocated.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Grow the table so `index` exists. Ids past [`STYLE_MAX`] are refused.
    pub fn ensure(&mut self, index: usize) -> bool {
        if index > STYLE_MAX {
            return false;
        }
        if index >= self.styles.len() {
            let template = self.styles[STYLE_DEFAULT].clone();
            self.styles.resize(index + 1, template);
        }
        true
    }

    /// Style at `index`, growing the table first.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Style> {
        if self.ensure(index) {
            self.styles.get_mut(index)
        } else {
            None
        }
    }

    /// Style at `index` without growing.
    pub fn get(&self, index: usize) -> Option<&Style> {
        self.styles.get(index)
    }

    /// Copy the default style onto every style.
    pub fn clear_all(&mut self) {
        let template = self.styles[STYLE_DEFAULT].clone();
        for style in &mut self.styles {
            *style = template.clone();
        }
    }

    /// Reset the default style to built-in attributes.
    pub fn reset_default(&mut self) {
        self.styles[STYLE_DEFAULT] = Style::default();
    }
}

/// Plain underline indicator style.
pub const INDIC_PLAIN: i32 = 0;
/// Squiggly underline indicator style.
pub const INDIC_SQUIGGLE: i32 = 1;
/// Line of small T shapes.
pub const INDIC_TT: i32 = 2;
/// Rounded box indicator style.
pub const INDIC_ROUNDBOX: i32 = 7;

/// Appearance of one indicator channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorStyle {
    /// Drawing style (`INDIC_*`).
    pub style: i32,
    /// Colour as `0xBBGGRR`.
    pub fore: u32,
    /// Draw under the text.
    pub under: bool,
    /// Fill alpha.
    pub alpha: i32,
    /// Outline alpha.
    pub outline_alpha: i32,
}

impl IndicatorStyle {
    /// Default appearance of channel `index`.
    pub fn for_index(index: usize) -> Self {
        let (style, fore) = match index {
            0 => (INDIC_SQUIGGLE, 0x007F00),
            1 => (INDIC_TT, 0xFF0000),
            2 => (INDIC_PLAIN, 0x0000FF),
            _ => (INDIC_ROUNDBOX, 0x000000),
        };
        Self {
            style,
            fore,
            under: false,
            alpha: 30,
            outline_alpha: 50,
        }
    }
}
