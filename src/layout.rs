use crate::{
    color::Color,
    error::{Error, Result},
    style::{AttrValue, Style},
};

/// Corner rounding applied to swatch rectangles unless the caller overrides it.
pub const DEFAULT_CORNER_RADIUS: f64 = 2.0;

const LABEL_FONT_SIZE: &str = "5px";
const LABEL_FONT_FAMILY: &str = "sans-serif";

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// The edge of the page along which the swatches are strung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Top,
    Bottom,
    Left,
    Right,
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Top
    }
}

/// Options for laying out a palette as swatches.
///
/// `swatch_size`, `swatch_spacing` and `orientation` only apply to page-edge layouts; a selection
/// layout derives its swatch geometry from the selection box instead. `text_color` has to be set
/// whenever `show_hex_code` is.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutConfig {
    /// Edge length of each square swatch.
    pub swatch_size: f64,
    /// Gap between adjacent swatches.
    pub swatch_spacing: f64,
    pub orientation: Orientation,
    /// Attach the `#rrggbb` hex code of each color as a label on its swatch.
    pub show_hex_code: bool,
    pub text_color: Option<Color>,
    /// Corner rounding as an `(rx, ry)` pair; both use the same value unless set apart.
    pub corner_radius: (f64, f64),
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            swatch_size: 10.0,
            swatch_spacing: 2.0,
            orientation: Orientation::default(),
            show_hex_code: false,
            text_color: None,
            corner_radius: (DEFAULT_CORNER_RADIUS, DEFAULT_CORNER_RADIUS),
        }
    }
}

/// The area the swatch positions are expressed relative to. The variant also selects the layout
/// mode: swatches are strung along an edge of a [`Page`](ReferenceArea::Page), or stretched to
/// exactly span a [`Selection`](ReferenceArea::Selection) bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReferenceArea {
    /// A page-sized rectangle with its origin at (0, 0).
    Page { width: f64, height: f64 },
    /// An arbitrary axis-aligned bounding box.
    Selection { min: Point, max: Point },
}

/// A hex code label attached to a swatch, anchored at the swatch's horizontal center and top edge.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Label {
    pub text: String,
    pub color: Color,
    pub anchor: Point,
}

/// One positioned, sized and filled swatch rectangle, ready to be rendered by the host document.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swatch {
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    pub corner_radius: (f64, f64),
    pub label: Option<Label>,
}

impl Swatch {
    /// The swatch's fill as a serialized style, `fill:#rrggbb`.
    pub fn fill_style(&self) -> Style {
        Style::new().set("fill", self.fill.to_hex())
    }

    /// The swatch's geometry as render-ready attribute values.
    pub fn rect_attributes(&self) -> Vec<(&'static str, AttrValue)> {
        vec![
            ("x", self.position.x.into()),
            ("y", self.position.y.into()),
            ("width", self.width.into()),
            ("height", self.height.into()),
            ("rx", self.corner_radius.0.into()),
            ("ry", self.corner_radius.1.into()),
        ]
    }
}

impl Label {
    /// The fixed visual style of hex code labels, filled with the label's text color.
    pub fn font_style(&self) -> Style {
        Style::new()
            .set("fill", self.color.to_hex())
            .set("font-style", "normal")
            .set("font-weight", "normal")
            .set("font-size", LABEL_FONT_SIZE)
            .set("font-family", LABEL_FONT_FAMILY)
            .set("text-align", "center")
            .set("vertical-align", "top")
            .set("text-anchor", "middle")
    }

    /// The label's anchor as render-ready attribute values.
    pub fn position_attributes(&self) -> Vec<(&'static str, AttrValue)> {
        vec![("x", self.anchor.x.into()), ("y", self.anchor.y.into())]
    }
}

/// Lay an ordered palette out as a sequence of swatches relative to a reference area.
///
/// Layout either fully succeeds or fails before producing any swatch: a degenerate selection box
/// or an empty palette in selection mode is an [`Error::InvalidArea`], a non-positive swatch size
/// or a missing label color is an [`Error::InvalidConfiguration`].
pub fn layout(colors: &[Color], config: &LayoutConfig, area: &ReferenceArea) -> Result<Vec<Swatch>> {
    match *area {
        ReferenceArea::Page { width, height } => layout_along_edge(colors, config, width, height),
        ReferenceArea::Selection { min, max } => layout_into_selection(colors, config, min, max),
    }
}

fn layout_along_edge(colors: &[Color], config: &LayoutConfig, page_width: f64, page_height: f64) -> Result<Vec<Swatch>> {
    if config.swatch_size <= 0.0 {
        return Err(Error::InvalidConfiguration {
            reason: format!("swatch size has to be positive, got {}", config.swatch_size),
        });
    }

    let label_color = if config.show_hex_code {
        Some(config.text_color.ok_or_else(|| Error::InvalidConfiguration {
            reason: "a text color is required when hex code labels are enabled".to_string(),
        })?)
    } else {
        None
    };

    let size = config.swatch_size;
    let spacing = config.swatch_spacing;

    let mut swatches = Vec::with_capacity(colors.len());
    for (index, color) in colors.iter().enumerate() {
        let offset = index as f64 * (size + spacing);
        let position = match config.orientation {
            Orientation::Top => Point { x: offset, y: -size - spacing },
            Orientation::Bottom => Point {
                x: offset,
                y: page_height + spacing,
            },
            Orientation::Left => Point { x: -size - spacing, y: offset },
            Orientation::Right => Point {
                x: page_width + spacing,
                y: offset,
            },
        };

        let label = label_color.map(|text_color| Label {
            text: color.to_hex(),
            color: text_color,
            anchor: Point {
                x: position.x + size / 2.0,
                y: position.y,
            },
        });

        swatches.push(Swatch {
            position,
            width: size,
            height: size,
            fill: *color,
            corner_radius: config.corner_radius,
            label,
        });
    }

    Ok(swatches)
}

fn layout_into_selection(colors: &[Color], config: &LayoutConfig, min: Point, max: Point) -> Result<Vec<Swatch>> {
    let span_x = max.x - min.x;
    let span_y = max.y - min.y;

    if span_x <= 0.0 || span_y <= 0.0 {
        return Err(Error::InvalidArea {
            reason: format!("selection box has to have a positive extent, got {}x{}", span_x, span_y),
        });
    }

    if colors.is_empty() {
        return Err(Error::InvalidArea {
            reason: "an empty palette cannot be distributed across a selection".to_string(),
        });
    }

    // the swatches divide the selection's width evenly between them, with no gaps, and span its
    // full height
    let box_width = span_x / colors.len() as f64;

    Ok(colors
        .iter()
        .enumerate()
        .map(|(index, color)| Swatch {
            position: Point {
                x: min.x + index as f64 * box_width,
                y: min.y,
            },
            width: box_width,
            height: span_y,
            fill: *color,
            corner_radius: config.corner_radius,
            label: None,
        })
        .collect())
}
