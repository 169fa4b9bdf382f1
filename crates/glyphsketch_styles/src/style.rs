//! Style identities and the index-to-generator mapping

use serde::{Deserialize, Serialize};

use crate::generators::{
    BoldBrush, DenseDiagonal, DiagonalLines, Dotted, HanddrawnOutline, Scribble, TrianglePattern,
    VerticalLines, Watercolor,
};
use crate::StyleGenerator;

/// A letter texture
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Style {
    DiagonalLines,
    VerticalLines,
    HanddrawnOutline,
    DenseDiagonal,
    Scribble,
    TrianglePattern,
    Watercolor,
    Dotted,
    BoldBrush,
}

impl Style {
    /// All styles, in style-index order
    pub const ALL: [Style; 9] = [
        Style::DiagonalLines,
        Style::VerticalLines,
        Style::HanddrawnOutline,
        Style::DenseDiagonal,
        Style::Scribble,
        Style::TrianglePattern,
        Style::Watercolor,
        Style::Dotted,
        Style::BoldBrush,
    ];

    pub fn from_index(index: u8) -> Option<Style> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Style::DiagonalLines => "Diagonal lines",
            Style::VerticalLines => "Vertical lines",
            Style::HanddrawnOutline => "Handdrawn outline",
            Style::DenseDiagonal => "Dense diagonal",
            Style::Scribble => "Scribble",
            Style::TrianglePattern => "Triangle pattern",
            Style::Watercolor => "Watercolor",
            Style::Dotted => "Dotted",
            Style::BoldBrush => "Bold brush",
        }
    }

    /// The generator that draws this style
    pub fn generator(self) -> &'static dyn StyleGenerator {
        match self {
            Style::DiagonalLines => &DiagonalLines,
            Style::VerticalLines => &VerticalLines,
            Style::HanddrawnOutline => &HanddrawnOutline,
            Style::DenseDiagonal => &DenseDiagonal,
            Style::Scribble => &Scribble,
            Style::TrianglePattern => &TrianglePattern,
            Style::Watercolor => &Watercolor,
            Style::Dotted => &Dotted,
            Style::BoldBrush => &BoldBrush,
        }
    }
}

/// Display name for a style index, "Unknown" when out of range
pub fn style_name(index: u8) -> &'static str {
    Style::from_index(index).map_or("Unknown", Style::name)
}

/// Which generator draws each style index
///
/// Index 3 is labelled "Dense diagonal" but drawn as a hand-drawn outline
/// unless `dense_diagonal_for_style3` is set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleMapping {
    pub dense_diagonal_for_style3: bool,
}

impl StyleMapping {
    /// Style actually drawn for a style index
    pub fn resolve(&self, index: u8) -> Option<Style> {
        match Style::from_index(index)? {
            Style::DenseDiagonal if !self.dense_diagonal_for_style3 => {
                Some(Style::HanddrawnOutline)
            }
            style => Some(style),
        }
    }
}
