//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
//! Error type shared by every fallible operation of the crate.

use thiserror::Error;

/// Errors raised by layout resolution, style lookup, widget registries and draw batches.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GuiError {
    /// A border style name was not found in the style registry.
    #[error("unknown border style: {0}")]
    UnknownStyle(String),

    /// A layout anchor string was not one of the accepted values for its axis.
    #[error("invalid {axis} anchor: {value}")]
    InvalidAnchor {
        /// Axis the anchor was parsed for (`x` or `y`).
        axis: &'static str,
        /// The rejected anchor value.
        value: String,
    },

    /// Tiling was requested on an axis whose frame ratio has a non-positive component.
    #[error("frame ratio component must be positive when tiling along {axis}")]
    NonPositiveFrameRatio {
        /// Axis on which tiling was requested.
        axis: &'static str,
    },

    /// A style function produced a different number of quad colors than the shape consumes.
    #[error("style `{style}` produced {got} quad colors, shape requires {expected}")]
    ColorCountMismatch {
        /// Name of the offending style.
        style: String,
        /// Quad count required by the geometry shape.
        expected: usize,
        /// Quad count the style produced.
        got: usize,
    },

    /// Vertex data did not match the vertex count declared at allocation time.
    #[error("primitive expects {expected} vertices, got {got}")]
    VertexCountMismatch {
        /// Vertex count declared at allocation.
        expected: usize,
        /// Vertex count supplied with the update.
        got: usize,
    },

    /// The fixed-size parts of a framed image do not fit inside the widget.
    #[error("frame scale too large: corners need {needed:?} but widget is {available:?}")]
    ScaleTooLarge {
        /// Space taken by the fixed corners.
        needed: (f32, f32),
        /// Size of the widget.
        available: (f32, f32),
    },

    /// A geometry callback produced a non-finite value.
    #[error("invalid geometry for `{0}`: resolved to a non-finite value")]
    InvalidGeometry(String),

    /// No widget with the given name exists in the container or submenu.
    #[error("widget not found: {0}")]
    WidgetNotFound(String),

    /// A widget with the given name already exists in the container or submenu.
    #[error("duplicate widget name: {0}")]
    DuplicateName(String),

    /// No layer with the given name exists on the layered widget.
    #[error("layer not found: {0}")]
    LayerNotFound(String),

    /// A dynamic image layer was created without any image.
    #[error("dynamic image layer needs at least one image")]
    EmptyImageList,

    /// No submenu with the given name is registered on the menu.
    #[error("submenu not found: {0}")]
    SubmenuNotFound(String),

    /// The resource collaborator has no texture for the given name and category.
    #[error("texture not found: {category}/{name}")]
    TextureNotFound {
        /// Texture name.
        name: String,
        /// Texture category.
        category: String,
    },

    /// A dialog was entered while already active.
    #[error("double activation of `{0}`")]
    DoubleActivation(String),

    /// The active column spans of a responsive row exceed the grid units.
    #[error("row `{row}` overflows: spans add up to {used} of {units} units")]
    ColumnOverflow {
        /// Row name.
        row: String,
        /// Sum of the active spans.
        used: u32,
        /// Available grid units.
        units: u32,
    },

    /// Formatted label markup could not be parsed.
    #[error("markup error at byte {offset}: {reason}")]
    Markup {
        /// Byte offset in the source text.
        offset: usize,
        /// Description of the problem.
        reason: String,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GuiError>;
