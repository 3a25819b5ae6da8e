//! Data handed to a render front-end.
//!
//! The codec never draws anything. It supplies a position, a rotation in
//! degrees and a blend mode per node; a [`RenderBackend`] applies them.
//! [`draw_node`] fixes the order of state changes and guarantees the
//! backend state is restored after the node's render callback, whether the
//! callback returns an error or panics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Blend modes understood by display nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    #[default]
    Normal,
    Layer,
    Multiply,
    Screen,
    Lighten,
    Darken,
    Difference,
    Add,
    Subtract,
    Invert,
    Alpha,
    Erase,
    Overlay,
    Hardlight,
}

impl BlendMode {
    pub const ALL: [BlendMode; 14] = [
        Self::Normal,
        Self::Layer,
        Self::Multiply,
        Self::Screen,
        Self::Lighten,
        Self::Darken,
        Self::Difference,
        Self::Add,
        Self::Subtract,
        Self::Invert,
        Self::Alpha,
        Self::Erase,
        Self::Overlay,
        Self::Hardlight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Layer => "layer",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Lighten => "lighten",
            Self::Darken => "darken",
            Self::Difference => "difference",
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Invert => "invert",
            Self::Alpha => "alpha",
            Self::Erase => "erase",
            Self::Overlay => "overlay",
            Self::Hardlight => "hardlight",
        }
    }

    /// Additive blending needs special backend state.
    pub fn is_additive(self) -> bool {
        matches!(self, Self::Add)
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown blend mode: {0}")]
pub struct UnknownBlendMode(pub String);

impl FromStr for BlendMode {
    type Err = UnknownBlendMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| UnknownBlendMode(s.to_string()))
    }
}

/// Placement of one visual node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayNode {
    pub x: f64,
    pub y: f64,
    /// Clockwise rotation in degrees.
    pub rotation: f64,
    pub blend_mode: BlendMode,
}

impl DisplayNode {
    pub fn rotation_radians(&self) -> f32 {
        self.rotation.to_radians() as f32
    }
}

/// State operations a render front-end exposes to [`draw_node`].
pub trait RenderBackend {
    fn push_matrix(&mut self);
    fn pop_matrix(&mut self);
    /// Rotate around the z axis.
    fn rotate(&mut self, radians: f32);
    fn translate(&mut self, x: f64, y: f64);
    /// Enable one/one blending and disable depth testing.
    fn enable_additive_blend(&mut self);
    /// Undo [`enable_additive_blend`](Self::enable_additive_blend).
    fn disable_blend(&mut self);
}

/// Restores backend state when dropped.
struct DrawScope<'a, B: RenderBackend> {
    backend: &'a mut B,
    additive: bool,
}

impl<B: RenderBackend> Drop for DrawScope<'_, B> {
    fn drop(&mut self) {
        if self.additive {
            self.backend.disable_blend();
        }
        self.backend.pop_matrix();
    }
}

/// Apply `node`'s transform and blend state, then call `render`.
pub fn draw_node<B, E, F>(backend: &mut B, node: &DisplayNode, render: F) -> Result<(), E>
where
    B: RenderBackend,
    F: FnOnce(&mut B) -> Result<(), E>,
{
    backend.push_matrix();
    backend.rotate(node.rotation_radians());
    backend.translate(node.x, node.y);

    let additive = node.blend_mode.is_additive();
    if additive {
        backend.enable_additive_blend();
    }

    let scope = DrawScope { backend, additive };
    render(&mut *scope.backend)
}
