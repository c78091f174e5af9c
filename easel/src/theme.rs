//! The contract between the painter and a native theme renderer.
//!
//! Theme parts are painted by an external collaborator into an offscreen
//! buffer, which the painter then composites. Only the part of the control
//! inside the dirty rectangle is ever rendered.

use crate::kurbo::Rect;

/// A themed control part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemePart {
    Checkbox,
    Radio,
    Button,
    ScrollbarUpArrow,
    ScrollbarDownArrow,
    ScrollbarLeftArrow,
    ScrollbarRightArrow,
    ScrollbarHorizontalThumb,
    ScrollbarVerticalThumb,
    ScrollbarHorizontalTrack,
    ScrollbarVerticalTrack,
    TabPanel,
    TabItem,
}

/// The interaction state of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControlState {
    Disabled,
    Hovered,
    #[default]
    Normal,
    Pressed,
}

/// Part-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeExtra {
    #[default]
    None,
    Button {
        checked: bool,
        indeterminate: bool,
        is_default: bool,
    },
    ScrollbarTrack {
        is_upper: bool,
    },
}

/// Paints theme parts into a backend buffer of type `B`.
pub trait ThemeRenderer<B: ?Sized> {
    /// Paint `part` so that its full extent is `rect`, in buffer pixels.
    ///
    /// `rect` may extend past the buffer; only the overlapping area is
    /// visible.
    fn paint(
        &self,
        part: ThemePart,
        buffer: &mut B,
        state: ControlState,
        rect: Rect,
        extra: &ThemeExtra,
    );
}
