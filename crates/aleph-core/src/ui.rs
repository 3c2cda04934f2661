//! Toolkit-independent widget state for the launcher window.
//!
//! The graphical shell forwards raw pointer events; these types hold the
//! resulting presentation state so none of it lives in toolkit callbacks.

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const MARATHON_GREEN: Rgb = Rgb(69, 199, 5);
pub const MARATHON_BLUE: Rgb = Rgb(6, 118, 230);
pub const MARATHON_YELLOW: Rgb = Rgb(227, 188, 0);
pub const MARATHON_GRAY: Rgb = Rgb(149, 149, 149);

/// A pointer event as delivered by whatever toolkit hosts the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Enter,
    Leave,
    /// Button pressed; coordinates are window-relative.
    Press { x: i32, y: i32 },
    /// Pointer moved while pressed; coordinates are screen-root.
    Move { x: i32, y: i32 },
    Release,
}

/// Hover accent for one launch button: the logo takes the button's accent
/// color while the pointer rests on it and reverts when it leaves.
#[derive(Debug, Clone, Copy)]
pub struct LogoHighlight {
    accent: Rgb,
    highlighted: bool,
}

impl LogoHighlight {
    pub fn new(accent: Rgb) -> Self {
        Self {
            accent,
            highlighted: false,
        }
    }

    /// Current logo color.
    pub fn color(&self) -> Rgb {
        if self.highlighted {
            self.accent
        } else {
            MARATHON_GREEN
        }
    }

    /// Feed one pointer event; true means the color changed and the logo
    /// needs a redraw.
    pub fn handle(&mut self, event: PointerEvent) -> bool {
        let before = self.color();
        match event {
            PointerEvent::Enter => self.highlighted = true,
            PointerEvent::Leave => self.highlighted = false,
            _ => {}
        }
        self.color() != before
    }
}

/// Drag-to-move state for the undecorated window: a press on the
/// background anchors the pointer, and every subsequent move yields the
/// new window origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowDrag {
    anchor: Option<(i32, i32)>,
}

impl WindowDrag {
    /// Feed one pointer event. Returns the new window origin while a drag
    /// is in progress.
    pub fn handle(&mut self, event: PointerEvent) -> Option<(i32, i32)> {
        match event {
            PointerEvent::Press { x, y } => {
                self.anchor = Some((x, y));
                None
            }
            PointerEvent::Move { x, y } => self.anchor.map(|(ax, ay)| (x - ax, y - ay)),
            PointerEvent::Release => {
                self.anchor = None;
                None
            }
            _ => None,
        }
    }

    pub fn dragging(&self) -> bool {
        self.anchor.is_some()
    }
}
