//! Sensor-axis and button function tables.
//!
//! Codes are stored on the wire as signed bytes. An inverted axis function
//! is the negation of its normal code, so `-3` is "V scroll (inverted)".
//! Codes outside these tables are legal on the wire and pass through the
//! codec untouched; [`describe_axis`] and [`describe_button`] label them as
//! unrecognized.

use serde::{Deserialize, Serialize};

/// What a sensor axis drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum AxisFunction {
    None = 0,
    CursorX = 1,
    CursorY = 2,
    VerticalScroll = 3,
    HorizontalScroll = 4,
    CursorXInverted = -1,
    CursorYInverted = -2,
    VerticalScrollInverted = -3,
    HorizontalScrollInverted = -4,
}

impl AxisFunction {
    /// All axis functions, in menu order.
    pub const ALL: &'static [AxisFunction] = &[
        AxisFunction::None,
        AxisFunction::CursorX,
        AxisFunction::CursorY,
        AxisFunction::VerticalScroll,
        AxisFunction::HorizontalScroll,
        AxisFunction::CursorXInverted,
        AxisFunction::CursorYInverted,
        AxisFunction::VerticalScrollInverted,
        AxisFunction::HorizontalScrollInverted,
    ];

    /// Look up a function from its wire code.
    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::CursorX),
            2 => Some(Self::CursorY),
            3 => Some(Self::VerticalScroll),
            4 => Some(Self::HorizontalScroll),
            -1 => Some(Self::CursorXInverted),
            -2 => Some(Self::CursorYInverted),
            -3 => Some(Self::VerticalScrollInverted),
            -4 => Some(Self::HorizontalScrollInverted),
            _ => None,
        }
    }

    /// Wire code.
    pub fn code(&self) -> i8 {
        *self as i8
    }

    pub fn is_inverted(&self) -> bool {
        self.code() < 0
    }

    /// The same function with the opposite direction. `None` stays `None`.
    pub fn inverted(&self) -> Self {
        // every non-zero code has a negated counterpart in the table
        Self::from_code(-self.code()).unwrap_or(Self::None)
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::CursorX => "Cursor X",
            Self::CursorY => "Cursor Y",
            Self::VerticalScroll => "V scroll",
            Self::HorizontalScroll => "H scroll",
            Self::CursorXInverted => "Cursor X (inverted)",
            Self::CursorYInverted => "Cursor Y (inverted)",
            Self::VerticalScrollInverted => "V scroll (inverted)",
            Self::HorizontalScrollInverted => "H scroll (inverted)",
        }
    }

    /// Parse an axis function from a CLI-friendly string.
    ///
    /// Accepts (case-insensitive) "none", "cursor-x", "cursor-y", "v-scroll",
    /// "h-scroll", each optionally suffixed with "-inverted" or "-inv".
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();
        let (base, inverted) = match lower
            .strip_suffix("-inverted")
            .or_else(|| lower.strip_suffix("-inv"))
        {
            Some(base) => (base, true),
            None => (lower.as_str(), false),
        };
        let function = match base {
            "none" | "off" | "disabled" => Self::None,
            "cursor-x" | "x" => Self::CursorX,
            "cursor-y" | "y" => Self::CursorY,
            "v-scroll" | "vscroll" | "vertical-scroll" => Self::VerticalScroll,
            "h-scroll" | "hscroll" | "horizontal-scroll" => Self::HorizontalScroll,
            _ => return None,
        };
        match (inverted, function) {
            (true, Self::None) => None,
            (true, f) => Some(f.inverted()),
            (false, f) => Some(f),
        }
    }
}

impl std::fmt::Display for AxisFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What a physical button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum ButtonFunction {
    None = 0,
    Button1 = 1,
    Button2 = 2,
    Button3 = 3,
    Button4 = 4,
    Button5 = 5,
    Button6 = 6,
    Button7 = 7,
    Button8 = 8,
    ClickDrag = 9,
    Shift = 10,
}

impl ButtonFunction {
    /// All button functions, in menu order.
    pub const ALL: &'static [ButtonFunction] = &[
        ButtonFunction::None,
        ButtonFunction::Button1,
        ButtonFunction::Button2,
        ButtonFunction::Button3,
        ButtonFunction::Button4,
        ButtonFunction::Button5,
        ButtonFunction::Button6,
        ButtonFunction::Button7,
        ButtonFunction::Button8,
        ButtonFunction::ClickDrag,
        ButtonFunction::Shift,
    ];

    /// Look up a function from its wire code.
    pub fn from_code(code: i8) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.code() == code)
    }

    /// Wire code.
    pub fn code(&self) -> i8 {
        *self as i8
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Button1 => "Button 1 (left)",
            Self::Button2 => "Button 2 (right)",
            Self::Button3 => "Button 3 (middle)",
            Self::Button4 => "Button 4 (back)",
            Self::Button5 => "Button 5 (forward)",
            Self::Button6 => "Button 6",
            Self::Button7 => "Button 7",
            Self::Button8 => "Button 8",
            Self::ClickDrag => "Click-drag",
            Self::Shift => "Shift",
        }
    }

    /// Parse a button function from a CLI-friendly string.
    ///
    /// Accepts (case-insensitive):
    /// - "none", "disabled" → None
    /// - "button1".."button8", "left", "right", "middle", "back", "forward"
    /// - "click-drag", "drag" → ClickDrag
    /// - "shift" → Shift
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "none" | "disabled" => Some(Self::None),
            "button1" | "button-1" | "left" => Some(Self::Button1),
            "button2" | "button-2" | "right" => Some(Self::Button2),
            "button3" | "button-3" | "middle" => Some(Self::Button3),
            "button4" | "button-4" | "back" => Some(Self::Button4),
            "button5" | "button-5" | "forward" => Some(Self::Button5),
            "button6" | "button-6" => Some(Self::Button6),
            "button7" | "button-7" => Some(Self::Button7),
            "button8" | "button-8" => Some(Self::Button8),
            "click-drag" | "clickdrag" | "drag" => Some(Self::ClickDrag),
            "shift" => Some(Self::Shift),
            _ => None,
        }
    }
}

impl std::fmt::Display for ButtonFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Label for a raw axis code, including codes the table does not know.
pub fn describe_axis(code: i8) -> String {
    match AxisFunction::from_code(code) {
        Some(function) => function.label().to_string(),
        None => format!("Unrecognized ({code})"),
    }
}

/// Label for a raw button code, including codes the table does not know.
pub fn describe_button(code: i8) -> String {
    match ButtonFunction::from_code(code) {
        Some(function) => function.label().to_string(),
        None => format!("Unrecognized ({code})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_code_roundtrip() {
        for function in AxisFunction::ALL {
            assert_eq!(AxisFunction::from_code(function.code()), Some(*function));
        }
    }

    #[test]
    fn axis_inverted_is_negated_code() {
        assert_eq!(AxisFunction::CursorX.inverted(), AxisFunction::CursorXInverted);
        assert_eq!(
            AxisFunction::VerticalScrollInverted.inverted(),
            AxisFunction::VerticalScroll
        );
        assert_eq!(AxisFunction::None.inverted(), AxisFunction::None);
        for function in AxisFunction::ALL {
            assert_eq!(function.inverted().code(), -function.code());
        }
    }

    #[test]
    fn axis_rejects_unknown_codes() {
        assert_eq!(AxisFunction::from_code(5), None);
        assert_eq!(AxisFunction::from_code(-5), None);
        assert_eq!(AxisFunction::from_code(99), None);
        assert_eq!(AxisFunction::from_code(i8::MIN), None);
    }

    #[test]
    fn axis_from_name_accepts_variants() {
        assert_eq!(AxisFunction::from_name("cursor-x"), Some(AxisFunction::CursorX));
        assert_eq!(AxisFunction::from_name("Cursor-Y"), Some(AxisFunction::CursorY));
        assert_eq!(
            AxisFunction::from_name("v-scroll-inverted"),
            Some(AxisFunction::VerticalScrollInverted)
        );
        assert_eq!(
            AxisFunction::from_name("h-scroll-inv"),
            Some(AxisFunction::HorizontalScrollInverted)
        );
        assert_eq!(AxisFunction::from_name("none"), Some(AxisFunction::None));
    }

    #[test]
    fn axis_from_name_rejects_unknown() {
        assert_eq!(AxisFunction::from_name("none-inverted"), None);
        assert_eq!(AxisFunction::from_name("zoom"), None);
        assert_eq!(AxisFunction::from_name(""), None);
    }

    #[test]
    fn button_code_roundtrip() {
        for function in ButtonFunction::ALL {
            assert_eq!(ButtonFunction::from_code(function.code()), Some(*function));
        }
        assert_eq!(ButtonFunction::ALL.len(), 11);
    }

    #[test]
    fn button_rejects_unknown_codes() {
        assert_eq!(ButtonFunction::from_code(11), None);
        assert_eq!(ButtonFunction::from_code(-1), None);
    }

    #[test]
    fn button_from_name_accepts_variants() {
        assert_eq!(ButtonFunction::from_name("left"), Some(ButtonFunction::Button1));
        assert_eq!(ButtonFunction::from_name("BUTTON8"), Some(ButtonFunction::Button8));
        assert_eq!(
            ButtonFunction::from_name("click-drag"),
            Some(ButtonFunction::ClickDrag)
        );
        assert_eq!(ButtonFunction::from_name("shift"), Some(ButtonFunction::Shift));
        assert_eq!(ButtonFunction::from_name("macro1"), None);
    }

    #[test]
    fn labels_non_empty() {
        for function in AxisFunction::ALL {
            assert!(!function.label().is_empty());
        }
        for function in ButtonFunction::ALL {
            assert!(!function.label().is_empty());
        }
    }

    #[test]
    fn describe_flags_unrecognized_codes() {
        assert_eq!(describe_axis(-2), "Cursor Y (inverted)");
        assert_eq!(describe_axis(99), "Unrecognized (99)");
        assert_eq!(describe_button(9), "Click-drag");
        assert_eq!(describe_button(-7), "Unrecognized (-7)");
    }
}
