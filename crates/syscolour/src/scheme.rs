//! The OS colour scheme record.
//!
//! [`ColourScheme`] mirrors the OS colour catalogue one field per named
//! colour. Every colour is optional: `None` means the source did not report
//! it, never black. JSON property names are the catalogue's camelCase names
//! (`labelColor`, `systemRed`, ...) and colour values use the wire format
//! described in [`crate::colour`].
//!
//! ```rust
//! use syscolour::{Colour, ColourScheme};
//!
//! let scheme = ColourScheme::from_json(br#"{
//!     "labelColor": "rgba(0,0,0,216)",
//!     "linkColor": "nil",
//!     "_isDarkTheme": false
//! }"#).unwrap();
//!
//! assert_eq!(scheme.label_color, Some(Colour::rgba(0, 0, 0, 216)));
//! assert_eq!(scheme.link_color, None);
//! assert_eq!(scheme.dark_theme_flag(), Some(false));
//! ```

use serde::{Deserialize, Serialize};

use crate::colour::Colour;
use crate::error::SchemeError;

/// Knob colour used in dark mode.
pub const DARK_KNOB: Colour = Colour::from_rgb_hex(0x6b6b6b);
/// Selected knob colour used in dark mode.
pub const DARK_SELECTED_KNOB: Colour = Colour::from_rgb_hex(0x959595);
/// Scroll bar groove colour used in dark mode.
pub const DARK_SCROLL_BAR: Colour = Colour::from_rgb_hex(0x2b2b2b);

/// A snapshot of the OS appearance: named colours plus the dark/light flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColourScheme {
    /// Dark/light flag as reported. `None` until resolved.
    #[serde(rename = "_isDarkTheme", default)]
    pub dark_theme: Option<bool>,

    // Label colours
    /// Primary text labels.
    #[serde(default, with = "crate::wire::optional")]
    pub label_color: Option<Colour>,
    /// Secondary text labels, e.g. subtitles.
    #[serde(default, with = "crate::wire::optional")]
    pub secondary_label_color: Option<Colour>,
    /// Tertiary text labels, e.g. disabled text.
    #[serde(default, with = "crate::wire::optional")]
    pub tertiary_label_color: Option<Colour>,
    /// Quaternary text labels, e.g. watermarks.
    #[serde(default, with = "crate::wire::optional")]
    pub quaternary_label_color: Option<Colour>,

    // Text colours
    /// Body text.
    #[serde(default, with = "crate::wire::optional")]
    pub text_color: Option<Colour>,
    /// Placeholder text in controls and text views.
    #[serde(default, with = "crate::wire::optional")]
    pub placeholder_text_color: Option<Colour>,
    /// Selected text.
    #[serde(default, with = "crate::wire::optional")]
    pub selected_text_color: Option<Colour>,
    /// Background behind text.
    #[serde(default, with = "crate::wire::optional")]
    pub text_background_color: Option<Colour>,
    /// Background of selected text.
    #[serde(default, with = "crate::wire::optional")]
    pub selected_text_background_color: Option<Colour>,
    /// Keyboard focus ring around controls.
    #[serde(default, with = "crate::wire::optional")]
    pub keyboard_focus_indicator_color: Option<Colour>,
    /// Selected text in an unemphasized context.
    #[serde(default, with = "crate::wire::optional")]
    pub unemphasized_selected_text_color: Option<Colour>,
    /// Selected text background in an unemphasized context.
    #[serde(default, with = "crate::wire::optional")]
    pub unemphasized_selected_text_background_color: Option<Colour>,

    // Content colours
    /// Links.
    #[serde(default, with = "crate::wire::optional")]
    pub link_color: Option<Colour>,
    /// Separators between sections of content.
    #[serde(default, with = "crate::wire::optional")]
    pub separator_color: Option<Colour>,
    /// Background of selected, emphasized content.
    #[serde(default, with = "crate::wire::optional")]
    pub selected_content_background_color: Option<Colour>,
    /// Background of selected, unemphasized content.
    #[serde(default, with = "crate::wire::optional")]
    pub unemphasized_content_background_color: Option<Colour>,

    // Menu colours
    /// Text of the selected menu item.
    #[serde(default, with = "crate::wire::optional")]
    pub selected_menu_item_text_color: Option<Colour>,

    // Table colours
    /// Optional gridlines, e.g. in table views.
    #[serde(default, with = "crate::wire::optional")]
    pub grid_color: Option<Colour>,
    /// Text in table and outline header cells.
    #[serde(default, with = "crate::wire::optional")]
    pub header_text_color: Option<Colour>,
    /// Alternating row backgrounds. `None` when unreported, which is not the
    /// same as reported-but-empty.
    #[serde(
        default,
        with = "crate::wire::sequence",
        skip_serializing_if = "Option::is_none"
    )]
    pub alternating_content_background_colors: Option<Vec<Colour>>,

    // Control colours
    /// The user's accent colour preference.
    #[serde(default, with = "crate::wire::optional")]
    pub control_accent_color: Option<Colour>,
    /// Flat surfaces of a control.
    #[serde(default, with = "crate::wire::optional")]
    pub control_color: Option<Colour>,
    /// Background of large controls such as scroll or table views.
    #[serde(default, with = "crate::wire::optional")]
    pub control_background_color: Option<Colour>,
    /// Text on enabled controls.
    #[serde(default, with = "crate::wire::optional")]
    pub control_text_color: Option<Colour>,
    /// Text on disabled controls.
    #[serde(default, with = "crate::wire::optional")]
    pub disabled_control_text_color: Option<Colour>,
    /// System control tint, an enumeration value rather than a colour.
    #[serde(default, with = "crate::wire::tint")]
    pub current_control_tint: Option<i64>,
    /// Face of a selected (clicked or dragged) control.
    #[serde(default, with = "crate::wire::optional")]
    pub selected_control_color: Option<Colour>,
    /// Text in a selected control.
    #[serde(default, with = "crate::wire::optional")]
    pub selected_control_text_color: Option<Colour>,
    /// Text in a selected control, alternate variant.
    #[serde(default, with = "crate::wire::optional")]
    pub alternate_selected_control_text_color: Option<Colour>,
    /// Patterned background of a scrubber control.
    #[serde(default, with = "crate::wire::optional")]
    pub scrubber_textured_background: Option<Colour>,

    // Window colours
    /// Window background.
    #[serde(default, with = "crate::wire::optional")]
    pub window_background_color: Option<Colour>,
    /// Text in a window's frame.
    #[serde(default, with = "crate::wire::optional")]
    pub window_frame_text_color: Option<Colour>,
    /// Area beneath a window's views.
    #[serde(default, with = "crate::wire::optional")]
    pub under_page_background_color: Option<Colour>,

    // Highlights and shadows
    /// Bubble showing inline search results.
    #[serde(default, with = "crate::wire::optional")]
    pub find_highlight_color: Option<Colour>,
    /// Virtual light source on screen.
    #[serde(default, with = "crate::wire::optional")]
    pub highlight_color: Option<Colour>,
    /// Virtual shadows cast by raised objects.
    #[serde(default, with = "crate::wire::optional")]
    pub shadow_color: Option<Colour>,

    // Legacy slider colours, unreliable in dark mode (see `adjust_slider`)
    /// Flat surface of an unselected slider knob.
    #[serde(default, with = "crate::wire::optional")]
    pub knob_color: Option<Colour>,
    /// Slider knob while selected.
    #[serde(default, with = "crate::wire::optional")]
    pub selected_knob_color: Option<Colour>,
    /// Groove a scroller's knob moves in.
    #[serde(default, with = "crate::wire::optional")]
    pub scroll_bar_color: Option<Colour>,

    // Fixed system colours
    #[serde(default, with = "crate::wire::optional")]
    pub system_red: Option<Colour>,
    #[serde(default, with = "crate::wire::optional")]
    pub system_green: Option<Colour>,
    #[serde(default, with = "crate::wire::optional")]
    pub system_blue: Option<Colour>,
    #[serde(default, with = "crate::wire::optional")]
    pub system_orange: Option<Colour>,
    #[serde(default, with = "crate::wire::optional")]
    pub system_yellow: Option<Colour>,
    #[serde(default, with = "crate::wire::optional")]
    pub system_brown: Option<Colour>,
    #[serde(default, with = "crate::wire::optional")]
    pub system_pink: Option<Colour>,
    #[serde(default, with = "crate::wire::optional")]
    pub system_purple: Option<Colour>,
    #[serde(default, with = "crate::wire::optional")]
    pub system_gray: Option<Colour>,
}

impl ColourScheme {
    /// Parses a scheme document.
    ///
    /// Unknown properties are ignored and malformed colour values become
    /// `None`; only a document that is not a JSON object of the expected
    /// shape is an error.
    pub fn from_json(bytes: &[u8]) -> Result<Self, SchemeError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_json(&self) -> Result<String, SchemeError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SchemeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Whether the scheme is dark. An unresolved flag counts as light.
    pub fn is_dark_theme(&self) -> bool {
        self.dark_theme.unwrap_or(false)
    }

    /// The flag as reported, distinguishing unknown from light.
    pub fn dark_theme_flag(&self) -> Option<bool> {
        self.dark_theme
    }

    pub fn set_dark_theme(&mut self, dark: bool) {
        self.dark_theme = Some(dark);
    }

    /// First alternating row background, if any were reported.
    pub fn first_alternating_background(&self) -> Option<Colour> {
        self.alternating_content_background_colors
            .as_deref()
            .and_then(<[Colour]>::first)
            .copied()
    }

    /// Replaces the legacy slider colours with fixed values in dark mode.
    ///
    /// The OS reports light-mode values for knob, selected knob and scroll
    /// bar even when dark mode is on. Light schemes are left untouched.
    pub fn adjust_slider(&mut self) -> &mut Self {
        if self.is_dark_theme() {
            self.knob_color = Some(DARK_KNOB);
            self.selected_knob_color = Some(DARK_SELECTED_KNOB);
            self.scroll_bar_color = Some(DARK_SCROLL_BAR);
        }
        self
    }
}
