// Light and dark color schemes

use serde::Serialize;

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

const FULL_ALPHA: u8 = 255;
const TRANSPARENT_ALPHA: u8 = 0;

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            a: FULL_ALPHA,
        }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// `#rrggbbaa`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// Transparent white, used for unfilled graph rectangles.
pub const EMPTY_RECTANGLE: Rgba = Rgba::rgb(255, 255, 255).with_alpha(TRANSPARENT_ALPHA);

/// Named colors used by every panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScheme {
    pub cpu: Rgba,
    pub ram: Rgba,
    pub disk: Rgba,
    pub net: Rgba,
    pub text: Rgba,
    pub sub_text: Rgba,
    pub bg: Rgba,
    pub panel_bg: Rgba,
    pub grid: Rgba,
    pub highlight: Rgba,
    pub shadow: Rgba,
    pub success: Rgba,
    pub warning: Rgba,
    pub error: Rgba,
}

pub const LIGHT: ColorScheme = ColorScheme {
    cpu: Rgba::rgb(40, 180, 40),
    ram: Rgba::rgb(180, 40, 180),
    disk: Rgba::rgb(40, 180, 180),
    net: Rgba::rgb(180, 180, 40),
    text: Rgba::rgb(0, 0, 0),
    sub_text: Rgba::rgb(100, 100, 100),
    bg: Rgba::rgb(240, 240, 240),
    panel_bg: Rgba::rgb(230, 230, 230),
    grid: Rgba::rgb(200, 200, 200).with_alpha(TRANSPARENT_ALPHA),
    highlight: Rgba::rgb(220, 220, 220),
    shadow: Rgba::rgb(180, 180, 180),
    success: Rgba::rgb(40, 200, 40),
    warning: Rgba::rgb(200, 180, 40),
    error: Rgba::rgb(200, 40, 40),
};

pub const DARK: ColorScheme = ColorScheme {
    cpu: Rgba::rgb(40, 255, 40),
    ram: Rgba::rgb(255, 40, 255),
    disk: Rgba::rgb(40, 255, 255),
    net: Rgba::rgb(255, 255, 40),
    text: Rgba::rgb(255, 255, 255),
    sub_text: Rgba::rgb(200, 200, 200),
    bg: Rgba::rgb(0, 0, 0),
    panel_bg: Rgba::rgb(30, 30, 30),
    grid: Rgba::rgb(255, 255, 255).with_alpha(TRANSPARENT_ALPHA),
    highlight: Rgba::rgb(60, 60, 60),
    shadow: Rgba::rgb(20, 20, 20),
    success: Rgba::rgb(40, 220, 40),
    warning: Rgba::rgb(220, 200, 40),
    error: Rgba::rgb(220, 40, 40),
};

impl ColorScheme {
    /// Dark palette when `dark` is set, light otherwise.
    pub fn select(dark: bool) -> &'static ColorScheme {
        if dark { &DARK } else { &LIGHT }
    }
}

/// Current theme choice. Independent of the metrics snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Appearance {
    dark_mode: bool,
}

impl Appearance {
    pub fn new(dark_mode: bool) -> Self {
        Self { dark_mode }
    }

    pub fn is_dark(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark(&mut self, dark_mode: bool) {
        self.dark_mode = dark_mode;
    }

    /// Flips the mode and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    pub fn palette(&self) -> &'static ColorScheme {
        ColorScheme::select(self.dark_mode)
    }
}
