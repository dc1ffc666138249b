/// Host capability reporting whether the OS prefers a dark appearance.
pub trait ThemeSource {
    fn prefers_dark(&self) -> bool;
}

impl<F: Fn() -> bool> ThemeSource for F {
    fn prefers_dark(&self) -> bool {
        self()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ThemeColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Colours used by the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub dark: bool,
    pub window_fill: ThemeColor,
    pub text: ThemeColor,
    pub muted_text: ThemeColor,
    pub tile_fill: ThemeColor,
    pub tile_hovered: ThemeColor,
    pub accent: ThemeColor,
}

impl Palette {
    pub const DARK: Palette = Palette {
        dark: true,
        window_fill: ThemeColor::rgb(30, 30, 30),
        text: ThemeColor::rgb(235, 235, 235),
        muted_text: ThemeColor::rgb(160, 160, 160),
        tile_fill: ThemeColor::rgb(45, 45, 48),
        tile_hovered: ThemeColor::rgb(62, 62, 66),
        accent: ThemeColor::rgb(125, 207, 255),
    };

    pub const LIGHT: Palette = Palette {
        dark: false,
        window_fill: ThemeColor::rgb(240, 240, 240),
        text: ThemeColor::rgb(20, 20, 20),
        muted_text: ThemeColor::rgb(90, 90, 90),
        tile_fill: ThemeColor::rgb(255, 255, 255),
        tile_hovered: ThemeColor::rgb(215, 230, 245),
        accent: ThemeColor::rgb(0, 102, 204),
    };

    pub fn for_mode(dark: bool) -> Self {
        if dark {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }

    pub fn detect(source: &impl ThemeSource) -> Self {
        Self::for_mode(source.prefers_dark())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_selects_palette() {
        assert_eq!(Palette::detect(&|| true), Palette::DARK);
        assert_eq!(Palette::detect(&|| false), Palette::LIGHT);
        assert!(Palette::for_mode(true).dark);
    }
}
