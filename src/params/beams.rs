//! Beam geometry, animation and shading parameters.

use std::fmt;
use std::str::FromStr;

use crate::error::{BeamsError, Result};

/// Strip layout for the geometry builder
#[derive(Debug, Clone, PartialEq)]
pub struct StripLayout {
    /// Number of vertical strips (>= 1)
    pub count: usize,

    /// Width of each strip in world units
    pub width: f32,

    /// Height of each strip in world units
    pub height: f32,

    /// Horizontal gap between neighbouring strips in world units
    pub spacing: f32,

    /// Vertical subdivisions per strip (>= 1, e.g., 100 = 101 vertex rows)
    pub segments: usize,
}

impl Default for StripLayout {
    fn default() -> Self {
        Self {
            count: 12,
            width: 2.0,
            height: 15.0,
            spacing: 0.0,
            segments: 100,
        }
    }
}

impl StripLayout {
    /// Reject layouts the builder cannot turn into a mesh. Nothing is clamped.
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(BeamsError::InvalidStripCount(self.count));
        }
        if self.segments == 0 {
            return Err(BeamsError::InvalidSegmentCount(self.segments));
        }
        positive("strip width", self.width)?;
        positive("strip height", self.height)?;
        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(BeamsError::InvalidDimension {
                name: "strip spacing",
                value: self.spacing,
            });
        }
        Ok(())
    }

    /// Total horizontal extent of all strips including gaps
    pub fn total_width(&self) -> f32 {
        self.count as f32 * self.width + self.count.saturating_sub(1) as f32 * self.spacing
    }
}

/// Linear RGB colour parsed from a CSS hex string
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl LightColor {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Build from 8-bit sRGB channels, converting to linear light
    pub fn from_srgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: srgb_to_linear(r),
            g: srgb_to_linear(g),
            b: srgb_to_linear(b),
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for LightColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for LightColor {
    type Err = BeamsError;

    /// Accepts `#rgb`, `#rrggbb`, or either form without the leading `#`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || BeamsError::InvalidColor(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let expand = |i: usize| channel(hex[i..i + 1].repeat(2).as_str());
                Ok(Self::from_srgb8(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::from_srgb8(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for LightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            linear_to_srgb(self.r),
            linear_to_srgb(self.g),
            linear_to_srgb(self.b)
        )
    }
}

fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> u8 {
    let c = c.clamp(0.0, 1.0);
    let s = if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    };
    (s * 255.0).round() as u8
}

/// Surface material for the beams (physically based, dark and glossy)
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialParams {
    /// Base colour (linear RGB); black so only highlights show
    pub diffuse: [f32; 3],

    /// Microfacet roughness (0 = mirror, 1 = matte)
    pub roughness: f32,

    /// Metalness (0 = dielectric, 1 = metal)
    pub metalness: f32,

    /// Ambient light intensity
    pub ambient_intensity: f32,

    /// Directional light intensity
    pub light_intensity: f32,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            diffuse: [0.0, 0.0, 0.0],
            roughness: 0.3,
            metalness: 0.3,
            ambient_intensity: 0.1,
            light_intensity: 2.0,
        }
    }
}

/// Complete construction parameters for the beams background
#[derive(Debug, Clone, PartialEq)]
pub struct BeamsConfig {
    /// Strip geometry
    pub layout: StripLayout,

    /// Directional light colour
    pub light_color: LightColor,

    /// Animation speed multiplier applied in the displacement program
    pub speed: f32,

    /// Strength of the fragment dither term
    pub noise_intensity: f32,

    /// Spatial scale of the displacement noise
    pub scale: f32,

    /// Rotation of the strip group about the view axis (degrees)
    pub rotation_degrees: f32,

    /// Seed for per-strip UV offsets; `None` draws from ambient entropy
    pub seed: Option<u64>,

    /// Surface material
    pub material: MaterialParams,
}

impl Default for BeamsConfig {
    fn default() -> Self {
        Self {
            layout: StripLayout::default(),
            light_color: LightColor::WHITE,
            speed: 2.0,
            noise_intensity: 1.75,
            scale: 0.2,
            rotation_degrees: 0.0,
            seed: None,
            material: MaterialParams::default(),
        }
    }
}

impl BeamsConfig {
    /// Validate layout and shading parameters
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        finite("speed", self.speed)?;
        finite("noise intensity", self.noise_intensity)?;
        finite("noise scale", self.scale)?;
        finite("rotation", self.rotation_degrees)?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(BeamsError::InvalidDimension { name, value })
    }
}

fn finite(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(BeamsError::InvalidDimension { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_valid() {
        assert!(StripLayout::default().validate().is_ok());
        assert!(BeamsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_layout_rejects_zero_counts() {
        let layout = StripLayout {
            count: 0,
            ..Default::default()
        };
        assert_eq!(layout.validate(), Err(BeamsError::InvalidStripCount(0)));

        let layout = StripLayout {
            segments: 0,
            ..Default::default()
        };
        assert_eq!(layout.validate(), Err(BeamsError::InvalidSegmentCount(0)));
    }

    #[test]
    fn test_layout_rejects_degenerate_dimensions() {
        for (width, height) in [(0.0, 15.0), (-1.0, 15.0), (2.0, f32::NAN), (2.0, 0.0)] {
            let layout = StripLayout {
                width,
                height,
                ..Default::default()
            };
            assert!(matches!(
                layout.validate(),
                Err(BeamsError::InvalidDimension { .. })
            ));
        }

        let layout = StripLayout {
            spacing: -0.5,
            ..Default::default()
        };
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_total_width() {
        let layout = StripLayout {
            count: 3,
            width: 2.0,
            spacing: 0.5,
            ..Default::default()
        };
        assert_eq!(layout.total_width(), 7.0);
    }

    fn assert_rgb(color: LightColor, expected: [f32; 3]) {
        for (got, want) in color.to_array().iter().zip(expected) {
            assert!((got - want).abs() < 1e-5, "{color:?} != {expected:?}");
        }
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_rgb("#ffffff".parse().unwrap(), [1.0, 1.0, 1.0]);
        assert_rgb("#fff".parse().unwrap(), [1.0, 1.0, 1.0]);
        assert_rgb("000000".parse().unwrap(), [0.0, 0.0, 0.0]);
        assert_rgb("#ff0000".parse().unwrap(), [1.0, 0.0, 0.0]);

        // sRGB mid-grey is darker in linear light
        let grey: LightColor = "#808080".parse().unwrap();
        assert!(grey.r > 0.2 && grey.r < 0.25);
    }

    #[test]
    fn test_parse_rejects_bad_colors() {
        for bad in ["", "#ff", "#gggggg", "#12345", "red"] {
            assert!(
                matches!(bad.parse::<LightColor>(), Err(BeamsError::InvalidColor(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_color_display_round_trips_srgb() {
        let color: LightColor = "#3366cc".parse().unwrap();
        assert_eq!(color.to_string(), "#3366cc");
    }

    #[test]
    fn test_config_rejects_non_finite_speed() {
        let config = BeamsConfig {
            speed: f32::INFINITY,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
