//! Visual appearance of an interstitial.
//!
//! A pure value object: the manager keeps a global default and `show` may
//! override it per call. Rendering itself is the host renderer's job.

use serde::{Deserialize, Serialize};

/// RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgba_unchecked(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba_unchecked(1.0, 1.0, 1.0, 1.0);

    /// Creates a color, clamping each component into `0.0..=1.0`.
    pub fn rgba(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red: clamp_unit(red),
            green: clamp_unit(green),
            blue: clamp_unit(blue),
            alpha: clamp_unit(alpha),
        }
    }

    const fn rgba_unchecked(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Returns the same color with a different alpha.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: clamp_unit(alpha),
            ..self
        }
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Animation used when showing and hiding the interstitial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationKind {
    /// Zoom in/out from/to the center of the screen.
    #[default]
    Zoom,
    /// Slide in/out from/to the bottom of the screen.
    Slide,
    /// Perspective animation from the left / to the right.
    Perspective,
}

/// Visual appearance handed to the renderer along with the ad.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    /// Overlay behind the interstitial. Default: black, 60% alpha.
    pub background_color: Color,
    /// Border thickness in points. Default: 5.
    pub border_width: f32,
    /// Default: black.
    pub border_color: Color,
    /// Close button circle. Default: black, 90% alpha.
    pub close_button_fill_color: Color,
    /// Close button cross. Default: white.
    pub close_button_foreground_color: Color,
    pub animation: AnimationKind,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            background_color: Color::BLACK.with_alpha(0.6),
            border_width: 5.0,
            border_color: Color::BLACK,
            close_button_fill_color: Color::BLACK.with_alpha(0.9),
            close_button_foreground_color: Color::WHITE,
            animation: AnimationKind::Zoom,
        }
    }
}

impl Appearance {
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Sets the border width; negative values become zero.
    pub fn with_border_width(mut self, width: f32) -> Self {
        self.border_width = if width.is_nan() { 0.0 } else { width.max(0.0) };
        self
    }

    pub fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    pub fn with_close_button_fill_color(mut self, color: Color) -> Self {
        self.close_button_fill_color = color;
        self
    }

    pub fn with_close_button_foreground_color(mut self, color: Color) -> Self {
        self.close_button_foreground_color = color;
        self
    }

    pub fn with_animation(mut self, animation: AnimationKind) -> Self {
        self.animation = animation;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_look() {
        let appearance = Appearance::default();
        assert_eq!(appearance.border_width, 5.0);
        assert_eq!(appearance.border_color, Color::BLACK);
        assert_eq!(appearance.background_color.alpha, 0.6);
        assert_eq!(appearance.close_button_fill_color.alpha, 0.9);
        assert_eq!(appearance.close_button_foreground_color, Color::WHITE);
        assert_eq!(appearance.animation, AnimationKind::Zoom);
    }

    #[test]
    fn color_components_are_clamped() {
        let color = Color::rgba(1.5, -0.2, 0.5, f32::NAN);
        assert_eq!(color, Color::rgba(1.0, 0.0, 0.5, 0.0));
    }

    #[test]
    fn negative_border_width_becomes_zero() {
        let appearance = Appearance::default().with_border_width(-3.0);
        assert_eq!(appearance.border_width, 0.0);
    }

    #[test]
    fn builder_overrides_single_fields() {
        let red = Color::rgba(1.0, 0.0, 0.0, 1.0);
        let appearance = Appearance::default()
            .with_border_color(red)
            .with_animation(AnimationKind::Slide);

        assert_eq!(appearance.border_color, red);
        assert_eq!(appearance.animation, AnimationKind::Slide);
        assert_eq!(appearance.border_width, 5.0);
    }

    #[test]
    fn animation_deserializes_from_snake_case() {
        let kind: AnimationKind = serde_json::from_str("\"perspective\"").unwrap();
        assert_eq!(kind, AnimationKind::Perspective);
    }
}
