//! Material binding for the garment preview
//!
//! Shading parameters are orthogonal to the simulated mesh: binding a
//! material never reads or writes vertex data.

use crate::error::{PreviewError, PreviewResult};
use crate::resources::TextureData;
use bytemuck::{Pod, Zeroable};
use glam::Vec4;
use std::path::PathBuf;

/// Linear RGBA color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the `#` is optional)
    pub fn from_hex(hex: &str) -> PreviewResult<Self> {
        let invalid = || PreviewError::InvalidColor(hex.to_string());
        let digits = hex.trim().trim_start_matches('#');
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        let short = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);

        let (r, g, b, a) = match digits.len() {
            3 => (short(0)?, short(1)?, short(2)?, 255),
            6 | 8 => (
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                if digits.len() == 8 { channel(&digits[6..8])? } else { 255 },
            ),
            _ => return Err(invalid()),
        };

        let mut color = Self::from_rgb8(r, g, b);
        color.a = a as f32 / 255.0;
        Ok(color)
    }

    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Material choice made by the catalog UI
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialSpec {
    pub color: Color,
    pub roughness: f32,
    pub metalness: f32,
    pub wireframe: bool,
    /// Optional fabric swatch, tinted by `color`
    pub texture: Option<PathBuf>,
}

impl Default for MaterialSpec {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            roughness: 0.8,
            metalness: 0.0,
            wireframe: false,
            texture: None,
        }
    }
}

impl MaterialSpec {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness;
        self
    }

    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }

    pub fn with_texture(mut self, path: impl Into<PathBuf>) -> Self {
        self.texture = Some(path.into());
        self
    }
}

/// Shading parameters consumed by the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub base_color: Vec4,
    pub roughness: f32,
    pub metalness: f32,
    pub wireframe: bool,
    /// `None` means flat `base_color` shading
    pub base_color_texture: Option<TextureData>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: Vec4::ONE,
            roughness: 0.8,
            metalness: 0.0,
            wireframe: false,
            base_color_texture: None,
        }
    }
}

impl Material {
    pub fn from_spec(spec: &MaterialSpec) -> Self {
        let mut material = Self::default();
        apply_material(&mut material, spec);
        material
    }

    pub fn is_textured(&self) -> bool {
        self.base_color_texture.is_some()
    }

    /// Completion hook for a texture load started elsewhere.
    ///
    /// Only swaps the texture slot. A failed load clears it, falling back to
    /// flat color shading.
    pub fn set_texture_result(&mut self, result: PreviewResult<TextureData>) {
        match result {
            Ok(texture) => {
                log::debug!(
                    "Bound texture '{}' ({}x{})",
                    texture.name,
                    texture.width,
                    texture.height
                );
                self.base_color_texture = Some(texture);
            }
            Err(err) => {
                log::warn!("{err}; falling back to flat color");
                self.base_color_texture = None;
            }
        }
    }

    /// Create a uniform data struct for GPU
    pub fn uniform_data(&self) -> MaterialUniformData {
        MaterialUniformData {
            base_color: self.base_color,
            params: [
                self.metalness,
                self.roughness,
                if self.wireframe { 1.0 } else { 0.0 },
                if self.is_textured() { 1.0 } else { 0.0 },
            ],
        }
    }
}

/// Material uniform data for GPU
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct MaterialUniformData {
    pub base_color: Vec4,
    pub params: [f32; 4], // x=metalness, y=roughness, z=wireframe, w=textured
}

fn unit_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        fallback
    }
}

/// Assign shading parameters from `spec` onto `material`.
///
/// A texture named by `spec` is loaded synchronously; a missing or
/// undecodable image degrades to the flat color with a warning.
pub fn apply_material(material: &mut Material, spec: &MaterialSpec) {
    material.base_color = spec.color.to_vec4();
    material.roughness = unit_or(spec.roughness, material.roughness);
    material.metalness = unit_or(spec.metalness, material.metalness);
    material.wireframe = spec.wireframe;

    match &spec.texture {
        Some(path) => material.set_texture_result(TextureData::from_file(path)),
        None => material.base_color_texture = None,
    }
}

/// Set the base color from a hex string, keeping the current color when the
/// string does not parse.
pub fn apply_color_hex(material: &mut Material, hex: &str) {
    match Color::from_hex(hex) {
        Ok(color) => material.base_color = color.to_vec4(),
        Err(err) => log::warn!("{err}; keeping current color"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(Color::from_hex("#ff0000").unwrap(), Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(Color::from_hex("00ff00").unwrap(), Color::rgb(0.0, 1.0, 0.0));
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::WHITE);

        let translucent = Color::from_hex("#0000ff80").unwrap();
        assert_eq!(translucent.b, 1.0);
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        for bad in ["", "#12", "#12345", "#gggggg", "#ééé", "red", "+f+f+f", "#-1-1-1"] {
            assert!(Color::from_hex(bad).is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_apply_material_sets_finish() {
        let spec = MaterialSpec::new(Color::rgb(0.2, 0.4, 0.6))
            .with_roughness(0.3)
            .with_metalness(0.1)
            .with_wireframe(true);

        let material = Material::from_spec(&spec);
        assert_eq!(material.base_color, Vec4::new(0.2, 0.4, 0.6, 1.0));
        assert_eq!(material.roughness, 0.3);
        assert_eq!(material.metalness, 0.1);
        assert!(material.wireframe);
        assert!(!material.is_textured());
    }

    #[test]
    fn test_finish_values_are_clamped() {
        let spec = MaterialSpec::default()
            .with_roughness(4.0)
            .with_metalness(f32::NAN);

        let material = Material::from_spec(&spec);
        assert_eq!(material.roughness, 1.0);
        assert_eq!(material.metalness, 0.0);
    }

    #[test]
    fn test_missing_texture_falls_back_to_flat_color() {
        let spec = MaterialSpec::new(Color::rgb(0.5, 0.5, 0.5)).with_texture("/missing/linen.jpg");

        let mut material = Material::default();
        material.base_color_texture = Some(TextureData::solid_color([0, 0, 0, 255], "stale"));
        apply_material(&mut material, &spec);

        assert!(!material.is_textured());
        assert_eq!(material.base_color, Vec4::new(0.5, 0.5, 0.5, 1.0));
    }

    #[test]
    fn test_texture_result_swaps_slot() {
        let mut material = Material::default();
        material.set_texture_result(Ok(TextureData::solid_color([1, 2, 3, 4], "swatch")));
        assert!(material.is_textured());
        assert_eq!(material.uniform_data().params[3], 1.0);

        material.set_texture_result(TextureData::from_bytes(b"nope", "broken"));
        assert!(!material.is_textured());
    }

    #[test]
    fn test_invalid_hex_keeps_color() {
        let mut material = Material::default();
        apply_color_hex(&mut material, "#336699");
        let before = material.base_color;
        apply_color_hex(&mut material, "not-a-color");
        assert_eq!(material.base_color, before);
    }
}
