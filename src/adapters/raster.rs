use crate::adapters::DiscStack;
use crate::domain::colour::Colour;
use crate::domain::model::{BlendMode, DiscHandle, DiscSpec};
use crate::domain::ports::Renderer;
use crate::utils::error::{MoonError, Result};
use image::{imageops, ImageBuffer, ImageOutputFormat, Luma, Rgba, RgbaImage};
use std::io::Cursor;

/// Premultiplied RGBA.
type Premul = [f64; 4];

type AlphaMask = ImageBuffer<Luma<u16>, Vec<u16>>;

const MASK_MAX: f64 = u16::MAX as f64;

/// Largest canvas side, halo padding included, the renderer will allocate.
pub const MAX_DIMENSION: u32 = 4096;

/// Rasterises discs into an RGBA image the size of the root disc.
///
/// Children are clipped to the root disc. A child's soft edge is a halo grown
/// by the blur width and smoothed with a gaussian of sigma `blur / 2`. The
/// finished disc is blended onto `background` using the root's blend mode.
#[derive(Debug)]
pub struct RasterRenderer {
    stack: DiscStack,
    background: Colour,
}

impl Default for RasterRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterRenderer {
    pub fn new() -> Self {
        Self::with_background(Colour::TRANSPARENT)
    }

    pub fn with_background(background: Colour) -> Self {
        Self {
            stack: DiscStack::default(),
            background,
        }
    }

    fn compose(&self) -> Result<RgbaImage> {
        let root = self.stack.root()?;
        let size = checked_dimension(root.diameter.ceil().max(1.0), "diameter")?;
        let root_colour = Colour::parse(&root.colour)?;
        let r = root.radius();

        // Root disc doubles as the clip mask
        let clip: Vec<f64> = pixels(size)
            .map(|(x, y)| coverage(x, y, r, r, r))
            .collect();

        let root_alpha = root_colour.a * root.opacity.clamp(0.0, 1.0);
        let mut canvas: Vec<Premul> = clip
            .iter()
            .map(|&c| premultiply(root_colour, root_alpha * c))
            .collect();

        for child in self.stack.children() {
            let layer = paint_child(child, size)?;
            for ((dst, src), &c) in canvas.iter_mut().zip(layer).zip(&clip) {
                let src = src.map(|v| v * c);
                *dst = source_over(src, *dst);
            }
        }

        // Blend the finished disc onto the background
        let background = premultiply(self.background, self.background.a);
        let mut image = RgbaImage::new(size, size);
        for ((x, y), src) in pixels(size).zip(canvas) {
            let out = blend(root.blend, src, background);
            image.put_pixel(x, y, Rgba(unpremultiply(out).to_rgba8()));
        }
        Ok(image)
    }
}

impl Renderer for RasterRenderer {
    type Output = RgbaImage;

    fn draw_disc(&mut self, spec: &DiscSpec) -> Result<DiscHandle> {
        self.stack.push(spec)
    }

    fn finish(&mut self) -> Result<RgbaImage> {
        let image = self.compose()?;
        tracing::debug!("Rasterised {}x{} moon", image.width(), image.height());
        self.stack.clear();
        Ok(image)
    }
}

/// PNG bytes for a rendered image.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    image.write_to(&mut cursor, ImageOutputFormat::Png)?;
    Ok(cursor.into_inner())
}

/// Canvas side for `extent` pixels, or a `RenderError` past [`MAX_DIMENSION`].
fn checked_dimension(extent: f64, cause: &str) -> Result<u32> {
    if extent.is_finite() && extent <= f64::from(MAX_DIMENSION) {
        Ok(extent as u32)
    } else {
        Err(MoonError::RenderError {
            message: format!(
                "{} needs a {}px canvas, larger than the {}px limit",
                cause, extent, MAX_DIMENSION
            ),
        })
    }
}

fn pixels(size: u32) -> impl Iterator<Item = (u32, u32)> {
    (0..size).flat_map(move |y| (0..size).map(move |x| (x, y)))
}

/// Share of pixel (x, y) covered by the circle, with a one-pixel ramp.
fn coverage(x: u32, y: u32, cx: f64, cy: f64, r: f64) -> f64 {
    let dx = f64::from(x) + 0.5 - cx;
    let dy = f64::from(y) + 0.5 - cy;
    (r - (dx * dx + dy * dy).sqrt() + 0.5).clamp(0.0, 1.0)
}

fn paint_child(child: &DiscSpec, size: u32) -> Result<Vec<Premul>> {
    let colour = Colour::parse(&child.colour)?;
    let (cx, cy) = child.centre();
    let r = child.radius();
    let opacity = child.opacity.clamp(0.0, 1.0);

    let halo = if child.blur > 0.0 {
        Some(soft_halo(colour, cx, cy, r + child.blur, child.blur / 2.0, size)?)
    } else {
        None
    };

    let layer = pixels(size)
        .enumerate()
        .map(|(i, (x, y))| {
            let disc = coverage(x, y, cx, cy, r) * colour.a;
            let edge = halo.as_ref().map_or(0.0, |h| h[i]);
            let alpha = (disc + edge * (1.0 - disc)) * opacity;
            premultiply(colour, alpha)
        })
        .collect();
    Ok(layer)
}

/// Alpha of a blurred circle, sampled on the `size` x `size` canvas.
fn soft_halo(
    colour: Colour,
    cx: f64,
    cy: f64,
    r: f64,
    sigma: f64,
    size: u32,
) -> Result<Vec<f64>> {
    // Pad by three sigma so the canvas edge does not truncate the kernel.
    let padding = (sigma * 3.0).ceil();
    let dim = checked_dimension(f64::from(size) + 2.0 * padding, "blur")?;
    let margin = padding as u32;
    let offset = padding;

    let mask: AlphaMask = ImageBuffer::from_fn(dim, dim, |x, y| {
        let alpha = coverage(x, y, cx + offset, cy + offset, r) * colour.a;
        Luma([(alpha * MASK_MAX).round() as u16])
    });

    let blurred = imageops::blur(&mask, sigma as f32);
    Ok(pixels(size)
        .map(|(x, y)| {
            let value = blurred.get_pixel(x + margin, y + margin)[0];
            (f64::from(value) / MASK_MAX).clamp(0.0, 1.0)
        })
        .collect())
}

fn premultiply(colour: Colour, alpha: f64) -> Premul {
    [colour.r * alpha, colour.g * alpha, colour.b * alpha, alpha]
}

fn unpremultiply(p: Premul) -> Colour {
    if p[3] <= 0.0 {
        return Colour::TRANSPARENT;
    }
    Colour::rgba(p[0] / p[3], p[1] / p[3], p[2] / p[3], p[3])
}

fn source_over(src: Premul, dst: Premul) -> Premul {
    let k = 1.0 - src[3];
    [
        src[0] + dst[0] * k,
        src[1] + dst[1] * k,
        src[2] + dst[2] * k,
        src[3] + dst[3] * k,
    ]
}

/// Separable blend of `src` onto `backdrop`, both premultiplied.
fn blend(mode: BlendMode, src: Premul, backdrop: Premul) -> Premul {
    match mode {
        BlendMode::Normal => source_over(src, backdrop),
        BlendMode::Multiply => {
            let (sa, ba) = (src[3], backdrop[3]);
            let mut out = [0.0; 4];
            for c in 0..3 {
                out[c] = src[c] * (1.0 - ba) + backdrop[c] * (1.0 - sa) + src[c] * backdrop[c];
            }
            out[3] = sa + ba * (1.0 - sa);
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::config::{DrawConfig, DrawOptions};
    use crate::core::compose::{compose_discs, draw_discs};
    use crate::core::engine::MoonEngine;
    use crate::core::geometry::derive_disc_layout;
    use crate::core::phase::REFERENCE_NEW_MOON;
    use crate::domain::model::Orientation;

    fn config(blur: f64) -> DrawConfig {
        DrawConfig {
            diameter: 40.0,
            blur,
            ..DrawConfig::default()
        }
    }

    fn render(
        illumination: f64,
        orientation: Orientation,
        config: &DrawConfig,
        renderer: &mut RasterRenderer,
    ) -> RgbaImage {
        let layout = derive_disc_layout(illumination, orientation, config);
        draw_discs(renderer, &compose_discs(&layout, config.blur)).unwrap();
        renderer.finish().unwrap()
    }

    #[test]
    fn test_new_moon_is_shadowed() {
        let image = render(0.0, Orientation::Waxing, &config(0.0), &mut RasterRenderer::new());
        assert_eq!(image.dimensions(), (40, 40));
        // White under 80% black.
        assert_eq!(image.get_pixel(20, 20).0, [51, 51, 51, 255]);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_full_moon_is_lit() {
        let image = render(1.0, Orientation::Waning, &config(0.0), &mut RasterRenderer::new());
        assert_eq!(image.get_pixel(20, 20).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_first_quarter_lights_right_half() {
        let image = render(0.5, Orientation::Waxing, &config(0.0), &mut RasterRenderer::new());
        assert_eq!(image.get_pixel(30, 20).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(8, 20).0, [0, 0, 0, 204]);
    }

    #[test]
    fn test_last_quarter_lights_left_half() {
        let image = render(0.5, Orientation::Waning, &config(0.0), &mut RasterRenderer::new());
        assert_eq!(image.get_pixel(8, 20).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(30, 20).0, [0, 0, 0, 204]);
    }

    #[test]
    fn test_multiply_onto_white_background() {
        let mut renderer = RasterRenderer::with_background(Colour::WHITE);
        let image = render(0.5, Orientation::Waxing, &config(0.0), &mut renderer);
        assert_eq!(image.get_pixel(8, 20).0, [51, 51, 51, 255]);
        assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_blur_softens_terminator() {
        let image = render(0.5, Orientation::Waxing, &config(8.0), &mut RasterRenderer::new());
        let deep_shadow = image.get_pixel(4, 20).0;
        let near_terminator = image.get_pixel(18, 20).0;
        let lit = image.get_pixel(34, 20).0;
        assert!(near_terminator[0] > deep_shadow[0]);
        assert!(lit[0] >= near_terminator[0]);
        assert_eq!(lit, [255, 255, 255, 255]);
    }

    #[test]
    fn test_invalid_colour_is_reported() {
        let config = DrawConfig {
            light_color: "moonbeam".to_string(),
            ..config(0.0)
        };
        let layout = derive_disc_layout(0.2, Orientation::Waxing, &config);
        let mut renderer = RasterRenderer::new();
        draw_discs(&mut renderer, &compose_discs(&layout, 0.0)).unwrap();
        assert!(matches!(
            renderer.finish(),
            Err(MoonError::InvalidColour { .. })
        ));
    }

    fn render_options(options: DrawOptions) -> Result<RgbaImage> {
        let engine = MoonEngine::new(
            FixedClock::new(REFERENCE_NEW_MOON.offset_by(7 * 86_400)),
            options.apply_defaults(),
        );
        engine.run(&mut RasterRenderer::new()).map(|r| r.output)
    }

    #[test]
    fn test_oversized_blur_is_a_render_error() {
        let result = render_options(DrawOptions {
            diameter: Some(10.0),
            blur: Some(2e6),
            ..DrawOptions::default()
        });
        assert!(matches!(result, Err(MoonError::RenderError { .. })));
    }

    #[test]
    fn test_oversized_diameter_is_a_render_error() {
        let result = render_options(DrawOptions {
            diameter: Some(1e9),
            blur: Some(0.0),
            ..DrawOptions::default()
        });
        assert!(matches!(result, Err(MoonError::RenderError { .. })));
    }

    #[test]
    fn test_canvas_at_the_limit_is_accepted() {
        let limit = f64::from(MAX_DIMENSION);
        assert_eq!(checked_dimension(limit, "diameter").unwrap(), MAX_DIMENSION);
        assert!(checked_dimension(limit + 1.0, "diameter").is_err());
        assert!(checked_dimension(f64::INFINITY, "blur").is_err());
    }

    #[test]
    fn test_png_encoding() {
        let image = render(0.3, Orientation::Waning, &config(4.0), &mut RasterRenderer::new());
        let bytes = encode_png(&image).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
