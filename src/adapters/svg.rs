use crate::adapters::DiscStack;
use crate::domain::model::{BlendMode, DiscHandle, DiscSpec};
use crate::domain::ports::Renderer;
use crate::utils::error::Result;

/// Renders discs as a standalone SVG document.
///
/// The root disc becomes the canvas and a clip path; children are clipped to
/// it. A child's soft edge is a halo circle, grown by the blur width and run
/// through `feGaussianBlur`, drawn beneath the crisp disc.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    stack: DiscStack,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for SvgRenderer {
    type Output = String;

    fn draw_disc(&mut self, spec: &DiscSpec) -> Result<DiscHandle> {
        self.stack.push(spec)
    }

    fn finish(&mut self) -> Result<String> {
        let root = self.stack.root()?;
        let size = root.diameter;
        let r = root.radius();

        let mut defs = format!(
            "    <clipPath id=\"moon-clip\"><circle cx=\"{}\" cy=\"{}\" r=\"{}\"/></clipPath>\n",
            num(r),
            num(r),
            num(r)
        );
        let mut body = format!(
            "  <g{}>\n    <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"{}/>\n    <g clip-path=\"url(#moon-clip)\">\n",
            blend_style(root.blend),
            num(r),
            num(r),
            num(r),
            escape_attr(&root.colour),
            opacity_attr(root.opacity)
        );

        for (i, child) in self.stack.children().enumerate() {
            let (cx, cy) = child.centre();
            body.push_str(&format!("      <g{}>\n", opacity_attr(child.opacity)));

            if child.blur > 0.0 {
                // Filter region in user space: the canvas plus room for the tails.
                let margin = child.blur * 1.5;
                defs.push_str(&format!(
                    "    <filter id=\"soft-edge-{}\" filterUnits=\"userSpaceOnUse\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"><feGaussianBlur stdDeviation=\"{}\"/></filter>\n",
                    i,
                    num(-margin),
                    num(-margin),
                    num(size + 2.0 * margin),
                    num(size + 2.0 * margin),
                    num(child.blur / 2.0)
                ));
                body.push_str(&format!(
                    "        <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" filter=\"url(#soft-edge-{})\"/>\n",
                    num(cx),
                    num(cy),
                    num(child.radius() + child.blur),
                    escape_attr(&child.colour),
                    i
                ));
            }

            body.push_str(&format!(
                "        <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"/>\n      </g>\n",
                num(cx),
                num(cy),
                num(child.radius()),
                escape_attr(&child.colour)
            ));
        }
        body.push_str("    </g>\n  </g>\n");

        let document = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">\n  <defs>\n{}  </defs>\n{}</svg>\n",
            num(size),
            num(size),
            num(size),
            num(size),
            defs,
            body
        );

        self.stack.clear();
        Ok(document)
    }
}

fn blend_style(blend: BlendMode) -> &'static str {
    match blend {
        BlendMode::Normal => "",
        BlendMode::Multiply => " style=\"mix-blend-mode:multiply\"",
    }
}

fn opacity_attr(opacity: f64) -> String {
    if opacity >= 1.0 {
        String::new()
    } else {
        format!(" opacity=\"{}\"", num(opacity.max(0.0)))
    }
}

/// Up to three decimals, without trailing zeros.
fn num(value: f64) -> String {
    let formatted = format!("{:.3}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
