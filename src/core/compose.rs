use crate::domain::model::{BlendMode, DiscHandle, DiscLayout, DiscSpec};
use crate::domain::ports::Renderer;
use crate::utils::error::Result;

/// The two discs of one drawing, ready for a renderer. `inner.parent` is
/// filled in by [`draw_discs`] once the outer disc has a handle.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscPair {
    pub outer: DiscSpec,
    pub inner: DiscSpec,
}

/// Turn a layout into drawable discs with a soft terminator of width `blur`.
///
/// The inner disc shrinks by `blur` and its edge is feathered outwards by the
/// same amount, so the blurred silhouette stays centred on the computed
/// terminator.
pub fn compose_discs(layout: &DiscLayout, blur: f64) -> DiscPair {
    let blur = blur.max(0.0);
    let outer_diameter = layout.outer.diameter;

    let blurred_diameter = (layout.inner.diameter - blur).max(0.0);
    let blurred_offset = layout.inner.offset + blur / 2.0;

    DiscPair {
        outer: DiscSpec {
            parent: None,
            diameter: outer_diameter,
            left: 0.0,
            top: 0.0,
            colour: layout.outer.colour.clone(),
            opacity: 1.0,
            blur: 0.0,
            blend: BlendMode::Multiply,
        },
        inner: DiscSpec {
            parent: None,
            diameter: blurred_diameter,
            left: blurred_offset,
            top: (outer_diameter - blurred_diameter) / 2.0,
            colour: layout.inner.colour.clone(),
            opacity: layout.inner.opacity,
            blur,
            blend: BlendMode::Normal,
        },
    }
}

/// Draw the outer disc and then the inner disc clipped to it.
pub fn draw_discs<R: Renderer>(
    renderer: &mut R,
    pair: &DiscPair,
) -> Result<(DiscHandle, DiscHandle)> {
    let outer = renderer.draw_disc(&pair.outer)?;
    let inner_spec = DiscSpec {
        parent: Some(outer),
        ..pair.inner.clone()
    };
    let inner = renderer.draw_disc(&inner_spec)?;
    tracing::debug!("Drew outer disc {:?} and inner disc {:?}", outer, inner);
    Ok((outer, inner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{InnerDisc, OuterDisc};

    fn layout() -> DiscLayout {
        DiscLayout {
            outer: OuterDisc {
                diameter: 500.0,
                colour: "white".to_string(),
            },
            inner: InnerDisc {
                diameter: 625.0,
                offset: 125.0,
                colour: "black".to_string(),
                opacity: 0.9,
            },
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        specs: Vec<DiscSpec>,
    }

    impl Renderer for RecordingRenderer {
        type Output = Vec<DiscSpec>;

        fn draw_disc(&mut self, spec: &DiscSpec) -> Result<DiscHandle> {
            self.specs.push(spec.clone());
            Ok(DiscHandle(self.specs.len() - 1))
        }

        fn finish(&mut self) -> Result<Self::Output> {
            Ok(std::mem::take(&mut self.specs))
        }
    }

    #[test]
    fn test_blur_shrinks_and_recentres_inner_disc() {
        let pair = compose_discs(&layout(), 40.0);
        assert_eq!(pair.inner.diameter, 585.0);
        assert_eq!(pair.inner.left, 145.0);
        assert_eq!(pair.inner.top, -42.5);
        assert_eq!(pair.inner.blur, 40.0);
        assert_eq!(pair.inner.opacity, 0.9);
        assert_eq!(pair.outer.blend, BlendMode::Multiply);
        // Same centre as the unblurred disc.
        assert_eq!(pair.inner.centre().0, 125.0 + 625.0 / 2.0);
    }

    #[test]
    fn test_zero_blur_keeps_geometry() {
        let pair = compose_discs(&layout(), 0.0);
        assert_eq!(pair.inner.diameter, 625.0);
        assert_eq!(pair.inner.left, 125.0);
        assert_eq!(pair.inner.top, -62.5);
    }

    #[test]
    fn test_oversized_blur_never_goes_negative() {
        let pair = compose_discs(&layout(), 1000.0);
        assert_eq!(pair.inner.diameter, 0.0);
        assert_eq!(pair.inner.top, 250.0);
    }

    #[test]
    fn test_inner_disc_is_parented_to_outer() {
        let mut renderer = RecordingRenderer::default();
        let pair = compose_discs(&layout(), 10.0);
        let (outer, inner) = draw_discs(&mut renderer, &pair).unwrap();
        let specs = renderer.finish().unwrap();
        assert_eq!(outer.index(), 0);
        assert_eq!(inner.index(), 1);
        assert_eq!(specs[0].parent, None);
        assert_eq!(specs[1].parent, Some(outer));
    }
}
