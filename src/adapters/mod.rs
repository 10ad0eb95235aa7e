// Adapters layer: concrete clocks, renderers and storage behind the domain ports.

pub mod clock;
pub mod raster;
pub mod storage;
pub mod svg;

use crate::domain::model::{DiscHandle, DiscSpec};
use crate::utils::error::{MoonError, Result};

/// Discs handed to a renderer, in draw order. Shared bookkeeping for the
/// renderers that lay everything out in `finish`.
#[derive(Debug, Clone, Default)]
pub(crate) struct DiscStack {
    discs: Vec<DiscSpec>,
}

impl DiscStack {
    /// Record a disc. Only one root disc is allowed, and children must hang
    /// directly off it.
    pub(crate) fn push(&mut self, spec: &DiscSpec) -> Result<DiscHandle> {
        match spec.parent {
            None if self.discs.iter().any(|d| d.parent.is_none()) => {
                return Err(MoonError::RenderError {
                    message: "a drawing has exactly one root disc".to_string(),
                });
            }
            Some(parent) => match self.discs.get(parent.index()) {
                Some(p) if p.parent.is_none() => {}
                _ => {
                    return Err(MoonError::RenderError {
                        message: format!("unknown or nested parent disc {}", parent.index()),
                    });
                }
            },
            None => {}
        }

        if !spec.diameter.is_finite() || spec.diameter < 0.0 {
            return Err(MoonError::RenderError {
                message: format!("disc diameter must be finite and >= 0, got {}", spec.diameter),
            });
        }

        self.discs.push(spec.clone());
        Ok(DiscHandle(self.discs.len() - 1))
    }

    pub(crate) fn root(&self) -> Result<&DiscSpec> {
        self.discs
            .iter()
            .find(|d| d.parent.is_none())
            .ok_or_else(|| MoonError::RenderError {
                message: "nothing to render: no root disc was drawn".to_string(),
            })
    }

    pub(crate) fn children(&self) -> impl Iterator<Item = &DiscSpec> {
        self.discs.iter().filter(|d| d.parent.is_some())
    }

    pub(crate) fn clear(&mut self) {
        self.discs.clear();
    }
}
