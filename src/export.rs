//! Edit session and export artifacts.
//!
//! An [`EditSession`] is the value a UI keeps between user actions: the clean
//! cropped base, the chosen brightness, and optionally a garment overlay with
//! its placement. It is a plain value; every export recomputes from it.
//!
//! Two artifacts can be produced:
//! - a single photo at the base's resolution ([`EditSession::export_single`])
//! - a print sheet with several copies ([`EditSession::export_sheet`])

use crate::imaging::{
    Brightness, Composition, EncodedImage, EnhanceError, Enhancer, ImagingError, OverlayPlacement,
    Quality, Raster, SheetSpec, compose, encode, tile,
};
use thiserror::Error;
use tracing::{debug, info};

/// File name used for the single-photo export.
pub const SINGLE_FILE_NAME: &str = "photo-3x4-single.jpg";

/// File name used for a sheet export holding `copies` photos.
pub fn sheet_file_name(copies: u32) -> String {
    format!("photo-3x4-sheet-{copies}.jpg")
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Imaging(#[from] ImagingError),
    #[error(transparent)]
    Enhance(#[from] EnhanceError),
}

/// A garment overlay chosen by the user, with its current placement.
#[derive(Debug, Clone, PartialEq)]
pub struct ChosenOverlay {
    pub raster: Raster,
    pub placement: OverlayPlacement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    base: Raster,
    brightness: Brightness,
    overlay: Option<ChosenOverlay>,
}

impl EditSession {
    /// Start from a clean base: brightness 100%, no overlay.
    pub fn new(base: Raster) -> Self {
        Self {
            base,
            brightness: Brightness::default(),
            overlay: None,
        }
    }

    pub fn base(&self) -> &Raster {
        &self.base
    }

    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    pub fn overlay(&self) -> Option<&ChosenOverlay> {
        self.overlay.as_ref()
    }

    pub fn with_brightness(mut self, brightness: Brightness) -> Self {
        self.brightness = brightness;
        self
    }

    pub fn with_overlay(mut self, raster: Raster, placement: OverlayPlacement) -> Self {
        self.overlay = Some(ChosenOverlay { raster, placement });
        self
    }

    /// Move the current overlay. No-op when there is none.
    pub fn with_placement(mut self, placement: OverlayPlacement) -> Self {
        if let Some(chosen) = self.overlay.as_mut() {
            chosen.placement = placement;
        }
        self
    }

    pub fn without_overlay(mut self) -> Self {
        self.overlay = None;
        self
    }

    /// Swap the base for one with a plain white background.
    ///
    /// The overlay and brightness are kept. On failure the session is left
    /// untouched.
    pub fn replace_background(&mut self, enhancer: &impl Enhancer) -> Result<(), ExportError> {
        let replaced = enhancer.replace_background(&self.base)?;
        debug!(
            width = replaced.width(),
            height = replaced.height(),
            "Background replaced"
        );
        self.base = replaced;
        Ok(())
    }

    /// Swap the base for one where the subject wears `garment`.
    ///
    /// The garment is now part of the base, so any manual overlay is dropped.
    pub fn dress(&mut self, enhancer: &impl Enhancer, garment: &str) -> Result<(), ExportError> {
        let dressed = enhancer.dress(&self.base, garment)?;
        debug!(garment, "Garment rendered into base");
        self.base = dressed;
        self.overlay = None;
        Ok(())
    }

    fn composition(&self) -> Composition<'_> {
        match &self.overlay {
            Some(chosen) => Composition::Overlaid {
                overlay: &chosen.raster,
                placement: chosen.placement,
            },
            None => Composition::Plain,
        }
    }

    /// The merged photo: brightness applied to the base, overlay on top.
    pub fn final_photo(&self) -> Result<Raster, ImagingError> {
        compose(&self.base, self.brightness, &self.composition())
    }

    pub fn export_single(&self, quality: Quality) -> Result<EncodedImage, ExportError> {
        let photo = self.final_photo()?;
        let encoded = encode(&photo, quality)?;
        info!(
            width = encoded.width,
            height = encoded.height,
            bytes = encoded.bytes.len(),
            "Exported single photo"
        );
        Ok(encoded)
    }

    pub fn export_sheet(
        &self,
        spec: &SheetSpec,
        quality: Quality,
    ) -> Result<EncodedImage, ExportError> {
        let photo = self.final_photo()?;
        let sheet = tile(&photo, spec)?;
        let encoded = encode(&sheet, quality)?;
        info!(
            width = encoded.width,
            height = encoded.height,
            copies = spec.copies(),
            bytes = encoded.bytes.len(),
            "Exported sheet"
        );
        Ok(encoded)
    }
}
