//! Raster layers that symbology can be applied to.

use crate::error::Result;
use crate::shader::{RasterRange, Rgba, SingleBandPseudoColorRenderer};
use gdal::{Dataset, GeoTransform};
use ndarray::{Array2, Array3};
use std::{collections::BTreeMap, path::Path};
use tracing::debug;

/// A displayable raster layer owned by the host viewer.
pub trait RasterLayer {
    fn set_renderer(&mut self, renderer: SingleBandPseudoColorRenderer);

    /// Replaces the user no-data ranges of a 1-based band.
    fn set_user_no_data_value(&mut self, band: usize, ranges: Vec<RasterRange>);

    /// The layer's cached image, `None` when the layer keeps no such cache.
    fn image_cache(&mut self) -> Option<&mut dyn ImageCache> {
        None
    }

    fn trigger_repaint(&mut self);
}

/// A rendered image kept around by a layer between repaints.
pub trait ImageCache {
    fn clear_cache_image(&mut self);
}

/// [`RasterLayer`] backed by a GDAL dataset, rendering band values to RGBA.
pub struct GdalRasterLayer {
    dataset: Dataset,
    renderer: Option<SingleBandPseudoColorRenderer>,
    user_no_data: BTreeMap<usize, Vec<RasterRange>>,
    cache: Option<Array3<u8>>,
    repaints: usize,
}

impl GdalRasterLayer {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(Dataset::open(path.as_ref())?))
    }

    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            renderer: None,
            user_no_data: BTreeMap::new(),
            cache: None,
            repaints: 0,
        }
    }

    pub fn renderer(&self) -> Option<&SingleBandPseudoColorRenderer> {
        self.renderer.as_ref()
    }

    pub fn user_no_data_value(&self, band: usize) -> &[RasterRange] {
        self.user_no_data
            .get(&band)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn repaint_count(&self) -> usize {
        self.repaints
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    pub fn geo_transform(&self) -> Result<GeoTransform> {
        Ok(self.dataset.geo_transform()?)
    }

    pub fn projection(&self) -> String {
        self.dataset.projection()
    }

    /// RGBA image of the layer as (rows, cols, 4), rendered on first use and
    /// cached until the image cache is cleared.
    pub fn image(&mut self) -> Result<&Array3<u8>> {
        let image = match self.cache.take() {
            Some(image) => image,
            None => self.render()?,
        };
        Ok(self.cache.insert(image))
    }

    fn render(&self) -> Result<Array3<u8>> {
        let band_index = self.renderer.as_ref().map_or(1, |r| r.band());
        let band = self.dataset.rasterband(band_index as isize)?;
        let (cols, rows) = self.dataset.raster_size();
        let buffer = band.read_as::<f64>((0, 0), (cols, rows), (cols, rows), None)?;
        let values = Array2::from_shape_vec((rows, cols), buffer.data)?;

        let file_no_data = band.no_data_value();
        let user_no_data = self.user_no_data_value(band_index);
        debug!(
            "rendering band {} ({}x{}), nodata {:?}, user nodata {:?}",
            band_index, rows, cols, file_no_data, user_no_data
        );

        let mut image = Array3::<u8>::zeros((rows, cols, 4));
        for ((r, c), &value) in values.indexed_iter() {
            let hidden = file_no_data == Some(value)
                || user_no_data.iter().any(|range| range.contains(value));
            let color = if hidden {
                Rgba::TRANSPARENT
            } else {
                self.renderer
                    .as_ref()
                    .and_then(|renderer| renderer.color(value))
                    .unwrap_or(Rgba::TRANSPARENT)
            };
            for (i, channel) in color.to_array().into_iter().enumerate() {
                image[[r, c, i]] = channel;
            }
        }
        Ok(image)
    }
}

impl RasterLayer for GdalRasterLayer {
    fn set_renderer(&mut self, renderer: SingleBandPseudoColorRenderer) {
        self.renderer = Some(renderer);
    }

    fn set_user_no_data_value(&mut self, band: usize, ranges: Vec<RasterRange>) {
        self.user_no_data.insert(band, ranges);
    }

    fn image_cache(&mut self) -> Option<&mut dyn ImageCache> {
        Some(self)
    }

    fn trigger_repaint(&mut self) {
        self.repaints += 1;
    }
}

impl ImageCache for GdalRasterLayer {
    fn clear_cache_image(&mut self) {
        self.cache = None;
    }
}
