//! Fmask class symbology.
//!
//! Fmask writes one class code per pixel: land 0, water 1, shadow 2, snow 3
//! and cloud 4. [`apply_symbology`] colors those codes exactly and marks a
//! transparency value as no-data.

use crate::error::{Error, Result};
use crate::layer::RasterLayer;
use crate::shader::{
    ColorRampItem, ColorRampShader, ColorRampType, RasterRange, RasterShader, Rgba,
    SingleBandPseudoColorRenderer,
};
use std::{collections::HashMap, fmt, str::FromStr};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FmaskClass {
    Land,
    Water,
    Shadow,
    Snow,
    Cloud,
}

impl FmaskClass {
    /// Every class, in code order.
    pub const ALL: [FmaskClass; 5] = [
        FmaskClass::Land,
        FmaskClass::Water,
        FmaskClass::Shadow,
        FmaskClass::Snow,
        FmaskClass::Cloud,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FmaskClass::Land => "land",
            FmaskClass::Water => "water",
            FmaskClass::Shadow => "shadow",
            FmaskClass::Snow => "snow",
            FmaskClass::Cloud => "cloud",
        }
    }

    /// Pixel value Fmask writes for the class.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for FmaskClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FmaskClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FmaskClass::ALL
            .into_iter()
            .find(|class| class.name() == s)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

/// One color per Fmask class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbology {
    colors: [Rgba; 5],
}

impl Default for Symbology {
    fn default() -> Self {
        Self {
            colors: [
                Rgba::new(0, 0, 0, 0),
                Rgba::new(0, 0, 255, 255),
                Rgba::new(0, 0, 0, 255),
                Rgba::new(0, 255, 255, 255),
                Rgba::new(255, 0, 255, 255),
            ],
        }
    }
}

impl Symbology {
    /// builds a symbology from (category name, color) pairs.
    /// every category must be named, unknown names are rejected and a
    /// repeated name keeps its last color.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Rgba)>,
        S: AsRef<str>,
    {
        let mut named = HashMap::new();
        for (name, color) in pairs {
            let class: FmaskClass = name.as_ref().parse()?;
            named.insert(class, color);
        }

        let mut colors = [Rgba::TRANSPARENT; 5];
        for class in FmaskClass::ALL {
            colors[class as usize] = *named
                .get(&class)
                .ok_or(Error::MissingCategory(class.name()))?;
        }
        Ok(Self { colors })
    }

    pub fn color(&self, class: FmaskClass) -> Rgba {
        self.colors[class as usize]
    }

    pub fn set_color(&mut self, class: FmaskClass, color: Rgba) {
        self.colors[class as usize] = color;
    }
}

/// builds the exact color ramp renderer for band 1 covering the enabled classes.
/// enabled: one flag per class, in code order
pub fn build_renderer(
    symbology: &Symbology,
    enabled: &[bool],
) -> Result<SingleBandPseudoColorRenderer> {
    if enabled.len() != FmaskClass::ALL.len() {
        return Err(Error::EnabledLength {
            expected: FmaskClass::ALL.len(),
            actual: enabled.len(),
        });
    }

    let items = FmaskClass::ALL
        .into_iter()
        .zip(enabled)
        .filter(|(_, enable)| **enable)
        .map(|(class, _)| {
            ColorRampItem::new(class.code() as f64, symbology.color(class), class.name())
        })
        .collect();

    let mut color_ramp_shader = ColorRampShader::new();
    color_ramp_shader.set_color_ramp_item_list(items);
    color_ramp_shader.set_color_ramp_type(ColorRampType::Exact);

    let mut raster_shader = RasterShader::new();
    raster_shader.set_raster_shader_function(color_ramp_shader);

    Ok(SingleBandPseudoColorRenderer::new(1, raster_shader))
}

/// applies the Fmask symbology to a layer and repaints it.
/// rlayer: layer showing an Fmask classification
/// symbology: color of every class
/// enabled: one flag per class, in code order
/// transparent: value shown as no-data on band 1
pub fn apply_symbology<L>(
    rlayer: &mut L,
    symbology: &Symbology,
    enabled: &[bool],
    transparent: i32,
) -> Result<()>
where
    L: RasterLayer + ?Sized,
{
    // validate everything before the layer is touched
    let renderer = build_renderer(symbology, enabled)?;
    debug!(
        "applying {} color ramp items, transparent value {}",
        renderer.shader().raster_shader_function().color_ramp_item_list().len(),
        transparent
    );

    rlayer.set_renderer(renderer);

    let transparent = transparent as f64;
    rlayer.set_user_no_data_value(1, vec![RasterRange::new(transparent, transparent)]);

    if let Some(cache) = rlayer.image_cache() {
        cache.clear_cache_image();
    }
    rlayer.trigger_repaint();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::ImageCache;

    #[derive(Default)]
    struct RecordingLayer {
        renderer: Option<SingleBandPseudoColorRenderer>,
        no_data: Vec<(usize, Vec<RasterRange>)>,
        repaints: usize,
    }

    impl RasterLayer for RecordingLayer {
        fn set_renderer(&mut self, renderer: SingleBandPseudoColorRenderer) {
            self.renderer = Some(renderer);
        }

        fn set_user_no_data_value(&mut self, band: usize, ranges: Vec<RasterRange>) {
            self.no_data.push((band, ranges));
        }

        fn trigger_repaint(&mut self) {
            self.repaints += 1;
        }
    }

    #[derive(Default)]
    struct CachingLayer {
        inner: RecordingLayer,
        cleared: bool,
    }

    impl RasterLayer for CachingLayer {
        fn set_renderer(&mut self, renderer: SingleBandPseudoColorRenderer) {
            self.inner.set_renderer(renderer);
        }

        fn set_user_no_data_value(&mut self, band: usize, ranges: Vec<RasterRange>) {
            self.inner.set_user_no_data_value(band, ranges);
        }

        fn image_cache(&mut self) -> Option<&mut dyn ImageCache> {
            Some(self)
        }

        fn trigger_repaint(&mut self) {
            self.inner.trigger_repaint();
        }
    }

    impl ImageCache for CachingLayer {
        fn clear_cache_image(&mut self) {
            self.cleared = true;
        }
    }

    #[test]
    fn only_enabled_classes_get_colors() {
        let symbology = Symbology::default();
        let renderer = build_renderer(&symbology, &[false, true, false, false, true]).unwrap();

        let items = renderer.shader().raster_shader_function().color_ramp_item_list();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].value, 1.0);
        assert_eq!(items[0].label, "water");
        assert_eq!(items[0].color, symbology.color(FmaskClass::Water));
        assert_eq!(items[1].value, 4.0);
        assert_eq!(items[1].label, "cloud");
        assert_eq!(
            renderer.shader().raster_shader_function().color_ramp_type(),
            ColorRampType::Exact
        );
        assert_eq!(renderer.band(), 1);
    }

    #[test]
    fn transparent_value_becomes_single_value_no_data() {
        let mut layer = RecordingLayer::default();
        apply_symbology(&mut layer, &Symbology::default(), &[true; 5], 255).unwrap();

        assert_eq!(layer.no_data, vec![(1, vec![RasterRange::new(255.0, 255.0)])]);
        assert_eq!(layer.repaints, 1);
        assert!(layer.renderer.is_some());
    }

    #[test]
    fn cache_is_cleared_when_supported() {
        let mut layer = CachingLayer::default();
        apply_symbology(&mut layer, &Symbology::default(), &[true; 5], 255).unwrap();
        assert!(layer.cleared);
        assert_eq!(layer.inner.repaints, 1);
    }

    #[test]
    fn wrong_flag_count_leaves_layer_untouched() {
        let mut layer = RecordingLayer::default();
        let err = apply_symbology(&mut layer, &Symbology::default(), &[true; 4], 255).unwrap_err();

        assert!(matches!(err, Error::EnabledLength { expected: 5, actual: 4 }));
        assert!(layer.renderer.is_none());
        assert!(layer.no_data.is_empty());
        assert_eq!(layer.repaints, 0);
    }

    #[test]
    fn symbology_from_named_colors() {
        let red = Rgba::new(255, 0, 0, 255);
        let pairs = FmaskClass::ALL.map(|class| (class.name(), red));
        let symbology = Symbology::from_pairs(pairs).unwrap();
        assert_eq!(symbology.color(FmaskClass::Snow), red);

        let err = Symbology::from_pairs(vec![("land", red), ("haze", red)]).unwrap_err();
        assert!(matches!(err, Error::UnknownCategory(name) if name == "haze"));

        let err = Symbology::from_pairs(pairs.into_iter().take(4)).unwrap_err();
        assert!(matches!(err, Error::MissingCategory("cloud")));
    }

    #[test]
    fn class_codes_follow_fmask() {
        let codes: Vec<u8> = FmaskClass::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(codes, vec![0, 1, 2, 3, 4]);
        assert_eq!("shadow".parse::<FmaskClass>().unwrap(), FmaskClass::Shadow);
    }
}
