//! End to end: write an Fmask classification, color it and write the RGBA result.

use fmask_utils::{
    apply_symbology, mtl_to_map, temp_raster, FmaskClass, GdalRasterLayer, MtlValue, RasterLayer,
    RasterRange, Symbology, TempRasterOptions,
};
use gdal::Dataset;
use ndarray::Array2;
use std::io::Write;

const GEO_TRANSFORM: [f64; 6] = [499980.0, 30.0, 0.0, 4600020.0, 0.0, -30.0];

#[test]
fn render_water_and_cloud_only() {
    let dir = tempfile::tempdir().unwrap();
    let options = TempRasterOptions {
        prefix: "fmask_".to_string(),
        directory: Some(dir.path().to_path_buf()),
    };

    // land, water, shadow, snow, cloud, fill
    let fmask = Array2::<u8>::from_shape_vec((2, 3), vec![0, 1, 2, 3, 4, 255]).unwrap();
    let fmask_path = temp_raster(&fmask, &GEO_TRANSFORM, "", &options).unwrap();

    let mut layer = GdalRasterLayer::open(&fmask_path).unwrap();
    let symbology = Symbology::default();
    apply_symbology(
        &mut layer,
        &symbology,
        &[false, true, false, false, true],
        255,
    )
    .unwrap();

    assert_eq!(layer.user_no_data_value(1), &[RasterRange::new(255.0, 255.0)]);
    assert_eq!(layer.repaint_count(), 1);
    let items = layer
        .renderer()
        .unwrap()
        .shader()
        .raster_shader_function()
        .color_ramp_item_list()
        .iter()
        .map(|item| item.value)
        .collect::<Vec<_>>();
    assert_eq!(items, vec![1.0, 4.0]);

    let image = layer.image().unwrap().clone();
    let water = symbology.color(FmaskClass::Water).to_array();
    let cloud = symbology.color(FmaskClass::Cloud).to_array();
    assert_eq!(image.slice(ndarray::s![0, 1, ..]).to_vec(), water.to_vec());
    assert_eq!(image.slice(ndarray::s![1, 1, ..]).to_vec(), cloud.to_vec());
    for (r, c) in [(0, 0), (0, 2), (1, 0), (1, 2)] {
        assert_eq!(image[[r, c, 3]], 0, "pixel ({}, {}) should be transparent", r, c);
    }

    let rgba_path = temp_raster(&image, &layer.geo_transform().unwrap(), "", &options).unwrap();
    let ds = Dataset::open(&rgba_path).unwrap();
    assert_eq!(ds.raster_count(), 4);
    assert_eq!(ds.raster_size(), (3, 2));
    assert_eq!(ds.geo_transform().unwrap(), GEO_TRANSFORM);

    // re-applying clears the cached image
    layer.set_user_no_data_value(1, Vec::new());
    apply_symbology(&mut layer, &symbology, &[true; 5], 4).unwrap();
    assert!(!layer.is_cached());
    assert_eq!(layer.image().unwrap()[[1, 1, 3]], 0);
}

#[test]
fn reads_mtl_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "GROUP = PRODUCT_METADATA").unwrap();
    writeln!(file, "    SPACECRAFT_ID = \"LANDSAT_7\"").unwrap();
    writeln!(file, "    REFLECTANCE_MAXIMUM_BAND_1 = 1.0").unwrap();
    writeln!(file, "END_GROUP = PRODUCT_METADATA").unwrap();
    writeln!(file, "END").unwrap();

    let mtl = mtl_to_map(file.path(), true).unwrap();
    assert_eq!(mtl.len(), 4);
    assert_eq!(mtl["SPACECRAFT_ID"], MtlValue::Text("LANDSAT_7".to_string()));
    assert_eq!(mtl["REFLECTANCE_MAXIMUM_BAND_1"], MtlValue::Float(1.0));
}
