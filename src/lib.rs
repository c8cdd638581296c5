//! # fmask_utils
//!
//! `fmask_utils` is a crate of helpers for working with Fmask cloud masks of Landsat scenes:
//! reading MTL metadata, dumping in-memory rasters to temporary GeoTIFF files and coloring
//! the Fmask classes of a raster layer.
//!
//! ## Example
//!
//! ```no_run
//! use ndarray::Array2;
//! use fmask_utils::{apply_symbology, mtl_to_map, temp_raster, GdalRasterLayer, Symbology, TempRasterOptions};
//!
//! let mtl = mtl_to_map("data/LT50120312002300LGS01_MTL.txt", true).unwrap();
//! println!("cloud cover: {:?}", mtl["CLOUD_COVER"].as_f64());
//!
//! let mask = Array2::<u8>::zeros((100, 100));
//! let geo_transform = [500000.0, 30.0, 0.0, 4500000.0, 0.0, -30.0];
//! let path = temp_raster(&mask, &geo_transform, "", &TempRasterOptions::default()).unwrap();
//!
//! let mut layer = GdalRasterLayer::open(&path).unwrap();
//! apply_symbology(&mut layer, &Symbology::default(), &[true; 5], 255).unwrap();
//! let rgba = layer.image().unwrap();
//! ```
//!
//! ## Usage
//! ### rust api
//! The crate provides three main functions:
//!
//! - `mtl_to_map`: Reads a Landsat MTL file into key/value pairs.
//! - `temp_raster`: Writes a 2D or 3D array to a temporary GeoTIFF.
//! - `apply_symbology`: Colors the Fmask classes of a raster layer.
//!
//! Refer to the individual function documentation for more details on their usage.
//!
//! ### Command line
//! The `fmask_utils` binary has two subcommands:
//!```zsh
//! fmask_utils mtl LT50120312002300LGS01_MTL.txt --no-float
//! fmask_utils render -i fmask.tif --disable land --color cloud=255,255,255,200
//!```
//! `mtl` prints the parsed metadata, `render` prints the path of the RGBA GeoTIFF it wrote.
//! Add `-v` for debug logging.
//!
//! ## Installation
//! The GDAL library and headers have to be available at build time, the
//! `gdal` crate generates its bindings against them.
//!```zsh
//! cargo install --path .
//! ```
//!
pub mod error;
pub mod layer;
pub mod mtl;
pub mod shader;
pub mod symbology;
pub mod temp_raster;

pub use error::{Error, Result};
pub use layer::{GdalRasterLayer, ImageCache, RasterLayer};
pub use mtl::{mtl_to_map, parse_mtl, write_mtl, Mtl, MtlValue};
pub use shader::{
    ColorRampItem, ColorRampShader, ColorRampType, RasterRange, RasterShader, Rgba,
    SingleBandPseudoColorRenderer,
};
pub use symbology::{apply_symbology, build_renderer, FmaskClass, Symbology};
pub use temp_raster::{temp_raster, TempRasterOptions};
