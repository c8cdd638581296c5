use crate::error::{Error, Result};
use gdal::{
    raster::{Buffer, GdalType},
    DriverManager, GeoTransform,
};
use ndarray::{ArrayBase, Axis, Data, Dimension};
use std::{env, path::PathBuf};
use tracing::{debug, info};

const DRIVER: &str = "GTiff";
const SUFFIX: &str = ".gtif";

/// Where and under which name prefix [`temp_raster`] creates its file.
#[derive(Debug, Clone)]
pub struct TempRasterOptions {
    /// prefix of the temporary filename
    pub prefix: String,
    /// directory for the temporary file, the current directory when `None`
    pub directory: Option<PathBuf>,
}

impl Default for TempRasterOptions {
    fn default() -> Self {
        Self {
            prefix: "pyfmask_".to_string(),
            directory: None,
        }
    }
}

/// writes an in-memory raster to a new temporary GeoTIFF and returns its path.
/// The file is left on disk, removing it is up to the caller.
/// raster: (rows, cols) for a single band or (rows, cols, bands)
/// geo_transform: affine transform of the raster
/// projection: WKT projection of the raster
/// options: filename prefix and directory
pub fn temp_raster<T, S, D>(
    raster: &ArrayBase<S, D>,
    geo_transform: &GeoTransform,
    projection: &str,
    options: &TempRasterOptions,
) -> Result<PathBuf>
where
    T: GdalType + Copy,
    S: Data<Elem = T>,
    D: Dimension,
{
    let raster = raster.view().into_dyn();
    let (nrow, ncol, nband) = match *raster.shape() {
        [nrow, ncol] => (nrow, ncol, 1),
        [nrow, ncol, nband] => (nrow, ncol, nband),
        _ => return Err(Error::InvalidShape(raster.shape().to_vec())),
    };
    if nrow == 0 || ncol == 0 || nband == 0 {
        return Err(Error::InvalidShape(raster.shape().to_vec()));
    }

    let directory = match &options.directory {
        Some(directory) => directory.clone(),
        None => env::current_dir()?,
    };
    // reserve a unique name, then keep it so GDAL can write over it
    let filename = tempfile::Builder::new()
        .prefix(&options.prefix)
        .suffix(SUFFIX)
        .tempfile_in(&directory)?
        .into_temp_path()
        .keep()?;
    debug!(
        "creating {}x{}x{} raster at {:?}",
        nrow, ncol, nband, filename
    );

    let driver = DriverManager::get_driver_by_name(DRIVER)?;
    let mut ds = driver.create_with_band_type::<T, _>(
        &filename,
        ncol as isize,
        nrow as isize,
        nband as isize,
    )?;

    for b in 0..nband {
        let data: Vec<T> = if raster.ndim() == 2 {
            raster.iter().copied().collect()
        } else {
            raster.index_axis(Axis(2), b).iter().copied().collect()
        };
        let mut band = ds.rasterband(b as isize + 1)?;
        band.write((0, 0), (ncol, nrow), &Buffer::new((ncol, nrow), data))?;
    }

    ds.set_geo_transform(geo_transform)?;
    ds.set_projection(projection)?;

    info!("wrote temporary raster {:?}", filename);
    Ok(filename)
}
