mod args;

use anyhow::{Context, Result};
use args::{FmaskCliArgs, MtlCommand, RenderCommand, Subaction};
use clap::Parser;
use fmask_utils::{
    apply_symbology, mtl_to_map, temp_raster, write_mtl, FmaskClass, GdalRasterLayer, Symbology,
    TempRasterOptions,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let args = FmaskCliArgs::parse();
    setup_logging(args.verbose)?;

    match args.subcmd {
        Subaction::Mtl(cmd) => print_mtl(cmd),
        Subaction::Render(cmd) => render(cmd),
    }
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")
}

fn print_mtl(cmd: MtlCommand) -> Result<()> {
    let mtl = mtl_to_map(&cmd.file, !cmd.no_float)
        .with_context(|| format!("Failed to read MTL file {:?}", cmd.file))?;
    print!("{}", write_mtl(&mtl));
    Ok(())
}

fn render(cmd: RenderCommand) -> Result<()> {
    let mut symbology = Symbology::default();
    for (class, color) in &cmd.color {
        symbology.set_color(*class, *color);
    }
    let enabled = FmaskClass::ALL.map(|class| !cmd.disable.contains(&class));

    let mut layer = GdalRasterLayer::open(&cmd.input)
        .with_context(|| format!("Failed to open raster {:?}", cmd.input))?;
    apply_symbology(&mut layer, &symbology, &enabled, cmd.transparent)?;

    let geo_transform = layer.geo_transform()?;
    let projection = layer.projection();
    let image = layer.image().context("Failed to render raster")?;

    let options = TempRasterOptions {
        prefix: cmd.prefix,
        directory: cmd.directory,
    };
    let path = temp_raster(image, &geo_transform, &projection, &options)
        .context("Failed to write rendered raster")?;
    info!("rendered {:?} to {:?}", cmd.input, path);
    println!("{}", path.display());
    Ok(())
}
