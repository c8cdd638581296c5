use clap::{Args, Subcommand};
use fmask_utils::{FmaskClass, Rgba};
use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[clap(author, version, about)]
pub struct FmaskCliArgs {
    /// log debug output
    #[clap(short, long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub subcmd: Subaction,
}
#[derive(Debug, Subcommand)]
pub enum Subaction {
    /// prints the key/value pairs of a Landsat MTL metadata file
    Mtl(MtlCommand),

    /// colors the classes of an Fmask raster and writes the result to a temporary RGBA geotiff
    Render(RenderCommand),
}

#[derive(Debug, Args)]
pub struct MtlCommand {
    /// the MTL file
    pub file: PathBuf,

    /// keep every value as text instead of converting numbers
    #[clap(long)]
    pub no_float: bool,
}

#[derive(Debug, Args)]
pub struct RenderCommand {
    /// the Fmask classification raster
    #[clap(short, long)]
    pub input: PathBuf,

    /// directory for the output raster, the current directory when omitted
    #[clap(short, long)]
    pub directory: Option<PathBuf>,

    /// prefix of the output filename
    #[clap(short, long, default_value = "pyfmask_")]
    pub prefix: String,

    /// value shown as transparent
    #[clap(short, long, default_value_t = 255)]
    pub transparent: i32,

    /// classes to leave uncolored, e.g. --disable land
    #[clap(long, value_parser = parse_class)]
    pub disable: Vec<FmaskClass>,

    /// class color overrides as CLASS=R,G,B,A, e.g. --color water=0,0,255,255
    #[clap(long, value_parser = parse_class_color)]
    pub color: Vec<(FmaskClass, Rgba)>,
}

fn parse_class(s: &str) -> Result<FmaskClass, String> {
    s.parse().map_err(|e: fmask_utils::Error| e.to_string())
}

fn parse_class_color(s: &str) -> Result<(FmaskClass, Rgba), String> {
    let (class, color) = s
        .split_once('=')
        .ok_or_else(|| format!("expected CLASS=R,G,B,A, got {}", s))?;
    let color = color.parse().map_err(|e: fmask_utils::Error| e.to_string())?;
    Ok((parse_class(class)?, color))
}
