mod application;
mod domain;
mod infrastructure;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use application::config::{CanvasOverrides, ForgeConfig};
use application::email_service::EmailService;
use application::favicon_service::FaviconService;
use domain::canvas::{CornerCheck, Preset};
use infrastructure::image_processor::DefaultImageProcessor;

#[derive(Parser, Debug)]
#[command(author, version, about = "Builds rounded-square favicons and inlines logos into email templates")]
struct Cli {
    /// JSON file overriding the built-in defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fit a source image onto a rounded-square background
    Compose(ComposeArgs),
    /// Trim a source image and centre it on a padded transparent square
    Pad(PadArgs),
    /// Draw the geometric "d" letterform on a rounded-square background
    Glyph(GlyphArgs),
    /// Inline a logo into an HTML email template
    EmbedLogo(EmbedLogoArgs),
    /// Check an existing favicon file
    Verify(VerifyArgs),
}

#[derive(Args, Debug, Default)]
struct CanvasArgs {
    /// Canvas side in pixels
    #[arg(long)]
    size: Option<u32>,
    /// Corner radius in pixels
    #[arg(long)]
    radius: Option<u32>,
    /// Background colour, RRGGBB or RRGGBBAA
    #[arg(long)]
    background: Option<String>,
}

impl From<CanvasArgs> for CanvasOverrides {
    fn from(args: CanvasArgs) -> Self {
        Self {
            size: args.size,
            corner_radius: args.radius,
            background: args.background,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PresetArg {
    Soft,
    Trimmed,
    Logo,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Soft => Preset::Soft,
            PresetArg::Trimmed => Preset::Trimmed,
            PresetArg::Logo => Preset::Logo,
        }
    }
}

#[derive(Args, Debug)]
struct ComposeArgs {
    /// Source image path or data: URL
    #[arg(short, long)]
    source: String,
    /// Output PNG path
    #[arg(short, long)]
    out: Option<PathBuf>,
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,
    /// Share of the canvas taken by the longer side of the source
    #[arg(long)]
    fill: Option<f32>,
    /// Crop the source to its non-transparent content first
    #[arg(long, conflicts_with = "no_trim")]
    trim: bool,
    #[arg(long)]
    no_trim: bool,
    #[command(flatten)]
    canvas: CanvasArgs,
}

#[derive(Args, Debug)]
struct PadArgs {
    #[arg(short, long)]
    source: String,
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Margin on each side, as a share of the longer side
    #[arg(long)]
    padding: Option<f32>,
    #[arg(long)]
    size: Option<u32>,
}

#[derive(Args, Debug)]
struct GlyphArgs {
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Letter colour, RRGGBB or RRGGBBAA
    #[arg(long)]
    ink: Option<String>,
    /// Slant the letter to the right
    #[arg(long)]
    tilt: bool,
    /// Shear factor used when tilting
    #[arg(long)]
    shear: Option<f32>,
    #[command(flatten)]
    canvas: CanvasArgs,
}

#[derive(Args, Debug)]
struct EmbedLogoArgs {
    /// Base64 text file, image file or data: URL
    #[arg(short, long, default_value = "logo_base64.txt")]
    logo: String,
    /// HTML template containing __LOGO_DATA_URI__; defaults to the confirmation email
    #[arg(short, long)]
    template: Option<PathBuf>,
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    path: Option<PathBuf>,
    #[arg(long)]
    size: Option<u32>,
    /// Also require transparent corners of this radius
    #[arg(long)]
    radius: Option<u32>,
    /// The background is transparent, so edge midpoints may be clear too
    #[arg(long, requires = "radius")]
    clear_edges: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ForgeConfig::load(path).await?,
        None => ForgeConfig::default(),
    };
    let favicons = FaviconService::new(Arc::new(DefaultImageProcessor::new()));

    match cli.command {
        Command::Compose(args) => {
            let trim = match (args.trim, args.no_trim) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let spec = config.composite_spec(
                &args.canvas.into(),
                args.preset.map(Preset::from),
                args.fill,
                trim,
            )?;
            let dest = args.out.unwrap_or_else(|| config.output.clone());
            favicons
                .compose(&args.source, &spec, &dest)
                .await
                .with_context(|| format!("composing favicon from {}", args.source))?;
        }
        Command::Pad(args) => {
            let spec = config.pad_spec(args.padding, args.size)?;
            let dest = args.out.unwrap_or_else(|| config.output.clone());
            favicons
                .pad(&args.source, &spec, &dest)
                .await
                .with_context(|| format!("padding {}", args.source))?;
        }
        Command::Glyph(args) => {
            let spec = config.glyph_spec(&args.canvas.into(), args.ink.as_deref(), args.tilt, args.shear)?;
            let dest = args.out.unwrap_or_else(|| config.output.clone());
            favicons
                .glyph(&spec, &dest)
                .await
                .context("drawing letterform favicon")?;
        }
        Command::EmbedLogo(args) => {
            let dest = args.out.unwrap_or_else(|| config.email_output.clone());
            EmailService::new()
                .embed(&args.logo, args.template.as_deref(), &dest)
                .await
                .with_context(|| format!("embedding {} into {}", args.logo, dest.display()))?;
        }
        Command::Verify(args) => {
            let path = args.path.unwrap_or_else(|| config.output.clone());
            let corners = args.radius.map(|radius| CornerCheck {
                radius,
                filled_edges: !args.clear_edges,
            });
            let report = favicons
                .verify(&path, args.size.unwrap_or(config.canvas_size), corners)
                .await?;
            log::info!(
                "{} is a valid {}x{} favicon ({} bytes)",
                path.display(),
                report.width,
                report.height,
                report.byte_len
            );
        }
    }
    Ok(())
}
