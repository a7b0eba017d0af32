use crate::domain::image::{CropMode, Gravity, ImageFormat, ImageOptions, Quality};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "storefront")]
#[command(about = "Delivery fee lookup and product image tooling for the storefront")]
pub struct Cli {
    #[arg(long, global = true, help = "TOML configuration file (defaults to CLOUDINARY_* env vars)")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every delivery area and its flat fee
    Areas {
        #[arg(long)]
        json: bool,
    },
    /// Print the delivery fee for an area id
    Fee { area_id: String },
    /// Print the display name for an area id
    Name { area_id: String },
    /// Build a CDN delivery URL for a stored image
    ImageUrl {
        public_id: String,
        #[command(flatten)]
        options: ImageArgs,
    },
    /// Upload a local image to the CDN
    Upload {
        path: PathBuf,
        #[arg(long)]
        public_id: String,
        #[arg(long = "meta", value_name = "KEY=VALUE")]
        metadata: Vec<String>,
    },
}

impl Command {
    pub fn needs_cdn(&self) -> bool {
        matches!(self, Command::ImageUrl { .. } | Command::Upload { .. })
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ImageArgs {
    #[arg(long)]
    pub width: Option<u32>,
    #[arg(long)]
    pub height: Option<u32>,
    #[arg(long, value_enum)]
    pub crop: Option<CropMode>,
    #[arg(long, value_enum)]
    pub gravity: Option<Gravity>,
    #[arg(long, value_enum)]
    pub format: Option<ImageFormat>,
    #[arg(long)]
    pub quality: Option<Quality>,
}

impl From<ImageArgs> for ImageOptions {
    fn from(args: ImageArgs) -> Self {
        ImageOptions {
            width: args.width,
            height: args.height,
            crop: args.crop,
            gravity: args.gravity,
            format: args.format,
            quality: args.quality,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fee_command() {
        let cli = Cli::parse_from(["storefront", "fee", "kuala-lumpur"]);
        assert!(!cli.command.needs_cdn());
        match cli.command {
            Command::Fee { area_id } => assert_eq!(area_id, "kuala-lumpur"),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_image_url_overrides() {
        let cli = Cli::parse_from([
            "storefront",
            "image-url",
            "products/lantern",
            "--width",
            "400",
            "--crop",
            "fit",
            "--quality",
            "80",
        ]);
        assert!(cli.command.needs_cdn());
        match cli.command {
            Command::ImageUrl { public_id, options } => {
                assert_eq!(public_id, "products/lantern");
                let options: ImageOptions = options.into();
                assert_eq!(options.width, Some(400));
                assert_eq!(options.crop, Some(CropMode::Fit));
                assert_eq!(options.quality, Some(Quality::Level(80)));
                assert_eq!(options.gravity, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_upload_with_metadata() {
        let cli = Cli::parse_from([
            "storefront",
            "--config",
            "storefront.toml",
            "upload",
            "./lantern.jpg",
            "--public-id",
            "products/lantern",
            "--meta",
            "alt=Lantern",
            "--meta",
            "sku=LN-01",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("storefront.toml")));
        match cli.command {
            Command::Upload { metadata, .. } => assert_eq!(metadata.len(), 2),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
