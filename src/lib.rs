pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::Cli;

pub use adapters::cloudinary::CloudinaryClient;
pub use config::StorefrontConfig;
pub use crate::core::delivery::{areas, delivery_area_name, delivery_fee, find_area, DELIVERY_AREAS};
pub use crate::core::{DeliveryArea, ImageHost, ImageOptions, UploadedImage};
pub use utils::error::{Result, StoreError};
