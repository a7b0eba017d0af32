pub mod delivery;

pub use crate::domain::image::{ImageOptions, UploadedImage};
pub use crate::domain::model::DeliveryArea;
pub use crate::domain::ports::{CdnConfigProvider, ImageHost};
pub use crate::utils::error::Result;
