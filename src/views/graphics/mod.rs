//! Image and colour tools

mod color;
mod image_compress;
mod qrcode;

pub use self::qrcode::QrCodeGenerator;
pub use color::ColorConverter;
pub use image_compress::ImageCompressor;
