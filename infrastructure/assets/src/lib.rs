pub mod image_store;
pub mod symbol_encoder;

pub use image_store::FsImageStore;
pub use symbol_encoder::QrSymbolEncoder;
