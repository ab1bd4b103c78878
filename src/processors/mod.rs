// photoproc/src/processors/mod.rs
mod compressor;
mod cropper;
mod loader;
mod metadata;
mod resizer;
mod slicer;
mod trimmer;
mod validator;

pub use compressor::Compressor;
pub use cropper::Cropper;
pub use loader::Loader;
pub use metadata::{dms_to_decimal, MalformedMetadata, MetadataProcessor};
pub use resizer::Resizer;
pub use slicer::{GridCell, Slicer};
pub use trimmer::Trimmer;
pub use validator::UploadValidator;
