// photoproc/src/processors/validator.rs
use crate::core::{Dimensions, ProcessConfig, Result, ValidationError};
use crate::processors::Loader;
use std::io::{BufRead, Seek};

/// Upload size policy. Separate from processing; callers decide when to run it.
pub struct UploadValidator {
    min_size: u32,
    max_size: u32,
    max_file_size: u64,
}

impl UploadValidator {
    pub fn new(config: &ProcessConfig) -> Self {
        Self {
            min_size: config.min_size,
            max_size: config.max_size,
            max_file_size: config.max_file_size,
        }
    }

    /// Bounds are inclusive on both ends.
    pub fn validate<R: BufRead + Seek>(
        &self,
        loader: &Loader,
        input: R,
        content_type: &str,
        byte_len: u64,
    ) -> Result<Dimensions> {
        if !content_type.contains("image/") {
            return Err(ValidationError::NotAnImage(content_type.to_string()).into());
        }

        if byte_len > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size: byte_len,
                limit: self.max_file_size,
            }
            .into());
        }

        let dims = loader.probe(input)?;
        self.check_dimensions(dims)?;

        Ok(dims)
    }

    pub fn check_dimensions(&self, dims: Dimensions) -> std::result::Result<(), ValidationError> {
        let Dimensions { width, height } = dims;

        if width < self.min_size || height < self.min_size {
            return Err(ValidationError::TooSmall {
                width,
                height,
                min: self.min_size,
            });
        }

        if width > self.max_size || height > self.max_size {
            return Err(ValidationError::TooLarge {
                width,
                height,
                max: self.max_size,
            });
        }

        Ok(())
    }
}
