use std::io;
use std::path::PathBuf;

pub mod geometry_lib;
pub mod prompt_lib;
pub mod splitter_lib;

pub use geometry_lib::{compute_geometry, Part, Region, SplitGeometry};
pub use prompt_lib::{interactive_ratio_prompt, interactive_split, ConsolePrompt, SplitOutcome, SplitPrompt};
pub use splitter_lib::{
    crop_and_save, load, output_path, run, split_loaded, SplitConfig, SplitReport, WrittenPart,
};

/// Fraction of the height given to the text strips by the full splitter.
pub const DEFAULT_TEXT_RATIO: f64 = 0.3;
/// Fraction used by the quick preset.
pub const QUICK_TEXT_RATIO: f64 = 0.25;
pub const MIN_TEXT_RATIO: f64 = 0.1;
pub const MAX_TEXT_RATIO: f64 = 0.5;

pub const JPEG_QUALITY: u8 = 95;
pub const DEFAULT_OUTPUT_DIR: &str = "data";
pub const OUTPUT_EXTENSION: &str = "jpeg";

#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    #[error("failed to load image {}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to save {}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to create output directory {}", .path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("text ratio {0} is outside 0.1-0.5")]
    InvalidRatio(f64),

    #[error("image of {width}x{height} would produce an empty crop")]
    DegenerateImage { width: u32, height: u32 },

    #[error("failed to read interactive input")]
    Prompt(#[from] io::Error),
}

/// Checks that a text ratio lies within the supported range.
pub fn check_ratio(text_ratio: f64) -> Result<f64, SplitError> {
    if (MIN_TEXT_RATIO..=MAX_TEXT_RATIO).contains(&text_ratio) {
        Ok(text_ratio)
    } else {
        Err(SplitError::InvalidRatio(text_ratio))
    }
}
