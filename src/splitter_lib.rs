use image::codecs::jpeg::JpegEncoder;
use image::io::Reader;
use image::{DynamicImage, GenericImageView};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::geometry_lib::{compute_geometry, Part, Region, SplitGeometry};
use crate::{check_ratio, SplitError, JPEG_QUALITY};

pub trait SplitConfig {
    fn input_path(&self) -> &Path;
    fn output_dir(&self) -> &Path;
    fn text_ratio(&self) -> f64;
}

/// A crop that made it to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenPart {
    pub part: Part,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
pub struct SplitReport {
    pub geometry: SplitGeometry,
    pub parts: Vec<WrittenPart>,
}

/// Decode the image at `path`, picking the decoder from the file contents
/// rather than its extension.
pub fn load(path: &Path) -> Result<DynamicImage, SplitError> {
    let load_error = |source: image::ImageError| SplitError::Load {
        path: path.to_path_buf(),
        source,
    };

    Reader::open(path)
        .and_then(Reader::with_guessed_format)
        .map_err(|e| load_error(e.into()))?
        .decode()
        .map_err(load_error)
}

/// Get the output path of one crop inside `output_dir`
pub fn output_path(output_dir: &Path, part: Part) -> PathBuf {
    output_dir.join(part.file_name())
}

/// Crop `region` out of `image` and write it as a JPEG, replacing any existing file.
pub fn crop_and_save(image: &DynamicImage, region: Region, out_path: &Path) -> Result<(), SplitError> {
    let save_error = |source: image::ImageError| SplitError::Save {
        path: out_path.to_path_buf(),
        source,
    };

    // JPEG has no alpha channel and only 8-bit samples
    let cropped = image
        .crop_imm(region.x, region.y, region.width, region.height)
        .to_rgb8();

    let file = File::create(out_path).map_err(|e| save_error(e.into()))?;
    let mut writer = BufWriter::new(file);
    JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY)
        .encode_image(&cropped)
        .map_err(save_error)?;

    writer
        .into_inner()
        .map_err(|e| save_error(e.into_error().into()))?
        .sync_all()
        .map_err(|e| save_error(e.into()))?;

    Ok(())
}

/// Split the configured input into its four crops.
///
/// The image is decoded before the output directory is touched, so a bad
/// input leaves the filesystem alone.
pub fn run<T: SplitConfig>(config: &T) -> Result<SplitReport, SplitError> {
    let text_ratio = check_ratio(config.text_ratio())?;
    let image = load(config.input_path())?;
    println!("Original image size: {}x{}", image.width(), image.height());

    let geometry = compute_geometry(image.width(), image.height(), text_ratio);
    println!("Split points:");
    println!("  Horizontal: {}px", geometry.mid_x);
    println!(
        "  Vertical: {}px (door), {}px (text)",
        geometry.door_height, geometry.text_height
    );

    split_loaded(&image, &geometry, config.output_dir())
}

/// Write the four crops of an already decoded image.
///
/// A failing crop stops the split; crops written before it stay on disk.
pub fn split_loaded(
    image: &DynamicImage,
    geometry: &SplitGeometry,
    output_dir: &Path,
) -> Result<SplitReport, SplitError> {
    if geometry.is_degenerate() {
        return Err(SplitError::DegenerateImage {
            width: geometry.width,
            height: geometry.height,
        });
    }

    fs::create_dir_all(output_dir).map_err(|source| SplitError::CreateOutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut parts = Vec::with_capacity(Part::ALL.len());
    for (part, region) in geometry.regions() {
        let path = output_path(output_dir, part);
        crop_and_save(image, region, &path)?;
        parts.push(WrittenPart {
            part,
            path,
            width: region.width,
            height: region.height,
        });
    }

    println!("\n✅ Successfully split image into {} parts:", parts.len());
    for written in &parts {
        println!("  - {} ({}x{})", written.path.display(), written.width, written.height);
    }

    Ok(SplitReport {
        geometry: *geometry,
        parts,
    })
}
