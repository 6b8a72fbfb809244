/* Copyright 2020 @TwoCookingMice */

use crate::core::error::Result;
use crate::math::bitmap::Bitmap;

use exr::prelude::*;

// Write EXR Image to file
pub fn write_exr_to_file(image: &Bitmap, file_path: &str) -> Result<()> {
    log::info!("Starting writing openexr images: {}.", file_path);

    let width = image.width();
    let pixels = image.pixels();
    write_rgb_file(file_path, width, image.height(), |x, y| {
        let p = pixels[y * width + x];
        (p.r(), p.g(), p.b())
    })?;

    log::info!("EXR written to: {}.", file_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_exr_to_file;
    use crate::math::bitmap::Bitmap;
    use crate::math::spectrum::RGBSpectrum;

    #[test]
    fn test_write_exr() {
        let mut image = Bitmap::new(8, 4);
        image[(3, 2)] = RGBSpectrum::new(1.0, 0.5, 0.25);

        let path = std::env::temp_dir().join(format!("lumen_exr_test_{}.exr", std::process::id()));
        let path_str = path.to_string_lossy().to_string();
        write_exr_to_file(&image, &path_str).unwrap();

        let size = std::fs::metadata(&path).unwrap().len();
        assert!(size > 0);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_exr_reports_bad_path() {
        let image = Bitmap::new(2, 2);
        assert!(write_exr_to_file(&image, "/nonexistent_dir/for/sure/out.exr").is_err());
    }
}
