use std::path::{Path, PathBuf};

use viskit_grid::{Grid, GridSize};

use crate::error::CaptureError;

/// Raster formats the fetcher will enumerate.
const SUPPORTED_EXTENSIONS: [&str; 9] = [
    "bmp", "jpeg", "jpg", "png", "pgm", "ppm", "tif", "tiff", "webp",
];

/// Enumerates frames from a directory of images or a single image file.
///
/// The fetcher hides file-format details from the pipeline: [`FrameFetcher::grab`]
/// advances to the next frame if one is available and
/// [`FrameFetcher::retrieve`] decodes the most recently grabbed frame into a
/// grayscale column-major grid.
///
/// # Example
///
/// ```no_run
/// use viskit_capture::FrameFetcher;
///
/// let mut fetcher = FrameFetcher::open("frames/").unwrap();
/// while fetcher.grab() {
///     let frame = fetcher.retrieve().unwrap();
///     println!("frame: {}", frame.size());
/// }
/// ```
pub struct FrameFetcher {
    frames: Vec<PathBuf>,
    pos: usize,
    grabbed: Option<PathBuf>,
}

impl FrameFetcher {
    /// Open a directory of image files, or a single image file.
    ///
    /// Directories are scanned non-recursively; entries without a supported
    /// raster extension are skipped. Frames are ordered by file name.
    ///
    /// # Errors
    ///
    /// If the path does not exist, cannot be read, or yields no frames, an
    /// error is returned.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CaptureError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CaptureError::PathDoesNotExist(path.to_path_buf()));
        }

        let mut frames = Vec::new();
        if path.is_dir() {
            for entry in std::fs::read_dir(path)? {
                let entry_path = entry?.path();
                if entry_path.is_file() && has_supported_extension(&entry_path) {
                    frames.push(entry_path);
                } else {
                    log::debug!("skipping {}", entry_path.display());
                }
            }
            frames.sort();
        } else {
            frames.push(path.to_path_buf());
        }

        if frames.is_empty() {
            return Err(CaptureError::NoFramesFound(path.to_path_buf()));
        }

        log::info!("opened {} frames from {}", frames.len(), path.display());

        Ok(Self {
            frames,
            pos: 0,
            grabbed: None,
        })
    }

    /// Number of frames the fetcher will serve in total.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Grab the next frame, returning true if one was available.
    pub fn grab(&mut self) -> bool {
        match self.frames.get(self.pos) {
            Some(frame) => {
                self.grabbed = Some(frame.clone());
                self.pos += 1;
                true
            }
            None => false,
        }
    }

    /// Decode the most recently grabbed frame into a grayscale grid.
    ///
    /// # Errors
    ///
    /// If no frame was grabbed yet or decoding fails, an error is returned.
    pub fn retrieve(&self) -> Result<Grid<u8>, CaptureError> {
        let path = self.grabbed.as_ref().ok_or(CaptureError::NoFrameGrabbed)?;

        let gray = image::open(path)?.to_luma8();
        let (width, height) = gray.dimensions();

        // decoded rows are contiguous; the grid wants contiguous columns
        let mut data = Vec::with_capacity((width * height) as usize);
        for c in 0..width {
            for r in 0..height {
                data.push(gray.get_pixel(c, r).0[0]);
            }
        }

        Ok(Grid::new(
            GridSize {
                width: width as usize,
                height: height as usize,
            },
            data,
        )?)
    }
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.iter().any(|&s| s == ext)
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn write_gradient_png(
        dir: &Path,
        name: &str,
        width: u32,
        height: u32,
        offset: u8,
    ) -> PathBuf {
        let img = GrayImage::from_fn(width, height, |x, y| {
            Luma([offset.wrapping_add((y * width + x) as u8)])
        });
        let path = dir.join(name);
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_open_missing_path_fails() {
        let result = FrameFetcher::open("definitely/not/here");
        assert!(matches!(result, Err(CaptureError::PathDoesNotExist(_))));
    }

    #[test]
    fn test_open_empty_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = FrameFetcher::open(dir.path());
        assert!(matches!(result, Err(CaptureError::NoFramesFound(_))));
    }

    #[test]
    fn test_grab_and_retrieve_in_name_order() {
        let _ = env_logger::builder().is_test(true).try_init();

        let dir = tempfile::tempdir().unwrap();
        // written out of order on purpose; enumeration sorts by name
        write_gradient_png(dir.path(), "frame_b.png", 2, 2, 100);
        write_gradient_png(dir.path(), "frame_a.png", 2, 2, 0);
        std::fs::write(dir.path().join("notes.txt"), "not a frame").unwrap();

        let mut fetcher = FrameFetcher::open(dir.path()).unwrap();
        assert_eq!(fetcher.frame_count(), 2);

        assert!(fetcher.grab());
        let first = fetcher.retrieve().unwrap();
        assert_eq!(first[(0, 0)], 0);

        assert!(fetcher.grab());
        let second = fetcher.retrieve().unwrap();
        assert_eq!(second[(0, 0)], 100);

        assert!(!fetcher.grab());
    }

    #[test]
    fn test_retrieve_before_grab_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_gradient_png(dir.path(), "frame.png", 2, 2, 0);

        let fetcher = FrameFetcher::open(dir.path()).unwrap();
        assert!(matches!(
            fetcher.retrieve(),
            Err(CaptureError::NoFrameGrabbed)
        ));
    }

    #[test]
    fn test_retrieve_converts_to_column_major() {
        let dir = tempfile::tempdir().unwrap();
        // 3 wide, 2 tall; pixel value = row-major index
        let path = write_gradient_png(dir.path(), "frame.png", 3, 2, 0);

        let mut fetcher = FrameFetcher::open(&path).unwrap();
        assert!(fetcher.grab());
        let frame = fetcher.retrieve().unwrap();

        assert_eq!(frame.cols(), 3);
        assert_eq!(frame.rows(), 2);
        // (row, col) addressing; columns are contiguous in storage
        assert_eq!(frame[(0, 1)], 1);
        assert_eq!(frame[(1, 1)], 4);
        assert_eq!(frame.col(2), &[2, 5]);
    }
}
