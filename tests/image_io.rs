#![cfg(feature = "image-io")]

use detpipe::io::{frame_size_from_path, frame_size_of};
use detpipe::DetPipeError;

#[test]
fn frame_size_is_read_from_png_header() {
    let path = std::env::temp_dir().join(format!("detpipe_frame_{}.png", std::process::id()));
    image::RgbImage::new(32, 24).save(&path).unwrap();

    let frame = frame_size_from_path(&path).unwrap();
    assert_eq!(frame.width(), 32.0);
    assert_eq!(frame.height(), 24.0);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn missing_file_reports_image_io_error() {
    let path = std::env::temp_dir().join("detpipe_does_not_exist.png");
    let err = frame_size_from_path(&path).err().unwrap();
    assert!(matches!(err, DetPipeError::ImageIo { .. }));
}

#[test]
fn frame_size_of_loaded_image() {
    let img = image::DynamicImage::new_rgb8(640, 480);
    let frame = frame_size_of(&img).unwrap();
    assert_eq!((frame.width(), frame.height()), (640.0, 480.0));
}
