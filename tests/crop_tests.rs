use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use mottle::crop::{crop_inset, CropSpec, MARGIN_MAX, MARGIN_MIN};
use mottle::MottleError;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn png_fixture(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 251) as u8, (y % 241) as u8, ((x + y) % 199) as u8, 255])
    }));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

#[test]
fn crop_keeps_inset_dimensions() {
    let bytes = png_fixture(100, 100);
    let cropped = crop_inset(
        &bytes,
        CropSpec {
            margin_x: 5,
            margin_y: 5,
        },
    )
    .unwrap();
    assert_eq!(cropped.dimensions(), (90, 90));
}

#[test]
fn asymmetric_margins_inset_each_axis() {
    let bytes = png_fixture(100, 100);
    let cropped = crop_inset(
        &bytes,
        CropSpec {
            margin_x: 3,
            margin_y: 9,
        },
    )
    .unwrap();
    assert_eq!(cropped.dimensions(), (94, 82));
}

#[test]
fn margin_consuming_the_whole_axis_fails() {
    let bytes = png_fixture(30, 30);
    let err = crop_inset(
        &bytes,
        CropSpec {
            margin_x: 15,
            margin_y: 5,
        },
    )
    .unwrap_err();
    assert!(matches!(err, MottleError::InvalidCrop { .. }));
}

#[test]
fn undecodable_bytes_fail() {
    let err = crop_inset(
        b"definitely not an image",
        CropSpec {
            margin_x: 1,
            margin_y: 1,
        },
    )
    .unwrap_err();
    assert!(matches!(err, MottleError::Image(_)));
}

#[test]
fn drawn_margins_stay_in_range() {
    let mut rng = StdRng::seed_from_u64(123);
    for _ in 0..200 {
        let spec = CropSpec::draw(&mut rng);
        assert!((MARGIN_MIN..=MARGIN_MAX).contains(&spec.margin_x));
        assert!((MARGIN_MIN..=MARGIN_MAX).contains(&spec.margin_y));
    }
}
