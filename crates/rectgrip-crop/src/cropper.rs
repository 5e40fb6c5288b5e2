//! Gesture-driven crop-box control over a displayed image.

use kurbo::{Point, Rect, Vec2};
use log::debug;
use rectgrip_core::{Handle, PointerEvent, RectEngine};

use crate::error::{CropError, CropResult};
use crate::image::{BYTES_PER_PIXEL, DisplayFit, PixelRegion, SourceImage};

/// Initial side length of the crop rectangle, in display pixels.
pub const DEFAULT_CROP_SIZE: f64 = 100.0;

/// Crop-box overlay over a displayed image.
///
/// Owns the crop rectangle and delegates pointer events to a
/// [`RectEngine`] bounded to the displayed image extent. The source
/// image may be attached after construction; [`extract`] fails until it
/// is.
///
/// [`extract`]: ImageCropper::extract
#[derive(Debug)]
pub struct ImageCropper {
    /// On-screen width available for the image.
    display_width: f64,
    /// Loaded source image and its display fit, once attached.
    image: Option<(SourceImage, DisplayFit)>,
    /// Current crop rectangle in display coordinates.
    crop_rect: Rect,
    /// Interaction engine for the crop rectangle.
    engine: RectEngine,
}

impl ImageCropper {
    /// Create a cropper for the given display width.
    pub fn new(display_width: f64) -> Self {
        Self {
            display_width,
            image: None,
            crop_rect: Rect::new(0.0, 0.0, DEFAULT_CROP_SIZE, DEFAULT_CROP_SIZE),
            engine: RectEngine::new(),
        }
    }

    /// Use a non-default hit-test margin.
    pub fn with_margin(mut self, margin: f64) -> Self {
        let mut engine = RectEngine::new().with_margin(margin);
        engine.set_bounds(self.engine.bounds());
        self.engine = engine;
        self
    }

    /// Attach the loaded source image.
    ///
    /// Computes the display fit for the cropper's width, bounds the
    /// engine to the displayed extent, and pulls the crop rectangle
    /// inside it.
    pub fn attach_image(&mut self, image: SourceImage) {
        let fit = DisplayFit::new(&image, self.display_width);
        debug!(
            "attached {}x{} source image, displayed at {}x{}",
            image.width(),
            image.height(),
            fit.width,
            fit.height
        );
        self.engine.set_bounds(Some(fit.display_rect()));
        self.crop_rect = clamp_into(self.crop_rect, fit.display_rect());
        self.image = Some((image, fit));
    }

    /// Whether a source image has been attached.
    pub fn is_image_ready(&self) -> bool {
        self.image.is_some()
    }

    /// The display fit of the attached image, if any.
    pub fn display_fit(&self) -> Option<DisplayFit> {
        self.image.as_ref().map(|(_, fit)| *fit)
    }

    /// The current crop rectangle in display coordinates.
    pub fn crop_rect(&self) -> Rect {
        self.crop_rect
    }

    /// Replace the crop rectangle.
    ///
    /// With an image attached the rectangle is pulled inside the
    /// displayed extent.
    pub fn set_crop_rect(&mut self, rect: Rect) {
        self.crop_rect = match self.display_fit() {
            Some(fit) => clamp_into(rect, fit.display_rect()),
            None => rect.abs(),
        };
    }

    /// Install a redraw callback fired after each geometry update.
    pub fn on_redraw(&mut self, redraw: impl FnMut(Rect) + 'static) {
        self.engine.on_redraw(redraw);
    }

    /// Forward a touch-down to the engine.
    pub fn pointer_down(&mut self, position: Point) -> Handle {
        self.engine.pointer_down(self.crop_rect, position)
    }

    /// Forward a cumulative drag displacement, keeping the updated copy.
    pub fn pointer_move(&mut self, delta: Vec2) -> Rect {
        if let Some(rect) = self.engine.pointer_move(delta) {
            self.crop_rect = rect;
        }
        self.crop_rect
    }

    /// Forward a touch-up, keeping the final rectangle.
    pub fn pointer_up(&mut self) -> Rect {
        if let Some(rect) = self.engine.pointer_up() {
            self.crop_rect = rect;
        }
        self.crop_rect
    }

    /// Dispatch a [`PointerEvent`] and return the crop rectangle.
    pub fn handle_event(&mut self, event: PointerEvent) -> Rect {
        match event {
            PointerEvent::Down { position } => {
                self.pointer_down(position);
                self.crop_rect
            }
            PointerEvent::Move { delta } => self.pointer_move(delta),
            PointerEvent::Up => self.pointer_up(),
        }
    }

    /// Extract the source pixels under the crop rectangle.
    ///
    /// Maps the on-screen rectangle into source-pixel space through the
    /// display scale factors, clamps to the source extent, and copies
    /// the covered rows out of the RGBA buffer.
    ///
    /// Fails if no image is attached yet or if the crop rectangle
    /// covers no source pixels.
    pub fn extract(&self) -> CropResult<PixelRegion> {
        let (image, fit) = self.image.as_ref().ok_or(CropError::ImageNotReady)?;

        let crop = self.crop_rect.abs();
        if crop.is_zero_area() {
            return Err(CropError::EmptyCropRegion);
        }

        let source = fit.display_to_source(crop);
        let x0 = source.x0.round().clamp(0.0, image.width() as f64) as u32;
        let y0 = source.y0.round().clamp(0.0, image.height() as f64) as u32;
        let x1 = source.x1.round().clamp(0.0, image.width() as f64) as u32;
        let y1 = source.y1.round().clamp(0.0, image.height() as f64) as u32;
        if x1 <= x0 || y1 <= y0 {
            return Err(CropError::EmptyCropRegion);
        }

        let width = x1 - x0;
        let height = y1 - y0;
        let stride = image.width() as usize * BYTES_PER_PIXEL;
        let mut data = Vec::with_capacity(width as usize * height as usize * BYTES_PER_PIXEL);
        for row in y0..y1 {
            let start = row as usize * stride + x0 as usize * BYTES_PER_PIXEL;
            let end = start + width as usize * BYTES_PER_PIXEL;
            data.extend_from_slice(&image.data()[start..end]);
        }

        Ok(PixelRegion {
            data,
            width,
            height,
        })
    }
}

/// Pull a rectangle inside `bounds`, shrinking it only if it cannot fit.
fn clamp_into(rect: Rect, bounds: Rect) -> Rect {
    let rect = rect.abs();
    let bounds = bounds.abs();
    let width = rect.width().min(bounds.width());
    let height = rect.height().min(bounds.height());
    let x0 = rect.x0.clamp(bounds.x0, (bounds.x1 - width).max(bounds.x0));
    let y0 = rect.y0.clamp(bounds.y0, (bounds.y1 - height).max(bounds.y0));
    Rect::new(x0, y0, x0 + width, y0 + height)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4x4 test image where pixel (x, y) is [x, y, 0, 255].
    fn checker_image() -> SourceImage {
        let mut data = Vec::with_capacity(4 * 4 * 4);
        for y in 0..4u8 {
            for x in 0..4u8 {
                data.extend_from_slice(&[x, y, 0, 255]);
            }
        }
        SourceImage::from_rgba8(4, 4, data).unwrap()
    }

    #[test]
    fn test_extract_before_attach_fails() {
        let cropper = ImageCropper::new(100.0);
        assert_eq!(cropper.extract().unwrap_err(), CropError::ImageNotReady);
    }

    #[test]
    fn test_extract_zero_area_fails() {
        let mut cropper = ImageCropper::new(8.0);
        cropper.attach_image(checker_image());
        cropper.set_crop_rect(Rect::new(2.0, 2.0, 2.0, 2.0));
        assert_eq!(cropper.extract().unwrap_err(), CropError::EmptyCropRegion);
    }

    #[test]
    fn test_extract_maps_display_to_source() {
        // 4x4 source shown 8 wide: scale factor 2 in both directions.
        let mut cropper = ImageCropper::new(8.0);
        cropper.attach_image(checker_image());
        cropper.set_crop_rect(Rect::new(2.0, 2.0, 6.0, 6.0));

        let region = cropper.extract().unwrap();
        assert_eq!(region.width, 2);
        assert_eq!(region.height, 2);
        // Source pixels (1,1), (2,1), (1,2), (2,2).
        assert_eq!(
            region.data,
            vec![
                1, 1, 0, 255, 2, 1, 0, 255, //
                1, 2, 0, 255, 2, 2, 0, 255,
            ]
        );
    }

    #[test]
    fn test_attach_clamps_crop_rect() {
        let mut cropper = ImageCropper::new(8.0);
        assert_eq!(cropper.crop_rect(), Rect::new(0.0, 0.0, 100.0, 100.0));

        cropper.attach_image(checker_image());
        // The default box cannot fit an 8x8 display; it shrinks to cover it.
        assert_eq!(cropper.crop_rect(), Rect::new(0.0, 0.0, 8.0, 8.0));
    }

    #[test]
    fn test_pointer_drag_moves_crop_box() {
        let mut cropper = ImageCropper::new(400.0);
        let data = vec![0u8; 400 * 400 * 4];
        cropper.attach_image(SourceImage::from_rgba8(400, 400, data).unwrap());

        let handle = cropper.pointer_down(Point::new(50.0, 50.0));
        assert_eq!(handle, Handle::Inside);
        let moved = cropper.pointer_move(Vec2::new(20.0, 10.0));
        assert_eq!(moved, Rect::new(20.0, 10.0, 120.0, 110.0));
        assert_eq!(cropper.pointer_up(), moved);
        assert_eq!(cropper.crop_rect(), moved);
    }

    #[test]
    fn test_drag_is_bounded_by_display_extent() {
        let mut cropper = ImageCropper::new(400.0);
        let data = vec![0u8; 400 * 200 * 4];
        cropper.attach_image(SourceImage::from_rgba8(400, 200, data).unwrap());
        // 400x200 source at width 400: displayed extent is 400x200.

        cropper.pointer_down(Point::new(50.0, 50.0));
        let moved = cropper.pointer_move(Vec2::new(1000.0, 1000.0));
        assert_eq!(moved, Rect::new(300.0, 100.0, 400.0, 200.0));
    }

    #[test]
    fn test_event_stream_drives_cropper() {
        let mut cropper = ImageCropper::new(400.0);
        let data = vec![0u8; 400 * 400 * 4];
        cropper.attach_image(SourceImage::from_rgba8(400, 400, data).unwrap());

        let events = [
            PointerEvent::Down {
                position: Point::new(95.0, 50.0),
            },
            PointerEvent::Move {
                delta: Vec2::new(40.0, 0.0),
            },
            PointerEvent::Up,
        ];
        let mut rect = cropper.crop_rect();
        for event in events {
            rect = cropper.handle_event(event);
        }
        // Touch near the right edge grew the box by the drag distance.
        assert_eq!(rect, Rect::new(0.0, 0.0, 140.0, 100.0));
    }

    #[test]
    fn test_extract_after_drag() {
        let mut cropper = ImageCropper::new(8.0).with_margin(1.0);
        cropper.attach_image(checker_image());
        cropper.set_crop_rect(Rect::new(0.0, 0.0, 4.0, 4.0));

        cropper.pointer_down(Point::new(2.0, 2.0));
        cropper.pointer_move(Vec2::new(4.0, 4.0));
        cropper.pointer_up();
        assert_eq!(cropper.crop_rect(), Rect::new(4.0, 4.0, 8.0, 8.0));

        let region = cropper.extract().unwrap();
        assert_eq!((region.width, region.height), (2, 2));
        // Bottom-right quadrant of the source.
        assert_eq!(
            region.data,
            vec![
                2, 2, 0, 255, 3, 2, 0, 255, //
                2, 3, 0, 255, 3, 3, 0, 255,
            ]
        );
    }
}
