//! OCR fallback for pages without reliable native text.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrBackend;

use image::DynamicImage;

use crate::error::OcrError;

/// Result type for OCR operations.
pub type Result<T> = std::result::Result<T, OcrError>;

/// Trait for OCR backends.
///
/// The pipeline depends on this seam only; the default implementation is
/// [`PureOcrBackend`] behind the `native` feature, and tests inject fakes.
/// Backends are owned by one pipeline and used from one thread; no
/// `Send`/`Sync` bound is required (the engine's inference plan caches
/// are thread-local).
pub trait OcrBackend {
    /// Recognize the text in a page image, in reading order.
    fn recognize(&self, image: &DynamicImage) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    // Engines with thread-local state (plan caches behind RefCell) must
    // be able to implement the trait.
    struct LocalStateBackend {
        calls: Rc<RefCell<u32>>,
    }

    impl OcrBackend for LocalStateBackend {
        fn recognize(&self, _image: &DynamicImage) -> Result<String> {
            *self.calls.borrow_mut() += 1;
            Ok("text".to_string())
        }
    }

    #[test]
    fn test_backend_with_thread_local_state() {
        let calls = Rc::new(RefCell::new(0));
        let backend: Box<dyn OcrBackend> = Box::new(LocalStateBackend {
            calls: Rc::clone(&calls),
        });

        let image = DynamicImage::new_rgb8(1, 1);
        assert_eq!(backend.recognize(&image).unwrap(), "text");
        assert_eq!(*calls.borrow(), 1);
    }
}
