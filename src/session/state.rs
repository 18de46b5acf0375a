use rand::Rng;

use crate::annotations::handlers::step_prompt;
use crate::annotations::state::AnnotationMachine;
use crate::capture::image::PhotoImage;
use crate::commentary;
use crate::domain::DisplayMapping;
use crate::estimate::{self, EstimateError};

/// Shown while the estimate is held back
pub const THINKING: &str = "Wait...I am thinking...";
/// Shown before any photo is loaded
pub const PROMPT_OPEN: &str = "Open a photo of the clothes pile to begin.";

/// Everything the measuring window shows for the current photo
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub photo: Option<PhotoImage>,
    /// Fit of the photo into the display box
    pub mapping: Option<DisplayMapping>,
    pub annotation: AnnotationMachine,
    /// Raw reference height text, kept across photos
    pub reference_input: String,
    /// Status line under the photo
    pub message: String,
    /// A calculation is pending; Calculate is disabled
    pub thinking: bool,
}

impl Session {
    pub fn new(reference_input: String) -> Self {
        Self {
            reference_input,
            message: PROMPT_OPEN.to_string(),
            ..Default::default()
        }
    }

    /// Replace the photo and restart the annotation
    ///
    /// A pending calculation is not cancelled; its result still arrives.
    pub fn load_photo(&mut self, photo: PhotoImage, max_width: f32, max_height: f32) {
        self.mapping = Some(DisplayMapping::fit(photo.size(), max_width, max_height));
        self.photo = Some(photo);
        self.annotation.image_loaded();
        self.message = step_prompt(self.annotation.step()).to_string();
    }

    pub fn can_calculate(&self) -> bool {
        !self.thinking
    }

    /// Validate the inputs and compute the estimate, entering the thinking state
    ///
    /// On refusal only the status line changes.
    pub fn begin_calculation(&mut self) -> Result<f64, EstimateError> {
        let result = estimate::estimate_from_inputs(
            self.annotation.reference(),
            self.annotation.pile(),
            &self.reference_input,
        );
        match result {
            Ok(_) => {
                self.thinking = true;
                self.message = THINKING.to_string();
            }
            Err(err) => {
                log::debug!("Calculation refused: {err}");
                self.message = err.to_string();
            }
        }
        result
    }

    /// Show the estimate with a comment for its height bucket
    pub fn finish_calculation<R: Rng + ?Sized>(&mut self, height_cm: f64, rng: &mut R) {
        self.thinking = false;
        self.message = format!(
            "Estimated pile height: {:.2} cm.\n{}",
            height_cm,
            commentary::height_comment(height_cm, rng)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commentary::HeightBucket;
    use crate::domain::Rect;
    use image::RgbaImage;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn photo(w: u32, h: u32) -> PhotoImage {
        PhotoImage::from_rgba(RgbaImage::new(w, h))
    }

    fn drawn_session(reference_input: &str) -> Session {
        let mut session = Session::new(reference_input.to_string());
        session.load_photo(photo(1200, 800), 600.0, 400.0);
        session.annotation.start((0.0, 0.0));
        session.annotation.end((10.0, 100.0));
        session.annotation.start((0.0, 0.0));
        session.annotation.end((10.0, 250.0));
        session
    }

    #[test]
    fn test_load_photo_fits_and_resets() {
        let mut session = drawn_session("30");
        session.load_photo(photo(1200, 800), 600.0, 400.0);

        let mapping = session.mapping.unwrap();
        assert_eq!(mapping.display_size, (600.0, 400.0));
        assert_eq!(session.annotation.reference(), None);
        assert_eq!(session.reference_input, "30");
        assert_eq!(session.message, step_prompt(session.annotation.step()));
    }

    #[test]
    fn test_begin_calculation_enters_thinking() {
        let mut session = drawn_session("30");
        assert_eq!(session.begin_calculation(), Ok(75.0));
        assert!(session.thinking);
        assert!(!session.can_calculate());
        assert_eq!(session.message, THINKING);
    }

    #[test]
    fn test_refusals_leave_state_untouched() {
        let mut session = drawn_session("abc");
        let annotation = session.annotation.clone();
        assert_eq!(
            session.begin_calculation(),
            Err(EstimateError::InvalidReferenceHeight)
        );
        assert_eq!(session.message, "Enter valid reference height.");
        assert!(!session.thinking);
        assert_eq!(session.annotation, annotation);

        let mut session = Session::new("30".into());
        session.load_photo(photo(100, 100), 600.0, 400.0);
        assert_eq!(
            session.begin_calculation(),
            Err(EstimateError::MissingRectangles)
        );
        assert_eq!(session.message, "Please draw/select both rectangles.");
    }

    #[test]
    fn test_zero_height_reference_is_refused() {
        let mut session = Session::new("30".into());
        session.load_photo(photo(100, 100), 600.0, 400.0);
        session.annotation.start((5.0, 5.0));
        session.annotation.end((5.0, 5.0));
        session.annotation.start((0.0, 0.0));
        session.annotation.end((10.0, 40.0));
        assert_eq!(session.annotation.reference(), Some(Rect::new(5.0, 5.0, 0.0, 0.0)));
        assert_eq!(
            session.begin_calculation(),
            Err(EstimateError::DegenerateReference)
        );
        assert!(!session.thinking);
    }

    #[test]
    fn test_finish_calculation_message() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut session = drawn_session("30");
        let height = session.begin_calculation().unwrap();
        session.finish_calculation(height, &mut rng);

        assert!(!session.thinking);
        let (first, comment) = session.message.split_once('\n').unwrap();
        assert_eq!(first, "Estimated pile height: 75.00 cm.");
        assert!(HeightBucket::High.pool().contains(&comment));
    }
}
