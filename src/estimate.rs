//! Pile height estimation from a reference rectangle of known height

use std::fmt;

use crate::domain::Rect;

/// Why an estimate could not be produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateError {
    /// Reference height is missing, not a number, not positive or not finite
    InvalidReferenceHeight,
    /// One of the two rectangles has not been drawn yet
    MissingRectangles,
    /// Reference rectangle has zero height, so no scale can be derived
    DegenerateReference,
}

impl fmt::Display for EstimateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidReferenceHeight => write!(f, "Enter valid reference height."),
            Self::MissingRectangles => write!(f, "Please draw/select both rectangles."),
            Self::DegenerateReference => {
                write!(f, "Reference rectangle has no height; redraw it.")
            }
        }
    }
}

impl std::error::Error for EstimateError {}

/// Parse the user's reference height in centimeters
pub fn parse_reference_height(input: &str) -> Result<f64, EstimateError> {
    let value = input
        .trim()
        .parse::<f64>()
        .map_err(|_| EstimateError::InvalidReferenceHeight)?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EstimateError::InvalidReferenceHeight)
    }
}

/// Round half away from zero to 2 decimals
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Estimate the pile height in centimeters
///
/// `pile.height * (reference_height_cm / reference.height)`, rounded to 2 decimals.
pub fn estimate_pile_height(
    reference: &Rect,
    pile: &Rect,
    reference_height_cm: f64,
) -> Result<f64, EstimateError> {
    if !(reference_height_cm.is_finite() && reference_height_cm > 0.0) {
        return Err(EstimateError::InvalidReferenceHeight);
    }
    if reference.height == 0.0 {
        return Err(EstimateError::DegenerateReference);
    }

    let scale = reference_height_cm / f64::from(reference.height);
    let height = round2(f64::from(pile.height) * scale);
    if height.is_finite() {
        Ok(height)
    } else {
        Err(EstimateError::DegenerateReference)
    }
}

/// Validate the session inputs and estimate in one step
///
/// Rectangles are checked before the reference height.
pub fn estimate_from_inputs(
    reference: Option<Rect>,
    pile: Option<Rect>,
    reference_input: &str,
) -> Result<f64, EstimateError> {
    let (Some(reference), Some(pile)) = (reference, pile) else {
        return Err(EstimateError::MissingRectangles);
    };
    let reference_height_cm = parse_reference_height(reference_input)?;
    estimate_pile_height(&reference, &pile, reference_height_cm)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_with_height(height: f32) -> Rect {
        Rect::new(0.0, 0.0, 10.0, height)
    }

    #[test]
    fn test_linear_scale() {
        let reference = rect_with_height(100.0);
        let pile = rect_with_height(250.0);
        assert_eq!(estimate_pile_height(&reference, &pile, 30.0), Ok(75.0));
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        let reference = rect_with_height(3.0);
        let pile = rect_with_height(1.0);
        assert_eq!(estimate_pile_height(&reference, &pile, 10.0), Ok(3.33));

        let reference = rect_with_height(3.0);
        let pile = rect_with_height(2.0);
        assert_eq!(estimate_pile_height(&reference, &pile, 10.0), Ok(6.67));
    }

    #[test]
    fn test_deterministic() {
        let reference = rect_with_height(123.0);
        let pile = rect_with_height(321.0);
        let a = estimate_pile_height(&reference, &pile, 17.5);
        let b = estimate_pile_height(&reference, &pile, 17.5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_height_reference_is_refused() {
        let reference = rect_with_height(0.0);
        let pile = rect_with_height(50.0);
        assert_eq!(
            estimate_pile_height(&reference, &pile, 30.0),
            Err(EstimateError::DegenerateReference)
        );
    }

    #[test]
    fn test_zero_height_pile_is_zero() {
        let reference = rect_with_height(50.0);
        let pile = rect_with_height(0.0);
        assert_eq!(estimate_pile_height(&reference, &pile, 30.0), Ok(0.0));
    }

    #[test]
    fn test_parse_reference_height() {
        assert_eq!(parse_reference_height(" 29.7 "), Ok(29.7));
        assert_eq!(
            parse_reference_height(""),
            Err(EstimateError::InvalidReferenceHeight)
        );
        assert_eq!(
            parse_reference_height("abc"),
            Err(EstimateError::InvalidReferenceHeight)
        );
        assert_eq!(
            parse_reference_height("0"),
            Err(EstimateError::InvalidReferenceHeight)
        );
        assert_eq!(
            parse_reference_height("-4"),
            Err(EstimateError::InvalidReferenceHeight)
        );
        assert_eq!(
            parse_reference_height("inf"),
            Err(EstimateError::InvalidReferenceHeight)
        );
        assert_eq!(
            parse_reference_height("NaN"),
            Err(EstimateError::InvalidReferenceHeight)
        );
    }

    #[test]
    fn test_inputs_missing_rectangle_checked_first() {
        let reference = Some(rect_with_height(10.0));
        assert_eq!(
            estimate_from_inputs(reference, None, "not a number"),
            Err(EstimateError::MissingRectangles)
        );
        assert_eq!(
            estimate_from_inputs(None, reference, "20"),
            Err(EstimateError::MissingRectangles)
        );
    }

    #[test]
    fn test_inputs_happy_path() {
        let reference = Some(rect_with_height(40.0));
        let pile = Some(rect_with_height(60.0));
        assert_eq!(estimate_from_inputs(reference, pile, "20"), Ok(30.0));
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        assert_eq!(
            EstimateError::InvalidReferenceHeight.to_string(),
            "Enter valid reference height."
        );
        assert_eq!(
            EstimateError::MissingRectangles.to_string(),
            "Please draw/select both rectangles."
        );
    }
}
