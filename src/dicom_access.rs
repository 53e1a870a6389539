//
// dicom_access.rs
// dcm2jpeg
//
// Pulls numeric attributes out of DICOM objects, accepting both single values and multi-valued presets.
//

use dicom_core::Tag;
use dicom_dictionary_std::{tags, StandardDataDictionary};
use dicom_object::{DefaultDicomObject, InMemDicomObject};
use dicom_pixeldata::WindowLevel;
use thiserror::Error;

/// Failure to read an attribute as a number.
#[derive(Debug, Error, PartialEq)]
pub enum AttributeError {
    #[error("attribute {0} has no values")]
    Empty(Tag),
    #[error("attribute {tag} is not numeric: {message}")]
    NotNumeric { tag: Tag, message: String },
}

/// Shape of a numeric attribute: one value, or an ordered list of values
/// (e.g. several window presets stored on the same image).
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Scalar(f64),
    Sequence(Vec<f64>),
}

impl AttributeValue {
    /// Builds the variant from the values decoded for `tag`.
    pub fn from_values(tag: Tag, mut values: Vec<f64>) -> Result<Self, AttributeError> {
        match values.len() {
            0 => Err(AttributeError::Empty(tag)),
            1 => Ok(AttributeValue::Scalar(values.remove(0))),
            _ => Ok(AttributeValue::Sequence(values)),
        }
    }

    /// The scalar value, or the first entry of a sequence.
    pub fn first(&self) -> Option<f64> {
        match self {
            AttributeValue::Scalar(value) => Some(*value),
            AttributeValue::Sequence(values) => values.first().copied(),
        }
    }
}

/// Numeric attribute access shared by file-backed and in-memory objects.
pub trait ElementAccess {
    /// `Ok(None)` when the attribute is absent.
    fn numeric_value(&self, tag: Tag) -> Result<Option<AttributeValue>, AttributeError>;

    /// Resolves the attribute to a single number (first entry for sequences).
    fn scalar(&self, tag: Tag) -> Result<Option<f64>, AttributeError> {
        match self.numeric_value(tag)? {
            Some(value) => value.first().map(Some).ok_or(AttributeError::Empty(tag)),
            None => Ok(None),
        }
    }
}

impl ElementAccess for InMemDicomObject<StandardDataDictionary> {
    fn numeric_value(&self, tag: Tag) -> Result<Option<AttributeValue>, AttributeError> {
        let Ok(element) = self.element(tag) else {
            return Ok(None);
        };
        let values = element
            .to_multi_float64()
            .map_err(|e| AttributeError::NotNumeric {
                tag,
                message: e.to_string(),
            })?;
        AttributeValue::from_values(tag, values).map(Some)
    }
}

impl ElementAccess for DefaultDicomObject {
    fn numeric_value(&self, tag: Tag) -> Result<Option<AttributeValue>, AttributeError> {
        // File objects dereference to their in-memory dataset.
        (**self).numeric_value(tag)
    }
}

/// Window center/width of the object, when both attributes are present.
pub fn read_window<T: ElementAccess>(obj: &T) -> Result<Option<WindowLevel>, AttributeError> {
    let center = obj.scalar(tags::WINDOW_CENTER)?;
    let width = obj.scalar(tags::WINDOW_WIDTH)?;

    Ok(match (center, width) {
        (Some(center), Some(width)) => Some(WindowLevel { center, width }),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicom_core::{DataElement, PrimitiveValue, VR};

    /// Values are backslash separated, as they are stored in the file.
    fn object_with(elements: &[(Tag, &str)]) -> InMemDicomObject<StandardDataDictionary> {
        let mut obj = InMemDicomObject::new_empty_with_dict(StandardDataDictionary);
        for (tag, value) in elements {
            let strs = value.split('\\').map(str::to_string).collect();
            obj.put(DataElement::new(*tag, VR::DS, PrimitiveValue::Strs(strs)));
        }
        obj
    }

    #[test]
    fn sequence_yields_first_entry() {
        let value = AttributeValue::from_values(tags::WINDOW_CENTER, vec![150.0, 200.0, -3.5])
            .expect("sequence");
        assert_eq!(value, AttributeValue::Sequence(vec![150.0, 200.0, -3.5]));
        assert_eq!(value.first(), Some(150.0));
    }

    #[test]
    fn single_value_is_scalar() {
        let value = AttributeValue::from_values(tags::WINDOW_WIDTH, vec![400.0]).expect("scalar");
        assert_eq!(value, AttributeValue::Scalar(400.0));
        assert_eq!(value.first(), Some(400.0));
    }

    #[test]
    fn no_values_is_an_error() {
        assert_eq!(
            AttributeValue::from_values(tags::WINDOW_WIDTH, Vec::new()),
            Err(AttributeError::Empty(tags::WINDOW_WIDTH))
        );
    }

    #[test]
    fn multi_valued_window_uses_first_preset() {
        let obj = object_with(&[
            (tags::WINDOW_CENTER, "150\\200"),
            (tags::WINDOW_WIDTH, "300\\100"),
        ]);
        let window = read_window(&obj).expect("window").expect("present");
        assert_eq!(window.center, 150.0);
        assert_eq!(window.width, 300.0);
    }

    #[test]
    fn window_needs_both_attributes() {
        let obj = object_with(&[(tags::WINDOW_CENTER, "40")]);
        assert!(read_window(&obj).expect("window").is_none());

        let obj = object_with(&[]);
        assert!(read_window(&obj).expect("window").is_none());
    }

    #[test]
    fn non_numeric_attribute_is_rejected() {
        let obj = object_with(&[
            (tags::WINDOW_CENTER, "soft tissue"),
            (tags::WINDOW_WIDTH, "400"),
        ]);
        assert!(matches!(
            read_window(&obj),
            Err(AttributeError::NotNumeric { .. })
        ));
    }
}
