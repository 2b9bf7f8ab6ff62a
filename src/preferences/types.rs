//! Fit preference types

use serde::{Deserialize, Serialize};

/// Garment sizes the storefront carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Size {
    L,
    XL,
    XXL,
}

impl Size {
    /// The wire representation used in queries and the profile mirror
    pub fn as_str(&self) -> &'static str {
        match self {
            Size::L => "L",
            Size::XL => "XL",
            Size::XXL => "XXL",
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Skin tones used to curate the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinTone {
    Fair,
    Medium,
    Dark,
}

impl SkinTone {
    /// The wire representation used in queries and the profile mirror
    pub fn as_str(&self) -> &'static str {
        match self {
            SkinTone::Fair => "fair",
            SkinTone::Medium => "medium",
            SkinTone::Dark => "dark",
        }
    }
}

impl std::fmt::Display for SkinTone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared fit preference.
///
/// Created empty on first visit and only ever overwritten through an explicit
/// save. Serializes with the backend's casing: `size`, `skinTone`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    /// Declared garment size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,

    /// Declared skin tone
    #[serde(rename = "skinTone", skip_serializing_if = "Option::is_none")]
    pub skin_tone: Option<SkinTone>,
}

impl Preference {
    /// A preference with both fields declared
    pub fn new(size: Size, skin_tone: SkinTone) -> Self {
        Self {
            size: Some(size),
            skin_tone: Some(skin_tone),
        }
    }

    /// True when nothing has been declared yet
    pub fn is_empty(&self) -> bool {
        self.size.is_none() && self.skin_tone.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_backend_casing() {
        let preference = Preference::new(Size::L, SkinTone::Fair);
        let json = serde_json::to_string(&preference).unwrap();
        assert_eq!(json, r#"{"size":"L","skinTone":"fair"}"#);
    }

    #[test]
    fn unset_fields_are_omitted() {
        let preference = Preference {
            size: Some(Size::XXL),
            skin_tone: None,
        };
        let json = serde_json::to_string(&preference).unwrap();
        assert_eq!(json, r#"{"size":"XXL"}"#);

        let empty = serde_json::to_string(&Preference::default()).unwrap();
        assert_eq!(empty, "{}");
    }

    #[test]
    fn parses_partial_documents() {
        let preference: Preference = serde_json::from_str(r#"{"skinTone":"dark"}"#).unwrap();
        assert_eq!(preference.size, None);
        assert_eq!(preference.skin_tone, Some(SkinTone::Dark));
        assert!(!preference.is_empty());
    }

    #[test]
    fn rejects_unknown_values() {
        assert!(serde_json::from_str::<Preference>(r#"{"size":"S"}"#).is_err());
        assert!(serde_json::from_str::<Preference>(r#"{"skinTone":"olive"}"#).is_err());
    }

    #[test]
    fn empty_means_both_unset() {
        assert!(Preference::default().is_empty());
        assert!(!Preference::new(Size::L, SkinTone::Medium).is_empty());
    }
}
