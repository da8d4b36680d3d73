use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Shown instead of a template preview whose image failed to load.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://via.placeholder.com/500x300?text=Plantilla+no+disponible";

/// Years-of-experience bucket. `All` is both a filter sentinel and a tag
/// carried by every built-in template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    #[default]
    All,
    None,
    ZeroToThree,
    ThreeToFive,
    FiveToTen,
    TenPlus,
}

impl ExperienceLevel {
    pub const CHOICES: [ExperienceLevel; 6] = [
        ExperienceLevel::All,
        ExperienceLevel::None,
        ExperienceLevel::ZeroToThree,
        ExperienceLevel::ThreeToFive,
        ExperienceLevel::FiveToTen,
        ExperienceLevel::TenPlus,
    ];

    /// Label shown in the experience selector.
    pub fn label(&self) -> &'static str {
        match self {
            ExperienceLevel::All => "Todas las plantillas",
            ExperienceLevel::None => "Ninguna experiencia",
            ExperienceLevel::ZeroToThree => "0-3 años",
            ExperienceLevel::ThreeToFive => "3-5 años",
            ExperienceLevel::FiveToTen => "5-10 años",
            ExperienceLevel::TenPlus => "10+ años",
        }
    }

    /// Short tag form.
    pub fn code(&self) -> &'static str {
        match self {
            ExperienceLevel::All => "todas",
            ExperienceLevel::None => "ninguna",
            ExperienceLevel::ZeroToThree => "0-3",
            ExperienceLevel::ThreeToFive => "3-5",
            ExperienceLevel::FiveToTen => "5-10",
            ExperienceLevel::TenPlus => "10+",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        let alias = match needle.to_lowercase().as_str() {
            "all" => Some(ExperienceLevel::All),
            "none" => Some(ExperienceLevel::None),
            _ => None,
        };
        alias
            .or_else(|| {
                ExperienceLevel::CHOICES
                    .iter()
                    .copied()
                    .find(|level| level.label() == needle || level.code() == needle)
            })
            .ok_or_else(|| format!("unknown experience level '{s}'"))
    }
}

/// Photo filter. Defaults to templates that carry a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhotoFilter {
    #[default]
    WithPhoto,
    WithoutPhoto,
}

impl PhotoFilter {
    pub fn matches(&self, has_photo: bool) -> bool {
        match self {
            PhotoFilter::WithPhoto => has_photo,
            PhotoFilter::WithoutPhoto => !has_photo,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PhotoFilter::WithPhoto => "Con foto",
            PhotoFilter::WithoutPhoto => "Sin foto",
        }
    }
}

impl FromStr for PhotoFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "con" | "con foto" | "with-photo" => Ok(PhotoFilter::WithPhoto),
            "sin" | "sin foto" | "without-photo" => Ok(PhotoFilter::WithoutPhoto),
            _ => Err(format!("unknown photo filter '{s}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDescriptor {
    pub id: u32,
    pub title: &'static str,
    pub color: &'static str,
    pub has_photo: bool,
    pub image_url: &'static str,
    pub experience_levels: &'static [ExperienceLevel],
}

impl TemplateDescriptor {
    pub fn has_level(&self, level: ExperienceLevel) -> bool {
        self.experience_levels.contains(&level)
    }

    /// The preview image to display, falling back to the placeholder when
    /// the template's own image could not be loaded.
    pub fn image_or_placeholder(&self, loaded: bool) -> &'static str {
        if loaded {
            self.image_url
        } else {
            PLACEHOLDER_IMAGE_URL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_parses_labels_and_codes() {
        assert_eq!("10+ años".parse::<ExperienceLevel>(), Ok(ExperienceLevel::TenPlus));
        assert_eq!("10+".parse::<ExperienceLevel>(), Ok(ExperienceLevel::TenPlus));
        assert_eq!("Todas las plantillas".parse::<ExperienceLevel>(), Ok(ExperienceLevel::All));
        assert_eq!("all".parse::<ExperienceLevel>(), Ok(ExperienceLevel::All));
        assert_eq!("ninguna".parse::<ExperienceLevel>(), Ok(ExperienceLevel::None));
        assert!("20+".parse::<ExperienceLevel>().is_err());
    }

    #[test]
    fn test_photo_filter_parses_original_values() {
        assert_eq!("con".parse::<PhotoFilter>(), Ok(PhotoFilter::WithPhoto));
        assert_eq!("sin".parse::<PhotoFilter>(), Ok(PhotoFilter::WithoutPhoto));
        assert_eq!("without-photo".parse::<PhotoFilter>(), Ok(PhotoFilter::WithoutPhoto));
        assert!("maybe".parse::<PhotoFilter>().is_err());
    }

    #[test]
    fn test_photo_filter_matches() {
        assert!(PhotoFilter::WithPhoto.matches(true));
        assert!(!PhotoFilter::WithPhoto.matches(false));
        assert!(PhotoFilter::WithoutPhoto.matches(false));
    }

    #[test]
    fn test_image_fallback() {
        let t = TemplateDescriptor {
            id: 9,
            title: "Prueba",
            color: "bg-gray-800",
            has_photo: false,
            image_url: "https://example.com/t.png",
            experience_levels: &[ExperienceLevel::All],
        };
        assert_eq!(t.image_or_placeholder(true), "https://example.com/t.png");
        assert_eq!(t.image_or_placeholder(false), PLACEHOLDER_IMAGE_URL);
    }
}
