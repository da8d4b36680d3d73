//! Template catalog — the fixed set of visual CV templates and the two
//! independent filters (experience bucket, photo) applied to it.

use serde::{Deserialize, Serialize};

use crate::models::template::ExperienceLevel::{
    FiveToTen, None as NoExperience, TenPlus, ThreeToFive, ZeroToThree,
};
use crate::models::template::{ExperienceLevel, PhotoFilter, TemplateDescriptor};

const ALL: ExperienceLevel = ExperienceLevel::All;

static BUILTIN_TEMPLATES: [TemplateDescriptor; 6] = [
    TemplateDescriptor {
        id: 1,
        title: "Innovador",
        color: "bg-blue-600",
        has_photo: true,
        image_url: "https://i.postimg.cc/HnS55MrJ/Screenshot-2025-04-04-212046.png",
        experience_levels: &[ALL, NoExperience, ZeroToThree],
    },
    TemplateDescriptor {
        id: 2,
        title: "Ejecutivo",
        color: "bg-indigo-700",
        has_photo: true,
        image_url: "https://i.postimg.cc/QVGDf49v/Screenshot-2025-04-04-215103.png",
        experience_levels: &[ALL, ThreeToFive, TenPlus],
    },
    TemplateDescriptor {
        id: 3,
        title: "Creativo",
        color: "bg-purple-700",
        has_photo: false,
        image_url: "https://i.postimg.cc/gcBnVmM6/Sin-foto.jpg",
        experience_levels: &[ALL, ZeroToThree, FiveToTen],
    },
    TemplateDescriptor {
        id: 4,
        title: "Minimalista",
        color: "bg-gray-800",
        has_photo: false,
        image_url: "https://i.postimg.cc/GpsZ5JrC/Screenshot-2025-04-04-224750.png",
        experience_levels: &[ALL, NoExperience, TenPlus],
    },
    TemplateDescriptor {
        id: 5,
        title: "Técnico",
        color: "bg-green-700",
        has_photo: true,
        image_url: "https://i.postimg.cc/HnS55MrJ/Screenshot-2025-04-04-212046.png",
        experience_levels: &[ALL, ZeroToThree, ThreeToFive],
    },
    TemplateDescriptor {
        id: 6,
        title: "Clásico",
        color: "bg-blue-900",
        has_photo: true,
        image_url: "https://i.postimg.cc/QVGDf49v/Screenshot-2025-04-04-215103.png",
        experience_levels: &[ALL, FiveToTen, TenPlus],
    },
];

/// The catalog shipped with the application. Read-only for the whole process.
pub fn builtin_catalog() -> &'static [TemplateDescriptor] {
    &BUILTIN_TEMPLATES
}

/// Returns the templates matching both filters, in catalog order.
pub fn filter(
    catalog: &[TemplateDescriptor],
    experience: ExperienceLevel,
    photo: PhotoFilter,
) -> Vec<&TemplateDescriptor> {
    catalog
        .iter()
        .filter(|t| experience == ExperienceLevel::All || t.has_level(experience))
        .filter(|t| photo.matches(t.has_photo))
        .collect()
}

/// Looks up the template chosen by the user.
pub fn find(catalog: &[TemplateDescriptor], id: u32) -> Option<&TemplateDescriptor> {
    catalog.iter().find(|t| t.id == id)
}

/// The gallery's current filter choices. `Default` is the reset target:
/// all experience levels, templates with photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub experience: ExperienceLevel,
    pub photo: PhotoFilter,
}

impl FilterState {
    pub fn new(experience: ExperienceLevel, photo: PhotoFilter) -> Self {
        Self { experience, photo }
    }

    /// Restores both filters to their defaults. Offered to the user when
    /// the current choices match nothing.
    pub fn reset(&mut self) {
        *self = FilterState::default();
    }

    pub fn apply<'a>(&self, catalog: &'a [TemplateDescriptor]) -> Vec<&'a TemplateDescriptor> {
        filter(catalog, self.experience, self.photo)
    }
}
