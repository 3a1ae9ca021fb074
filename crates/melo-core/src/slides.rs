use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::products::{CarouselSlide, SlideKind};
use crate::ConfigError;

/// A static informational slide configured next to the deployment rather
/// than fetched from the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct InfoSlideConfig {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub cta_label: Option<String>,
    #[serde(default)]
    pub cta_href: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
}

impl InfoSlideConfig {
    /// Converts to a slide. `position` is used when `order` is absent.
    #[must_use]
    pub fn to_slide(&self, position: usize) -> CarouselSlide {
        CarouselSlide {
            kind: SlideKind::Info,
            title: self.title.clone(),
            subtitle: self.subtitle.clone().unwrap_or_default(),
            cta_label: self
                .cta_label
                .clone()
                .unwrap_or_else(|| "See more".to_string()),
            cta_href: self.cta_href.clone().unwrap_or_else(|| "#".to_string()),
            order: self
                .order
                .unwrap_or_else(|| i64::try_from(position).unwrap_or(i64::MAX)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SlidesFile {
    pub slides: Vec<InfoSlideConfig>,
}

impl SlidesFile {
    #[must_use]
    pub fn to_slides(&self) -> Vec<CarouselSlide> {
        self.slides
            .iter()
            .enumerate()
            .map(|(i, s)| s.to_slide(i))
            .collect()
    }
}

/// Load and validate the info slides from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_info_slides(path: &Path) -> Result<SlidesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SlidesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let slides_file: SlidesFile = serde_yaml::from_str(&content)?;

    validate_slides(&slides_file)?;

    Ok(slides_file)
}

fn validate_slides(slides_file: &SlidesFile) -> Result<(), ConfigError> {
    let mut seen_orders = HashSet::new();

    for slide in &slides_file.slides {
        if slide.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "slide title must be non-empty".to_string(),
            ));
        }

        if let Some(order) = slide.order {
            if !seen_orders.insert(order) {
                return Err(ConfigError::Validation(format!(
                    "duplicate slide order {order} (slide '{}')",
                    slide.title
                )));
            }
        }
    }

    Ok(())
}
