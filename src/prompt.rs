use crate::models::AspectRatio;

pub const IDENTITY_DIRECTIVE: &str = "A photorealistic couple photoshoot. \
Use the face of the first subject from the first image provided and the face of the second subject from the second image provided. \
Faithfully reproduce both faces with 100% accuracy, with natural skin tones and expressions and no stylization or drift in facial features.";

pub const QUALITY_DIRECTIVE: &str = "Blend the faces seamlessly onto the new bodies and scene, \
with consistent lighting, sharp focus and professional photographic quality.";

/// Builds the full instruction sent alongside the two reference images.
pub fn compose(scene: &str, aspect_ratio: AspectRatio) -> String {
    format!(
        "{} Theme: {}. {} The final image should be in a {} aspect ratio.",
        IDENTITY_DIRECTIVE,
        scene.trim().trim_end_matches('.'),
        QUALITY_DIRECTIVE,
        aspect_ratio.label()
    )
}
