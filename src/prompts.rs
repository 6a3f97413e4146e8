/// Face-centering and square outpainting instruction sent with every image.
///
/// Keeps a safe margin around the head so a later circular crop does not clip it.
pub const FACE_CENTER: &str = include_str!("../data/prompts/face_center.txt");

/// The instruction text as it goes on the wire.
pub fn face_center() -> &'static str {
    FACE_CENTER.trim()
}
