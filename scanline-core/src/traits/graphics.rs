//! Graphics region content trait

/// Source of precomputed graphics region pixel bytes
///
/// Content generation is an external collaborator; the renderer only
/// streams whatever bytes the source holds for the requested line.
/// `region_line` is relative to the top of the graphics region.
pub trait GraphicsSource {
    /// Pixel bytes for one region line, left to right
    fn line(&self, region_line: u16) -> &[u8];
}
