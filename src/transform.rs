/// The eight buffer orientations: four rotations, optionally preceded by a
/// flip around the vertical axis.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum Transform {
    #[default]
    None,
    Rotate90,
    Rotate180,
    Rotate270,
    Flip,
    FlipRotate90,
    FlipRotate180,
    FlipRotate270,
}

impl Transform {
    /// Returns whether the transform swaps the width and height of a
    /// buffer.
    pub fn is_transposed(self) -> bool {
        matches!(
            self,
            Transform::Rotate90
                | Transform::Rotate270
                | Transform::FlipRotate90
                | Transform::FlipRotate270
        )
    }
}
