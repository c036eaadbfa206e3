use navni::Rgba;

/// Trait for buffer cells.
///
/// Assumption: `<T: Pixel>::default().is_transparent()` is always true.
pub trait Pixel:
    Copy + Default + Eq + PartialEq + From<Rgba> + 'static
{
    fn is_transparent(&self) -> bool;
}

impl Pixel for Rgba {
    fn is_transparent(&self) -> bool {
        self.a == 0x00
    }
}
