use glam::IVec2;

/// Convert anything that looks like a 2D integer point into a vector.
pub fn v2(p: impl Into<[i32; 2]>) -> IVec2 {
    IVec2::from(p.into())
}

#[cfg(test)]
mod tests {
    use glam::ivec2;

    use super::*;

    #[test]
    fn conversions() {
        assert_eq!(v2([3, -4]), ivec2(3, -4));
        assert_eq!(v2(ivec2(1, 2)), ivec2(1, 2));
    }
}
