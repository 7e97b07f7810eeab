/// Single coordinate axis used for the board side and for positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mult_covers_full_coord_range() {
        assert_eq!(mult(16, 16), 256);
        assert_eq!(mult(Coord::MAX, Coord::MAX), 65025);
    }

    #[test]
    fn nd_index_keeps_row_major_order() {
        assert_eq!((3, 7).to_nd_index(), [3, 7]);
    }
}
