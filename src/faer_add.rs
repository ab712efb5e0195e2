use crate::Float;
use faer::Mat;

pub fn linspace(a: Float, size: usize, h: Float) -> Mat<Float> {
    Mat::<Float>::from_fn(size, 1, |i, _| a + h * i as Float)
}

pub fn apply_func(m: &Mat<Float>, f: impl Fn(Float) -> Float) -> Mat<Float> {
    Mat::from_fn(m.nrows(), m.ncols(), |i, j| f(m[(i, j)]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_starts_at_lower_bound() {
        let m = linspace(0.0, 4, 0.5);
        assert_eq!(m.nrows(), 4);
        assert_eq!(m.ncols(), 1);
        assert_eq!(m[(0, 0)], 0.0);
        assert_eq!(m[(3, 0)], 1.5);
    }

    #[test]
    fn apply_func_is_pointwise() {
        let m = linspace(1.0, 3, 1.0);
        let sq = apply_func(&m, |x| x * x);
        assert_eq!(sq[(0, 0)], 1.0);
        assert_eq!(sq[(1, 0)], 4.0);
        assert_eq!(sq[(2, 0)], 9.0);
    }
}
