//!
//! Convenience adaptors over [`crate::transform::transform`] for the
//! coordinate storage shapes callers actually have lying around: a bare
//! tuple, an `(x, y)` pair, or a slice of points to transform in bulk.
//!
use crate::errors::Result;
use crate::proj::Proj;
use crate::transform::{transform, Transform};

impl Transform for (f64, f64, f64) {
    fn transform_coordinates<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(f64, f64, f64) -> Result<(f64, f64, f64)>,
    {
        (self.0, self.1, self.2) = f(self.0, self.1, self.2)?;
        Ok(())
    }
}

/// Transform a single `(x, y, z)` point.
pub fn transform_point_3d(src: &Proj, dst: &Proj, pt: (f64, f64, f64)) -> Result<(f64, f64, f64)> {
    let mut pt_out = pt;
    transform(src, dst, &mut pt_out, true)?;
    Ok(pt_out)
}

/// Transform a single `(x, y)` point, `z` fixed at 0.
#[inline(always)]
pub fn transform_point_2d(src: &Proj, dst: &Proj, pt: (f64, f64)) -> Result<(f64, f64)> {
    transform_point_3d(src, dst, (pt.0, pt.1, 0.)).map(|(x, y, _)| (x, y))
}

/// Transform `x`, `y`, `z` values given as separate arguments.
#[inline(always)]
pub fn transform_xyz(src: &Proj, dst: &Proj, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
    transform_point_3d(src, dst, (x, y, z))
}

/// Transform `x`, `y` values given as separate arguments, `z` fixed at 0.
#[inline(always)]
pub fn transform_xy(src: &Proj, dst: &Proj, x: f64, y: f64) -> Result<(f64, f64)> {
    transform_xyz(src, dst, x, y, 0.).map(|(x, y, _)| (x, y))
}

impl Transform for [(f64, f64, f64)] {
    fn transform_coordinates<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(f64, f64, f64) -> Result<(f64, f64, f64)>,
    {
        self.iter_mut().try_for_each(|(x, y, z)| {
            (*x, *y, *z) = f(*x, *y, *z)?;
            Ok(())
        })
    }
}

/// Transform a slice of `(x, y, z)` points in place.
#[inline(always)]
pub fn transform_point_array(src: &Proj, dst: &Proj, pts: &mut [(f64, f64, f64)]) -> Result<()> {
    transform(src, dst, pts, true)
}
