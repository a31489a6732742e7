use crate::ImageFileDirectory;

/// Affine transformation values.
///
/// Maps pixel `(col, row)` to model `(x, y)` as `x = a * col + b * row + c` and
/// `y = d * col + e * row + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform(f64, f64, f64, f64, f64, f64);

impl AffineTransform {
    /// Construct from the six coefficients in GDAL order.
    pub fn new(a: f64, b: f64, xoff: f64, d: f64, e: f64, yoff: f64) -> Self {
        Self(a, b, xoff, d, e, yoff)
    }

    /// Pixel width.
    pub fn a(&self) -> f64 {
        self.0
    }

    /// Row rotation.
    pub fn b(&self) -> f64 {
        self.1
    }

    /// X offset of the upper left corner.
    pub fn c(&self) -> f64 {
        self.2
    }

    /// Column rotation.
    pub fn d(&self) -> f64 {
        self.3
    }

    /// Pixel height, negative for north-up images.
    pub fn e(&self) -> f64 {
        self.4
    }

    /// Y offset of the upper left corner.
    pub fn f(&self) -> f64 {
        self.5
    }

    /// Model coordinates of the pixel corner `(col, row)`.
    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        (
            self.0 * col + self.1 * row + self.2,
            self.3 * col + self.4 * row + self.5,
        )
    }

    /// Construct a new Affine Transform from the IFD
    ///
    /// Uses ModelPixelScale with ModelTiepoint when both are present, and the ModelTransformation
    /// matrix otherwise.
    pub fn from_ifd(ifd: &ImageFileDirectory) -> Option<Self> {
        if let (Some(model_pixel_scale), Some(model_tiepoint)) =
            (ifd.model_pixel_scale(), ifd.model_tiepoint())
        {
            let [sx, sy, ..] = *model_pixel_scale else {
                return None;
            };
            let [_, _, _, tx, ty, ..] = *model_tiepoint else {
                return None;
            };
            Some(Self::new(sx, 0.0, tx, 0.0, -sy, ty))
        } else if let Some(m) = ifd.model_transformation() {
            // Row-major 4x4, only the planar part is used
            let [a, b, _, c, d, e, _, f, ..] = *m else {
                return None;
            };
            if m.len() != 16 {
                return None;
            }
            Some(Self::new(a, b, c, d, e, f))
        } else {
            None
        }
    }
}
