use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Coordinate transformation methods of the `ProjCoordTransGeoKey`.
///
/// <http://geotiff.maptools.org/spec/geotiff6.html#6.3.3.3>
#[allow(missing_docs, non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum CoordinateTransformation {
    TransverseMercator = 1,
    TransvMercator_Modified_Alaska = 2,
    ObliqueMercator = 3,
    ObliqueMercator_Laborde = 4,
    ObliqueMercator_Rosenmund = 5,
    ObliqueMercator_Spherical = 6,
    Mercator = 7,
    LambertConfConic_2SP = 8,
    LambertConfConic_Helmert = 9,
    LambertAzimEqualArea = 10,
    AlbersEqualArea = 11,
    AzimuthalEquidistant = 12,
    EquidistantConic = 13,
    Stereographic = 14,
    PolarStereographic = 15,
    ObliqueStereographic = 16,
    Equirectangular = 17,
    CassiniSoldner = 18,
    Gnomonic = 19,
    MillerCylindrical = 20,
    Orthographic = 21,
    Polyconic = 22,
    Robinson = 23,
    Sinusoidal = 24,
    VanDerGrinten = 25,
    NewZealandMapGrid = 26,
    TransvMercator_SouthOriented = 27,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes() {
        assert_eq!(
            CoordinateTransformation::try_from(8u16).ok(),
            Some(CoordinateTransformation::LambertConfConic_2SP)
        );
        assert_eq!(u16::from(CoordinateTransformation::TransvMercator_SouthOriented), 27);
        assert!(CoordinateTransformation::try_from(0u16).is_err());
        assert!(CoordinateTransformation::try_from(28u16).is_err());
    }
}
