#![allow(missing_docs)]

use std::collections::BTreeMap;

use log::warn;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::{TiffMetaError, TiffMetaResult};
use crate::geo::CoordinateTransformation;
use crate::ifd::Field;
use crate::tiff::tags::{Tag, Type};
use crate::tiff::Value;

/// Geospatial TIFF tag variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum GeoKeyTag {
    // GeoTIFF configuration keys
    ModelType = 1024,
    RasterType = 1025,
    Citation = 1026,

    // Geographic CS Parameter Keys
    GeographicType = 2048,
    GeogCitation = 2049,
    GeogGeodeticDatum = 2050,
    GeogPrimeMeridian = 2051,
    GeogLinearUnits = 2052,
    GeogLinearUnitSize = 2053,
    GeogAngularUnits = 2054,
    GeogAngularUnitSize = 2055,
    GeogEllipsoid = 2056,
    GeogSemiMajorAxis = 2057,
    GeogSemiMinorAxis = 2058,
    GeogInvFlattening = 2059,
    GeogAzimuthUnits = 2060,
    GeogPrimeMeridianLong = 2061,

    // Projected CS Parameter Keys
    ProjectedType = 3072,
    ProjCitation = 3073,
    Projection = 3074,
    ProjCoordTrans = 3075,
    ProjLinearUnits = 3076,
    ProjLinearUnitSize = 3077,
    ProjStdParallel1 = 3078,
    ProjStdParallel2 = 3079,
    ProjNatOriginLong = 3080,
    ProjNatOriginLat = 3081,
    ProjFalseEasting = 3082,
    ProjFalseNorthing = 3083,
    ProjFalseOriginLong = 3084,
    ProjFalseOriginLat = 3085,
    ProjFalseOriginEasting = 3086,
    ProjFalseOriginNorthing = 3087,
    ProjCenterLong = 3088,
    ProjCenterLat = 3089,
    ProjCenterEasting = 3090,
    ProjCenterNorthing = 3091,
    ProjScaleAtNatOrigin = 3092,
    ProjScaleAtCenter = 3093,
    ProjAzimuthAngle = 3094,
    ProjStraightVertPoleLong = 3095,

    // Vertical CS Parameter Keys
    Vertical = 4096,
    VerticalCitation = 4097,
    VerticalDatum = 4098,
    VerticalUnits = 4099,
}

/// One key of the GeoKey directory, as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoKeyEntry {
    pub key_id: u16,
    /// 0 if `value_offset` is the value itself, otherwise the tag holding the value
    pub tag_location: u16,
    pub count: u16,
    pub value_offset: u16,
}

/// Metadata defined by the GeoTIFF standard.
///
/// <https://docs.ogc.org/is/19-008r4/19-008r4.html#_requirements_class_geokeydirectorytag>
#[derive(Debug, Clone, PartialEq)]
pub struct GeoKeyDirectory {
    pub key_directory_version: u16,
    pub key_revision: u16,
    pub key_minor_revision: u16,

    pub model_type: Option<u16>,
    pub raster_type: Option<u16>,
    pub citation: Option<String>,

    pub geographic_type: Option<u16>,
    pub geog_citation: Option<String>,
    pub geog_geodetic_datum: Option<u16>,

    /// This key is used to specify a Prime Meridian from the GeoTIFF CRS register or to indicate
    /// that the Prime Meridian is user-defined.
    ///
    /// The default is Greenwich, England.
    /// <https://docs.ogc.org/is/19-008r4/19-008r4.html#_requirements_class_primemeridiangeokey>
    pub geog_prime_meridian: Option<u16>,

    pub geog_linear_units: Option<u16>,
    pub geog_linear_unit_size: Option<f64>,
    pub geog_angular_units: Option<u16>,
    pub geog_angular_unit_size: Option<f64>,

    /// This key is provided to specify an ellipsoid (or sphere) from the GeoTIFF CRS register or
    /// to indicate that the ellipsoid (or sphere) is user-defined.
    pub geog_ellipsoid: Option<u16>,
    pub geog_semi_major_axis: Option<f64>,
    pub geog_semi_minor_axis: Option<f64>,
    pub geog_inv_flattening: Option<f64>,
    pub geog_azimuth_units: Option<u16>,
    pub geog_prime_meridian_long: Option<f64>,

    pub projected_type: Option<u16>,
    pub proj_citation: Option<String>,
    pub projection: Option<u16>,
    pub proj_coord_trans: Option<u16>,
    pub proj_linear_units: Option<u16>,
    pub proj_linear_unit_size: Option<f64>,
    pub proj_std_parallel1: Option<f64>,
    pub proj_std_parallel2: Option<f64>,
    pub proj_nat_origin_long: Option<f64>,
    pub proj_nat_origin_lat: Option<f64>,
    pub proj_false_easting: Option<f64>,
    pub proj_false_northing: Option<f64>,
    pub proj_false_origin_long: Option<f64>,
    pub proj_false_origin_lat: Option<f64>,
    pub proj_false_origin_easting: Option<f64>,
    pub proj_false_origin_northing: Option<f64>,
    pub proj_center_long: Option<f64>,
    pub proj_center_lat: Option<f64>,
    pub proj_center_easting: Option<f64>,
    pub proj_center_northing: Option<f64>,
    pub proj_scale_at_nat_origin: Option<f64>,
    pub proj_scale_at_center: Option<f64>,
    pub proj_azimuth_angle: Option<f64>,
    pub proj_straight_vert_pole_long: Option<f64>,

    pub vertical: Option<u16>,
    pub vertical_citation: Option<String>,
    pub vertical_datum: Option<u16>,
    pub vertical_units: Option<u16>,

    /// Every key, known or not, by id
    keys: BTreeMap<u16, Value>,
}

impl GeoKeyDirectory {
    /// Parse the GeoKeyDirectoryTag field `key_directory`.
    ///
    /// Keys stored in another tag are sliced out of the field `field` returns for that tag.
    pub fn from_ifd_fields<'a>(
        key_directory: &Field,
        field: impl Fn(Tag) -> Option<&'a Field>,
    ) -> TiffMetaResult<Self> {
        let data = key_directory.u16_vec()?;
        let [key_directory_version, key_revision, key_minor_revision, number_of_keys] =
            match data.get(..4) {
                Some(&[a, b, c, d]) => [a, b, c, d],
                _ => {
                    return Err(TiffMetaError::InvalidGeoKeyDirectory(format!(
                        "header needs 4 values, found {}",
                        data.len()
                    )))
                }
            };

        let keys_end = 4 + 4 * number_of_keys as usize;
        let Some(key_data) = data.get(4..keys_end) else {
            return Err(TiffMetaError::InvalidGeoKeyDirectory(format!(
                "{number_of_keys} keys declared but only {} values present",
                data.len()
            )));
        };

        let mut keys = BTreeMap::new();
        for chunk in key_data.chunks_exact(4) {
            let entry = GeoKeyEntry {
                key_id: chunk[0],
                tag_location: chunk[1],
                count: chunk[2],
                value_offset: chunk[3],
            };
            let value = resolve_key(&entry, &field)?;
            keys.insert(entry.key_id, value);
        }

        let mut directory = Self::from_keys(keys)?;
        directory.key_directory_version = key_directory_version;
        directory.key_revision = key_revision;
        directory.key_minor_revision = key_minor_revision;
        Ok(directory)
    }

    fn from_keys(keys: BTreeMap<u16, Value>) -> TiffMetaResult<Self> {
        let mut directory = Self {
            key_directory_version: 1,
            key_revision: 1,
            key_minor_revision: 0,
            model_type: None,
            raster_type: None,
            citation: None,
            geographic_type: None,
            geog_citation: None,
            geog_geodetic_datum: None,
            geog_prime_meridian: None,
            geog_linear_units: None,
            geog_linear_unit_size: None,
            geog_angular_units: None,
            geog_angular_unit_size: None,
            geog_ellipsoid: None,
            geog_semi_major_axis: None,
            geog_semi_minor_axis: None,
            geog_inv_flattening: None,
            geog_azimuth_units: None,
            geog_prime_meridian_long: None,
            projected_type: None,
            proj_citation: None,
            projection: None,
            proj_coord_trans: None,
            proj_linear_units: None,
            proj_linear_unit_size: None,
            proj_std_parallel1: None,
            proj_std_parallel2: None,
            proj_nat_origin_long: None,
            proj_nat_origin_lat: None,
            proj_false_easting: None,
            proj_false_northing: None,
            proj_false_origin_long: None,
            proj_false_origin_lat: None,
            proj_false_origin_easting: None,
            proj_false_origin_northing: None,
            proj_center_long: None,
            proj_center_lat: None,
            proj_center_easting: None,
            proj_center_northing: None,
            proj_scale_at_nat_origin: None,
            proj_scale_at_center: None,
            proj_azimuth_angle: None,
            proj_straight_vert_pole_long: None,
            vertical: None,
            vertical_citation: None,
            vertical_datum: None,
            vertical_units: None,
            keys: BTreeMap::new(),
        };

        for (&key_id, value) in &keys {
            let Ok(tag) = GeoKeyTag::try_from_primitive(key_id) else {
                warn!("GeoKey {key_id} is not a known key, kept uninterpreted");
                continue;
            };
            directory
                .set(tag, value.clone())
                .map_err(|e| TiffMetaError::InvalidGeoKeyDirectory(format!("{tag:?}: {e}")))?;
        }
        directory.keys = keys;
        Ok(directory)
    }

    fn set(&mut self, tag: GeoKeyTag, value: Value) -> TiffMetaResult<()> {
        match tag {
            GeoKeyTag::ModelType => self.model_type = Some(value.into_u16()?),
            GeoKeyTag::RasterType => self.raster_type = Some(value.into_u16()?),
            GeoKeyTag::Citation => self.citation = Some(value.into_string()?),
            GeoKeyTag::GeographicType => self.geographic_type = Some(value.into_u16()?),
            GeoKeyTag::GeogCitation => self.geog_citation = Some(value.into_string()?),
            GeoKeyTag::GeogGeodeticDatum => self.geog_geodetic_datum = Some(value.into_u16()?),
            GeoKeyTag::GeogPrimeMeridian => self.geog_prime_meridian = Some(value.into_u16()?),
            GeoKeyTag::GeogLinearUnits => self.geog_linear_units = Some(value.into_u16()?),
            GeoKeyTag::GeogLinearUnitSize => self.geog_linear_unit_size = Some(value.into_f64()?),
            GeoKeyTag::GeogAngularUnits => self.geog_angular_units = Some(value.into_u16()?),
            GeoKeyTag::GeogAngularUnitSize => {
                self.geog_angular_unit_size = Some(value.into_f64()?)
            }
            GeoKeyTag::GeogEllipsoid => self.geog_ellipsoid = Some(value.into_u16()?),
            GeoKeyTag::GeogSemiMajorAxis => self.geog_semi_major_axis = Some(value.into_f64()?),
            GeoKeyTag::GeogSemiMinorAxis => self.geog_semi_minor_axis = Some(value.into_f64()?),
            GeoKeyTag::GeogInvFlattening => self.geog_inv_flattening = Some(value.into_f64()?),
            GeoKeyTag::GeogAzimuthUnits => self.geog_azimuth_units = Some(value.into_u16()?),
            GeoKeyTag::GeogPrimeMeridianLong => {
                self.geog_prime_meridian_long = Some(value.into_f64()?)
            }
            GeoKeyTag::ProjectedType => self.projected_type = Some(value.into_u16()?),
            GeoKeyTag::ProjCitation => self.proj_citation = Some(value.into_string()?),
            GeoKeyTag::Projection => self.projection = Some(value.into_u16()?),
            GeoKeyTag::ProjCoordTrans => self.proj_coord_trans = Some(value.into_u16()?),
            GeoKeyTag::ProjLinearUnits => self.proj_linear_units = Some(value.into_u16()?),
            GeoKeyTag::ProjLinearUnitSize => self.proj_linear_unit_size = Some(value.into_f64()?),
            GeoKeyTag::ProjStdParallel1 => self.proj_std_parallel1 = Some(value.into_f64()?),
            GeoKeyTag::ProjStdParallel2 => self.proj_std_parallel2 = Some(value.into_f64()?),
            GeoKeyTag::ProjNatOriginLong => self.proj_nat_origin_long = Some(value.into_f64()?),
            GeoKeyTag::ProjNatOriginLat => self.proj_nat_origin_lat = Some(value.into_f64()?),
            GeoKeyTag::ProjFalseEasting => self.proj_false_easting = Some(value.into_f64()?),
            GeoKeyTag::ProjFalseNorthing => self.proj_false_northing = Some(value.into_f64()?),
            GeoKeyTag::ProjFalseOriginLong => {
                self.proj_false_origin_long = Some(value.into_f64()?)
            }
            GeoKeyTag::ProjFalseOriginLat => self.proj_false_origin_lat = Some(value.into_f64()?),
            GeoKeyTag::ProjFalseOriginEasting => {
                self.proj_false_origin_easting = Some(value.into_f64()?)
            }
            GeoKeyTag::ProjFalseOriginNorthing => {
                self.proj_false_origin_northing = Some(value.into_f64()?)
            }
            GeoKeyTag::ProjCenterLong => self.proj_center_long = Some(value.into_f64()?),
            GeoKeyTag::ProjCenterLat => self.proj_center_lat = Some(value.into_f64()?),
            GeoKeyTag::ProjCenterEasting => self.proj_center_easting = Some(value.into_f64()?),
            GeoKeyTag::ProjCenterNorthing => self.proj_center_northing = Some(value.into_f64()?),
            GeoKeyTag::ProjScaleAtNatOrigin => {
                self.proj_scale_at_nat_origin = Some(value.into_f64()?)
            }
            GeoKeyTag::ProjScaleAtCenter => self.proj_scale_at_center = Some(value.into_f64()?),
            GeoKeyTag::ProjAzimuthAngle => self.proj_azimuth_angle = Some(value.into_f64()?),
            GeoKeyTag::ProjStraightVertPoleLong => {
                self.proj_straight_vert_pole_long = Some(value.into_f64()?)
            }
            GeoKeyTag::Vertical => self.vertical = Some(value.into_u16()?),
            GeoKeyTag::VerticalCitation => self.vertical_citation = Some(value.into_string()?),
            GeoKeyTag::VerticalDatum => self.vertical_datum = Some(value.into_u16()?),
            GeoKeyTag::VerticalUnits => self.vertical_units = Some(value.into_u16()?),
        };
        Ok(())
    }

    /// The value of a known key.
    pub fn get(&self, tag: GeoKeyTag) -> Option<&Value> {
        self.keys.get(&u16::from(tag))
    }

    /// The value of any key by id, including ids this crate doesn't know.
    pub fn get_raw(&self, key_id: u16) -> Option<&Value> {
        self.keys.get(&key_id)
    }

    /// All keys by id, in ascending order.
    pub fn keys(&self) -> &BTreeMap<u16, Value> {
        &self.keys
    }

    /// The coordinate transformation of a user-defined projection.
    pub fn coordinate_transformation(&self) -> Option<CoordinateTransformation> {
        self.proj_coord_trans
            .and_then(|code| CoordinateTransformation::try_from_primitive(code).ok())
    }
}

/// The value of one key, sliced out of the referenced tag when not stored inline.
fn resolve_key<'a>(
    entry: &GeoKeyEntry,
    field: &impl Fn(Tag) -> Option<&'a Field>,
) -> TiffMetaResult<Value> {
    if entry.tag_location == 0 {
        return Ok(Value::Short(entry.value_offset));
    }

    let tag = Tag::from_u16_exhaustive(entry.tag_location);
    let referenced = field(tag).ok_or(TiffMetaError::MissingReferencedTag {
        key: entry.key_id,
        tag,
    })?;

    let start = entry.value_offset as usize;
    let end = start + entry.count as usize;
    let out_of_range = || {
        TiffMetaError::InvalidGeoKeyDirectory(format!(
            "key {} references {start}..{end} of {tag:?}, which holds {} elements",
            entry.key_id,
            referenced.count()
        ))
    };

    if referenced.field_type() == Type::ASCII {
        // Offsets count bytes of the stored blob, terminators included.
        let blob = referenced.ascii_bytes().unwrap_or_default();
        let mut s = blob.get(start..end).ok_or_else(out_of_range)?;
        // Strings in GeoAsciiParamsTag are terminated by "|"
        if let Some(stripped) = s.strip_suffix(b"|") {
            s = stripped;
        }
        Ok(Value::Ascii(String::from_utf8_lossy(s).into_owned()))
    } else {
        let values = referenced.values().get(start..end).ok_or_else(out_of_range)?;
        Ok(Value::from_elements(values.to_vec()))
    }
}
