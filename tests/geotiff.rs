//! Integration tests on GeoTIFF metadata.

use bytes::Bytes;
use tiff_meta::error::TiffMetaError;
use tiff_meta::geo::{AffineTransform, CoordinateTransformation, GeoKeyTag};
use tiff_meta::metadata::TiffMetadataReader;
use tiff_meta::tiff::tags::Tag;
use tiff_meta::tiff::Value;

mod util;

use util::{open_tiff, TiffBuilder};

fn georeferenced(builder: TiffBuilder) -> TiffBuilder {
    builder
        .short(256, &[10])
        .short(257, &[10])
        .short(258, &[16])
        .short(262, &[1])
        .double(33550, &[60.0, 60.0, 0.0])
        .double(33922, &[0.0, 0.0, 0.0, 440720.0, 3751320.0, 0.0])
        .short(
            34735,
            &[
                1, 1, 0, 7, // header
                1024, 0, 1, 1, // GTModelType: projected
                1025, 0, 1, 1, // GTRasterType: pixel is area
                1026, 34737, 21, 0, // GTCitation
                2049, 34737, 6, 21, // GeogCitation
                2057, 34736, 1, 0, // GeogSemiMajorAxis
                3072, 0, 1, 26711, // ProjectedCSType
                3075, 0, 1, 1, // ProjCoordTrans
            ],
        )
        .double(34736, &[6378206.4])
        .ascii(34737, "NAD27 / UTM zone 11N|NAD27|")
        .ascii(42113, "-9999")
}

#[test]
fn geo_keys_in_both_byte_orders() {
    for builder in [TiffBuilder::little(), TiffBuilder::big()] {
        let tiff = open_tiff(georeferenced(builder).build());
        let ifd = &tiff.ifds()[0];
        assert_eq!(ifd.model_pixel_scale(), Some([60.0, 60.0, 0.0].as_slice()));
        assert_eq!(ifd.gdal_nodata(), Some("-9999"));

        let geo_keys = ifd.geo_key_directory().unwrap();
        assert_eq!(geo_keys.key_directory_version, 1);
        assert_eq!(geo_keys.model_type, Some(1));
        assert_eq!(geo_keys.raster_type, Some(1));
        assert_eq!(geo_keys.citation.as_deref(), Some("NAD27 / UTM zone 11N"));
        assert_eq!(geo_keys.geog_citation.as_deref(), Some("NAD27"));
        assert_eq!(geo_keys.geog_semi_major_axis, Some(6378206.4));
        assert_eq!(geo_keys.projected_type, Some(26711));
        assert_eq!(
            geo_keys.coordinate_transformation(),
            Some(CoordinateTransformation::TransverseMercator)
        );
        assert_eq!(
            geo_keys.get(GeoKeyTag::ProjectedType),
            Some(&Value::Short(26711))
        );
        assert_eq!(geo_keys.keys().len(), 7);
    }
}

#[test]
fn affine_transform_from_tiepoint() {
    let tiff = open_tiff(georeferenced(TiffBuilder::little()).build());
    let transform = AffineTransform::from_ifd(&tiff.ifds()[0]).unwrap();
    assert_eq!(transform.a(), 60.0);
    assert_eq!(transform.e(), -60.0);
    assert_eq!(transform.c(), 440720.0);
    assert_eq!(transform.f(), 3751320.0);
    assert_eq!(transform.apply(10.0, 10.0), (441320.0, 3750720.0));
}

#[test]
fn missing_referenced_tag() {
    // GeogSemiMajorAxis lives in GeoDoubleParamsTag, which the IFD lacks
    let source = TiffBuilder::little()
        .short(256, &[1])
        .short(34735, &[1, 1, 0, 1, 2057, 34736, 1, 0])
        .build();
    let mut metadata_reader = TiffMetadataReader::try_open(&source).unwrap();
    let err = metadata_reader.read_next_ifd(&source).unwrap_err();
    assert!(matches!(
        err,
        TiffMetaError::MissingReferencedTag {
            key: 2057,
            tag: Tag::GeoDoubleParamsTag,
        }
    ));
}

#[test]
fn unknown_keys_are_kept() {
    let source: Bytes = TiffBuilder::little()
        .short(34735, &[1, 1, 0, 2, 1024, 0, 1, 2, 5000, 0, 1, 77])
        .build();
    let tiff = open_tiff(source);
    let geo_keys = tiff.ifds()[0].geo_key_directory().unwrap();
    assert_eq!(geo_keys.model_type, Some(2));
    assert_eq!(geo_keys.get_raw(5000), Some(&Value::Short(77)));
}

#[test]
fn key_count_beyond_directory() {
    let source = TiffBuilder::little()
        .short(34735, &[1, 1, 0, 3, 1024, 0, 1, 2])
        .build();
    let mut metadata_reader = TiffMetadataReader::try_open(&source).unwrap();
    assert!(matches!(
        metadata_reader.read_next_ifd(&source),
        Err(TiffMetaError::InvalidGeoKeyDirectory(_))
    ));
}

#[test]
fn latin1_citation_keeps_later_offsets() {
    let blob = b"Caf\xE9|WGS|\0".to_vec();
    let source = TiffBuilder::little()
        .short(34735, &[1, 1, 0, 2, 1026, 34737, 5, 0, 2049, 34737, 4, 5])
        .raw(34737, 2, blob.len() as u32, blob)
        .build();
    let tiff = open_tiff(source);
    let geo_keys = tiff.ifds()[0].geo_key_directory().unwrap();
    assert_eq!(geo_keys.citation.as_deref(), Some("Caf\u{FFFD}"));
    assert_eq!(geo_keys.geog_citation.as_deref(), Some("WGS"));
}
