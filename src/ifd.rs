use std::collections::HashMap;

use bytes::Bytes;

use crate::error::{TiffMetaError, TiffMetaResult};
use crate::geo::GeoKeyDirectory;
use crate::mode::ImageLayout;
use crate::reader::Endianness;
use crate::tiff::tags::{
    CompressionMethod, PhotometricInterpretation, PlanarConfiguration, Predictor, ResolutionUnit,
    SampleFormat, Tag, Type,
};
use crate::tiff::Value;

/// One resolved IFD entry: the tag and its decoded elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    tag: Tag,
    field_type: Type,
    count: u32,
    values: Vec<Value>,
    /// Undecoded bytes of an ASCII field
    ascii_bytes: Option<Bytes>,
}

impl Field {
    pub(crate) fn new(tag: Tag, field_type: Type, count: u32, values: Vec<Value>) -> Self {
        Self {
            tag,
            field_type,
            count,
            values,
            ascii_bytes: None,
        }
    }

    /// An ASCII field split into its NUL-terminated runs.
    ///
    /// The final terminator is optional; bytes that aren't valid UTF-8 are replaced in the runs
    /// but kept as stored in [`Field::ascii_bytes`].
    pub(crate) fn ascii(tag: Tag, count: u32, bytes: Bytes) -> Self {
        let text = bytes.strip_suffix(&[0]).unwrap_or(&bytes[..]);
        let values = text
            .split(|b| *b == 0)
            .map(|run| Value::Ascii(String::from_utf8_lossy(run).into_owned()))
            .collect();
        Self {
            tag,
            field_type: Type::ASCII,
            count,
            values,
            ascii_bytes: Some(bytes),
        }
    }

    /// The tag of this field.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The field type declared by the entry.
    pub fn field_type(&self) -> Type {
        self.field_type
    }

    /// The element count declared by the entry.
    ///
    /// For ASCII fields this counts bytes including terminators, not strings.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// The decoded elements, one per element of the entry and one string per NUL-terminated run
    /// for ASCII fields.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// The bytes of an ASCII field as stored, terminators included.
    pub fn ascii_bytes(&self) -> Option<&[u8]> {
        self.ascii_bytes.as_deref()
    }

    /// All elements collapsed into a single [`Value`]: a scalar for one element and a
    /// [`Value::List`] otherwise.
    pub fn value(&self) -> Value {
        Value::from_elements(self.values.clone())
    }

    /// Consume the field, see [`Field::value`].
    pub fn into_value(self) -> Value {
        Value::from_elements(self.values)
    }

    fn single(&self) -> TiffMetaResult<Value> {
        match self.values.as_slice() {
            [value] => Ok(value.clone()),
            values => Err(TiffMetaError::InvalidTagValue {
                tag: self.tag,
                reason: format!("expected a single value, found {}", values.len()),
            }),
        }
    }

    fn convert_all<T>(
        &self,
        convert: impl Fn(Value) -> TiffMetaResult<T>,
    ) -> TiffMetaResult<Vec<T>> {
        self.values
            .iter()
            .cloned()
            .map(convert)
            .collect::<TiffMetaResult<Vec<_>>>()
            .map_err(|e| e.for_tag(self.tag))
    }

    /// The single element as a `u16`.
    pub fn u16(&self) -> TiffMetaResult<u16> {
        self.single()?.into_u16().map_err(|e| e.for_tag(self.tag))
    }

    /// The single element as a `u32`.
    pub fn u32(&self) -> TiffMetaResult<u32> {
        self.single()?.into_u32().map_err(|e| e.for_tag(self.tag))
    }

    /// The single element as a `f64`. Rationals are divided out.
    pub fn f64(&self) -> TiffMetaResult<f64> {
        self.single()?.into_f64().map_err(|e| e.for_tag(self.tag))
    }

    /// The first string of an ASCII field.
    pub fn string(&self) -> TiffMetaResult<String> {
        match self.values.first() {
            Some(value) => value.clone().into_string().map_err(|e| e.for_tag(self.tag)),
            None => Ok(String::new()),
        }
    }

    /// Every string of an ASCII field.
    pub fn strings(&self) -> TiffMetaResult<Vec<String>> {
        self.convert_all(Value::into_string)
    }

    /// All elements as bytes.
    pub fn u8_vec(&self) -> TiffMetaResult<Vec<u8>> {
        self.convert_all(Value::into_u8)
    }

    /// All elements as `u16`s.
    pub fn u16_vec(&self) -> TiffMetaResult<Vec<u16>> {
        self.convert_all(Value::into_u16)
    }

    /// All elements as `u64`s.
    pub fn u64_vec(&self) -> TiffMetaResult<Vec<u64>> {
        self.convert_all(Value::into_u64)
    }

    /// All elements as `f64`s.
    pub fn f64_vec(&self) -> TiffMetaResult<Vec<f64>> {
        self.convert_all(Value::into_f64)
    }
}

/// A non-fatal irregularity found while decoding an IFD.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeWarning {
    /// The tag already occurred earlier in the IFD. The first occurrence was kept and this entry
    /// was not resolved.
    DuplicateTag {
        /// The repeated tag.
        tag: Tag,
        /// Position of the ignored entry in the IFD.
        entry_index: usize,
    },
}

/// An ImageFileDirectory representing Image content
///
/// Every resolved field is kept and can be looked up by tag; the tags needed to interpret the
/// image are additionally parsed when the IFD is read.
// The ordering of these tags matches the sorted order in TIFF 6.0 Appendix A
#[derive(Debug, Clone)]
pub struct ImageFileDirectory {
    pub(crate) new_subfile_type: Option<u32>,

    /// The number of columns in the image, i.e., the number of pixels per row.
    pub(crate) image_width: Option<u32>,

    /// The number of rows of pixels in the image.
    pub(crate) image_height: Option<u32>,

    pub(crate) bits_per_sample: Option<Vec<u16>>,

    pub(crate) compression: Option<u16>,

    pub(crate) photometric_interpretation: Option<PhotometricInterpretation>,

    pub(crate) document_name: Option<String>,

    pub(crate) image_description: Option<String>,

    pub(crate) strip_offsets: Option<Vec<u64>>,

    pub(crate) orientation: Option<u16>,

    pub(crate) samples_per_pixel: Option<u16>,

    pub(crate) rows_per_strip: Option<u32>,

    pub(crate) strip_byte_counts: Option<Vec<u64>>,

    pub(crate) min_sample_value: Option<Vec<u16>>,
    pub(crate) max_sample_value: Option<Vec<u16>>,

    pub(crate) x_resolution: Option<f64>,
    pub(crate) y_resolution: Option<f64>,

    pub(crate) planar_configuration: Option<PlanarConfiguration>,

    pub(crate) resolution_unit: Option<ResolutionUnit>,

    pub(crate) software: Option<String>,
    pub(crate) date_time: Option<String>,
    pub(crate) artist: Option<String>,
    pub(crate) host_computer: Option<String>,

    pub(crate) predictor: Option<Predictor>,

    pub(crate) color_map: Option<Vec<u16>>,

    pub(crate) tile_width: Option<u32>,
    pub(crate) tile_height: Option<u32>,

    pub(crate) tile_offsets: Option<Vec<u64>>,
    pub(crate) tile_byte_counts: Option<Vec<u64>>,

    pub(crate) extra_samples: Option<Vec<u16>>,

    pub(crate) sample_format: Option<Vec<SampleFormat>>,

    pub(crate) jpeg_tables: Option<Bytes>,

    pub(crate) copyright: Option<String>,

    // Geospatial tags
    pub(crate) geo_key_directory: Option<GeoKeyDirectory>,
    pub(crate) model_pixel_scale: Option<Vec<f64>>,
    pub(crate) model_tiepoint: Option<Vec<f64>>,
    pub(crate) model_transformation: Option<Vec<f64>>,

    // GDAL tags
    pub(crate) gdal_metadata: Option<String>,
    pub(crate) gdal_nodata: Option<String>,

    /// All resolved fields in file order, duplicates removed
    fields: Vec<Field>,
    /// Position of each tag in `fields`
    index: HashMap<Tag, usize>,

    warnings: Vec<DecodeWarning>,

    endianness: Endianness,

    pub(crate) next_ifd_offset: Option<u64>,
}

impl ImageFileDirectory {
    /// Build a directory from fields with unique tags, parsing the well-known tags and the
    /// GeoKey directory.
    pub(crate) fn new(
        fields: Vec<Field>,
        warnings: Vec<DecodeWarning>,
        endianness: Endianness,
        next_ifd_offset: Option<u64>,
    ) -> TiffMetaResult<Self> {
        let index: HashMap<Tag, usize> = fields
            .iter()
            .enumerate()
            .map(|(i, field)| (field.tag(), i))
            .collect();

        let mut ifd = Self {
            new_subfile_type: None,
            image_width: None,
            image_height: None,
            bits_per_sample: None,
            compression: None,
            photometric_interpretation: None,
            document_name: None,
            image_description: None,
            strip_offsets: None,
            orientation: None,
            samples_per_pixel: None,
            rows_per_strip: None,
            strip_byte_counts: None,
            min_sample_value: None,
            max_sample_value: None,
            x_resolution: None,
            y_resolution: None,
            planar_configuration: None,
            resolution_unit: None,
            software: None,
            date_time: None,
            artist: None,
            host_computer: None,
            predictor: None,
            color_map: None,
            tile_width: None,
            tile_height: None,
            tile_offsets: None,
            tile_byte_counts: None,
            extra_samples: None,
            sample_format: None,
            jpeg_tables: None,
            copyright: None,
            geo_key_directory: None,
            model_pixel_scale: None,
            model_tiepoint: None,
            model_transformation: None,
            gdal_metadata: None,
            gdal_nodata: None,
            fields: vec![],
            index,
            warnings,
            endianness,
            next_ifd_offset,
        };

        for field in &fields {
            ifd.parse_field(field)?;
        }

        // The GeoKey directory references other fields, so it is parsed once all are known.
        if let Some(&i) = ifd.index.get(&Tag::GeoKeyDirectoryTag) {
            let index = &ifd.index;
            let geo_key_directory = GeoKeyDirectory::from_ifd_fields(&fields[i], |tag| {
                index.get(&tag).map(|&i| &fields[i])
            })?;
            ifd.geo_key_directory = Some(geo_key_directory);
        }

        ifd.fields = fields;
        Ok(ifd)
    }

    fn parse_field(&mut self, field: &Field) -> TiffMetaResult<()> {
        match field.tag() {
            Tag::NewSubfileType => self.new_subfile_type = Some(field.u32()?),
            Tag::ImageWidth => self.image_width = Some(field.u32()?),
            Tag::ImageLength => self.image_height = Some(field.u32()?),
            Tag::BitsPerSample => self.bits_per_sample = Some(field.u16_vec()?),
            Tag::Compression => self.compression = Some(field.u16()?),
            Tag::PhotometricInterpretation => {
                self.photometric_interpretation =
                    Some(PhotometricInterpretation::from_u16_exhaustive(field.u16()?))
            }
            Tag::DocumentName => self.document_name = Some(field.string()?),
            Tag::ImageDescription => self.image_description = Some(field.string()?),
            Tag::StripOffsets => self.strip_offsets = Some(field.u64_vec()?),
            Tag::Orientation => self.orientation = Some(field.u16()?),
            Tag::SamplesPerPixel => self.samples_per_pixel = Some(field.u16()?),
            Tag::RowsPerStrip => self.rows_per_strip = Some(field.u32()?),
            Tag::StripByteCounts => self.strip_byte_counts = Some(field.u64_vec()?),
            Tag::MinSampleValue => self.min_sample_value = Some(field.u16_vec()?),
            Tag::MaxSampleValue => self.max_sample_value = Some(field.u16_vec()?),
            Tag::XResolution => self.x_resolution = Some(field.f64()?),
            Tag::YResolution => self.y_resolution = Some(field.f64()?),
            Tag::PlanarConfiguration => {
                self.planar_configuration =
                    Some(PlanarConfiguration::from_u16_exhaustive(field.u16()?))
            }
            Tag::ResolutionUnit => {
                self.resolution_unit = Some(ResolutionUnit::from_u16_exhaustive(field.u16()?))
            }
            Tag::Software => self.software = Some(field.string()?),
            Tag::DateTime => self.date_time = Some(field.string()?),
            Tag::Artist => self.artist = Some(field.string()?),
            Tag::HostComputer => self.host_computer = Some(field.string()?),
            Tag::Predictor => self.predictor = Some(Predictor::from_u16_exhaustive(field.u16()?)),
            Tag::ColorMap => self.color_map = Some(field.u16_vec()?),
            Tag::TileWidth => self.tile_width = Some(field.u32()?),
            Tag::TileLength => self.tile_height = Some(field.u32()?),
            Tag::TileOffsets => self.tile_offsets = Some(field.u64_vec()?),
            Tag::TileByteCounts => self.tile_byte_counts = Some(field.u64_vec()?),
            Tag::ExtraSamples => self.extra_samples = Some(field.u16_vec()?),
            Tag::SampleFormat => {
                self.sample_format = Some(
                    field
                        .u16_vec()?
                        .into_iter()
                        .map(SampleFormat::from_u16_exhaustive)
                        .collect(),
                )
            }
            Tag::JPEGTables => self.jpeg_tables = Some(field.u8_vec()?.into()),
            Tag::Copyright => self.copyright = Some(field.string()?),

            // Geospatial tags
            // http://geotiff.maptools.org/spec/geotiff2.4.html
            Tag::ModelPixelScaleTag => self.model_pixel_scale = Some(field.f64_vec()?),
            Tag::ModelTiepointTag => self.model_tiepoint = Some(field.f64_vec()?),
            Tag::ModelTransformationTag => self.model_transformation = Some(field.f64_vec()?),

            // GDAL tags
            Tag::GdalMetadata => self.gdal_metadata = Some(field.string()?),
            Tag::GdalNodata => self.gdal_nodata = Some(field.string()?),
            _ => {}
        };
        Ok(())
    }

    /// The resolved field with the given tag.
    pub fn field(&self, tag: Tag) -> Option<&Field> {
        self.index.get(&tag).map(|&i| &self.fields[i])
    }

    /// The value of the given tag, see [`Field::value`].
    pub fn get(&self, tag: Tag) -> Option<Value> {
        self.field(tag).map(Field::value)
    }

    /// Returns `true` if the tag is present.
    pub fn contains(&self, tag: Tag) -> bool {
        self.index.contains_key(&tag)
    }

    /// All resolved fields in file order. Duplicate tags only appear once.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Advisory irregularities found while decoding, such as duplicate tags.
    pub fn warnings(&self) -> &[DecodeWarning] {
        &self.warnings
    }

    /// The byte order of the file this IFD was read from.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// The byte offset of the following IFD, `None` if this is the last one.
    pub fn next_ifd_offset(&self) -> Option<u64> {
        self.next_ifd_offset
    }

    /// Derive the pixel mode and the strip or tile geometry of this image.
    ///
    /// See [`ImageLayout::from_ifd`].
    pub fn image_layout(&self) -> TiffMetaResult<ImageLayout> {
        ImageLayout::from_ifd(self)
    }

    /// A general indication of the kind of data contained in this subfile.
    /// <https://web.archive.org/web/20240329145250/https://www.awaresystems.be/imaging/tiff/tifftags/newsubfiletype.html>
    pub fn new_subfile_type(&self) -> Option<u32> {
        self.new_subfile_type
    }

    /// The number of columns in the image, i.e., the number of pixels per row.
    /// <https://web.archive.org/web/20240329145250/https://www.awaresystems.be/imaging/tiff/tifftags/imagewidth.html>
    pub fn image_width(&self) -> Option<u32> {
        self.image_width
    }

    /// The number of rows of pixels in the image.
    /// <https://web.archive.org/web/20240329145250/https://www.awaresystems.be/imaging/tiff/tifftags/imagelength.html>
    pub fn image_height(&self) -> Option<u32> {
        self.image_height
    }

    /// Number of bits per component. Defaults to `[1]`.
    /// <https://web.archive.org/web/20240329145250/https://www.awaresystems.be/imaging/tiff/tifftags/bitspersample.html>
    pub fn bits_per_sample(&self) -> &[u16] {
        self.bits_per_sample.as_deref().unwrap_or(&[1])
    }

    /// The raw Compression value. Defaults to 1, no compression.
    /// <https://web.archive.org/web/20240329145331/https://www.awaresystems.be/imaging/tiff/tifftags/compression.html>
    pub fn compression_code(&self) -> u16 {
        self.compression.unwrap_or(1)
    }

    /// Compression scheme used on the image data.
    /// <https://web.archive.org/web/20240329145250/https://www.awaresystems.be/imaging/tiff/tifftags/compression.html>
    pub fn compression(&self) -> CompressionMethod {
        CompressionMethod::from_u16_exhaustive(self.compression_code())
    }

    /// The color space of the image data, `None` if the tag is absent.
    /// <https://web.archive.org/web/20240329145250/https://www.awaresystems.be/imaging/tiff/tifftags/photometricinterpretation.html>
    pub fn photometric_interpretation(&self) -> Option<PhotometricInterpretation> {
        self.photometric_interpretation
    }

    /// Document name.
    pub fn document_name(&self) -> Option<&str> {
        self.document_name.as_deref()
    }

    /// A string that describes the subject of the image.
    /// <https://web.archive.org/web/20240329145250/https://www.awaresystems.be/imaging/tiff/tifftags/imagedescription.html>
    pub fn image_description(&self) -> Option<&str> {
        self.image_description.as_deref()
    }

    /// For each strip, the byte offset of that strip.
    /// <https://web.archive.org/web/20240329145250/https://www.awaresystems.be/imaging/tiff/tifftags/stripoffsets.html>
    pub fn strip_offsets(&self) -> Option<&[u64]> {
        self.strip_offsets.as_deref()
    }

    /// The orientation of the image with respect to the rows and columns.
    /// <https://web.archive.org/web/20240329145250/https://www.awaresystems.be/imaging/tiff/tifftags/orientation.html>
    pub fn orientation(&self) -> Option<u16> {
        self.orientation
    }

    /// The number of components per pixel. Defaults to 1.
    ///
    /// SamplesPerPixel is usually 1 for bilevel, grayscale, and palette-color images.
    /// SamplesPerPixel is usually 3 for RGB images. If this value is higher, ExtraSamples should
    /// give an indication of the meaning of the additional channels.
    pub fn samples_per_pixel(&self) -> u16 {
        self.samples_per_pixel.unwrap_or(1)
    }

    /// The number of rows per strip.
    /// <https://web.archive.org/web/20240329145250/https://www.awaresystems.be/imaging/tiff/tifftags/rowsperstrip.html>
    pub fn rows_per_strip(&self) -> Option<u32> {
        self.rows_per_strip
    }

    /// For each strip, the number of bytes in the strip after compression.
    /// <https://web.archive.org/web/20240329145250/https://www.awaresystems.be/imaging/tiff/tifftags/stripbytecounts.html>
    pub fn strip_byte_counts(&self) -> Option<&[u64]> {
        self.strip_byte_counts.as_deref()
    }

    /// The minimum component value used.
    pub fn min_sample_value(&self) -> Option<&[u16]> {
        self.min_sample_value.as_deref()
    }

    /// The maximum component value used.
    pub fn max_sample_value(&self) -> Option<&[u16]> {
        self.max_sample_value.as_deref()
    }

    /// The number of pixels per ResolutionUnit in the ImageWidth direction.
    /// <https://web.archive.org/web/20240329145250/https://www.awaresystems.be/imaging/tiff/tifftags/xresolution.html>
    pub fn x_resolution(&self) -> Option<f64> {
        self.x_resolution
    }

    /// The number of pixels per ResolutionUnit in the ImageLength direction.
    /// <https://web.archive.org/web/20240329145250/https://www.awaresystems.be/imaging/tiff/tifftags/yresolution.html>
    pub fn y_resolution(&self) -> Option<f64> {
        self.y_resolution
    }

    /// How the components of each pixel are stored. Defaults to chunky.
    ///
    /// If SamplesPerPixel is 1, PlanarConfiguration is irrelevant, and need not be included.
    ///
    /// <https://web.archive.org/web/20240329145250/https://www.awaresystems.be/imaging/tiff/tifftags/planarconfiguration.html>
    pub fn planar_configuration(&self) -> PlanarConfiguration {
        self.planar_configuration.unwrap_or(PlanarConfiguration::Chunky)
    }

    /// The unit of measurement for XResolution and YResolution.
    /// <https://web.archive.org/web/20240329145250/https://www.awaresystems.be/imaging/tiff/tifftags/resolutionunit.html>
    pub fn resolution_unit(&self) -> Option<ResolutionUnit> {
        self.resolution_unit
    }

    /// Name and version number of the software package(s) used to create the image.
    pub fn software(&self) -> Option<&str> {
        self.software.as_deref()
    }

    /// Date and time of image creation.
    ///
    /// The format is: "YYYY:MM:DD HH:MM:SS", with hours like those on a 24-hour clock, and one
    /// space character between the date and the time.
    pub fn date_time(&self) -> Option<&str> {
        self.date_time.as_deref()
    }

    /// Person who created the image.
    pub fn artist(&self) -> Option<&str> {
        self.artist.as_deref()
    }

    /// The computer and/or operating system in use at the time of image creation.
    pub fn host_computer(&self) -> Option<&str> {
        self.host_computer.as_deref()
    }

    /// A mathematical operator that is applied to the image data before an encoding scheme is
    /// applied.
    ///
    /// This is only reported; undoing it is up to whoever decompresses the chunks.
    /// <https://web.archive.org/web/20240329145250/https://www.awaresystems.be/imaging/tiff/tifftags/predictor.html>
    pub fn predictor(&self) -> Option<Predictor> {
        self.predictor
    }

    /// A color map for palette color images.
    ///
    /// All the Red values come first, followed by the Green values, then the Blue values. The
    /// number of values for each color is 2**BitsPerSample.
    /// <https://web.archive.org/web/20240329145250/https://www.awaresystems.be/imaging/tiff/tifftags/colormap.html>
    pub fn color_map(&self) -> Option<&[u16]> {
        self.color_map.as_deref()
    }

    /// The tile width in pixels. This is the number of columns in each tile.
    /// <https://web.archive.org/web/20240329145250/https://www.awaresystems.be/imaging/tiff/tifftags/tilewidth.html>
    pub fn tile_width(&self) -> Option<u32> {
        self.tile_width
    }

    /// The tile length (height) in pixels. This is the number of rows in each tile.
    /// <https://web.archive.org/web/20240329145250/https://www.awaresystems.be/imaging/tiff/tifftags/tilelength.html>
    pub fn tile_height(&self) -> Option<u32> {
        self.tile_height
    }

    /// For each tile, the byte offset of that tile, as compressed and stored on disk.
    /// <https://web.archive.org/web/20240329145250/https://www.awaresystems.be/imaging/tiff/tifftags/tileoffsets.html>
    pub fn tile_offsets(&self) -> Option<&[u64]> {
        self.tile_offsets.as_deref()
    }

    /// For each tile, the number of (compressed) bytes in that tile.
    /// <https://web.archive.org/web/20240329145339/https://www.awaresystems.be/imaging/tiff/tifftags/tilebytecounts.html>
    pub fn tile_byte_counts(&self) -> Option<&[u64]> {
        self.tile_byte_counts.as_deref()
    }

    /// Description of extra components.
    /// <https://web.archive.org/web/20240329145250/https://www.awaresystems.be/imaging/tiff/tifftags/extrasamples.html>
    pub fn extra_samples(&self) -> Option<&[u16]> {
        self.extra_samples.as_deref()
    }

    /// Specifies how to interpret each data sample in a pixel.
    ///
    /// Unsigned integer data is the default, one entry per sample.
    /// <https://web.archive.org/web/20240329145340/https://www.awaresystems.be/imaging/tiff/tifftags/sampleformat.html>
    pub fn sample_format(&self) -> Vec<SampleFormat> {
        match &self.sample_format {
            Some(sample_format) => sample_format.clone(),
            None => vec![SampleFormat::Uint; self.samples_per_pixel() as usize],
        }
    }

    /// JPEG quantization and/or Huffman tables.
    pub fn jpeg_tables(&self) -> Option<&[u8]> {
        self.jpeg_tables.as_deref()
    }

    /// Copyright notice.
    pub fn copyright(&self) -> Option<&str> {
        self.copyright.as_deref()
    }

    /// Geospatial tags
    /// <https://web.archive.org/web/20240329145313/https://www.awaresystems.be/imaging/tiff/tifftags/geokeydirectorytag.html>
    pub fn geo_key_directory(&self) -> Option<&GeoKeyDirectory> {
        self.geo_key_directory.as_ref()
    }

    /// Used in interchangeable GeoTIFF files.
    /// <https://web.archive.org/web/20240329145238/https://www.awaresystems.be/imaging/tiff/tifftags/modelpixelscaletag.html>
    pub fn model_pixel_scale(&self) -> Option<&[f64]> {
        self.model_pixel_scale.as_deref()
    }

    /// Used in interchangeable GeoTIFF files.
    /// <https://web.archive.org/web/20240329145303/https://www.awaresystems.be/imaging/tiff/tifftags/modeltiepointtag.html>
    pub fn model_tiepoint(&self) -> Option<&[f64]> {
        self.model_tiepoint.as_deref()
    }

    /// The 4x4 model transformation matrix in row-major order.
    pub fn model_transformation(&self) -> Option<&[f64]> {
        self.model_transformation.as_deref()
    }

    /// GDAL's XML metadata.
    pub fn gdal_metadata(&self) -> Option<&str> {
        self.gdal_metadata.as_deref()
    }

    /// GDAL's nodata value, as the string GDAL stored.
    pub fn gdal_nodata(&self) -> Option<&str> {
        self.gdal_nodata.as_deref()
    }
}
