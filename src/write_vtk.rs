use crate::array::AbstractArray;
use crate::data::{FieldData, StructuredData};
use crate::Error;

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;

/// How the values of each `<DataArray>` are stored in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// space separated text inside the element
    #[default]
    Ascii,
    /// base64 text inside the element, prefixed by the byte count
    Base64,
    /// raw bytes in an `<AppendedData>` section at the end of the file
    Appended,
}

impl Encoding {
    fn format(&self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Base64 => "binary",
            Self::Appended => "appended",
        }
    }
}

/// Write `data` as a vtk `ImageData` xml file to a `Writer`
///
/// `origin` and `spacing` place the extent in space. Point and cell arrays are written in
/// the order they were added; unnamed arrays are skipped since readers address arrays
/// by name.
///
/// ```
/// use vtk_core::{DoubleArray, Encoding, Extent, StructuredData};
///
/// let extent = Extent::new(0, 1, 0, 1, 0, 0).unwrap();
/// let mut data = StructuredData::new(extent);
/// let pressure = DoubleArray::from_values(vec![0.0, 1.0, 2.0, 3.0], 1).unwrap();
/// data.add_point_array(pressure.with_name("pressure")).unwrap();
///
/// let mut output = Vec::new();
/// vtk_core::write_vtk(&mut output, &data, [0.0; 3], [1.0; 3], Encoding::Ascii).unwrap();
///
/// let text = String::from_utf8(output).unwrap();
/// assert!(text.contains(r#"WholeExtent="0 1 0 1 0 0""#));
/// ```
pub fn write_vtk<W: Write>(
    writer: W,
    data: &StructuredData,
    origin: [f64; 3],
    spacing: [f64; 3],
    encoding: Encoding,
) -> Result<(), Error> {
    data.validate()?;

    let mut writer = Writer::new_with_indent(writer, b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let file = BytesStart::new("VTKFile").with_attributes([
        ("type", "ImageData"),
        ("version", "1.0"),
        ("byte_order", "LittleEndian"),
        ("header_type", "UInt64"),
    ]);
    writer.write_event(Event::Start(file))?;

    let span_str = data.extent().span_string();
    let origin = join_floats(&origin);
    let spacing = join_floats(&spacing);

    let image = BytesStart::new("ImageData").with_attributes([
        ("WholeExtent", span_str.as_str()),
        ("Origin", origin.as_str()),
        ("Spacing", spacing.as_str()),
    ]);
    writer.write_event(Event::Start(image))?;

    let piece = BytesStart::new("Piece").with_attributes([("Extent", span_str.as_str())]);
    writer.write_event(Event::Start(piece))?;

    // byte blocks for the appended section, in the order their headers were written
    let mut appended: Vec<Vec<u8>> = Vec::new();
    let mut offset = 0;

    for (section, fields) in [("PointData", data.point_data()), ("CellData", data.cell_data())] {
        writer.write_event(Event::Start(BytesStart::new(section)))?;
        write_fields(&mut writer, fields, encoding, &mut appended, &mut offset)?;
        writer.write_event(Event::End(BytesEnd::new(section)))?;
    }

    writer.write_event(Event::End(BytesEnd::new("Piece")))?;
    writer.write_event(Event::End(BytesEnd::new("ImageData")))?;

    if !appended.is_empty() {
        tracing::debug!(arrays = appended.len(), bytes = offset, "writing appended data");
        appended_binary_header_start(&mut writer)?;
        let inner = writer.inner();
        for block in &appended {
            inner.write_all(&(block.len() as u64).to_le_bytes())?;
            inner.write_all(block)?;
        }
        appended_binary_header_end(&mut writer)?;
    }

    writer.write_event(Event::End(BytesEnd::new("VTKFile")))?;

    Ok(())
}

fn write_fields<W: Write>(
    writer: &mut Writer<W>,
    fields: &FieldData,
    encoding: Encoding,
    appended: &mut Vec<Vec<u8>>,
    offset: &mut usize,
) -> Result<(), Error> {
    for array in fields.iter() {
        let name = match array.name() {
            Some(name) => name,
            None => {
                tracing::warn!(
                    data_type = %array.data_type(),
                    "skipping an unnamed array while writing"
                );
                continue;
            }
        };

        let header = dataarray_header(array, name, encoding, *offset);

        match encoding {
            Encoding::Ascii => {
                writer.write_event(Event::Start(header))?;
                writer.write_event(Event::Text(BytesText::new(&array.ascii())))?;
                writer.write_event(Event::End(BytesEnd::new("DataArray")))?;
            }
            Encoding::Base64 => {
                let bytes = array.le_bytes();
                let mut byte_data = Vec::with_capacity(bytes.len() + 8);
                byte_data.extend_from_slice(&(bytes.len() as u64).to_le_bytes());
                byte_data.extend_from_slice(&bytes);
                let data = base64::encode(byte_data.as_slice());

                writer.write_event(Event::Start(header))?;
                writer.write_event(Event::Text(BytesText::new(&data)))?;
                writer.write_event(Event::End(BytesEnd::new("DataArray")))?;
            }
            Encoding::Appended => {
                let bytes = array.le_bytes();
                // 8 byte header holding the length of the block
                *offset += 8 + bytes.len();
                appended.push(bytes);
                writer.write_event(Event::Empty(header))?;
            }
        }
    }

    Ok(())
}

fn dataarray_header(
    array: &AbstractArray,
    name: &str,
    encoding: Encoding,
    offset: usize,
) -> BytesStart<'static> {
    let mut header = BytesStart::new("DataArray");
    header.push_attribute(("type", array.data_type().vtk_name()));
    header.push_attribute(("Name", name));
    header.push_attribute((
        "NumberOfComponents",
        array.number_of_components().to_string().as_str(),
    ));
    header.push_attribute(("format", encoding.format()));
    if encoding == Encoding::Appended {
        header.push_attribute(("offset", offset.to_string().as_str()));
    }
    header
}

fn appended_binary_header_start<W: Write>(writer: &mut Writer<W>) -> Result<(), Error> {
    let inner = writer.inner();
    inner.write_all(b"\n  <AppendedData encoding=\"raw\">\n   _")?;
    Ok(())
}

fn appended_binary_header_end<W: Write>(writer: &mut Writer<W>) -> Result<(), Error> {
    let inner = writer.inner();
    inner.write_all(b"\n  </AppendedData>")?;
    Ok(())
}

fn join_floats(values: &[f64; 3]) -> String {
    let mut buffer = ryu::Buffer::new();
    values
        .iter()
        .map(|value| buffer.format(*value).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
