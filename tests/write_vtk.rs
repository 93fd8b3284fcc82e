use vtk_core::{AbstractArray, DoubleArray, Encoding, Extent, StringArray, StructuredData, TypedArray};

fn create_data() -> StructuredData {
    let extent = Extent::new(0, 3, 0, 2, 0, 1).unwrap();
    let mut data = StructuredData::new(extent);

    let points = data.number_of_points() as usize;
    let cells = data.number_of_cells() as usize;

    let rho = DoubleArray::from_values((0..points).map(|i| i as f64).collect(), 1).unwrap();
    let velocity = TypedArray::<f32>::from_values(vec![1.5; points * 3], 3).unwrap();
    let labels = StringArray::from_values((0..cells).map(|i| format!("c{i}")).collect(), 1).unwrap();

    data.add_point_array(rho.with_name("rho")).unwrap();
    data.add_point_array(velocity.with_name("velocity")).unwrap();
    data.add_cell_array(labels.with_name("labels")).unwrap();
    data
}

fn write(data: &StructuredData, encoding: Encoding) -> String {
    let mut output = Vec::new();
    vtk_core::write_vtk(&mut output, data, [1.0, 2.0, 3.0], [0.1, 0.1, 0.1], encoding).unwrap();
    String::from_utf8_lossy(&output).into_owned()
}

#[test]
fn ascii_file_layout() {
    let text = write(&create_data(), Encoding::Ascii);

    assert!(text.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(text.contains(r#"WholeExtent="0 3 0 2 0 1" Origin="1.0 2.0 3.0" Spacing="0.1 0.1 0.1""#));
    assert!(text.contains(r#"<Piece Extent="0 3 0 2 0 1">"#));
    assert!(text.contains(
        r#"<DataArray type="Float32" Name="velocity" NumberOfComponents="3" format="ascii">"#
    ));
    // "c0" as null terminated characters
    assert!(text.contains("99 48 0 99 49 0"));

    let point_data = text.find("<PointData>").unwrap();
    let cell_data = text.find("<CellData>").unwrap();
    assert!(point_data < cell_data);
    assert!(text.trim_end().ends_with("</VTKFile>"));
}

#[test]
fn every_encoding_writes_every_array() {
    let data = create_data();

    for encoding in [Encoding::Ascii, Encoding::Base64, Encoding::Appended] {
        let text = write(&data, encoding);
        for name in ["rho", "velocity", "labels"] {
            assert!(
                text.contains(&format!(r#"Name="{name}""#)),
                "{name} missing with {encoding:?}"
            );
        }
    }

    let appended = write(&data, Encoding::Appended);
    assert!(appended.contains(r#"<AppendedData encoding="raw">"#));
    // 8 byte header + 24 doubles, then 8 byte header + 72 floats
    assert!(appended.contains(r#"offset="200""#));
    assert!(appended.contains(r#"offset="496""#));
}

#[test]
fn unnamed_arrays_are_skipped() {
    let extent = Extent::new(0, 1, 0, 0, 0, 0).unwrap();
    let mut data = StructuredData::new(extent);
    data.add_point_array(AbstractArray::from(DoubleArray::from_values(vec![1.0, 2.0], 1).unwrap()))
        .unwrap();

    let text = write(&data, Encoding::Ascii);
    assert!(!text.contains("<DataArray"));
}
