use vtk_core::{AbstractArray, DataType, StringArray};

const SIZE: usize = 1000;

fn entries() -> Vec<String> {
    (0..SIZE).map(|i| format!("string entry {i}")).collect()
}

#[test]
fn string_array_operations() {
    let mut array = StringArray::new();

    array.resize(0).unwrap();
    array.resize(10).unwrap();
    assert_eq!(array.capacity(), 10);
    array.resize(5).unwrap();
    assert_eq!(array.capacity(), 5);
    array.resize(SIZE).unwrap();
    assert_eq!(array.capacity(), SIZE);
    assert_eq!(array.number_of_values(), 0);

    array.set_number_of_values(100).unwrap();
    assert_eq!(array.number_of_values(), 100);
    assert_eq!(array.get_value(99).unwrap(), "");

    array.set_array(entries()).unwrap();
    assert_eq!(array.number_of_values(), SIZE);
    assert_eq!(array.get_value(123).unwrap(), "string entry 123");

    array.set_value(124, "jabberwocky".to_string()).unwrap();
    assert_eq!(array.get_value(124).unwrap(), "jabberwocky");

    array
        .insert_value(500, "There and Back Again".to_string())
        .unwrap();
    assert_eq!(array.get_value(500).unwrap(), "There and Back Again");

    let index = array.insert_next_value("3.141592653589".to_string()).unwrap();
    assert_eq!(index, SIZE);
    assert_eq!(array.get_value(index).unwrap(), "3.141592653589");
    assert_eq!(array.number_of_values(), SIZE + 1);

    let mut new_values = StringArray::new();
    new_values.set_number_of_values(3).unwrap();
    array.get_tuples(&[10, 20, 314], &mut new_values).unwrap();
    assert_eq!(
        new_values.values(),
        &["string entry 10", "string entry 20", "string entry 314"]
    );

    new_values.reset();
    new_values.set_number_of_values(3).unwrap();
    array.get_tuples_range(30, 32, &mut new_values).unwrap();
    assert_eq!(
        new_values.values(),
        &["string entry 30", "string entry 31", "string entry 32"]
    );

    array.insert_tuple(150, 2, &new_values).unwrap();
    assert_eq!(array.get_value(150).unwrap(), "string entry 32");
}

#[test]
fn out_of_range_access_fails() {
    let mut array = StringArray::from_values(entries(), 1).unwrap();
    let mut dest = StringArray::new();

    assert!(array.get_value(SIZE).is_err());
    assert!(array.set_value(SIZE, "past the end".to_string()).is_err());
    // nothing is written when any id is invalid
    assert!(array.get_tuples(&[1, SIZE], &mut dest).is_err());
    assert_eq!(dest.number_of_values(), 0);
    assert!(array.get_tuples_range(5, 4, &mut dest).is_err());
}

#[test]
fn abstract_string_array() {
    let strings = StringArray::from_values(entries(), 1).unwrap().with_name("labels");
    let array = AbstractArray::from(strings);
    assert_eq!(array.data_type(), DataType::String);

    let mut dest = array.new_instance();
    array.get_tuples(&[999, 0], &mut dest).unwrap();
    let dest = dest.downcast_ref::<String>().unwrap();
    assert_eq!(dest.values(), &["string entry 999", "string entry 0"]);
    assert_eq!(dest.name(), Some("labels"));
}
