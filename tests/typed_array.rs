use vtk_core::{AffineArray, ArrayIterator, Extent, GrowthPolicy, IdTypeArray, StructuredData, TypedArray};

#[test]
fn insert_and_read_back() {
    let mut array = IdTypeArray::new();
    for i in 0..10_000 {
        assert_eq!(array.insert_next_value(i).unwrap(), i as usize);
    }

    assert_eq!(array.number_of_values(), 10_000);
    assert!(array.capacity() >= 10_000);
    for i in 0..10_000 {
        assert_eq!(*array.get_value(i).unwrap(), i as i64);
    }
    assert_eq!(array.lookup_value(&4321), Some(4321));
}

#[test]
fn reset_keeps_capacity() {
    let mut array = TypedArray::<f32>::from_values(vec![1.0; 300], 3).unwrap();
    let capacity = array.capacity();

    array.reset();
    assert_eq!(array.number_of_tuples(), 0);
    assert_eq!(array.capacity(), capacity);

    // refilling up to the old capacity does not reallocate
    for _ in 0..100 {
        array.insert_next_tuple(&[2.0, 2.0, 2.0]).unwrap();
    }
    assert_eq!(array.capacity(), capacity);
    assert_eq!(array.tuple(99).unwrap(), &[2.0, 2.0, 2.0]);
}

#[test]
fn chunked_growth_policy() {
    let mut array = TypedArray::<u32>::new().with_growth_policy(GrowthPolicy::Chunked(64));
    for i in 0..65 {
        array.insert_next_value(i).unwrap();
    }
    assert_eq!(array.capacity(), 128);
    array.squeeze().unwrap();
    assert_eq!(array.capacity(), 65);
}

#[test]
fn iterator_writes_through() {
    let mut array = TypedArray::<f64>::with_components(2).unwrap();
    array.set_number_of_tuples(4).unwrap();

    {
        let mut iter = ArrayIterator::new(&mut array);
        for tuple in 0..iter.number_of_tuples() {
            let values = iter.tuple_mut(tuple);
            values[0] = tuple as f64;
            values[1] = -(tuple as f64);
        }
        iter[7] = 100.0;
    }

    assert_eq!(array.tuple(2).unwrap(), &[2.0, -2.0]);
    assert_eq!(array.tuple(3).unwrap(), &[3.0, 100.0]);

    let view = array.view();
    let sum: f64 = view.tuples().map(|t| t[0]).sum();
    assert_eq!(sum, 6.0);
}

#[test]
fn copy_tuples_between_arrays() {
    let source = TypedArray::<i16>::from_values((0..12).collect(), 3).unwrap();
    let mut dest = TypedArray::<i16>::with_components(3).unwrap();

    dest.insert_next_tuple_from(3, &source).unwrap();
    dest.insert_tuple(4, 0, &source).unwrap();

    // tuples in between are filled with zeros
    assert_eq!(dest.number_of_tuples(), 5);
    assert_eq!(dest.tuple(0).unwrap(), &[9, 10, 11]);
    assert_eq!(dest.tuple(2).unwrap(), &[0, 0, 0]);
    assert_eq!(dest.tuple(4).unwrap(), &[0, 1, 2]);

    let mut wrong_width = TypedArray::<i16>::with_components(2).unwrap();
    assert!(wrong_width.insert_next_tuple_from(0, &source).is_err());

    dest.remove_last_tuple();
    assert_eq!(dest.number_of_tuples(), 4);
}

#[test]
fn affine_coordinates_as_point_data() {
    let extent = Extent::new(0, 4, 0, 1, 0, 0).unwrap();
    let mut data = StructuredData::new(extent);

    let ids = AffineArray::<i64>::new(1, 0, 10).with_name("point ids");
    assert_eq!(ids.get_value(9).unwrap(), 9);
    data.add_point_array(ids.to_typed_array().unwrap()).unwrap();

    let stored = data.point_data().array("point ids").unwrap();
    assert_eq!(stored.number_of_tuples(), 10);
    let stored = stored.downcast_ref::<i64>().unwrap();
    assert_eq!(stored.lookup_value(&7), Some(7));

    // one (x, y) tuple per point
    let xy = AffineArray::new(0.5f32, 0.0, 10).with_components(2).unwrap();
    let mut tuple = [0.0; 2];
    xy.get_tuple(4, &mut tuple).unwrap();
    assert_eq!(tuple, [4.0, 4.5]);
    assert!(data.add_point_array(xy.to_typed_array().unwrap()).is_ok());
}
