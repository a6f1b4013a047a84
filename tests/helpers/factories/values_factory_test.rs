use crate::engine::types::ScalarValue;
use crate::test_helpers::factories::ValuesFactory;

#[test]
fn mixes_doubles_nulls_and_text() {
    let values = ValuesFactory::new()
        .with_nulls(1)
        .with_doubles(&[2.0])
        .with_text("abc")
        .create();
    assert_eq!(
        values,
        vec![
            ScalarValue::Null,
            ScalarValue::Float64(2.0),
            ScalarValue::Utf8("abc".into()),
        ]
    );
}

#[test]
fn sequence_inserts_nulls_at_interval() {
    let values = ValuesFactory::new().with_sequence(1.0, 1.0, 6, 3).create();
    assert_eq!(values.len(), 6);
    assert!(values[2].is_null());
    assert!(values[5].is_null());
    assert_eq!(values[3], ScalarValue::Float64(4.0));
}
