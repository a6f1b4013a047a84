use crate::engine::moment::partial::PartialAggregate;
use crate::engine::types::ScalarValue;
use crate::engine::udf::datum::Datum;
use crate::test_helpers::factories::TupleFactory;

#[test]
fn creates_bag_and_order() {
    let tuple = TupleFactory::new()
        .with_doubles(&[1.0, 2.0])
        .with_order(3.0)
        .create();

    assert_eq!(tuple.len(), 2);
    let bag = tuple[0].as_bag().expect("bag");
    assert_eq!(bag.len(), 2);
    assert_eq!(bag[1], vec![Datum::Scalar(ScalarValue::Float64(2.0))]);
    assert_eq!(tuple[1], Datum::Scalar(ScalarValue::Float64(3.0)));
}

#[test]
fn without_order_drops_second_field() {
    let tuple = TupleFactory::new().with_doubles(&[1.0]).without_order().create();
    assert_eq!(tuple.len(), 1);
}

#[test]
fn partials_wraps_tuples_in_one_bag() {
    let tuple = TupleFactory::partials(&[
        PartialAggregate::new(Some(1.0), 1),
        PartialAggregate::EMPTY,
    ]);
    assert_eq!(tuple.len(), 1);
    let bag = tuple[0].as_bag().expect("bag");
    assert_eq!(bag.len(), 2);
    assert!(bag[1][0].is_null());
}
