use crate::engine::moment::partial::PartialAggregate;
use crate::engine::types::ScalarValue;
use crate::engine::udf::datum::Datum;
use crate::test_helpers::factories::PartialAggregateFactory;

#[test]
fn creates_empty_partial_by_default() {
    let partial = PartialAggregateFactory::new().create();
    assert_eq!(partial, PartialAggregate::EMPTY);
}

#[test]
fn with_value_raises_to_order() {
    let partial = PartialAggregateFactory::new().with_value(3.0, 2.0).create();
    assert_eq!(partial, PartialAggregate::new(Some(9.0), 1));
}

#[test]
fn create_tuple_encodes_sum_and_count() {
    let tuple = PartialAggregateFactory::new()
        .with_sum(4.5)
        .with_count(3)
        .create_tuple();
    assert_eq!(
        tuple,
        vec![
            Datum::Scalar(ScalarValue::Float64(4.5)),
            Datum::Scalar(ScalarValue::Int64(3)),
        ]
    );
}
