use arrow::array::{Array, Float64Array};
use numcol::{ColumnStoreConfig, CompareOp, PrimitiveColumn, UnaryOp};

#[test]
fn arrow_input_flows_through_kernels_and_back_out() {
    let input = Float64Array::from(vec![Some(1.25), None, Some(-2.5), Some(4.0), Some(0.5)]);
    let col =
        PrimitiveColumn::<f64>::from_arrow(&input, ColumnStoreConfig::with_max_chunk_capacity(2))
            .unwrap();
    assert_eq!(col.store().num_chunks(), 3);
    assert_eq!(col.null_count(), 1);

    let rounded = col.unary(UnaryOp::Round).unwrap();
    let chunks = rounded.to_arrow_chunks().unwrap();
    assert_eq!(chunks.len(), 3);
    let first = chunks[0].as_any().downcast_ref::<Float64Array>().unwrap();
    assert_eq!(first.value(0), 1.0);
    assert!(first.is_null(1));

    let positive = col.compare_scalar(0.0, CompareOp::Gt).unwrap();
    let masks = positive.to_arrow_chunks().unwrap();
    let total: usize = masks.iter().map(|a| a.len()).sum();
    assert_eq!(total, 5);
    assert_eq!(positive.to_vec()[2], Some(false));
}
