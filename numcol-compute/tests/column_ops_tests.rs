use numcol_column_map::ColumnStoreConfig;
use numcol_compute::PrimitiveColumn;
use numcol_result::Error;
use numcol_types::{BinaryOp, CompareOp, CumulativeOp, ReduceOp, ShiftOp, Timestamp, UnaryOp};
use numcol_test_utils::init_tracing_for_tests;

fn cap(n: usize) -> ColumnStoreConfig {
    ColumnStoreConfig::with_max_chunk_capacity(n)
}

fn five_ints() -> PrimitiveColumn<i32> {
    PrimitiveColumn::from_values([1, 2, 3, 4, 5], cap(3)).unwrap()
}

#[test]
fn five_row_int32_column_across_two_chunks() {
    init_tracing_for_tests();
    let col = five_ints();
    assert_eq!(col.store().num_chunks(), 2);
    assert_eq!(col.store().chunk(0).unwrap().len(), 3);
    assert_eq!(col.store().chunk(1).unwrap().len(), 2);

    assert_eq!(col.sum().unwrap(), 15);
    assert_eq!(col.max().unwrap(), Some(5));
    assert_eq!(col.min().unwrap(), Some(1));

    let mut running = col.clone();
    running.cumulative_sum().unwrap();
    assert_eq!(
        running.to_vec(),
        vec![Some(1), Some(3), Some(6), Some(10), Some(15)]
    );
    // The source column is untouched by the scan on its clone.
    assert_eq!(col.sum().unwrap(), 15);

    let err = col.binary_scalar(0, BinaryOp::Divide).unwrap_err();
    assert!(matches!(err, Error::DivideByZero { .. }));

    let floats = PrimitiveColumn::from_values([1.0f64, 2.0, 3.0, 4.0, 5.0], cap(3)).unwrap();
    let inf = floats.binary_scalar(0.0, BinaryOp::Divide).unwrap();
    assert!(inf.to_vec().iter().all(|v| *v == Some(f64::INFINITY)));
}

#[test]
fn overflowing_sum_fails_whole_call() {
    let col = PrimitiveColumn::from_values([i32::MAX, 1], cap(4)).unwrap();
    assert!(matches!(col.sum(), Err(Error::ArithmeticOverflow { .. })));

    let mut running = col.clone();
    assert!(running.cumulative_sum().is_err());
    assert_eq!(running, col);
}

#[test]
fn divide_clears_validity_where_divisor_is_null() {
    let lhs = PrimitiveColumn::from_values([10i64, 20, 30, 40], cap(3)).unwrap();
    let rhs = PrimitiveColumn::from_options([Some(2i64), None, Some(3), None], cap(3)).unwrap();
    let out = lhs.divide(&rhs).unwrap();
    assert_eq!(out.to_vec(), vec![Some(5), None, Some(10), None]);
    assert_eq!(out.null_count(), 2);
}

#[test]
fn reductions_ignore_nulls() {
    let col =
        PrimitiveColumn::from_options([Some(-3i16), None, Some(8), None, Some(2)], cap(2)).unwrap();
    assert_eq!(col.sum().unwrap(), 7);
    assert_eq!(col.product().unwrap(), -48);
    assert_eq!(col.min().unwrap(), Some(-3));
    assert_eq!(col.max().unwrap(), Some(8));

    let nulls = PrimitiveColumn::<u32>::with_nulls(4, cap(3)).unwrap();
    assert_eq!(nulls.sum().unwrap(), 0);
    assert_eq!(nulls.max().unwrap(), None);
}

#[test]
fn cumulative_max_is_non_decreasing() {
    let mut col =
        PrimitiveColumn::from_values([3i32, 1, 4, 1, 5, 9, 2, 6, 5, 3], cap(4)).unwrap();
    col.cumulative_max().unwrap();
    let values: Vec<i32> = col.to_vec().into_iter().flatten().collect();
    assert_eq!(values, vec![3, 3, 4, 4, 5, 9, 9, 9, 9, 9]);
    assert!(values.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn row_subset_over_all_rows_matches_full_sum() {
    let col = PrimitiveColumn::from_options(
        [Some(4u64), None, Some(6), Some(1), None, Some(9), Some(2)],
        cap(3),
    )
    .unwrap();
    let full = col.sum().unwrap();
    assert_eq!(col.reduce_rows(0..col.len(), ReduceOp::Sum).unwrap(), full);
    // Order and repetition do not matter for a sum.
    let shuffled = [6, 0, 5, 2, 3, 1, 4];
    assert_eq!(col.reduce_rows(shuffled, ReduceOp::Sum).unwrap(), full);
    assert_eq!(col.reduce_rows([5, 5], ReduceOp::Sum).unwrap(), 18);
}

#[test]
fn row_subset_product_and_extrema_start_from_zero() {
    let col = five_ints();
    assert_eq!(col.reduce_rows([1, 2], ReduceOp::Product).unwrap(), 0);
    assert_eq!(col.reduce_rows([0, 4], ReduceOp::Min).unwrap(), 0);
    assert_eq!(col.reduce_rows([0, 4], ReduceOp::Max).unwrap(), 5);
    assert_eq!(col.reduce_rows([], ReduceOp::Sum).unwrap(), 0);
    assert!(matches!(
        col.reduce_rows([7], ReduceOp::Sum),
        Err(Error::RowOutOfRange { row: 7, len: 5 })
    ));
}

#[test]
fn row_subset_cumulative_rewrites_selected_rows_only() {
    let mut col = five_ints();
    col.cumulative_rows([4, 0, 2], CumulativeOp::Sum).unwrap();
    // Row 4 seeds with 5; row 0 becomes 5 + 1; row 2 becomes 6 + 3.
    assert_eq!(
        col.to_vec(),
        vec![Some(6), Some(2), Some(9), Some(4), Some(5)]
    );

    let mut col = five_ints();
    col.cumulative_rows([2, 0, 1], CumulativeOp::Max).unwrap();
    assert_eq!(
        col.to_vec(),
        vec![Some(3), Some(3), Some(3), Some(4), Some(5)]
    );
}

#[test]
fn full_cumulative_min_folds_null_slots() {
    let mut col =
        PrimitiveColumn::from_options([Some(7i32), Some(4), None, Some(9)], cap(3)).unwrap();
    col.cumulative(CumulativeOp::Min).unwrap();
    assert_eq!(col.to_vec(), vec![Some(7), Some(4), None, Some(0)]);
}

#[test]
fn boolean_columns_support_logic_not_arithmetic() {
    let col =
        PrimitiveColumn::from_options([Some(true), None, Some(true)], cap(2)).unwrap();
    assert!(col.all().unwrap());
    assert!(col.any().unwrap());
    assert!(matches!(col.sum(), Err(Error::UnsupportedOperation { .. })));
    assert!(matches!(
        col.binary_scalar(true, BinaryOp::Add),
        Err(Error::UnsupportedOperation { .. })
    ));
    let flipped = col.unary(UnaryOp::Not).unwrap();
    assert_eq!(flipped.to_vec(), vec![Some(false), None, Some(false)]);
    let xor = col.binary_scalar(true, BinaryOp::Xor).unwrap();
    assert!(!xor.any().unwrap());

    let empty = PrimitiveColumn::<bool>::new().unwrap();
    assert!(empty.all().unwrap());
    assert!(!empty.any().unwrap());
}

#[test]
fn timestamps_compare_but_do_not_add() {
    let col = PrimitiveColumn::from_values(
        [1_000i64, 5_000, 3_000].map(Timestamp::from_millis),
        cap(2),
    )
    .unwrap();
    assert!(col.add(&col).is_err());
    assert!(col.sum().is_err());
    assert_eq!(col.max().unwrap(), Some(Timestamp::from_millis(5_000)));
    let later = col
        .compare_scalar(Timestamp::from_millis(2_000), CompareOp::Gt)
        .unwrap();
    assert_eq!(later.to_vec(), vec![Some(false), Some(true), Some(true)]);
    let mut running = col.clone();
    running.cumulative_max().unwrap();
    assert_eq!(
        running.to_vec(),
        [1_000i64, 5_000, 5_000]
            .map(|ms| Some(Timestamp::from_millis(ms)))
            .to_vec()
    );
}

#[test]
fn shifts_reject_out_of_range_counts() {
    let col = PrimitiveColumn::from_values([1u8, 2, 3], cap(2)).unwrap();
    assert_eq!(
        col.shift(ShiftOp::Left, 2).unwrap().to_vec(),
        vec![Some(4), Some(8), Some(12)]
    );
    assert!(matches!(
        col.shift(ShiftOp::Right, 8),
        Err(Error::InvalidArgumentError(_))
    ));
    assert!(col.shift(ShiftOp::Left, -1).is_err());

    let floats = PrimitiveColumn::from_values([1.0f32], cap(2)).unwrap();
    assert!(matches!(
        floats.shift(ShiftOp::Left, 1),
        Err(Error::UnsupportedOperation { .. })
    ));
}

#[test]
fn failed_in_place_ops_leave_column_unchanged() {
    let mut col = PrimitiveColumn::from_values([100i8, 20, 30, 120], cap(2)).unwrap();
    let before = col.clone();
    assert!(col.binary_scalar_assign(10, BinaryOp::Add).is_err());
    assert_eq!(col, before);

    let mut col = PrimitiveColumn::from_values([i64::MIN, 1], cap(1)).unwrap();
    let before = col.clone();
    assert!(col.unary_assign(UnaryOp::Abs).is_err());
    assert_eq!(col, before);

    let mut col = PrimitiveColumn::from_values([2u16, 3], cap(2)).unwrap();
    assert!(col.cumulative_rows([0, 5], CumulativeOp::Sum).is_err());
    assert_eq!(col.to_vec(), vec![Some(2), Some(3)]);
}

#[test]
fn vector_ops_require_equal_lengths() {
    let a = five_ints();
    let b = PrimitiveColumn::from_values([1, 2], cap(3)).unwrap();
    assert!(matches!(
        a.add(&b),
        Err(Error::LengthMismatch { left: 5, right: 2 })
    ));
    assert!(a.compare(&b, CompareOp::Eq).is_err());
}

#[test]
fn unary_ops_follow_element_semantics() {
    let ints = PrimitiveColumn::from_options([Some(-4i32), None, Some(3)], cap(2)).unwrap();
    assert_eq!(
        ints.unary(UnaryOp::Abs).unwrap().to_vec(),
        vec![Some(4), None, Some(3)]
    );
    assert_eq!(
        ints.unary(UnaryOp::Negate).unwrap().to_vec(),
        vec![Some(4), None, Some(-3)]
    );
    assert!(ints.unary(UnaryOp::Round).is_err());

    let floats = PrimitiveColumn::from_values([-1.5f64, 2.4], cap(2)).unwrap();
    assert_eq!(
        floats.unary(UnaryOp::Round).unwrap().to_vec(),
        vec![Some(-2.0), Some(2.0)]
    );
    assert!(floats.unary(UnaryOp::Not).is_err());
}

#[test]
fn clones_share_chunks_until_one_side_writes() {
    let col = five_ints();
    let mut doubled = col.clone();
    assert!(col.store().is_chunk_shared(1));
    doubled.binary_scalar_assign(2, BinaryOp::Multiply).unwrap();
    assert_eq!(col.to_vec(), five_ints().to_vec());
    assert_eq!(doubled.sum().unwrap(), 30);
    assert!(!col.store().is_chunk_shared(0));
    assert!(!col.store().is_chunk_shared(1));
}
