use approx::assert_relative_eq;
use matmul_bt::matrix::transpose::transpose_parallel;
use matmul_bt::{
    Matrix, MatmulError, MultiplyConfig, matmul_naive, multiply, multiply_naive,
    multiply_transposed, multiply_transposed_into, partition_rows, transpose,
};
use rand::prelude::*;

fn assert_matrices_equal(expected: &[f64], actual: &[f64], name: &str) {
    assert_eq!(expected.len(), actual.len(), "{}: length mismatch", name);
    for i in 0..expected.len() {
        assert_relative_eq!(expected[i], actual[i], max_relative = 1e-12, epsilon = 1e-12);
    }
}

fn random_f64(rows: usize, cols: usize, rng: &mut StdRng) -> Matrix<f64> {
    Matrix::from_fn(rows, cols, |_, _| rng.random_range(-1.0..1.0)).unwrap()
}

fn random_i32(rows: usize, cols: usize, rng: &mut StdRng) -> Matrix<i32> {
    Matrix::from_fn(rows, cols, |_, _| rng.random_range(0..=10)).unwrap()
}

fn workers(n: usize) -> MultiplyConfig {
    MultiplyConfig::new().with_workers(n)
}

// ============================================================
// Worked examples
// ============================================================

#[test]
fn test_2x2_multiply() {
    let a = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
    let b = Matrix::from_vec(2, 2, vec![5, 6, 7, 8]).unwrap();

    let bt = transpose(&b, &workers(2)).unwrap();
    assert_eq!(bt.as_slice(), &[5, 7, 6, 8]);

    let c = multiply(&a, &b, &workers(2)).unwrap();
    assert_eq!(c.as_slice(), &[19, 22, 43, 50]);

    // Feeding B straight in as the "transposed" operand dots row against row.
    let rows_dot_rows = multiply_transposed(&a, &b, &workers(2)).unwrap();
    assert_eq!(rows_dot_rows.as_slice(), &[17, 23, 39, 53]);
}

#[test]
fn test_2x3_times_3x2() {
    let a = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]; // 2x3
    let b = vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]; // 3x2

    let mut c_naive = vec![0.0; 4];
    matmul_naive(&a, &b, &mut c_naive, 2, 2, 3);
    assert_eq!(c_naive, vec![58.0, 64.0, 139.0, 154.0]);

    let c = multiply(
        &Matrix::from_vec(2, 3, a).unwrap(),
        &Matrix::from_vec(3, 2, b).unwrap(),
        &workers(4),
    )
    .unwrap();
    assert_matrices_equal(&c_naive, c.as_slice(), "2x3 * 3x2");
}

#[test]
fn test_five_rows_three_workers() {
    let ranges: Vec<_> = partition_rows(5, 3).collect();
    assert_eq!(ranges, vec![0..1, 1..2, 2..5]);
}

#[test]
fn test_unbounded_worker_count() {
    let a = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
    let b = Matrix::from_vec(2, 2, vec![5, 6, 7, 8]).unwrap();
    let config = MultiplyConfig::new()
        .with_workers(usize::MAX)
        .with_parallel_transpose(true);
    let c = multiply(&a, &b, &config).unwrap();
    assert_eq!(c.as_slice(), &[19, 22, 43, 50]);

    let mut rng = StdRng::seed_from_u64(9);
    let a = random_f64(13, 6, &mut rng);
    let b = random_f64(6, 11, &mut rng);
    let c = multiply(&a, &b, &config).unwrap();
    assert_eq!(c, multiply_naive(&a, &b).unwrap());
}

// ============================================================
// Transpose
// ============================================================

#[test]
fn test_transpose_involution() {
    let mut rng = StdRng::seed_from_u64(7);
    for (r, c) in [(1, 1), (1, 9), (9, 1), (5, 7), (32, 17), (100, 3)] {
        let m = random_f64(r, c, &mut rng);
        let t = m.transpose().unwrap();
        assert_eq!(t.shape(), (c, r));
        for i in 0..r {
            for j in 0..c {
                assert_eq!(t[(j, i)], m[(i, j)]);
            }
        }
        assert_eq!(t.transpose().unwrap(), m);
    }
}

#[test]
fn test_parallel_transpose_matches() {
    let mut rng = StdRng::seed_from_u64(8);
    let m = random_i32(37, 53, &mut rng);
    let expected = m.transpose().unwrap();

    for w in 1..=8 {
        let mut dst = vec![0; 37 * 53];
        transpose_parallel(m.as_slice(), &mut dst, 37, 53, w).unwrap();
        assert_eq!(dst, expected.as_slice(), "{} workers", w);
    }
}

// ============================================================
// Multiply against the naive reference
// ============================================================

#[test]
fn test_integer_multiply_is_exact() {
    let mut rng = StdRng::seed_from_u64(1);
    let shapes = [(3, 3, 3), (8, 8, 8), (13, 17, 19), (64, 32, 48), (1, 50, 1)];

    for (m, n, k) in shapes {
        let a = random_i32(m, k, &mut rng);
        let b = random_i32(k, n, &mut rng);
        let expected = multiply_naive(&a, &b).unwrap();

        for w in [1, 2, 3, 7, 16] {
            let c = multiply(&a, &b, &workers(w)).unwrap();
            assert_eq!(c, expected, "{}x{}x{} on {} workers", m, n, k, w);
        }
    }
}

#[test]
fn test_float_multiply_matches_reference() {
    let mut rng = StdRng::seed_from_u64(2);
    let shapes = [
        (32, 64, 48),  // wide result
        (64, 32, 48),  // tall result
        (100, 50, 75), // odd sizes
        (48, 48, 100), // deep k
        (13, 17, 19),  // primes
    ];

    for (m, n, k) in shapes {
        let a = random_f64(m, k, &mut rng);
        let b = random_f64(k, n, &mut rng);
        let expected = multiply_naive(&a, &b).unwrap();

        let c = multiply(&a, &b, &workers(4)).unwrap();
        assert_matrices_equal(
            expected.as_slice(),
            c.as_slice(),
            &format!("non_square_{}x{}x{}", m, n, k),
        );
    }
}

#[test]
fn test_same_accumulation_order_as_reference() {
    // Both sum from zero in increasing k, so f64 results are bit-identical.
    let mut rng = StdRng::seed_from_u64(3);
    let a = random_f64(40, 70, &mut rng);
    let b = random_f64(70, 30, &mut rng);

    let expected = multiply_naive(&a, &b).unwrap();
    let c = multiply(&a, &b, &workers(6)).unwrap();
    assert_eq!(c, expected);
}

#[test]
fn test_results_identical_across_worker_counts() {
    let mut rng = StdRng::seed_from_u64(4);
    let a = random_f64(57, 33, &mut rng);
    let bt = random_f64(41, 33, &mut rng);

    let baseline = multiply_transposed(&a, &bt, &workers(1)).unwrap();
    for w in 2..=8 {
        assert_eq!(multiply_transposed(&a, &bt, &workers(w)).unwrap(), baseline);
    }
}

#[test]
fn test_repeated_calls_deterministic() {
    let mut rng = StdRng::seed_from_u64(5);
    let a = random_f64(128, 128, &mut rng);
    let b = random_f64(128, 128, &mut rng);
    let config = workers(4).with_parallel_transpose(true);

    let first = multiply(&a, &b, &config).unwrap();
    for _ in 0..5 {
        let again = multiply(&a, &b, &config).unwrap();
        assert_eq!(
            first.as_slice().iter().map(|x| x.to_bits()).collect::<Vec<_>>(),
            again.as_slice().iter().map(|x| x.to_bits()).collect::<Vec<_>>()
        );
    }
}

#[test]
fn test_default_config_uses_platform_workers() {
    let mut rng = StdRng::seed_from_u64(6);
    let a = random_i32(99, 10, &mut rng);
    let b = random_i32(10, 20, &mut rng);
    let c = multiply(&a, &b, &MultiplyConfig::default()).unwrap();
    assert_eq!(c, multiply_naive(&a, &b).unwrap());
}

#[test]
fn test_slice_api_into_caller_buffer() {
    let a = [1, 2, 3, 4, 5, 6]; // 3x2
    let bt = [1, 1, 2, 0]; // 2x2, rows are columns of B
    let mut c = [-7; 6];
    multiply_transposed_into(&a, &bt, &mut c, 3, 2, 2, 3).unwrap();
    assert_eq!(c, [3, 2, 7, 6, 11, 10]);
}

// ============================================================
// Degenerate sizes and errors
// ============================================================

#[test]
fn test_degenerate_sizes() {
    let config = workers(4);

    let empty_rows = Matrix::<f64>::zeros(0, 4).unwrap();
    let c = multiply(&empty_rows, &Matrix::zeros(4, 3).unwrap(), &config).unwrap();
    assert_eq!(c.shape(), (0, 3));

    let a = Matrix::<f64>::zeros(2, 4).unwrap();
    let c = multiply(&a, &Matrix::zeros(4, 0).unwrap(), &config).unwrap();
    assert_eq!(c.shape(), (2, 0));

    let no_common = Matrix::<i32>::zeros(2, 0).unwrap();
    let c = multiply(&no_common, &Matrix::zeros(0, 3).unwrap(), &config).unwrap();
    assert_eq!(c.shape(), (2, 3));
    assert_eq!(c.as_slice(), &[0; 6]);
}

#[test]
fn test_zero_workers_is_one_worker() {
    let a = Matrix::from_vec(2, 1, vec![2, 3]).unwrap();
    let b = Matrix::from_vec(1, 2, vec![4, 5]).unwrap();
    let c = multiply(&a, &b, &workers(0)).unwrap();
    assert_eq!(c.as_slice(), &[8, 10, 12, 15]);
}

#[test]
fn test_shape_mismatch_is_reported() {
    let a = Matrix::<f64>::zeros(3, 4).unwrap();
    let b = Matrix::<f64>::zeros(5, 3).unwrap();

    assert!(matches!(
        multiply(&a, &b, &workers(2)),
        Err(MatmulError::ShapeMismatch { left: 4, right: 5, .. })
    ));
    assert!(matches!(
        multiply_transposed(&a, &b, &workers(2)),
        Err(MatmulError::ShapeMismatch { left: 4, right: 3, .. })
    ));
}

#[test]
fn test_oversized_matrix_is_allocation_error() {
    assert!(matches!(
        Matrix::<f64>::zeros(usize::MAX / 2, 3),
        Err(MatmulError::Allocation { .. })
    ));
}
