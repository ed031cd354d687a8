//! Scanline defilter tests: the five filter types and their edge cases.

use figpress_core::codec::defilter::{defilter, paeth_predictor};
use figpress_core::error::ConvertError;

#[test]
fn none_filter_copies_rows_unchanged() {
    let data = [0, 1, 2, 3, 0, 4, 5, 6];
    assert_eq!(defilter(&data, 3, 2, 3).unwrap(), [1, 2, 3, 4, 5, 6]);
}

#[test]
fn sub_filter_on_width_one_row_is_identity() {
    // A single one-channel pixel has no left neighbor, so the raw byte
    // passes through unchanged.
    let data = [1, 42];
    assert_eq!(defilter(&data, 1, 1, 1).unwrap(), [42]);
}

#[test]
fn sub_filter_accumulates_left_neighbor() {
    let data = [1, 1, 1, 1, 1];
    assert_eq!(defilter(&data, 4, 1, 1).unwrap(), [1, 2, 3, 4]);
}

#[test]
fn sub_filter_looks_back_a_whole_pixel() {
    // bpp = 3: each byte adds the byte three positions left, so channels
    // accumulate independently.
    let data = [1, 10, 20, 30, 1, 2, 3];
    assert_eq!(defilter(&data, 6, 1, 3).unwrap(), [10, 20, 30, 11, 22, 33]);
}

#[test]
fn up_filter_first_row_uses_zero_row() {
    let data = [2, 7, 8];
    assert_eq!(defilter(&data, 2, 1, 1).unwrap(), [7, 8]);
}

#[test]
fn up_filter_adds_previous_reconstructed_row() {
    let data = [0, 10, 20, 2, 1, 2];
    assert_eq!(defilter(&data, 2, 2, 1).unwrap(), [10, 20, 11, 22]);
}

#[test]
fn average_filter_floors_the_mean() {
    // Row 1 reconstructs to [10, 20]. Row 2: first byte has left=0,
    // up=10 -> +5; second byte has left=8, up=20 -> +14 (floor of 28/2).
    let data = [0, 10, 20, 3, 3, 7];
    assert_eq!(defilter(&data, 2, 2, 1).unwrap(), [10, 20, 8, 21]);
}

#[test]
fn paeth_filter_first_row_behaves_like_sub() {
    // With the zero previous row the predictor always picks left.
    let data = [4, 5, 5, 5];
    assert_eq!(defilter(&data, 3, 1, 1).unwrap(), [5, 10, 15]);
}

#[test]
fn paeth_predictor_picks_nearest_neighbor() {
    assert_eq!(paeth_predictor(10, 20, 15), 15);
    assert_eq!(paeth_predictor(100, 20, 15), 100);
    assert_eq!(paeth_predictor(10, 104, 15), 104);
}

#[test]
fn additions_wrap_modulo_256() {
    let data = [1, 200, 100];
    assert_eq!(defilter(&data, 2, 1, 1).unwrap(), [200, 44]);
}

#[test]
fn filter_type_five_is_an_error() {
    let data = [5, 1, 2, 3];
    let err = defilter(&data, 3, 1, 3).unwrap_err();
    assert!(matches!(err, ConvertError::FilterType(5)));
}

#[test]
fn truncated_stream_is_missing_data() {
    let data = [0, 1, 2];
    let err = defilter(&data, 3, 2, 3).unwrap_err();
    assert!(matches!(err, ConvertError::MissingData(_)));
}

#[test]
fn defilter_is_deterministic() {
    let data: Vec<u8> = std::iter::once(4)
        .chain((0..12).map(|i| (i * 37) as u8))
        .chain(std::iter::once(3))
        .chain((0..12).map(|i| (i * 91) as u8))
        .collect();
    let first = defilter(&data, 12, 2, 4).unwrap();
    let second = defilter(&data, 12, 2, 4).unwrap();
    assert_eq!(first, second);
}
