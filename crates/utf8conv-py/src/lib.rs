//! Python bindings for `utf8conv`.
//!
//! The module exposes the two conversions on plain Python values: UTF-16 is a
//! `list[int]` of code units and UTF-8 is `bytes`. Every transcoding error is
//! raised as `ValueError` carrying the Rust error message.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

fn value_error(err: impl ToString) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Encode a list of UTF-16 code units as UTF-8 `bytes`.
#[pyfunction]
pub fn encode<'py>(py: Python<'py>, units: Vec<u16>) -> PyResult<Bound<'py, PyBytes>> {
    let bytes = ::utf8conv::encode(&units).map_err(value_error)?;
    Ok(PyBytes::new(py, &bytes))
}

/// Decode UTF-8 `bytes` into a list of UTF-16 code units.
///
/// With `strict=False`, overlong forms and encoded surrogates are accepted.
#[pyfunction]
#[pyo3(signature = (data, strict = true))]
pub fn decode(data: &[u8], strict: bool) -> PyResult<Vec<u16>> {
    ::utf8conv::decode_with(data, ::utf8conv::DecodeOptions { strict }).map_err(value_error)
}

/// Encode a `str` as UTF-8 `bytes` by way of its UTF-16 code units.
#[pyfunction]
pub fn encode_str<'py>(py: Python<'py>, text: &str) -> PyResult<Bound<'py, PyBytes>> {
    let units: Vec<u16> = text.encode_utf16().collect();
    encode(py, units)
}

/// Strictly decode UTF-8 `bytes` into a `str`.
#[pyfunction]
pub fn decode_str(data: &[u8]) -> PyResult<String> {
    ::utf8conv::decode_to_string(data).map_err(value_error)
}

#[pymodule]
pub fn utf8conv(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(encode, m)?)?;
    m.add_function(wrap_pyfunction!(decode, m)?)?;
    m.add_function(wrap_pyfunction!(encode_str, m)?)?;
    m.add_function(wrap_pyfunction!(decode_str, m)?)?;
    Ok(())
}
