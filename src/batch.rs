//! Element-wise batch evaluation.
//!
//! Every batch entry point of the crate is built from the scalar formula through the
//! helpers below, so a batch result at index `i` is by construction the scalar result on
//! the inputs at index `i`.
//!
//! Lengths are validated before any element is evaluated; a mismatch yields
//! [`SkyMathError::Shape`] and no partial output. With the `parallel` feature the maps run
//! on rayon's global pool, otherwise sequentially. Output order never depends on
//! scheduling.

#[cfg(not(feature = "parallel"))]
use itertools::izip;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::skymath_errors::{Result, SkyMathError};

/// Check that every named sequence has the length of the first one.
///
/// Arguments
/// ---------
/// * `sequences`: `(argument name, slice)` pairs; the first pair sets the expected length.
///
/// Return
/// ----------
/// * The common length, or a [`SkyMathError::Shape`] naming the first offending argument.
pub fn ensure_same_length(sequences: &[(&'static str, &[f64])]) -> Result<usize> {
    let Some((_, first)) = sequences.first() else {
        return Ok(0);
    };
    let expected = first.len();

    for (argument, values) in sequences.iter().skip(1) {
        if values.len() != expected {
            log::debug!(
                "rejecting batch call: '{argument}' has {} elements, expected {expected}",
                values.len()
            );
            return Err(SkyMathError::Shape {
                argument,
                expected,
                found: values.len(),
            });
        }
    }
    Ok(expected)
}

/// Evaluate `f` on every index of `0..len`, keeping index order in the output.
pub fn map_indexed<R, F>(len: usize, f: F) -> Vec<R>
where
    R: Send,
    F: Fn(usize) -> R + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        (0..len).into_par_iter().map(f).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        (0..len).map(f).collect()
    }
}

/// Map a scalar function over a slice.
pub fn map_values<F>(values: &[f64], f: F) -> Vec<f64>
where
    F: Fn(f64) -> f64 + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        values.par_iter().map(|&v| f(v)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        values.iter().map(|&v| f(v)).collect()
    }
}

/// Map a two-argument, two-result scalar function over a pair of equal-length slices.
///
/// This is the shape of every coordinate transform: `(ra, dec) -> (alt, az)`,
/// `(l, b) -> (ra, dec)`, and so on.
pub fn map_pairs<F>(
    first: (&'static str, &[f64]),
    second: (&'static str, &[f64]),
    f: F,
) -> Result<(Vec<f64>, Vec<f64>)>
where
    F: Fn(f64, f64) -> (f64, f64) + Sync + Send,
{
    ensure_same_length(&[first, second])?;
    let (a, b) = (first.1, second.1);

    #[cfg(feature = "parallel")]
    {
        Ok(a.par_iter()
            .zip(b.par_iter())
            .map(|(&x, &y)| f(x, y))
            .unzip())
    }
    #[cfg(not(feature = "parallel"))]
    {
        Ok(izip!(a, b).map(|(&x, &y)| f(x, y)).unzip())
    }
}

/// Split a vector of pairs into two parallel vectors.
pub fn unzip_pairs(pairs: Vec<(f64, f64)>) -> (Vec<f64>, Vec<f64>) {
    pairs.into_iter().unzip()
}
