use serde::{Deserialize, Serialize};

use crate::dataset::indexable::Indexable;
use crate::foundation::error::{ReelError, ReelResult};

/// Dense, row-major `f64` array with named dimensions.
///
/// A zero-dimensional array holds exactly one value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LabeledArrayDef")]
pub struct LabeledArray {
    name: Option<String>,
    dims: Vec<String>,
    shape: Vec<usize>,
    values: Vec<f64>,
}

#[derive(Deserialize)]
struct LabeledArrayDef {
    #[serde(default)]
    name: Option<String>,
    dims: Vec<String>,
    shape: Vec<usize>,
    values: Vec<f64>,
}

impl TryFrom<LabeledArrayDef> for LabeledArray {
    type Error = ReelError;

    fn try_from(def: LabeledArrayDef) -> Result<Self, Self::Error> {
        let arr = Self::new(def.dims, def.shape, def.values)?;
        Ok(match def.name {
            Some(name) => arr.with_name(name),
            None => arr,
        })
    }
}

impl LabeledArray {
    /// Build an array, checking that dims and shape agree and that `values` fills the shape.
    pub fn new(
        dims: impl IntoIterator<Item = impl Into<String>>,
        shape: Vec<usize>,
        values: Vec<f64>,
    ) -> ReelResult<Self> {
        let dims: Vec<String> = dims.into_iter().map(Into::into).collect();
        if dims.len() != shape.len() {
            return Err(ReelError::validation(format!(
                "array has {} dims but shape has {} axes",
                dims.len(),
                shape.len()
            )));
        }
        for (i, d) in dims.iter().enumerate() {
            if dims[..i].contains(d) {
                return Err(ReelError::validation(format!("duplicate dimension '{d}'")));
            }
        }
        let expected = shape.iter().product::<usize>();
        if values.len() != expected {
            return Err(ReelError::validation(format!(
                "array shape {shape:?} needs {expected} values, got {}",
                values.len()
            )));
        }
        Ok(Self {
            name: None,
            dims,
            shape,
            values,
        })
    }

    /// Build an array by evaluating `f` at every multi-index in row-major order.
    pub fn from_fn(
        dims: impl IntoIterator<Item = impl Into<String>>,
        shape: Vec<usize>,
        mut f: impl FnMut(&[usize]) -> f64,
    ) -> ReelResult<Self> {
        let total = shape.iter().product::<usize>();
        let mut values = Vec::with_capacity(total);
        let mut idx = vec![0usize; shape.len()];
        for _ in 0..total {
            values.push(f(&idx));
            for axis in (0..shape.len()).rev() {
                idx[axis] += 1;
                if idx[axis] < shape[axis] {
                    break;
                }
                idx[axis] = 0;
            }
        }
        Self::new(dims, shape, values)
    }

    /// Zero-dimensional array holding `value`.
    pub fn scalar(value: f64) -> Self {
        Self {
            name: None,
            dims: Vec::new(),
            shape: Vec::new(),
            values: vec![value],
        }
    }

    /// Attach a variable name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Variable name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Axis extents in dimension order.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Flat row-major values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at a multi-index, or `None` if the index has the wrong arity or is out of bounds.
    pub fn get(&self, index: &[usize]) -> Option<f64> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut flat = 0usize;
        for (&i, &n) in index.iter().zip(&self.shape) {
            if i >= n {
                return None;
            }
            flat = flat * n + i;
        }
        self.values.get(flat).copied()
    }

    /// Smallest and largest finite values, ignoring NaNs.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    fn axis_of(&self, dim: &str) -> Option<usize> {
        self.dims.iter().position(|d| d == dim)
    }

    fn squeezed(mut self) -> Self {
        // Row-major layout is unchanged by dropping unit axes.
        let mut dims = Vec::with_capacity(self.dims.len());
        let mut shape = Vec::with_capacity(self.shape.len());
        for (d, n) in self.dims.drain(..).zip(self.shape.drain(..)) {
            if n != 1 {
                dims.push(d);
                shape.push(n);
            }
        }
        self.dims = dims;
        self.shape = shape;
        self
    }
}

impl Indexable for LabeledArray {
    fn dims(&self) -> Vec<&str> {
        self.dims.iter().map(String::as_str).collect()
    }

    fn dim_len(&self, dim: &str) -> Option<usize> {
        self.axis_of(dim).map(|axis| self.shape[axis])
    }

    fn isel_squeeze(&self, dim: &str, index: usize) -> ReelResult<Self> {
        let axis = self
            .axis_of(dim)
            .ok_or_else(|| ReelError::validation(format!("array has no dimension '{dim}'")))?;
        let len = self.shape[axis];
        if index >= len {
            return Err(ReelError::IndexOutOfRange {
                dim: dim.to_owned(),
                index,
                len,
            });
        }

        let outer = self.shape[..axis].iter().product::<usize>();
        let inner = self.shape[axis + 1..].iter().product::<usize>();
        let mut values = Vec::with_capacity(outer * inner);
        for o in 0..outer {
            let start = (o * len + index) * inner;
            values.extend_from_slice(&self.values[start..start + inner]);
        }

        let mut dims = self.dims.clone();
        let mut shape = self.shape.clone();
        dims.remove(axis);
        shape.remove(axis);

        let selected = Self {
            name: self.name.clone(),
            dims,
            shape,
            values,
        };
        Ok(selected.squeezed())
    }

    fn squeeze(&self) -> Self {
        self.clone().squeezed()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dataset/array.rs"]
mod tests;
