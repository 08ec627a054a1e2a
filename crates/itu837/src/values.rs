//! Query inputs and outputs of any shape.
//!
//! Callers pass scalars, sequences or n-d arrays; results come back in the
//! richest kind given (`Scalar < Sequence < Array`). A scalar on one side
//! broadcasts to the shape of the other.

use ndarray::{Array1, Array2, ArrayD, IxDyn};

use crate::error::{ModelError, Result};

/// Numeric values in one of three shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    Scalar(f64),
    Sequence(Vec<f64>),
    Array(ArrayD<f64>),
}

/// The shape class of [`Values`], ordered from poorest to richest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValuesKind {
    Scalar,
    Sequence,
    Array,
}

impl Values {
    pub fn kind(&self) -> ValuesKind {
        match self {
            Self::Scalar(_) => ValuesKind::Scalar,
            Self::Sequence(_) => ValuesKind::Sequence,
            Self::Array(_) => ValuesKind::Array,
        }
    }

    /// Dimensions; empty for a scalar.
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Self::Scalar(_) => Vec::new(),
            Self::Sequence(v) => vec![v.len()],
            Self::Array(a) => a.shape().to_vec(),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Sequence(v) => v.len(),
            Self::Array(a) => a.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The value of a scalar.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(x) => Some(*x),
            _ => None,
        }
    }

    /// Elements in logical (row-major) order.
    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            Self::Scalar(x) => vec![*x],
            Self::Sequence(v) => v.clone(),
            Self::Array(a) => a.iter().copied().collect(),
        }
    }

    /// Apply `f` element-wise, keeping the shape.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        match self {
            Self::Scalar(x) => Self::Scalar(f(*x)),
            Self::Sequence(v) => Self::Sequence(v.iter().map(|&x| f(x)).collect()),
            Self::Array(a) => Self::Array(a.mapv(f)),
        }
    }
}

impl From<f64> for Values {
    fn from(x: f64) -> Self {
        Self::Scalar(x)
    }
}

impl From<Vec<f64>> for Values {
    fn from(v: Vec<f64>) -> Self {
        Self::Sequence(v)
    }
}

impl From<&[f64]> for Values {
    fn from(v: &[f64]) -> Self {
        Self::Sequence(v.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Values {
    fn from(v: [f64; N]) -> Self {
        Self::Sequence(v.to_vec())
    }
}

impl From<Array1<f64>> for Values {
    fn from(a: Array1<f64>) -> Self {
        Self::Array(a.into_dyn())
    }
}

impl From<Array2<f64>> for Values {
    fn from(a: Array2<f64>) -> Self {
        Self::Array(a.into_dyn())
    }
}

impl From<ArrayD<f64>> for Values {
    fn from(a: ArrayD<f64>) -> Self {
        Self::Array(a)
    }
}

/// Wrap a longitude into [0, 360).
///
/// NaN passes through unchanged.
pub fn wrap_longitude(lon: f64) -> f64 {
    let wrapped = lon.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Output layout of a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OutputShape {
    Scalar,
    Sequence(usize),
    Array(Vec<usize>),
}

impl OutputShape {
    /// Rebuild values of this shape from flat results.
    pub fn reshape(&self, flat: Vec<f64>) -> Result<Values> {
        match self {
            Self::Scalar => match flat.as_slice() {
                [x] => Ok(Values::Scalar(*x)),
                other => Err(ModelError::shape_mismatch(
                    "()",
                    format!("({},)", other.len()),
                )),
            },
            Self::Sequence(n) if flat.len() == *n => Ok(Values::Sequence(flat)),
            Self::Sequence(n) => Err(ModelError::shape_mismatch(
                format!("({n},)"),
                format!("({},)", flat.len()),
            )),
            Self::Array(shape) => ArrayD::from_shape_vec(IxDyn(shape), flat)
                .map(Values::Array)
                .map_err(|e| ModelError::shape_mismatch(format!("{shape:?}"), e.to_string())),
        }
    }
}

/// Flattened, broadcast and longitude-wrapped query points.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedQuery {
    pub lats: Vec<f64>,
    pub lons: Vec<f64>,
    pub shape: OutputShape,
}

impl PreparedQuery {
    /// Normalize a latitude/longitude pair of inputs.
    ///
    /// Shapes must agree unless one side is a scalar. A sequence and a 1-d
    /// array of the same length agree and yield an array.
    pub fn new(lat: &Values, lon: &Values) -> Result<Self> {
        let kind = lat.kind().max(lon.kind());

        let dims = match (lat, lon) {
            (Values::Scalar(_), other) | (other, Values::Scalar(_)) => other.shape(),
            _ if lat.shape() == lon.shape() => lat.shape(),
            _ => {
                return Err(ModelError::shape_mismatch(
                    format!("{:?}", lat.shape()),
                    format!("{:?}", lon.shape()),
                ))
            }
        };

        let n: usize = dims.iter().product();
        let lats = broadcast(lat, n);
        let lons = broadcast(lon, n).into_iter().map(wrap_longitude).collect();

        let shape = match kind {
            ValuesKind::Scalar => OutputShape::Scalar,
            ValuesKind::Sequence => OutputShape::Sequence(n),
            ValuesKind::Array => OutputShape::Array(dims),
        };

        Ok(Self { lats, lons, shape })
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.lats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lats.is_empty()
    }
}

fn broadcast(values: &Values, n: usize) -> Vec<f64> {
    match values {
        Values::Scalar(x) => vec![*x; n],
        other => other.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_wrap_longitude() {
        assert_eq!(wrap_longitude(370.0), 10.0);
        assert_eq!(wrap_longitude(-10.0), 350.0);
        assert_eq!(wrap_longitude(360.0), 0.0);
        assert_eq!(wrap_longitude(0.0), 0.0);
        assert_eq!(wrap_longitude(-720.0), 0.0);
        assert!((0.0..360.0).contains(&wrap_longitude(-1e-20)));
        assert!(wrap_longitude(f64::NAN).is_nan());
    }

    #[test]
    fn test_scalar_query() {
        let q = PreparedQuery::new(&10.0.into(), &370.0.into()).unwrap();
        assert_eq!(q.lats, vec![10.0]);
        assert_eq!(q.lons, vec![10.0]);
        assert_eq!(q.shape, OutputShape::Scalar);
    }

    #[test]
    fn test_scalar_broadcast() {
        let q = PreparedQuery::new(&45.0.into(), &vec![0.0, 90.0, -90.0].into()).unwrap();
        assert_eq!(q.lats, vec![45.0; 3]);
        assert_eq!(q.lons, vec![0.0, 90.0, 270.0]);
        assert_eq!(q.shape, OutputShape::Sequence(3));
    }

    #[test]
    fn test_array_kind_wins() {
        let lat: Values = array![[1.0, 2.0], [3.0, 4.0]].into();
        let q = PreparedQuery::new(&lat, &5.0.into()).unwrap();
        assert_eq!(q.shape, OutputShape::Array(vec![2, 2]));
        assert_eq!(q.lats, vec![1.0, 2.0, 3.0, 4.0]);

        let q = PreparedQuery::new(&[1.0, 2.0].into(), &array![3.0, 4.0].into()).unwrap();
        assert_eq!(q.shape, OutputShape::Array(vec![2]));
    }

    #[test]
    fn test_shape_mismatch() {
        let err = PreparedQuery::new(&[1.0, 2.0].into(), &[1.0, 2.0, 3.0].into()).unwrap_err();
        assert!(err.is_shape_mismatch());

        let lat: Values = array![[1.0, 2.0]].into();
        let err = PreparedQuery::new(&lat, &[1.0, 2.0].into()).unwrap_err();
        assert!(err.is_shape_mismatch());
    }

    #[test]
    fn test_reshape() {
        let shape = OutputShape::Array(vec![2, 1]);
        let values = shape.reshape(vec![1.0, 2.0]).unwrap();
        assert_eq!(values, Values::Array(array![[1.0], [2.0]].into_dyn()));

        assert_eq!(
            OutputShape::Scalar.reshape(vec![3.0]).unwrap(),
            Values::Scalar(3.0)
        );
        assert!(OutputShape::Sequence(2).reshape(vec![1.0]).is_err());
    }

    #[test]
    fn test_empty_sequence() {
        let q = PreparedQuery::new(&Vec::<f64>::new().into(), &Vec::<f64>::new().into()).unwrap();
        assert!(q.is_empty());
        assert_eq!(q.shape, OutputShape::Sequence(0));
    }

    #[test]
    fn test_map_keeps_shape() {
        let v: Values = array![[1.0, 2.0]].into();
        assert_eq!(v.map(|x| x * 2.0).to_vec(), vec![2.0, 4.0]);
        assert_eq!(v.map(|x| x).shape(), vec![1, 2]);
    }
}
