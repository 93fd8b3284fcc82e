use super::{DataType, Numeric, TypedArray};
use crate::error::{Configuration, IndexOutOfRange, OutOfMemory};
use crate::Error;

/// A read only array whose value at index `i` is `slope * i + intercept`
///
/// Nothing is stored besides the two coefficients, so a coordinate axis or a running index of
/// any length costs the same. Values that do not fit in `T` are reported as
/// [`Configuration::Unrepresentable`] rather than wrapping.
///
/// ```
/// use vtk_core::AffineArray;
///
/// let x = AffineArray::new(0.25, 1.0, 5);
/// assert_eq!(x.get_value(4).unwrap(), 2.0);
/// assert_eq!(x.to_typed_array().unwrap().values(), &[1.0, 1.25, 1.5, 1.75, 2.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AffineArray<T> {
    name: Option<String>,
    slope: T,
    intercept: T,
    tuples: usize,
    components: usize,
}

impl<T: Numeric> AffineArray<T> {
    /// `tuples` single component values
    pub fn new(slope: T, intercept: T, tuples: usize) -> Self {
        Self {
            name: None,
            slope,
            intercept,
            tuples,
            components: 1,
        }
    }

    /// group the values into tuples of `components`, keeping the number of tuples
    pub fn with_components(mut self, components: usize) -> Result<Self, Error> {
        if components == 0 {
            return Err(Configuration::ZeroComponents.into());
        }
        self.tuples
            .checked_mul(components)
            .ok_or(OutOfMemory::new(usize::MAX))?;
        self.components = components;
        Ok(self)
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn slope(&self) -> T {
        self.slope
    }

    pub fn intercept(&self) -> T {
        self.intercept
    }

    pub fn data_type(&self) -> DataType {
        T::DATA_TYPE
    }

    pub fn number_of_components(&self) -> usize {
        self.components
    }

    pub fn number_of_tuples(&self) -> usize {
        self.tuples
    }

    pub fn number_of_values(&self) -> usize {
        self.tuples * self.components
    }

    pub fn get_value(&self, index: usize) -> Result<T, Error> {
        if index >= self.number_of_values() {
            return Err(IndexOutOfRange::below("value", index, self.number_of_values()).into());
        }
        self.evaluate(index)
    }

    /// write the components of `tuple` into `out`, which must hold exactly one tuple
    pub fn get_tuple(&self, tuple: usize, out: &mut [T]) -> Result<(), Error> {
        if tuple >= self.tuples {
            return Err(IndexOutOfRange::below("tuple", tuple, self.tuples).into());
        }
        if out.len() != self.components {
            return Err(Configuration::ComponentMismatch {
                expected: self.components,
                actual: out.len(),
            }
            .into());
        }

        let first = tuple * self.components;
        for (component, value) in out.iter_mut().enumerate() {
            *value = self.evaluate(first + component)?;
        }
        Ok(())
    }

    /// store every value in a [`TypedArray`] with the same name and components
    pub fn to_typed_array(&self) -> Result<TypedArray<T>, Error> {
        let len = self.number_of_values();
        tracing::debug!(
            name = self.name().unwrap_or(""),
            data_type = %T::DATA_TYPE,
            values = len,
            "materializing affine array"
        );

        let mut values = Vec::new();
        values
            .try_reserve_exact(len)
            .map_err(|_| OutOfMemory::new(len))?;
        for index in 0..len {
            values.push(self.evaluate(index)?);
        }

        let array = TypedArray::from_values(values, self.components)?;
        Ok(match &self.name {
            Some(name) => array.with_name(name.as_str()),
            None => array,
        })
    }

    fn evaluate(&self, index: usize) -> Result<T, Error> {
        self.compute(index).ok_or_else(|| {
            Configuration::Unrepresentable {
                index,
                data_type: T::DATA_TYPE.vtk_name(),
            }
            .into()
        })
    }

    fn compute(&self, index: usize) -> Option<T> {
        match T::DATA_TYPE {
            DataType::Float32 | DataType::Float64 => {
                let slope: f64 = num_traits::cast(self.slope)?;
                let intercept: f64 = num_traits::cast(self.intercept)?;
                num_traits::cast(slope * index as f64 + intercept)
            }
            _ => {
                let slope: i128 = num_traits::cast(self.slope)?;
                let intercept: i128 = num_traits::cast(self.intercept)?;
                let value = slope
                    .checked_mul(index as i128)?
                    .checked_add(intercept)?;
                num_traits::cast(value)
            }
        }
    }
}
