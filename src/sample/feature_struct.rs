use std::ops::Index;

use crate::constants::BUFFER_SIZE;


/// A named column of feature values.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    name: String,
    vals: Vec<f64>,
}


impl Feature {
    /// Construct an empty column named `name`.
    pub fn new<T: ToString>(name: T) -> Self {
        Self {
            name: name.to_string(),
            vals: Vec::with_capacity(BUFFER_SIZE),
        }
    }


    /// Construct a column from its values.
    pub fn from_vals<T: ToString>(name: T, vals: Vec<f64>) -> Self {
        Self { name: name.to_string(), vals, }
    }


    /// Returns the column name.
    pub fn name(&self) -> &str {
        &self.name
    }


    /// Returns the values as a slice.
    pub fn vals(&self) -> &[f64] {
        &self.vals[..]
    }


    pub(crate) fn into_vals(self) -> Vec<f64> {
        self.vals
    }


    /// Push a value at the end of the column.
    pub fn append(&mut self, val: f64) {
        self.vals.push(val);
    }


    /// Returns the number of values in the column.
    pub fn len(&self) -> usize {
        self.vals.len()
    }


    /// Returns `true` if the column holds no value.
    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }
}


impl Index<usize> for Feature {
    type Output = f64;
    fn index(&self, idx: usize) -> &Self::Output {
        &self.vals[idx]
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vals() {
        let feat = Feature::from_vals("x", vec![1.0, 2.0, 1.0, 3.0]);
        assert_eq!(feat.name(), "x");
        assert_eq!(feat.len(), 4);
        assert_eq!(feat[3], 3.0);
    }

    #[test]
    fn test_append() {
        let mut feat = Feature::new("x");
        assert!(feat.is_empty());
        feat.append(0.5);
        feat.append(-0.5);
        assert_eq!(feat.len(), 2);
        assert_eq!(feat.vals(), &[0.5, -0.5]);
    }
}
