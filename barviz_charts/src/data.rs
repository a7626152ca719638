// Copyright 2025 the Barviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input records and field accessors.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::sync::Arc;

/// Extracts a label (category or group) from a record and its row index.
pub type LabelFn<T> = Arc<dyn Fn(&T, usize) -> String>;
/// Extracts a numeric value from a record and its row index.
pub type ValueFn<T> = Arc<dyn Fn(&T, usize) -> f64>;

/// One observation: a category, a numeric level, and the group it belongs to.
#[derive(Clone, Debug, PartialEq)]
pub struct DataPoint {
    /// Category label (x).
    pub category: String,
    /// Numeric value (y).
    pub value: f64,
    /// Group label (z).
    pub group: String,
}

impl DataPoint {
    /// Creates a data point.
    pub fn new(category: impl Into<String>, value: f64, group: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            value,
            group: group.into(),
        }
    }

    /// Accessors that read the three fields of a [`DataPoint`].
    pub fn accessors() -> ChartAccessors<Self> {
        ChartAccessors::new(
            |d: &Self, _| d.category.clone(),
            |d: &Self, _| d.value,
            |d: &Self, _| d.group.clone(),
        )
    }
}

/// A named threshold drawn as a horizontal reference line with a legend entry.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceTarget {
    /// Legend label.
    pub name: String,
    /// Threshold in value units.
    pub value: f64,
}

impl ReferenceTarget {
    /// Creates a reference target.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Field accessors that map a record of type `T` to category, value and group.
pub struct ChartAccessors<T> {
    /// Category (x) accessor.
    pub x: LabelFn<T>,
    /// Value (y) accessor.
    pub y: ValueFn<T>,
    /// Group (z) accessor.
    pub z: LabelFn<T>,
}

impl<T> ChartAccessors<T> {
    /// Creates accessors from three closures.
    pub fn new(
        x: impl Fn(&T, usize) -> String + 'static,
        y: impl Fn(&T, usize) -> f64 + 'static,
        z: impl Fn(&T, usize) -> String + 'static,
    ) -> Self {
        Self {
            x: Arc::new(x),
            y: Arc::new(y),
            z: Arc::new(z),
        }
    }
}

impl<T> Clone for ChartAccessors<T> {
    fn clone(&self) -> Self {
        Self {
            x: self.x.clone(),
            y: self.y.clone(),
            z: self.z.clone(),
        }
    }
}

impl<T> core::fmt::Debug for ChartAccessors<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ChartAccessors").finish_non_exhaustive()
    }
}

impl Default for ChartAccessors<f64> {
    /// Plain numbers: the row index is the category, the number is the value, and every row
    /// shares one group (`"1"`).
    fn default() -> Self {
        Self::new(|_, i| i.to_string(), |v, _| *v, |_, _| String::from("1"))
    }
}
