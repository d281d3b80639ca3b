/*
  Copyright 2024 the linkwalk developers

  Licensed under the Apache License, Version 2.0 (the "License");
  you may not use this file except in compliance with the License.
  You may obtain a copy of the License at

      http://www.apache.org/licenses/LICENSE-2.0

  Unless required by applicable law or agreed to in writing, software
  distributed under the License is distributed on an "AS IS" BASIS,
  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
  See the License for the specific language governing permissions and
  limitations under the License.
*/
//! Joint classification and limits
use nalgebra::{RealField, Unit, Vector3};
use std::fmt::{self, Display};

/// Type of joint, `Fixed`, `Revolute`, `Prismatic` is supported now
///
/// `Fixed` is the default; anything a loader cannot classify should be
/// mapped to `Fixed` rather than rejected.
#[derive(Copy, Debug, Clone)]
pub enum JointType<T: RealField> {
    /// Fixed joint. It has no joint-space state and no axis.
    Fixed,
    /// Revolute joint around axis. Its position is an angle [rad].
    Revolute {
        /// axis of the joint
        axis: Unit<Vector3<T>>,
    },
    /// Prismatic joint along axis. Its position is a displacement.
    Prismatic {
        /// axis of the joint
        axis: Unit<Vector3<T>>,
    },
}

impl<T: RealField> Default for JointType<T> {
    fn default() -> Self {
        JointType::Fixed
    }
}

fn axis_to_string<T: RealField>(axis: &Unit<Vector3<T>>) -> &str {
    if *axis == Vector3::x_axis() {
        "+X"
    } else if *axis == Vector3::y_axis() {
        "+Y"
    } else if *axis == Vector3::z_axis() {
        "+Z"
    } else if *axis == -Vector3::x_axis() {
        "-X"
    } else if *axis == -Vector3::y_axis() {
        "-Y"
    } else if *axis == -Vector3::z_axis() {
        "-Z"
    } else {
        ""
    }
}

impl<T: RealField> Display for JointType<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JointType::Fixed => write!(f, "[⚓]"),
            JointType::Revolute { axis } => write!(f, "[⚙{}]", axis_to_string(axis)),
            JointType::Prismatic { axis } => write!(f, "[↕{}]", axis_to_string(axis)),
        }
    }
}

/// min/max range to check the joint position
#[derive(Copy, Debug, Clone)]
pub struct Range<T: RealField> {
    pub min: T,
    pub max: T,
}

impl<T> Range<T>
where
    T: RealField + Copy,
{
    /// Create new Range instance
    ///
    /// In case `min` is greater than `max`, this function panics.
    ///
    /// # Examples
    ///
    /// ```
    /// let range = linkwalk::Range::new(-1.0, 1.0);
    /// // let range = linkwalk::Range::new(1.0, -1.0);  // panic
    /// ```
    pub fn new(min: T, max: T) -> Self {
        assert!(min <= max, "min must be less than or equal to max");
        Range { min, max }
    }
    /// Check if the value is in the range
    ///
    /// `true` means it is OK.
    /// If the val is the same as the limit value (`min` or `max`), it returns true (valid).
    ///
    /// # Examples
    ///
    /// ```
    /// let range = linkwalk::Range::new(-1.0, 1.0);
    /// assert!(range.is_valid(0.0));
    /// assert!(range.is_valid(1.0));
    /// assert!(!range.is_valid(1.5));
    /// ```
    pub fn is_valid(&self, val: T) -> bool {
        val <= self.max && val >= self.min
    }
    /// Clamp the value into the range
    ///
    /// # Examples
    ///
    /// ```
    /// let range = linkwalk::Range::new(-1.0, 1.0);
    /// assert_eq!(range.clamp(0.5), 0.5);
    /// assert_eq!(range.clamp(2.0), 1.0);
    /// assert_eq!(range.clamp(-2.0), -1.0);
    /// ```
    pub fn clamp(&self, val: T) -> T {
        if val < self.min {
            self.min
        } else if val > self.max {
            self.max
        } else {
            val
        }
    }
}

impl<T> From<::std::ops::RangeInclusive<T>> for Range<T>
where
    T: RealField + Copy,
{
    /// # Examples
    ///
    /// ```
    /// let range: linkwalk::Range<f64> = (-1.0..=1.0).into();
    /// assert!(range.is_valid(0.0));
    /// assert!(range.is_valid(1.0));
    /// assert!(!range.is_valid(1.5));
    /// ```
    fn from(range: ::std::ops::RangeInclusive<T>) -> Self {
        let (min, max) = range.into_inner();
        Range::new(min, max)
    }
}
