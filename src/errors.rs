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
use thiserror::Error;

/// Error for joint-state mutation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The joint is fixed and has no joint-space state.
    #[error("joint '{joint_name}' is fixed and its state cannot be set")]
    SetToFixedError { joint_name: String },
    /// The requested position violates the joint limits.
    #[error("joint '{joint_name}': position {position} is out of limits [{min_limit}, {max_limit}]")]
    OutOfLimitError {
        joint_name: String,
        position: f64,
        min_limit: f64,
        max_limit: f64,
    },
    /// The number of supplied values does not match the degrees of freedom.
    #[error("size mismatch: input length is {input} but {required} is required")]
    SizeMismatchError { input: usize, required: usize },
}
