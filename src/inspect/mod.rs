//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of ZiDrift.
//! The ZiDrift project belongs to the Dunimd project team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Inspection Module
//!
//! Column selection and the statistical routines used by the drift detector.
//!
//! - **Columns** ([columns.rs](columns/index.html)): Numeric column selection over a batch
//! - **Statistics** ([statistics.rs](statistics/index.html)): Mean, sample std, min, max
//! - **KS** ([ks.rs](ks/index.html)): Two-sample Kolmogorov–Smirnov test

pub mod columns;
pub mod ks;
pub mod statistics;

pub use columns::ZiNumericColumns;
pub use ks::{ks_two_sample, ZiKsTest};
pub use statistics::ZiColumnStats;
