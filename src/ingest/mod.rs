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

//! # Batch Ingestion Module
//!
//! This module provides the batch sources the drift monitor consumes. A source
//! hands out fixed-size batches on demand and signals the end of its data with
//! a terminal `EndOfStream` poll rather than an error.
//!
//! ## Module Components
//!
//! - **Source** ([source.rs](source/index.html)): The `ZiBatchSource` contract and drift injection
//! - **Format Detection** ([format.rs](format/index.html)): Format and compression detection
//! - **Reader** ([reader.rs](reader/index.html)): Chunked CSV / JSONL file reading
//! - **Memory** ([memory.rs](memory/index.html)): In-memory and synthetic sources
//!
//! ## Supported Input Formats
//!
//! - **CSV**: Comma-separated values with a header row
//! - **JSONL**: One JSON object per line
//!
//! Both may be gzip (`.gz`) or zstd (`.zst`) compressed with the `compression` feature.
//!
//! ## Usage
//!
//! ```rust
//! use zidrift::ingest::{ZiBatchSource, ZiChunkedReader, ZiReaderConfig};
//!
//! let mut reader = ZiChunkedReader::open_with_config(
//!     Path::new("data/transactions.csv"),
//!     ZiReaderConfig { chunk_size: 100_000, ..Default::default() },
//! )?;
//! while let Some(batch) = reader.next_batch(false)?.into_batch() {
//!     println!("batch {} has {} rows", batch.index, batch.len());
//! }
//! ```

pub mod format;
pub mod memory;
pub mod reader;
pub mod source;

pub use format::{ZiCompression, ZiDataFormat, ZiFormatDetector, ZiFormatInfo};
pub use memory::{ZiMemorySource, ZiSyntheticConfig, ZiSyntheticSource};
pub use reader::{ProgressCallback, ProgressInfo, ZiChunkedReader, ZiReaderConfig};
pub use source::{ZiBatch, ZiBatchPoll, ZiBatchSource, ZiPerturbation};
