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

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Lines, Read};
use std::path::Path;

use serde_json::{Map, Number, Value};

use crate::config::ZiSourceConfig;
use crate::errors::{Result, ZiError};
use crate::ingest::format::{ZiCompression, ZiDataFormat, ZiFormatDetector};
use crate::ingest::source::{ZiBatch, ZiBatchPoll, ZiBatchSource, ZiPerturbation};
use crate::record::{ZiRecord, ZiRecordBatch};

pub type ProgressCallback = Box<dyn Fn(ProgressInfo) + Send + Sync>;

#[derive(Clone, Debug)]
pub struct ProgressInfo {
    pub batches_read: usize,
    pub records_read: usize,
    pub current_file: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ZiReaderConfig {
    pub chunk_size: usize,
    pub skip_errors: bool,
    pub max_errors: usize,
}

impl Default for ZiReaderConfig {
    fn default() -> Self {
        Self {
            chunk_size: 100_000,
            skip_errors: true,
            max_errors: 100,
        }
    }
}

impl From<&ZiSourceConfig> for ZiReaderConfig {
    fn from(config: &ZiSourceConfig) -> Self {
        Self {
            chunk_size: config.chunk_size,
            skip_errors: config.skip_errors,
            max_errors: config.max_errors,
        }
    }
}

type ZiInput = Box<dyn Read + Send>;

enum ZiRowStream {
    #[cfg(feature = "csv")]
    Csv {
        reader: csv::Reader<ZiInput>,
        headers: Vec<String>,
    },
    Jsonl {
        lines: Lines<BufReader<ZiInput>>,
    },
}

/// Why a row could not be produced.
enum ZiRowError {
    /// The row is skipped and counted; reading continues.
    Malformed(String),
    /// The input itself failed; the chunk is abandoned.
    Failed(ZiError),
}

/// Batch source reading fixed-size chunks of rows from a CSV or JSONL file.
///
/// CSV cells are trimmed and typed on the way in: empty cells become null,
/// integers and finite floats become numbers, everything else stays a string.
/// Malformed rows are skipped up to the configured error budget. A failing
/// input is reported as an `Io` error, never as the end of the stream.
pub struct ZiChunkedReader {
    config: ZiReaderConfig,
    perturbation: ZiPerturbation,
    rows: ZiRowStream,
    name: String,
    records_read: usize,
    batches_read: usize,
    error_count: usize,
    exhausted: bool,
    progress_callback: Option<ProgressCallback>,
}

impl ZiChunkedReader {
    /// Opens `path` with default reader settings.
    #[allow(non_snake_case)]
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_config(path, ZiReaderConfig::default())
    }

    #[allow(non_snake_case)]
    pub fn open_with_config(path: &Path, config: ZiReaderConfig) -> Result<Self> {
        let info = ZiFormatDetector::new().detect_from_path(path);
        log::info!("Initializing stream from {}...", path.display());

        let file = File::open(path)?;
        let input = Self::decompress(file, info.compression)?;
        let (input, format) = match info.format {
            ZiDataFormat::Unknown => Self::sniff(input)?,
            known => (input, known),
        };
        Self::from_reader(input, format, config, path.display().to_string())
    }

    /// Opens the source described by a monitor's source config, including its
    /// perturbation settings.
    #[allow(non_snake_case)]
    pub fn from_source_config(config: &ZiSourceConfig) -> Result<Self> {
        let path = config
            .path
            .as_ref()
            .ok_or_else(|| ZiError::config("source.path is required for a file source"))?;
        Ok(Self::open_with_config(path, ZiReaderConfig::from(config))?
            .with_perturbation(ZiPerturbation::new(config.perturb_field.clone(), config.perturb_factor)))
    }

    /// Wraps an already opened, uncompressed input.
    #[allow(non_snake_case)]
    pub fn from_reader(
        input: ZiInput,
        format: ZiDataFormat,
        config: ZiReaderConfig,
        name: impl Into<String>,
    ) -> Result<Self> {
        if config.chunk_size == 0 {
            return Err(ZiError::validation("chunk_size must be greater than zero"));
        }
        let name = name.into();
        let rows = match format {
            ZiDataFormat::Csv => Self::csv_rows(input)?,
            ZiDataFormat::Jsonl => ZiRowStream::Jsonl {
                lines: BufReader::new(input).lines(),
            },
            ZiDataFormat::Unknown => {
                return Err(ZiError::validation(format!("Unknown file format: {}", name)))
            }
        };

        Ok(Self {
            config,
            perturbation: ZiPerturbation::default(),
            rows,
            name,
            records_read: 0,
            batches_read: 0,
            error_count: 0,
            exhausted: false,
            progress_callback: None,
        })
    }

    #[allow(non_snake_case)]
    pub fn with_perturbation(mut self, perturbation: ZiPerturbation) -> Self {
        self.perturbation = perturbation;
        self
    }

    #[allow(non_snake_case)]
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn records_read(&self) -> usize {
        self.records_read
    }

    pub fn batches_read(&self) -> usize {
        self.batches_read
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    #[cfg(feature = "csv")]
    fn csv_rows(input: ZiInput) -> Result<ZiRowStream> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(input);
        let headers = reader
            .headers()
            .map_err(|e| ZiError::schema(format!("CSV headers error: {}", e)))?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();
        Ok(ZiRowStream::Csv { reader, headers })
    }

    #[cfg(not(feature = "csv"))]
    fn csv_rows(_input: ZiInput) -> Result<ZiRowStream> {
        Err(ZiError::validation("CSV reading requires 'csv' feature"))
    }

    /// Detects the row format from the first buffered block of `input`.
    fn sniff(input: ZiInput) -> Result<(ZiInput, ZiDataFormat)> {
        let mut buffered = BufReader::new(input);
        let format = ZiFormatDetector::new().detect_from_content(buffered.fill_buf()?);
        log::debug!("Sniffed row format from content: {:?}", format);
        Ok((Box::new(buffered), format))
    }

    fn decompress(file: File, compression: ZiCompression) -> Result<ZiInput> {
        match compression {
            ZiCompression::None => Ok(Box::new(file)),
            #[cfg(feature = "compression")]
            ZiCompression::Gzip => Ok(Box::new(flate2::read::MultiGzDecoder::new(file))),
            #[cfg(feature = "compression")]
            ZiCompression::Zstd => Ok(Box::new(zstd::stream::read::Decoder::new(file)?)),
            #[cfg(not(feature = "compression"))]
            ZiCompression::Gzip | ZiCompression::Zstd => Err(ZiError::validation(
                "Compressed sources require 'compression' feature",
            )),
        }
    }

    fn read_chunk(&mut self) -> Result<ZiRecordBatch> {
        let mut batch = Vec::with_capacity(self.config.chunk_size.min(8192));

        while batch.len() < self.config.chunk_size {
            match self.next_row() {
                Some(Ok(payload)) => {
                    batch.push(ZiRecord::new(Some(format!("{}", self.records_read)), payload));
                    self.records_read += 1;
                }
                Some(Err(ZiRowError::Failed(err))) => return Err(err),
                Some(Err(ZiRowError::Malformed(message))) => {
                    self.error_count += 1;
                    if !self.config.skip_errors || self.error_count > self.config.max_errors {
                        return Err(ZiError::source(
                            self.name.clone(),
                            format!("Too many errors ({}): {}", self.error_count, message),
                        ));
                    }
                    log::warn!("Skipping malformed row in {}: {}", self.name, message);
                }
                None => break,
            }
        }

        Ok(batch)
    }

    fn next_row(&mut self) -> Option<std::result::Result<Value, ZiRowError>> {
        match &mut self.rows {
            #[cfg(feature = "csv")]
            ZiRowStream::Csv { reader, headers } => {
                let mut record = csv::StringRecord::new();
                match reader.read_record(&mut record) {
                    Ok(true) => {
                        if record.len() != headers.len() {
                            return Some(Err(ZiRowError::Malformed(format!(
                                "expected {} fields, found {} at record {}",
                                headers.len(),
                                record.len(),
                                self.records_read + self.error_count
                            ))));
                        }
                        let mut obj = Map::new();
                        for (header, cell) in headers.iter().zip(record.iter()) {
                            obj.insert(header.clone(), infer_cell(cell));
                        }
                        Some(Ok(Value::Object(obj)))
                    }
                    Ok(false) => None,
                    Err(e) if e.is_io_error() => Some(Err(ZiRowError::Failed(ZiError::from(e)))),
                    Err(e) => Some(Err(ZiRowError::Malformed(e.to_string()))),
                }
            }
            ZiRowStream::Jsonl { lines } => loop {
                match lines.next()? {
                    Ok(text) => {
                        let trimmed = text.trim();
                        if trimmed.is_empty() {
                            continue;
                        }
                        return Some(serde_json::from_str::<Value>(trimmed).map_err(|e| {
                            ZiRowError::Malformed(format!("invalid JSON line: {}", e))
                        }));
                    }
                    // `lines` has already consumed the offending line
                    Err(e) if e.kind() == ErrorKind::InvalidData => {
                        return Some(Err(ZiRowError::Malformed(format!("invalid line: {}", e))));
                    }
                    Err(e) => return Some(Err(ZiRowError::Failed(ZiError::from(e)))),
                }
            },
        }
    }

    fn report_progress(&self) {
        if let Some(ref callback) = self.progress_callback {
            callback(ProgressInfo {
                batches_read: self.batches_read,
                records_read: self.records_read,
                current_file: self.name.clone(),
            });
        }
    }
}

impl ZiBatchSource for ZiChunkedReader {
    fn next_batch(&mut self, inject_perturbation: bool) -> Result<ZiBatchPoll> {
        if self.exhausted {
            return Ok(ZiBatchPoll::EndOfStream);
        }

        let mut records = self.read_chunk()?;
        if records.is_empty() {
            self.exhausted = true;
            log::info!("End of data stream: {}", self.name);
            return Ok(ZiBatchPoll::EndOfStream);
        }

        if inject_perturbation {
            self.perturbation.apply(&mut records);
        }
        self.batches_read += 1;

        log::info!(
            "Streamed batch {} with {} rows (Drift={})",
            self.batches_read,
            records.len(),
            inject_perturbation
        );
        self.report_progress();

        Ok(ZiBatchPoll::Batch(ZiBatch {
            index: self.batches_read,
            records,
            perturbed: inject_perturbation,
        }))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Types a raw CSV cell.
pub fn infer_cell(raw: &str) -> Value {
    let cell = raw.trim();
    if cell.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = cell.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(f) = cell.parse::<f64>() {
        return Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null);
    }
    Value::String(cell.to_string())
}
