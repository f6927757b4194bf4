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

use std::path::Path;

/// Row format of a batch source file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZiDataFormat {
    Csv,
    Jsonl,
    Unknown,
}

/// Compression wrapping a batch source file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZiCompression {
    None,
    Gzip,
    Zstd,
}

/// Detected format and compression of a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZiFormatInfo {
    pub format: ZiDataFormat,
    pub compression: ZiCompression,
}

#[derive(Clone, Debug, Default)]
pub struct ZiFormatDetector;

impl ZiFormatDetector {
    #[allow(non_snake_case)]
    pub fn new() -> Self {
        Self
    }

    /// Detects format and compression from the file name, e.g.
    /// `log.csv`, `log.csv.gz`, `events.jsonl.zst`.
    pub fn detect_from_path(&self, path: &Path) -> ZiFormatInfo {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_lowercase();

        let (stem, compression) = if let Some(stem) = name.strip_suffix(".gz") {
            (stem, ZiCompression::Gzip)
        } else if let Some(stem) = name.strip_suffix(".zst") {
            (stem, ZiCompression::Zstd)
        } else {
            (name.as_str(), ZiCompression::None)
        };

        let format = match stem.rsplit_once('.').map(|(_, ext)| ext) {
            Some("csv") => ZiDataFormat::Csv,
            Some("jsonl") | Some("ndjson") => ZiDataFormat::Jsonl,
            _ => ZiDataFormat::Unknown,
        };

        ZiFormatInfo {
            format,
            compression,
        }
    }

    /// Sniffs the row format of an uncompressed content sample.
    pub fn detect_from_content(&self, content: &[u8]) -> ZiDataFormat {
        let text = String::from_utf8_lossy(content);
        let trimmed = text.trim_start();
        if trimmed.is_empty() {
            return ZiDataFormat::Unknown;
        }
        if trimmed.starts_with('{') {
            return ZiDataFormat::Jsonl;
        }
        if trimmed.lines().next().is_some_and(|line| line.contains(',')) {
            return ZiDataFormat::Csv;
        }
        ZiDataFormat::Unknown
    }
}
