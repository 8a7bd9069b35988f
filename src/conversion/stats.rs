//! Statistics and timing for conversion runs

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Totals for one conversion or a whole batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionStatistics {
    /// Input size in bytes
    pub input_size_bytes: u64,
    /// Output size in bytes
    pub output_size_bytes: u64,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Number of files converted successfully
    pub file_count: usize,
    /// Number of files that failed to convert
    pub failed_count: usize,
    /// Average time per converted file
    pub avg_time_per_file_ms: f32,
    /// Throughput (input bytes processed per second)
    pub throughput_bytes_per_sec: f32,
    /// Timestamp of when statistics were collected
    pub collected_at: chrono::DateTime<chrono::Utc>,
}

impl Default for ConversionStatistics {
    fn default() -> Self {
        Self {
            input_size_bytes: 0,
            output_size_bytes: 0,
            processing_time_ms: 0,
            file_count: 0,
            failed_count: 0,
            avg_time_per_file_ms: 0.0,
            throughput_bytes_per_sec: 0.0,
            collected_at: chrono::Utc::now(),
        }
    }
}

impl ConversionStatistics {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Create statistics for a single successful conversion
    pub fn for_conversion(input_size: u64, output_size: u64, processing_time: Duration) -> Self {
        let mut stats = Self {
            input_size_bytes: input_size,
            output_size_bytes: output_size,
            processing_time_ms: processing_time.as_millis() as u64,
            file_count: 1,
            ..Default::default()
        };
        stats.recalculate();
        stats
    }

    /// Statistics recording one failed file
    pub fn for_failure() -> Self {
        Self {
            failed_count: 1,
            ..Default::default()
        }
    }

    /// Combine statistics from multiple operations
    pub fn combine(&mut self, other: &Self) {
        self.input_size_bytes += other.input_size_bytes;
        self.output_size_bytes += other.output_size_bytes;
        self.processing_time_ms += other.processing_time_ms;
        self.file_count += other.file_count;
        self.failed_count += other.failed_count;
        self.recalculate();
        self.collected_at = chrono::Utc::now();
    }

    fn recalculate(&mut self) {
        self.avg_time_per_file_ms = if self.file_count > 0 {
            self.processing_time_ms as f32 / self.file_count as f32
        } else {
            0.0
        };

        self.throughput_bytes_per_sec = if self.processing_time_ms > 0 {
            self.input_size_bytes as f32 / (self.processing_time_ms as f32 / 1000.0)
        } else {
            0.0
        };
    }

    /// Output size as a percentage of input size
    pub fn size_ratio_percent(&self) -> f32 {
        if self.input_size_bytes == 0 {
            return 0.0;
        }
        self.output_size_bytes as f32 / self.input_size_bytes as f32 * 100.0
    }

    /// True when no file failed
    pub fn is_clean(&self) -> bool {
        self.failed_count == 0
    }

    /// One-paragraph summary for terminal output
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Files converted: {}", self.file_count),
            format!("Input size: {} bytes", self.input_size_bytes),
            format!(
                "Output size: {} bytes ({:.1}% of input)",
                self.output_size_bytes,
                self.size_ratio_percent()
            ),
            format!("Processing time: {}ms", self.processing_time_ms),
        ];
        if self.failed_count > 0 {
            lines.insert(1, format!("Files failed: {}", self.failed_count));
        }
        lines.join("\n")
    }

    /// Serialize to JSON for machine-readable reports
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load from a JSON report
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Measures one conversion from start to finish
pub struct PerformanceTracker {
    start_time: Instant,
}

impl PerformanceTracker {
    /// Start timing
    pub fn start() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Stop timing and produce statistics for the conversion
    pub fn finish(self, input_size: u64, output_size: u64) -> ConversionStatistics {
        ConversionStatistics::for_conversion(input_size, output_size, self.elapsed())
    }
}
