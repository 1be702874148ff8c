//! 扫描会话 - 串联抽取与时序稳定

use super::config::ScanConfig;
use super::extractor::extract_frame_with;
use super::stabilizer::FieldStabilizer;
use super::{ExtractedField, FieldKind};
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// 已稳定并上报的字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StableField {
    pub value: String,
    pub kind: FieldKind,
    /// 达到稳定时的帧序号
    pub frame_index: u64,
}

/// 扫描统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    pub processed_frames: u64,
    pub extracted_fields: u64,
    pub reported_fields: u64,
}

pub struct ScanSession {
    config: ScanConfig,
    stabilizer: FieldStabilizer,
    found: Vec<StableField>,
    stats: ScanStats,
}

impl ScanSession {
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default())
    }

    pub fn with_config(config: ScanConfig) -> Self {
        Self {
            config,
            stabilizer: FieldStabilizer::new(),
            found: Vec::new(),
            stats: ScanStats::default(),
        }
    }

    /// 处理一帧的全部识别行，稳定后返回字段并立即重置该键
    pub fn process_frame<S: AsRef<str>>(&mut self, lines: &[S]) -> Option<StableField> {
        if self.is_halted() {
            return None;
        }
        let fields = extract_frame_with(lines, &self.config.enabled_kinds);
        self.log_extracted(fields)
    }

    /// 批量处理 - 并行抽取，按帧顺序串行喂给稳定器
    pub fn process_batch(&mut self, frames: &[Vec<String>]) -> Vec<StableField> {
        let kinds = &self.config.enabled_kinds;
        let extracted: Vec<Vec<ExtractedField>> = frames
            .par_iter()
            .map(|lines| extract_frame_with(lines.as_slice(), kinds))
            .collect();

        let mut reported = Vec::new();
        for fields in extracted {
            if self.is_halted() {
                break;
            }
            if let Some(stable) = self.log_extracted(fields) {
                reported.push(stable);
            }
        }
        reported
    }

    fn is_halted(&self) -> bool {
        self.config.stop_when_complete && self.is_complete()
    }

    fn log_extracted(&mut self, fields: Vec<ExtractedField>) -> Option<StableField> {
        let frame_index = self.stabilizer.frame_index();
        self.stats.processed_frames += 1;
        self.stats.extracted_fields += fields.len() as u64;
        if !fields.is_empty() {
            debug!("Frame {}: {} field(s) extracted", frame_index, fields.len());
        }

        self.stabilizer.log_frame(&fields);

        let stable = self.stabilizer.stable_value()?;
        self.stabilizer.reset(&stable.key());

        let reported = StableField {
            value: stable.value,
            kind: stable.kind,
            frame_index,
        };
        info!(
            "✅ Stable {:?} at frame {}: {}",
            reported.kind, frame_index, reported.value
        );

        match self.found.iter_mut().find(|f| f.kind == reported.kind) {
            Some(existing) => *existing = reported.clone(),
            None => self.found.push(reported.clone()),
        }
        self.stats.reported_fields += 1;

        Some(reported)
    }

    /// 每种类型最近一次稳定的取值
    pub fn found_fields(&self) -> &[StableField] {
        &self.found
    }

    pub fn found(&self, kind: FieldKind) -> Option<&StableField> {
        self.found.iter().find(|f| f.kind == kind)
    }

    pub fn is_complete(&self) -> bool {
        self.config
            .enabled_kinds
            .iter()
            .all(|&kind| self.found(kind).is_some())
    }

    pub fn stats(&self) -> ScanStats {
        self.stats.clone()
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn stabilizer(&self) -> &FieldStabilizer {
        &self.stabilizer
    }

    pub fn reset(&mut self) {
        self.stabilizer.clear();
        self.found.clear();
        self.stats = ScanStats::default();
        info!("🔄 ScanSession: reset");
    }
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new()
    }
}
