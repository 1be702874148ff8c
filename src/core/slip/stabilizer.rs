//! 时序稳定器 - 跨帧累计同一字段的出现次数

use super::{ExtractedField, FieldKey};
use log::{debug, trace};
use std::collections::{HashMap, HashSet};

/// 超过该帧数未再出现的记录会被淘汰（约 30fps 下一秒）
pub const EXPIRY_FRAMES: u64 = 30;

/// 首次出现计为 0，达到 9 即共出现 10 次
pub const STABLE_COUNT: u32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationRecord {
    pub last_seen_frame: u64,
    /// 首次出现之后的重复次数
    pub count: u32,
    /// 插入序号，仅用于并列时的确定性裁决
    pub first_seen_order: u64,
}

/// 时序稳定器
///
/// 每帧调用一次 [`FieldStabilizer::log_frame`]（即使本帧没有字段），
/// 之后通过 [`FieldStabilizer::stable_value`] 查询是否已有稳定取值，
/// 上报后调用 [`FieldStabilizer::reset`] 清除该键。
#[derive(Debug, Default)]
pub struct FieldStabilizer {
    records: HashMap<FieldKey, ObservationRecord>,
    best: Option<FieldKey>,
    best_count: u32,
    frame_index: u64,
    next_order: u64,
}

impl FieldStabilizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_frame(&mut self, fields: &[ExtractedField]) {
        let frame_index = self.frame_index;

        let mut sighted = HashSet::with_capacity(fields.len());
        for field in fields {
            let key = field.key();
            if !sighted.insert(key.clone()) {
                continue;
            }
            match self.records.get_mut(&key) {
                Some(record) => {
                    record.last_seen_frame = frame_index;
                    record.count += 1;
                }
                None => {
                    self.records.insert(
                        key,
                        ObservationRecord {
                            last_seen_frame: frame_index,
                            count: 0,
                            first_seen_order: self.next_order,
                        },
                    );
                    self.next_order += 1;
                }
            }
        }

        let expired: Vec<FieldKey> = self
            .records
            .iter()
            .filter(|(_, record)| record.last_seen_frame + EXPIRY_FRAMES < frame_index)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            trace!("Frame {}: expiring {:?}", frame_index, key);
            self.records.remove(key);
        }

        self.update_best(frame_index);
        self.frame_index += 1;
    }

    /// 在存活记录中选出计数严格最大者；并列时当前最佳优先，其次是最早插入者
    fn update_best(&mut self, frame_index: u64) {
        let current = self
            .best
            .as_ref()
            .and_then(|key| self.records.get_key_value(key));

        let mut winner = current;
        for (key, record) in &self.records {
            let replace = match winner {
                None => record.count > 0,
                Some((winner_key, top)) => {
                    record.count > top.count
                        || (record.count == top.count
                            && current.map(|(k, _)| k) != Some(winner_key)
                            && record.first_seen_order < top.first_seen_order)
                }
            };
            if replace {
                winner = Some((key, record));
            }
        }

        let new_best = winner.map(|(key, _)| key.clone());
        let best_count = winner.map_or(0, |(_, record)| record.count);
        if new_best != self.best {
            debug!(
                "Frame {}: leading candidate {:?} -> {:?} (count {})",
                frame_index, self.best, new_best, best_count
            );
        }
        self.best = new_best;
        self.best_count = best_count;
    }

    /// 最佳记录计数达到阈值时返回该字段
    pub fn stable_value(&self) -> Option<ExtractedField> {
        match &self.best {
            Some(key) if self.best_count >= STABLE_COUNT => Some(key.clone().into()),
            _ => None,
        }
    }

    pub fn reset(&mut self, key: &FieldKey) {
        self.records.remove(key);
        if self.best.as_ref() == Some(key) {
            self.best = None;
            self.best_count = 0;
        }
    }

    /// 丢弃全部状态，用于重新开始一次扫描
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn best(&self) -> Option<(&FieldKey, u32)> {
        self.best.as_ref().map(|key| (key, self.best_count))
    }

    pub fn record(&self, key: &FieldKey) -> Option<&ObservationRecord> {
        self.records.get(key)
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn tracked_len(&self) -> usize {
        self.records.len()
    }
}
