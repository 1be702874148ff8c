//! 付款单（giro 单）字段识别
//!
//! 核心策略：
//! 1. 字段抽取 - 按优先级正则匹配单行 OCR 文本，并纠正易混淆字符
//! 2. 时序稳定 - 跨帧统计同一取值的出现次数，足够稳定后才上报
//! 3. 上报即重置 - 同一取值需重新累计才会再次上报

pub mod config;
pub mod correction;
pub mod error;
pub mod extractor;
pub mod session;
pub mod stabilizer;

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::ops::Range;

pub use config::ScanConfig;
pub use correction::{correct_char, correct_text, AllowedChars};
pub use error::ScanError;
pub use extractor::{extract, extract_frame, extract_frame_with, extract_kind, extract_with};
pub use session::{ScanSession, ScanStats, StableField};
pub use stabilizer::{FieldStabilizer, ObservationRecord, EXPIRY_FRAMES, STABLE_COUNT};

/// 字段类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// OCR 参考号
    Reference,
    /// 金额，末两位只能是 00 或 50
    Amount,
    /// Bankgiro 账号
    AccountNumber,
}

impl FieldKind {
    /// 抽取时的尝试顺序，先匹配者胜出
    pub const PRIORITY: [FieldKind; 3] = [
        FieldKind::AccountNumber,
        FieldKind::Reference,
        FieldKind::Amount,
    ];

    pub fn allowed_chars(self) -> AllowedChars {
        match self {
            FieldKind::AccountNumber => AllowedChars::DIGITS_HASH,
            FieldKind::Reference => AllowedChars::DIGITS_HASH_SPACE,
            FieldKind::Amount => AllowedChars::DIGITS_SPACE,
        }
    }
}

/// 跟踪键：只看取值与类型
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldKey {
    pub value: String,
    pub kind: FieldKind,
}

/// 单行文本中抽取出的字段
///
/// 相等性与哈希只比较 `(value, kind)`，`span` 仅供调用方定位使用。
#[derive(Debug, Clone)]
pub struct ExtractedField {
    /// 匹配文本在源行中的字节区间
    pub span: Range<usize>,
    /// 纠正后的文本
    pub value: String,
    pub kind: FieldKind,
}

impl ExtractedField {
    pub fn key(&self) -> FieldKey {
        FieldKey {
            value: self.value.clone(),
            kind: self.kind,
        }
    }
}

impl From<FieldKey> for ExtractedField {
    fn from(key: FieldKey) -> Self {
        let len = key.value.len();
        Self {
            span: 0..len,
            value: key.value,
            kind: key.kind,
        }
    }
}

impl PartialEq for ExtractedField {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.kind == other.kind
    }
}

impl Eq for ExtractedField {}

impl Hash for ExtractedField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
        self.kind.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_ignores_span() {
        let a = ExtractedField {
            span: 0..11,
            value: "1234567#89#".to_string(),
            kind: FieldKind::AccountNumber,
        };
        let b = ExtractedField {
            span: 4..15,
            ..a.clone()
        };
        assert_eq!(a, b);

        let set: HashSet<_> = [a.clone(), b].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert_eq!(a.key(), set.iter().next().unwrap().key());
    }

    #[test]
    fn test_equality_respects_kind() {
        let a = ExtractedField {
            span: 0..6,
            value: "100 50".to_string(),
            kind: FieldKind::Amount,
        };
        let b = ExtractedField {
            kind: FieldKind::Reference,
            ..a.clone()
        };
        assert_ne!(a, b);
        assert_ne!(a.key(), b.key());
    }
}
