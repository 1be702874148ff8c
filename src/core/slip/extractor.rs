//! 单行 OCR 文本 -> 结构化字段

use super::correction::correct_text;
use super::{ExtractedField, FieldKind};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Bankgiro 账号：非零数字 + 6~7 位数字 + `#` + 2 位数字 + `#`
static ACCOUNT_NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[1-9]\d{6,7}#\d{2}#").expect("account number pattern"));

/// 参考号：3~20 位数字 + 空白 + `#`
static REFERENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{3,20}\s#").expect("reference pattern"));

/// 金额：1~7 位整数 + 空白 + `00`/`50`
static AMOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,7}\s[05]0").expect("amount pattern"));

const REFERENCE_MIN_LEN: usize = 5;
const REFERENCE_MAX_LEN: usize = 25;

fn pattern_for(kind: FieldKind) -> &'static Regex {
    match kind {
        FieldKind::AccountNumber => &ACCOUNT_NUMBER_PATTERN,
        FieldKind::Reference => &REFERENCE_PATTERN,
        FieldKind::Amount => &AMOUNT_PATTERN,
    }
}

/// 按单一类型尝试抽取
pub fn extract_kind(line: &str, kind: FieldKind) -> Option<ExtractedField> {
    let found = pattern_for(kind).find(line)?;
    let raw = found.as_str();

    if kind == FieldKind::Reference {
        let len = raw.chars().count();
        if len <= REFERENCE_MIN_LEN || len >= REFERENCE_MAX_LEN {
            return None;
        }
    }

    let value = correct_text(raw, kind.allowed_chars())?;

    Some(ExtractedField {
        span: found.range(),
        value,
        kind,
    })
}

/// 按优先级依次尝试各类型，返回第一个匹配且纠正成功的字段
pub fn extract(line: &str) -> Option<ExtractedField> {
    extract_with(line, &FieldKind::PRIORITY)
}

/// 只尝试 `kinds` 中的类型，顺序仍按固定优先级
pub fn extract_with(line: &str, kinds: &[FieldKind]) -> Option<ExtractedField> {
    FieldKind::PRIORITY
        .into_iter()
        .filter(|kind| kinds.contains(kind))
        .find_map(|kind| extract_kind(line, kind))
}

/// 抽取一帧内所有行，同一 `(value, kind)` 只保留首次出现
pub fn extract_frame<S: AsRef<str>>(lines: &[S]) -> Vec<ExtractedField> {
    extract_frame_with(lines, &FieldKind::PRIORITY)
}

pub fn extract_frame_with<S: AsRef<str>>(lines: &[S], kinds: &[FieldKind]) -> Vec<ExtractedField> {
    let mut seen = HashSet::new();
    lines
        .iter()
        .filter_map(|line| extract_with(line.as_ref(), kinds))
        .filter(|field| seen.insert(field.key()))
        .collect()
}
