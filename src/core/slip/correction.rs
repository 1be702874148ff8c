//! OCR 易混淆字符纠正

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// 单个字符最多替换次数，覆盖 `s -> S -> 5` 这类两跳链
const MAX_SUBSTITUTIONS: usize = 2;

/// 形近字符替换表
static CONFUSION_TABLE: Lazy<HashMap<char, char>> = Lazy::new(|| {
    HashMap::from([
        ('s', 'S'),
        ('S', '5'),
        ('5', 'S'),
        ('o', 'O'),
        ('Q', 'O'),
        ('O', '0'),
        ('0', 'O'),
        ('l', 'I'),
        ('I', '1'),
        ('1', 'I'),
        ('B', '8'),
        ('8', 'B'),
    ])
});

/// 字段允许出现的字符集合
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowedChars(&'static str);

impl AllowedChars {
    pub const DIGITS_HASH: AllowedChars = AllowedChars("0123456789#");
    pub const DIGITS_HASH_SPACE: AllowedChars = AllowedChars("0123456789# ");
    pub const DIGITS_SPACE: AllowedChars = AllowedChars("0123456789 ");

    pub fn contains(&self, c: char) -> bool {
        self.0.contains(c)
    }

    pub fn contains_all(&self, text: &str) -> bool {
        text.chars().all(|c| self.contains(c))
    }
}

/// 纠正单个字符；替换不到允许集合内则返回 `None`
pub fn correct_char(c: char, allowed: AllowedChars) -> Option<char> {
    let mut current = c;
    let mut hops = 0;

    while !allowed.contains(current) && hops < MAX_SUBSTITUTIONS {
        match CONFUSION_TABLE.get(&current) {
            Some(&next) => {
                current = next;
                hops += 1;
            }
            None => break,
        }
    }

    allowed.contains(current).then_some(current)
}

/// 逐字符纠正整段文本，任一字符无法纠正则整段作废
pub fn correct_text(text: &str, allowed: AllowedChars) -> Option<String> {
    text.chars().map(|c| correct_char(c, allowed)).collect()
}
