use super::error::ScanError;
use super::FieldKind;
use serde::{Deserialize, Serialize};

/// 扫描配置
///
/// 稳定阈值与过期窗口是固定策略，不在此处配置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// 需要识别的字段类型
    pub enabled_kinds: Vec<FieldKind>,
    /// 所有类型都找到后忽略后续帧
    pub stop_when_complete: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            enabled_kinds: FieldKind::PRIORITY.to_vec(),
            stop_when_complete: false,
        }
    }
}

impl ScanConfig {
    /// 只识别账号和金额，适用于参考号手工填写的场景
    pub fn without_reference() -> Self {
        Self {
            enabled_kinds: vec![FieldKind::AccountNumber, FieldKind::Amount],
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ScanError> {
        let config: ScanConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        if self.enabled_kinds.is_empty() {
            return Err(ScanError::InvalidConfig(
                "enabled_kinds must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_enabled(&self, kind: FieldKind) -> bool {
        self.enabled_kinds.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_all_kinds() {
        let config = ScanConfig::default();
        assert!(config.is_enabled(FieldKind::Reference));
        assert!(config.is_enabled(FieldKind::Amount));
        assert!(config.is_enabled(FieldKind::AccountNumber));
        assert!(!config.stop_when_complete);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = ScanConfig::from_json(r#"{"stop_when_complete": true}"#).unwrap();
        assert!(config.stop_when_complete);
        assert_eq!(config.enabled_kinds.len(), 3);

        let config = ScanConfig::from_json(r#"{"enabled_kinds": ["Amount"]}"#).unwrap();
        assert_eq!(config.enabled_kinds, vec![FieldKind::Amount]);
    }

    #[test]
    fn test_from_json_rejects_empty_kinds() {
        let result = ScanConfig::from_json(r#"{"enabled_kinds": []}"#);
        assert!(matches!(result, Err(ScanError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_json_malformed() {
        let result = ScanConfig::from_json("{enabled_kinds");
        assert!(matches!(result, Err(ScanError::Config(_))));

        let result = ScanConfig::from_json(r#"{"enabled_kinds": ["Iban"]}"#);
        assert!(matches!(result, Err(ScanError::Config(_))));
    }

    #[test]
    fn test_without_reference() {
        let config = ScanConfig::without_reference();
        assert!(!config.is_enabled(FieldKind::Reference));
        assert!(config.is_enabled(FieldKind::AccountNumber));
    }
}
