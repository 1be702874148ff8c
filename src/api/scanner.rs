//! 付款单扫描器

use crate::core::slip::{extract, ScanConfig, ScanError, ScanSession, ScanStats, StableField};
use flutter_rust_bridge::frb;
use log::info;
use std::sync::{Mutex, MutexGuard};

/// 付款单扫描器 - 逐帧抽取并稳定 OCR 参考号、金额、Bankgiro 账号
///
/// ```dart
/// final scanner = PaymentSlipScanner.create();
/// final field = await scanner.processFrame(lines: recognizedLines);
/// if (field != null) showField(field);
/// ```
#[frb(opaque)]
pub struct PaymentSlipScanner {
    session: Mutex<ScanSession>,
}

impl PaymentSlipScanner {
    /// 使用默认配置创建
    #[frb(sync)]
    pub fn create() -> Self {
        crate::init_logging();
        info!("🧾 PaymentSlipScanner: created");
        Self {
            session: Mutex::new(ScanSession::new()),
        }
    }

    /// 使用 JSON 配置创建
    #[frb(sync)]
    pub fn create_with_config(config_json: String) -> Result<Self, ScanError> {
        crate::init_logging();
        let config = ScanConfig::from_json(&config_json)?;
        info!("🧾 PaymentSlipScanner: created with {:?}", config);
        Ok(Self {
            session: Mutex::new(ScanSession::with_config(config)),
        })
    }

    fn session(&self) -> Result<MutexGuard<'_, ScanSession>, ScanError> {
        self.session.lock().map_err(|_| ScanError::Poisoned)
    }

    /// 处理一帧的识别行，字段稳定时返回
    #[frb]
    pub fn process_frame(&self, lines: Vec<String>) -> Result<Option<StableField>, ScanError> {
        Ok(self.session()?.process_frame(lines.as_slice()))
    }

    /// 批量处理多帧，按帧顺序返回所有稳定字段
    #[frb]
    pub fn process_batch(&self, frames: Vec<Vec<String>>) -> Result<Vec<StableField>, ScanError> {
        Ok(self.session()?.process_batch(&frames))
    }

    /// 每种类型最近一次稳定的取值
    #[frb(sync)]
    pub fn found_fields(&self) -> Result<Vec<StableField>, ScanError> {
        Ok(self.session()?.found_fields().to_vec())
    }

    #[frb(sync)]
    pub fn is_complete(&self) -> Result<bool, ScanError> {
        Ok(self.session()?.is_complete())
    }

    /// 获取扫描统计
    #[frb(sync, getter)]
    pub fn stats(&self) -> Result<ScanStats, ScanError> {
        Ok(self.session()?.stats())
    }

    /// 重置状态
    #[frb(sync)]
    pub fn reset(&self) -> Result<(), ScanError> {
        self.session()?.reset();
        Ok(())
    }
}

impl Drop for PaymentSlipScanner {
    fn drop(&mut self) {
        info!("🗑️ PaymentSlipScanner: released");
    }
}

/// 单行抽取，不经过时序稳定
#[frb(sync)]
pub fn extract_field(line: String) -> Option<StableField> {
    extract(&line).map(|field| StableField {
        value: field.value,
        kind: field.kind,
        frame_index: 0,
    })
}
