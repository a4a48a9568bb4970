//! # ユースケース層
//!
//! - [`notification`]: 返品ステータス変更通知

pub mod notification;
