//! # 通知ユースケース
//!
//! 返品ステータス変更時に、従業員へのメールと顧客へのメール・SMS を送る。

mod return_status;
mod template_renderer;

pub use return_status::ReturnStatusNotifier;
pub use template_renderer::{Locale, TemplateRenderer, TeraTemplateRenderer, template_key};
