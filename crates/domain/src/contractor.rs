//! # 顧客（Contractor）
//!
//! 返品ステータス変更の通知を受け取る顧客のプロファイル。
//! 名前に反して従業員ではなくエンドユーザー側の取引先を表す。
//!
//! ## 設計方針
//!
//! - **連絡先は任意**: メールアドレス・携帯電話番号はどちらも未登録でありうる
//! - **空文字は未登録扱い**: 外部システムが空文字を返すケースを
//!   [`Contractor::contact_email`] / [`Contractor::contact_mobile`] で吸収する

use serde::{Deserialize, Serialize};

define_int_id! {
    /// 顧客 ID
    pub struct ContractorId;
}

/// 顧客プロファイル
///
/// `ContractorDirectory` が所有・返却し、通知処理の間だけ参照される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contractor {
    pub id:     ContractorId,
    pub name:   String,
    pub email:  Option<String>,
    pub mobile: Option<String>,
}

impl Contractor {
    /// 通知に使えるメールアドレスを返す（未登録・空文字なら `None`）
    pub fn contact_email(&self) -> Option<&str> {
        non_empty(self.email.as_deref())
    }

    /// 通知に使える携帯電話番号を返す（未登録・空文字なら `None`）
    pub fn contact_mobile(&self) -> Option<&str> {
        non_empty(self.mobile.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn make_contractor(email: Option<&str>, mobile: Option<&str>) -> Contractor {
        Contractor {
            id:     ContractorId::new(5),
            name:   "山田商店".to_string(),
            email:  email.map(str::to_string),
            mobile: mobile.map(str::to_string),
        }
    }

    #[rstest]
    #[case(Some("c@x.com"), Some("c@x.com"))]
    #[case(Some(""), None)]
    #[case(None, None)]
    fn contact_emailは空文字を未登録として扱う(
        #[case] email: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let contractor = make_contractor(email, None);

        assert_eq!(contractor.contact_email(), expected);
    }

    #[rstest]
    #[case(Some("+10000000000"), Some("+10000000000"))]
    #[case(Some(""), None)]
    #[case(None, None)]
    fn contact_mobileは空文字を未登録として扱う(
        #[case] mobile: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let contractor = make_contractor(None, mobile);

        assert_eq!(contractor.contact_mobile(), expected);
    }
}
