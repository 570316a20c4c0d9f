//! 確認ダイアログの Outbound ポート
//!
//! usecase は stdin/stderr に直接触れず、この trait 経由で確認を取る。

use crate::domain::Approval;

pub trait Confirmation: Send + Sync {
    /// 破壊的操作の前に確認する。既定は拒否
    fn confirm(&self, title: &str, message: &str) -> Approval;
}
