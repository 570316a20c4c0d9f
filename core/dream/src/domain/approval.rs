//! 確認ダイアログの結果

/// 確認結果（Approved: 実行許可、Denied: 拒否）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approval {
    /// ユーザーが許可した
    Approved,
    /// ユーザーが拒否した（既定）
    Denied,
}

impl Approval {
    pub fn is_approved(self) -> bool {
        self == Self::Approved
    }
}
