//! 学習コンテンツの取得

use crate::domain::{LearningSection, SECTIONS};
use common::error::Error;

pub struct LearningUseCase;

impl LearningUseCase {
    pub fn sections(&self) -> &'static [LearningSection] {
        SECTIONS
    }

    /// 1 始まりの番号で 1 セクション取得する
    pub fn section(&self, number: usize) -> Result<&'static LearningSection, Error> {
        number
            .checked_sub(1)
            .and_then(|i| SECTIONS.get(i))
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "Section {} does not exist (1-{})",
                    number,
                    SECTIONS.len()
                ))
            })
    }
}
