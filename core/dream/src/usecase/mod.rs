pub(crate) mod ad_scheduler;
pub(crate) mod diary;
pub(crate) mod interpret;
pub(crate) mod learning;
#[cfg(test)]
pub(crate) mod test_support;

pub(crate) use ad_scheduler::AdScheduler;
pub(crate) use diary::{DeleteOutcome, DiaryBrowser, DiaryUseCase};
pub(crate) use interpret::{InterpretOutcome, InterpretUseCase};
pub(crate) use learning::LearningUseCase;
