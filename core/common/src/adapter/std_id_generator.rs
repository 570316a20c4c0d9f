//! RecordId を生成する IdGenerator の標準実装（Clock + シーケンス）
//!
//! 形式: base62(0-9,A-Z,a-z) 8文字。値 = (ms since 2020-01-01)<<8 | seq(0..255)。辞書順＝数値順。

use crate::domain::RecordId;
use crate::ports::outbound::{Clock, IdGenerator};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const EPOCH_MS: u64 = 1577836800000; // 2020-01-01 00:00:00 UTC
const SEQ_BITS: u64 = 8;
const SEQ_MASK: u64 = (1 << SEQ_BITS) - 1; // 0..255
const BASE: u64 = 62;
const WIDTH: usize = 8;
const MAX_VAL: u64 = BASE.pow(WIDTH as u32) - 1;

/// 0-9, A-Z, a-z の順で辞書順＝数値順になるbase62
const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Clock + シーケンスで RecordId を生成する標準実装
///
/// 同一 ms 内は seq で単調増加する。seq が尽きたら時計が進むまで待つ。
pub struct StdIdGenerator {
    clock: Arc<dyn Clock>,
    last: AtomicU64,
}

impl StdIdGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for StdIdGenerator {
    fn next_id(&self) -> RecordId {
        loop {
            let ms_rel = self.clock.now_ms().saturating_sub(EPOCH_MS);
            let base = (ms_rel << SEQ_BITS).min(MAX_VAL);
            let prev = self.last.load(Ordering::SeqCst);
            let next = if (prev >> SEQ_BITS) < ms_rel {
                base
            } else {
                if (prev & SEQ_MASK) == SEQ_MASK {
                    std::thread::yield_now();
                    continue;
                }
                (prev + 1).min(MAX_VAL)
            };
            if self
                .last
                .compare_exchange(prev, next, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return RecordId::new(to_base62(next));
            }
        }
    }
}

fn to_base62(mut n: u64) -> String {
    let mut buf = [0u8; WIDTH];
    for slot in buf.iter_mut().rev() {
        *slot = ALPHABET[(n % BASE) as usize];
        n /= BASE;
    }
    buf.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::FixedClock;

    #[test]
    fn test_id_is_fixed_width_base62() {
        let gen = StdIdGenerator::new(Arc::new(FixedClock::new(1_704_067_200_000)));
        let id = gen.next_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_ids_within_same_ms_are_unique_and_ordered() {
        let gen = StdIdGenerator::new(Arc::new(FixedClock::new(1_704_067_200_000)));
        let a = gen.next_id();
        let b = gen.next_id();
        let c = gen.next_id();
        assert!(a < b && b < c, "{} {} {}", a, b, c);
    }

    #[test]
    fn test_ids_follow_clock_order() {
        let clock = Arc::new(FixedClock::new(1_704_067_200_000));
        let gen = StdIdGenerator::new(Arc::clone(&clock) as Arc<dyn Clock>);
        let a = gen.next_id();
        clock.advance(1);
        let b = gen.next_id();
        assert!(a < b);
    }

    #[test]
    fn test_to_base62_zero_padded() {
        assert_eq!(to_base62(0), "00000000");
        assert_eq!(to_base62(61), "0000000z");
        assert_eq!(to_base62(62), "00000010");
    }
}
