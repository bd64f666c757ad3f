//! Storage keys for uploaded photos: `<epoch-millis>-<random-base36>.<ext>`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

const SUFFIX_LEN: usize = 6;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of the random part of a key.
pub trait SuffixSource: Send + Sync {
    fn next_u64(&self) -> u64;
}

#[derive(Debug, Clone, Copy)]
pub struct UuidSuffixSource;

impl SuffixSource for UuidSuffixSource {
    fn next_u64(&self) -> u64 {
        Uuid::new_v4().as_u64_pair().0
    }
}

#[derive(Clone)]
pub struct ObjectKeyGenerator {
    clock: Arc<dyn Clock>,
    suffixes: Arc<dyn SuffixSource>,
}

impl Default for ObjectKeyGenerator {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidSuffixSource))
    }
}

impl ObjectKeyGenerator {
    pub fn new(clock: Arc<dyn Clock>, suffixes: Arc<dyn SuffixSource>) -> Self {
        Self { clock, suffixes }
    }

    pub fn generate(&self, extension: &str) -> String {
        let millis = self.clock.now().timestamp_millis();
        let suffix = to_base36(self.suffixes.next_u64(), SUFFIX_LEN);
        format!("{millis}-{suffix}.{extension}")
    }
}

/// Lowest `len` base-36 digits of `value`, zero padded.
fn to_base36(mut value: u64, len: usize) -> String {
    let mut digits = vec![b'0'; len];
    for slot in digits.iter_mut().rev() {
        *slot = BASE36[(value % 36) as usize];
        value /= 36;
    }
    digits.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    struct FixedSuffix(u64);

    impl SuffixSource for FixedSuffix {
        fn next_u64(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn key_combines_millis_suffix_and_extension() {
        let at = Utc.with_ymd_and_hms(2026, 1, 15, 8, 30, 0).unwrap();
        let generator = ObjectKeyGenerator::new(Arc::new(FixedClock(at)), Arc::new(FixedSuffix(35)));
        assert_eq!(
            generator.generate("jpg"),
            format!("{}-00000z.jpg", at.timestamp_millis())
        );
    }

    #[test]
    fn base36_keeps_low_digits() {
        assert_eq!(to_base36(0, 6), "000000");
        assert_eq!(to_base36(36, 6), "000010");
        assert_eq!(to_base36(36u64.pow(6) + 1, 6), "000001");
    }

    #[test]
    fn default_generator_produces_well_formed_keys() {
        let key = ObjectKeyGenerator::default().generate("png");
        let (millis, rest) = key.split_once('-').expect("dash");
        assert!(millis.parse::<i64>().is_ok());
        let (suffix, ext) = rest.split_once('.').expect("dot");
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.bytes().all(|b| BASE36.contains(&b)));
        assert_eq!(ext, "png");
    }
}
